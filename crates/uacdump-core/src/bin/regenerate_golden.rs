use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Deserialize;
use uacdump_core::hex::parse_hex_bytes;
use uacdump_core::{
    AudioInterface, Dumper, ProtocolGeneration, Renderer, SchemaRegistry, StringTable,
    TerminalTypes,
};

#[derive(Deserialize)]
struct GoldenCase {
    interface: AudioInterface,
    generation: ProtocolGeneration,
    #[serde(default)]
    strings: BTreeMap<u64, String>,
}

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() || !path.join("input.hex").exists() {
            continue;
        }
        regenerate_one(&path)?;
    }

    Ok(())
}

fn regenerate_one(dir: &Path) -> Result<(), String> {
    let case_path = dir.join("case.json");
    let case_json = fs::read_to_string(&case_path)
        .map_err(|err| format!("failed to read {}: {}", case_path.display(), err))?;
    let case: GoldenCase = serde_json::from_str(&case_json)
        .map_err(|err| format!("invalid {}: {}", case_path.display(), err))?;

    let input_path = dir.join("input.hex");
    let input = fs::read_to_string(&input_path)
        .map_err(|err| format!("failed to read {}: {}", input_path.display(), err))?;
    let bytes = parse_hex_bytes(&input)
        .map_err(|err| format!("invalid {}: {}", input_path.display(), err))?;

    let registry = SchemaRegistry::builtin().map_err(|err| err.to_string())?;
    let strings: StringTable = case.strings.into_iter().collect();
    let dumper = Dumper::new(registry, Renderer::new(&strings, &TerminalTypes));

    let mut text = String::new();
    for (offset, result) in dumper.render_all(case.interface, case.generation, &bytes) {
        match result {
            Ok(rendered) => text.push_str(&rendered),
            Err(err) if err.is_unsupported() => {
                let _ = writeln!(text, "note: offset {offset}: {err}");
            }
            Err(err) => {
                let _ = writeln!(text, "error: offset {offset}: {err}");
            }
        }
    }

    let output = dir.join("expected.txt");
    fs::write(&output, text)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
