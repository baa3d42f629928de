use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

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

fn golden_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
        .join(name)
}

fn render_case(dir: &Path) -> String {
    let case_json = fs::read_to_string(dir.join("case.json")).expect("read case.json");
    let case: GoldenCase = serde_json::from_str(&case_json).expect("parse case.json");
    let input = fs::read_to_string(dir.join("input.hex")).expect("read input.hex");
    let bytes = parse_hex_bytes(&input).expect("parse input.hex");

    let registry = SchemaRegistry::builtin().expect("built-in registry");
    let strings: StringTable = case.strings.into_iter().collect();
    let dumper = Dumper::new(registry, Renderer::new(&strings, &TerminalTypes));

    let mut text = String::new();
    for (offset, result) in dumper.render_all(case.interface, case.generation, &bytes) {
        match result {
            Ok(rendered) => text.push_str(&rendered),
            Err(err) if err.is_unsupported() => {
                writeln!(text, "note: offset {offset}: {err}").unwrap();
            }
            Err(err) => writeln!(text, "error: offset {offset}: {err}").unwrap(),
        }
    }
    text
}

fn run_golden(name: &str) {
    let dir = golden_dir(name);
    let expected = fs::read_to_string(dir.join("expected.txt")).expect("read expected.txt");
    let actual = render_case(&dir);
    assert_eq!(actual, expected, "golden mismatch in {name}");
}

#[test]
fn golden_uac2_clock_source() {
    run_golden("uac2_clock_source");
}

#[test]
fn golden_uac1_feature_unit() {
    run_golden("uac1_feature_unit");
}

#[test]
fn golden_uac1_as_interface() {
    run_golden("uac1_as_interface");
}

#[test]
fn golden_uac2_mixer_unit() {
    run_golden("uac2_mixer_unit");
}

#[test]
fn golden_uac3_unsupported() {
    run_golden("uac3_unsupported");
}

#[test]
fn golden_as_interface_continues_after_unknown_subtype() {
    let text = render_case(&golden_dir("uac1_as_interface"));
    assert_eq!(text.matches("AudioStreaming Interface Descriptor:").count(), 2);
    assert!(text.contains("error: offset 7:"));
}
