use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use glob::glob;
use serde::Serialize;
use uacdump_core::hex::{is_hex_text, parse_hex_bytes};
use uacdump_core::{
    AudioInterface, ClassRecord, DescriptorKind, DumpError, Dumper, ProtocolGeneration, Renderer,
    SchemaRegistry, StringTable, TerminalTypes,
};

mod logger;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("UACDUMP_BUILD_COMMIT"),
    " ",
    env!("UACDUMP_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  uacdump decode --kind clock-source --uac 2 01 03 01 00 00\n  uacdump descriptor --interface control --uac 1 0a 24 06 02 01 02 03 00 00 00\n  uacdump descriptor --interface streaming --uac 2 --file as_descriptors.hex --json\n  uacdump kinds";

const HEX_HINT: &str = "pass bytes like `0a 24 01`, `0x0a,0x24,0x01` or `0a2401`";

#[derive(Parser, Debug)]
#[command(name = "uacdump")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode USB Audio-Class (UAC1/UAC2/UAC3) class-specific descriptors.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a descriptor body (the bytes after bLength, bDescriptorType, bDescriptorSubtype).
    #[command(
        after_help = "Examples:\n  uacdump decode --kind clock-source --uac 2 01 03 01 00 00\n  uacdump decode --kind as-interface --uac 1 --json 0x01,0x01,0x01,0x00"
    )]
    Decode {
        /// Descriptor kind (see `uacdump kinds`)
        #[arg(long)]
        kind: DescriptorKind,

        /// Audio Device Class generation: 1, 2 or 3
        #[arg(long = "uac", value_name = "GENERATION")]
        generation: ProtocolGeneration,

        /// Base indent level of the rendered fields
        #[arg(long, default_value_t = 0)]
        depth: usize,

        #[command(flatten)]
        output: OutputArgs,

        /// Body bytes as hex
        #[arg(required = true, value_name = "HEX")]
        bytes: Vec<String>,
    },
    /// Decode complete class-specific descriptors, one after another.
    #[command(
        after_help = "Examples:\n  uacdump descriptor --interface control --uac 2 08 24 0a 01 03 01 00 00\n  uacdump descriptor --interface endpoint --uac 1 --file 'dumps/ep*.bin'"
    )]
    Descriptor {
        /// Where the descriptors appear: control, streaming or endpoint
        #[arg(long)]
        interface: AudioInterface,

        /// Audio Device Class generation: 1, 2 or 3
        #[arg(long = "uac", value_name = "GENERATION")]
        generation: ProtocolGeneration,

        /// Read descriptors from a hex text or raw binary file (glob allowed)
        #[arg(long, value_name = "PATH", conflicts_with = "bytes")]
        file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,

        /// Descriptor bytes as hex
        #[arg(value_name = "HEX")]
        bytes: Vec<String>,
    },
    /// List descriptor kinds and the generations that describe them.
    Kinds,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Text of a string descriptor, e.g. --string 4="Line Out" (repeatable)
    #[arg(long = "string", value_name = "IDX=TEXT", value_parser = parse_string_entry)]
    strings: Vec<(u64, String)>,
}

impl OutputArgs {
    fn string_table(&self) -> StringTable {
        self.strings.iter().cloned().collect()
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String, CliError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.context("JSON serialization failed").map_err(Into::into)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logger::init(cli.verbose) {
        eprintln!("warning: logging disabled: {}", err);
    }

    let result = match cli.command {
        Commands::Decode {
            kind,
            generation,
            depth,
            output,
            bytes,
        } => cmd_decode(kind, generation, depth, &output, &bytes),
        Commands::Descriptor {
            interface,
            generation,
            file,
            output,
            bytes,
        } => cmd_descriptor(interface, generation, file.as_deref(), &output, &bytes),
        Commands::Kinds => cmd_kinds(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

/// Per-descriptor outcome in `descriptor --json` output.
#[derive(Serialize)]
struct DumpEntry {
    offset: usize,
    #[serde(flatten)]
    outcome: Outcome,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Outcome {
    Decoded { descriptor: ClassRecord },
    Unsupported { message: String },
    Failed { message: String },
}

impl From<Result<ClassRecord, DumpError>> for Outcome {
    fn from(result: Result<ClassRecord, DumpError>) -> Self {
        match result {
            Ok(descriptor) => Outcome::Decoded { descriptor },
            Err(err) if err.is_unsupported() => Outcome::Unsupported {
                message: err.to_string(),
            },
            Err(err) => Outcome::Failed {
                message: err.to_string(),
            },
        }
    }
}

fn cmd_decode(
    kind: DescriptorKind,
    generation: ProtocolGeneration,
    depth: usize,
    output: &OutputArgs,
    bytes: &[String],
) -> Result<(), CliError> {
    let data = parse_hex_args(bytes)?;
    let registry = builtin_registry()?;
    let strings = output.string_table();
    let renderer = Renderer::new(&strings, &TerminalTypes);
    let dumper = Dumper::new(registry, renderer).with_depth(depth);

    let record = match dumper.decode(kind, generation, &data) {
        Ok(record) => record,
        Err(err) if err.is_unsupported() => {
            if output.json {
                let status = Outcome::Unsupported {
                    message: err.to_string(),
                };
                println!("{}", output.to_json(&status)?);
            } else {
                println!("note: {}", err);
            }
            return Ok(());
        }
        Err(err) => {
            return Err(CliError::new(
                format!("failed to decode {} {}: {}", generation, kind, err),
                Some("check the byte count and the --kind/--uac pair".to_string()),
            ));
        }
    };
    if record.trailing > 0 {
        log::warn!("{} bytes after the last field were ignored", record.trailing);
    }

    if output.json {
        println!("{}", output.to_json(&record)?);
    } else {
        print!("{}", renderer.render(&record));
    }
    Ok(())
}

fn cmd_descriptor(
    interface: AudioInterface,
    generation: ProtocolGeneration,
    file: Option<&Path>,
    output: &OutputArgs,
    bytes: &[String],
) -> Result<(), CliError> {
    let data = match file {
        Some(path) => read_descriptor_file(path)?,
        None if bytes.is_empty() => {
            return Err(CliError::new(
                "no descriptor bytes given",
                Some("pass hex bytes or --file PATH".to_string()),
            ));
        }
        None => parse_hex_args(bytes)?,
    };
    let registry = builtin_registry()?;
    let strings = output.string_table();
    let dumper = Dumper::new(registry, Renderer::new(&strings, &TerminalTypes));

    let failed;
    let total;
    if output.json {
        let entries: Vec<DumpEntry> = dumper
            .decode_all(interface, generation, &data)
            .into_iter()
            .map(|(offset, result)| DumpEntry {
                offset,
                outcome: result.into(),
            })
            .collect();
        total = entries.len();
        failed = entries
            .iter()
            .filter(|entry| matches!(entry.outcome, Outcome::Failed { .. }))
            .count();
        println!("{}", output.to_json(&entries)?);
    } else {
        let entries = dumper.render_all(interface, generation, &data);
        total = entries.len();
        let mut count = 0;
        for (offset, result) in entries {
            match result {
                Ok(text) => print!("{}", text),
                Err(err) if err.is_unsupported() => println!("note: offset {}: {}", offset, err),
                Err(err) => {
                    count += 1;
                    eprintln!("error: offset {}: {}", offset, err);
                }
            }
        }
        failed = count;
    }

    if failed > 0 {
        return Err(CliError::new(
            format!("{} of {} descriptors could not be decoded", failed, total),
            Some("check --interface and --uac, or run with -vv for details".to_string()),
        ));
    }
    Ok(())
}

fn cmd_kinds() -> Result<(), CliError> {
    let registry = builtin_registry()?;
    println!("{:<24} {:<36} UAC1 UAC2 UAC3", "KIND", "NAME");
    for kind in DescriptorKind::ALL {
        let marks: Vec<&str> = ProtocolGeneration::ALL
            .into_iter()
            .map(|generation| {
                if registry.lookup(kind, generation).is_some() {
                    "yes"
                } else {
                    "-"
                }
            })
            .collect();
        println!(
            "{:<24} {:<36} {:<4} {:<4} {}",
            kind.slug(),
            kind.name(),
            marks[0],
            marks[1],
            marks[2]
        );
    }
    Ok(())
}

fn builtin_registry() -> Result<&'static SchemaRegistry, CliError> {
    SchemaRegistry::builtin()
        .context("built-in schema registry is invalid")
        .map_err(Into::into)
}

fn parse_string_entry(value: &str) -> Result<(u64, String), String> {
    let (index, text) = value
        .split_once('=')
        .ok_or_else(|| format!("expected IDX=TEXT, got '{}'", value))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid string index '{}'", index))?;
    Ok((index, text.to_string()))
}

fn parse_hex_args(bytes: &[String]) -> Result<Vec<u8>, CliError> {
    parse_hex_bytes(&bytes.join(" ")).map_err(|err| {
        CliError::new(
            format!("invalid hex input: {}", err),
            Some(HEX_HINT.to_string()),
        )
    })
}

fn read_descriptor_file(input: &Path) -> Result<Vec<u8>, CliError> {
    let path = resolve_input_path(input)?;
    if !path.is_file() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a hex text or raw binary descriptor dump".to_string()),
        ));
    }
    let data = fs::read(&path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    if !is_hex_text(&data) {
        log::info!("{}: reading {} raw bytes", path.display(), data.len());
        return Ok(data);
    }

    let text = String::from_utf8_lossy(&data);
    parse_hex_bytes(&text).map_err(|err| {
        CliError::new(
            format!("invalid hex in {}: {}", path.display(), err),
            Some(HEX_HINT.to_string()),
        )
    })
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let listed: Vec<String> = matches
                .iter()
                .take(3)
                .map(|path| path.display().to_string())
                .collect();
            let more = if count > 3 { ", ..." } else { "" };
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}{}",
                    pattern,
                    count,
                    listed.join(", "),
                    more
                ),
                Some("pass a single descriptor file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_entries_split_on_first_equals() {
        assert_eq!(
            parse_string_entry("4=Line = Out").unwrap(),
            (4, "Line = Out".to_string())
        );
        assert!(parse_string_entry("Line Out").is_err());
        assert!(parse_string_entry("x=Line").is_err());
    }

    #[test]
    fn hex_args_are_joined() {
        let args = vec!["0a".to_string(), "0x24,01".to_string()];
        assert_eq!(parse_hex_args(&args).unwrap(), vec![0x0a, 0x24, 0x01]);
        let err = parse_hex_args(&["zz".to_string()]).unwrap_err();
        assert!(err.hint.is_some());
    }

    #[test]
    fn glob_detection() {
        assert!(is_glob_pattern("dumps/*.hex"));
        assert!(!is_glob_pattern("dumps/ac.hex"));
    }
}
