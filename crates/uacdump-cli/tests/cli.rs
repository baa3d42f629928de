use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("uacdump"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden_input(case: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(case)
        .join("input.hex")
}

const CLOCK_SOURCE: [u8; 8] = [0x08, 0x24, 0x0a, 0x01, 0x03, 0x01, 0x00, 0x00];

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("decode").and(contains("descriptor")).and(contains("kinds")));
    cmd().arg("descriptor").arg("--help").assert().success();
}

#[test]
fn version_includes_build_info() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn decode_renders_clock_source() {
    cmd()
        .args(["decode", "--kind", "clock-source", "--uac", "2"])
        .args(["01", "03", "01", "00", "00"])
        .assert()
        .success()
        .stdout(
            contains("bmAttributes")
                .and(contains("Internal programmable clock"))
                .and(contains("Clock Frequency Control (read-only)")),
        );
}

#[test]
fn decode_honours_depth_and_strings() {
    cmd()
        .args(["decode", "--kind", "clock-source", "--uac", "uac2", "--depth", "2"])
        .args(["--string", "4=Crystal"])
        .arg("0x01,0x01,0x07,0x00,0x04")
        .assert()
        .success()
        .stdout(contains("    bClockID").and(contains("4 Crystal")));
}

#[test]
fn bad_hex_shows_error_and_hint() {
    cmd()
        .args(["decode", "--kind", "header", "--uac", "1", "0a", "zz"])
        .assert()
        .code(2)
        .stderr(contains("error: invalid hex input").and(contains("hint:")));
}

#[test]
fn unknown_kind_is_rejected_by_parser() {
    cmd()
        .args(["decode", "--kind", "widget", "--uac", "1", "00"])
        .assert()
        .failure()
        .stderr(contains("unknown descriptor kind"));
}

#[test]
fn unsupported_pair_is_a_note() {
    cmd()
        .args(["decode", "--kind", "clock-source", "--uac", "1", "01", "01"])
        .assert()
        .success()
        .stdout(contains("note: UAC1 Clock Source: not yet supported"));
}

#[test]
fn unsupported_pair_in_json() {
    let output = cmd()
        .args(["decode", "--kind", "effect-unit", "--uac", "3", "--json", "00"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["status"], "unsupported");
    assert_eq!(json["message"], "UAC3 Effect Unit: not yet supported");
}

#[test]
fn underrun_fails_with_hint() {
    cmd()
        .args(["decode", "--kind", "input-terminal", "--uac", "1", "01", "01", "02"])
        .assert()
        .code(2)
        .stderr(contains("bAssocTerminal").and(contains("hint:")));
}

#[test]
fn decode_outputs_json() {
    let output = cmd()
        .args(["decode", "--kind", "clock-source", "--uac", "2", "--json"])
        .args(["01", "03", "01", "00", "00"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["schema"], "UAC2 Clock Source");
    assert_eq!(json["consumed"], 5);
    let fields = json["fields"].as_array().expect("fields");
    assert_eq!(fields.len(), 5);
    assert_eq!(fields[1]["name"], "bmAttributes");
    assert_eq!(fields[1]["value"]["type"], "custom");
    assert_eq!(fields[2]["value"]["controls"][0]["access"], "read-only");
}

#[test]
fn pretty_requires_json() {
    cmd()
        .args(["decode", "--kind", "header", "--uac", "1", "--pretty", "00"])
        .assert()
        .failure();
}

#[test]
fn descriptor_from_bytes() {
    cmd()
        .args(["descriptor", "--interface", "control", "--uac", "2"])
        .arg("08 24 0a 01 03 01 00 00")
        .assert()
        .success()
        .stdout(
            contains("UAC2 AudioControl Interface Descriptor:")
                .and(contains("(Clock Source)"))
                .and(contains("iClockSource           0 (none)")),
        );
}

#[test]
fn descriptor_without_input_is_an_error() {
    cmd()
        .args(["descriptor", "--interface", "control", "--uac", "2"])
        .assert()
        .code(2)
        .stderr(contains("error: no descriptor bytes given").and(contains("hint:")));
}

#[test]
fn descriptor_continues_after_failure() {
    cmd()
        .args(["descriptor", "--interface", "streaming", "--uac", "1", "--file"])
        .arg(golden_input("uac1_as_interface"))
        .assert()
        .code(2)
        .stdout(contains("wFormatTag         PCM").and(contains("IEC1937_MPEG-1_Layer1")))
        .stderr(
            contains("error: offset 7: unknown UAC1 streaming descriptor subtype 0x02")
                .and(contains("1 of 3 descriptors could not be decoded")),
        );
}

#[test]
fn descriptor_json_reports_each_entry() {
    let output = cmd()
        .args(["descriptor", "--interface", "streaming", "--uac", "1", "--json", "--file"])
        .arg(golden_input("uac1_as_interface"))
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    let entries = json.as_array().expect("entries");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["offset"], 0);
    assert_eq!(entries[0]["status"], "decoded");
    assert_eq!(entries[0]["descriptor"]["kind"], "as-interface");
    assert_eq!(entries[1]["offset"], 7);
    assert_eq!(entries[1]["status"], "failed");
    assert_eq!(entries[2]["offset"], 15);
}

#[test]
fn descriptor_unsupported_is_not_a_failure() {
    cmd()
        .args(["descriptor", "--interface", "control", "--uac", "3", "03 24 0b"])
        .assert()
        .success()
        .stdout(contains("note: offset 0: UAC3 Clock Source: not yet supported"));
}

#[test]
fn descriptor_file_raw_binary() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("clock.bin");
    std::fs::write(&path, CLOCK_SOURCE).expect("write");

    cmd()
        .args(["descriptor", "--interface", "control", "--uac", "2", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Internal programmable clock"));
}

#[test]
fn descriptor_file_glob_single_match() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::write(temp.path().join("clock.hex"), "08 24 0a 01 03 01 00 00\n").expect("write");
    let pattern = temp.path().join("clo*.hex");

    cmd()
        .args(["descriptor", "--interface", "control", "--uac", "2", "--file"])
        .arg(pattern)
        .assert()
        .success()
        .stdout(contains("bClockID           0x01"));
}

#[test]
fn descriptor_file_glob_multiple_matches() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::write(temp.path().join("a.hex"), "03 24 01").expect("write");
    std::fs::write(temp.path().join("b.hex"), "03 24 01").expect("write");
    let pattern = temp.path().join("*.hex");

    cmd()
        .args(["descriptor", "--interface", "control", "--uac", "2", "--file"])
        .arg(pattern)
        .assert()
        .code(2)
        .stderr(contains("multiple files match pattern").and(contains("hint:")));
}

#[test]
fn descriptor_missing_file() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .args(["descriptor", "--interface", "endpoint", "--uac", "1", "--file"])
        .arg(temp.path().join("missing.hex"))
        .assert()
        .code(2)
        .stderr(contains("input file not found").and(contains("hint:")));
}

#[test]
fn kinds_prints_support_matrix() {
    cmd()
        .arg("kinds")
        .assert()
        .success()
        .stdout(
            contains("clock-source")
                .and(contains("Sample Rate Converter"))
                .and(contains("isochronous-endpoint")),
        );
}
