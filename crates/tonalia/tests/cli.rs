//! End-to-end tests for the tonalia binary.
//!
//! Every command runs in a scratch directory with HOME and XDG_CONFIG_HOME
//! pointed into it, so no real user or local config leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn tonalia(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tonalia").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR");
    for var in [
        "TONALIA_TONIC",
        "TONALIA_MODE",
        "TONALIA_ARITY",
        "TONALIA_PREFER",
        "TONALIA_FORMAT",
        "TONALIA_COLOR",
        "TONALIA_LOG_LEVEL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("Failed to execute tonalia");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn scale_prints_spelling_and_steps() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .args(["scale", "C", "--mode", "aeolian", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("C Aeolian (Minor)"))
        .stdout(predicate::str::contains("Eb"))
        .stdout(predicate::str::contains("Submediant"))
        .stdout(predicate::str::contains("steps: W H W W H W W"));
}

#[test]
fn scale_json_has_eight_notes() {
    let dir = TempDir::new().unwrap();
    let json = json_output(tonalia(dir.path()).args([
        "scale",
        "G#",
        "-m",
        "harmonic-minor",
        "--format",
        "json",
    ]));
    assert_eq!(json["mode"], "harmonicMinor");
    assert_eq!(
        json["notes"],
        serde_json::json!(["G#", "A#", "B", "C#", "D#", "E", "F##", "G#"])
    );
    assert_eq!(json["steps"][5], "W+H");
}

#[test]
fn field_json_lists_chords() {
    let dir = TempDir::new().unwrap();
    let json = json_output(tonalia(dir.path()).args([
        "field", "D", "-m", "dorian", "--format", "json",
    ]));
    let chords = json["chords"].as_array().unwrap();
    assert_eq!(chords.len(), 7);
    assert_eq!(
        chords[0],
        serde_json::json!({ "degree": "i", "root": "D", "quality": "m" })
    );
    assert_eq!(chords[5]["root"], "B");
    assert_eq!(chords[5]["quality"], "dim");
}

#[test]
fn field_text_with_tetrads() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .args(["field", "A", "-m", "harmonicMinor", "-a", "tetrad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A Harmonic Minor seventh chords"))
        .stdout(predicate::str::contains("Am(maj7)"))
        .stdout(predicate::str::contains("G#°7"));
}

#[test]
fn chord_describes_tones() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .args(["chord", "C#m7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("m7 (tetrad)"))
        .stdout(predicate::str::contains("1 4 8 11"))
        .stdout(predicate::str::contains("61 64 68 71"));
}

#[test]
fn chord_rejects_unknown_suffix() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .args(["chord", "Csus4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid chord name"));
}

#[test]
fn functions_by_name() {
    let dir = TempDir::new().unwrap();
    let json = json_output(tonalia(dir.path()).args(["functions", "G7", "--format", "json"]));
    assert_eq!(json["chord"], "G7");
    let matches = json["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 10);
    assert_eq!(
        matches[0],
        serde_json::json!({
            "key": "C",
            "scale_type": "ionian",
            "scale": "Ionian (Major)",
            "degree": "V7"
        })
    );
}

#[test]
fn functions_by_degree_matches_by_name() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .args([
            "functions", "--key", "C", "--mode", "ionian", "--degree", "5", "-a", "tetrad",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("G7 functions in 10 positions"))
        .stdout(predicate::str::contains("Mixolydian"));
}

#[test]
fn functions_reports_no_matches() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .args(["functions", "Fbb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("does not occur"));
}

#[test]
fn functions_needs_a_chord() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .arg("functions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--degree"));
}

#[test]
fn variations_across_modes() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .args(["variations", "A", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Degree 5 (Dominant) of A across modes"))
        .stdout(predicate::str::contains("Eb (bV)"))
        .stdout(predicate::str::contains("Em7(b5) (vø7)"));
}

#[test]
fn variations_follow_prefer_flag() {
    let dir = TempDir::new().unwrap();
    let json = json_output(tonalia(dir.path()).args([
        "variations", "C#", "1", "--prefer", "flat", "--format", "json",
    ]));
    assert_eq!(json["tonic"], "Db");
    assert_eq!(json["variations"][0]["triad"]["root"], "Db");
}

#[test]
fn variations_rejects_degree_out_of_range() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .args(["variations", "C", "8"])
        .assert()
        .failure();
}

#[test]
fn keys_honor_flat_preference() {
    let dir = TempDir::new().unwrap();
    let json = json_output(tonalia(dir.path()).args([
        "keys", "--prefer", "flat", "--format", "json",
    ]));
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[1]["key"], "Db");
    assert_eq!(rows[1]["field"][1]["root"], "Eb");
    assert_eq!(json["prefer"], "flat");
}

#[test]
fn invalid_tonic_is_rejected() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .args(["scale", "H"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid note spelling"));
}

#[test]
fn local_config_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("tonalia.toml"),
        "[defaults]\ntonic = \"F\"\nmode = \"lydian\"\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();

    let json = json_output(tonalia(dir.path()).arg("scale"));
    assert_eq!(json["tonic"], "F");
    assert_eq!(json["mode"], "lydian");
    assert_eq!(json["notes"][3], "B");
}

#[test]
fn configured_tonic_follows_prefer_flag() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tonalia.toml"), "[defaults]\ntonic = \"C#\"\n").unwrap();

    let json = json_output(tonalia(dir.path()).args(["--prefer", "flat", "scale", "--format", "json"]));
    assert_eq!(json["tonic"], "Db");
    assert_eq!(json["notes"][0], "Db");
    assert_eq!(json["notes"][1], "Eb");

    let json = json_output(
        tonalia(dir.path())
            .env("TONALIA_PREFER", "flat")
            .args(["field", "--format", "json"]),
    );
    assert_eq!(json["tonic"], "Db");

    // An explicit tonic keeps its spelling unless the flag is given
    let json = json_output(
        tonalia(dir.path())
            .env("TONALIA_PREFER", "flat")
            .args(["scale", "C#", "--format", "json"]),
    );
    assert_eq!(json["tonic"], "C#");
}

#[test]
fn invalid_log_level_is_reported() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .env("TONALIA_LOG_LEVEL", "harmony=loud")
        .args(["scale", "C"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log level"))
        .stderr(predicate::str::contains("harmony=loud"));
}

#[test]
fn config_flag_replaces_local_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tonalia.toml"), "[defaults]\nmode = \"lydian\"\n").unwrap();
    let other = dir.path().join("other.toml");
    std::fs::write(&other, "[defaults]\nmode = \"phrygian\"\n").unwrap();

    let json = json_output(tonalia(dir.path()).args([
        "scale",
        "E",
        "--format",
        "json",
        "--config",
        other.to_str().unwrap(),
    ]));
    assert_eq!(json["mode"], "phrygian");
    assert_eq!(json["notes"][1], "F");
}

#[test]
fn config_flag_expands_home() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("alt.toml"), "[defaults]\nmode = \"mixolydian\"\n").unwrap();

    let json = json_output(tonalia(dir.path()).args([
        "scale",
        "G",
        "--format",
        "json",
        "--config=~/alt.toml",
    ]));
    assert_eq!(json["mode"], "mixolydian");
    assert_eq!(json["notes"][6], "F");
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .args(["scale", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.toml"));
}

#[test]
fn env_overrides_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tonalia.toml"), "[defaults]\nmode = \"lydian\"\n").unwrap();

    let json = json_output(
        tonalia(dir.path())
            .env("TONALIA_MODE", "dorian")
            .env("TONALIA_FORMAT", "json")
            .args(["scale", "D"]),
    );
    assert_eq!(json["mode"], "dorian");
}

#[test]
fn bad_configured_mode_only_fails_when_used() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .env("TONALIA_MODE", "bebop")
        .args(["scale", "C"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("defaults.mode"));

    tonalia(dir.path())
        .env("TONALIA_MODE", "bebop")
        .args(["scale", "C", "-m", "ionian"])
        .assert()
        .success();
}

#[test]
fn config_command_shows_sources() {
    let dir = TempDir::new().unwrap();
    tonalia(dir.path())
        .env("TONALIA_ARITY", "tetrad")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("# env: TONALIA_ARITY"))
        .stdout(predicate::str::contains("arity = \"tetrad\""))
        .stdout(predicate::str::contains("[telemetry]"));
}
