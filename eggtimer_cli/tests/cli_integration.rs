use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

// Fast ticks, silent alerts and a private state directory
fn write_config(dir: &TempDir, extra: &str) -> PathBuf {
    let toml = format!(
        r#"
[timer]
tick_ms = 10
resume_gap_ms = 1000

[notifications]
enabled = false

[storage]
dir = "{}"

{extra}
"#,
        dir.path().join("state").display()
    );
    let path = dir.path().join("eggtimer.toml");
    fs::write(&path, toml).unwrap();
    path
}

fn eggtimer(cfg: &Path) -> Command {
    let mut cmd = Command::cargo_bin("eggtimer").unwrap();
    cmd.arg("--config").arg(cfg).arg("--log-level").arg("error");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["estimate"], 0, "04:48", "stdout")]
#[case(&["estimate", "--doneness", "hard", "--water", "cold"], 0, "sanity_fallback", "stdout")]
#[case(&["estimate", "--mass", "20"], 2, "between 30 and 90", "stderr")]
#[case(&["validate"], 0, "Parameters are valid.", "stdout")]
#[case(&["validate", "--mass", "20"], 2, "invalid: Egg weight must be between 30 and 90 grams.", "stdout")]
#[case(&["estimate", "--egg", "jumbo"], 2, "small|medium|large", "stderr")]
#[case(&["estimate", "--from", "favorite"], 1, "No favorite parameters", "stderr")]
#[case(&["favorite", "show"], 0, "No favorite saved.", "stdout")]
#[case(&["self-check"], 0, "OK", "stdout")]
#[case(&["fact"], 0, "Did you know?", "stdout")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "");

    let mut cmd = eggtimer(&cfg);
    for a in args {
        cmd.arg(a);
    }
    let assert = cmd.assert().code(exit_code);

    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[test]
fn estimate_json_reports_branch_and_total() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "");
    let out = eggtimer(&cfg)
        .args(["--json", "estimate"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["branch"], "sanity_fallback");
    assert_eq!(v["mm_ss"], "04:48");
    assert!((v["total_seconds"].as_f64().unwrap() - 288.0).abs() < 1e-9);
    assert_eq!(v["params"]["egg_class"], "medium");
}

#[test]
fn cook_runs_to_completion_and_saves_last() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "");
    eggtimer(&cfg)
        .args(["cook", "--doneness", "soft", "--seconds", "0.05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your eggs are ready!"));

    let last = dir.path().join("state").join("last.toml");
    let text = fs::read_to_string(last).unwrap();
    assert!(text.contains("doneness = \"soft\""), "{text}");

    // The saved set is usable as a base.
    eggtimer(&cfg)
        .args(["--json", "estimate", "--from", "last"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"doneness\":\"soft\""));
}

#[test]
fn cook_json_reports_completion() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "");
    let out = eggtimer(&cfg)
        .args(["--json", "cook", "--seconds", "0.02"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["outcome"], "completed");
    assert!((v["seconds"].as_f64().unwrap() - 0.02).abs() < 1e-9);
}

#[rstest]
#[case(&["cook", "--mass", "200", "--seconds", "0.01"])]
#[case(&["cook", "--seconds", "-3"])]
fn cook_rejects_invalid_input(#[case] args: &[&str]) {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "");
    eggtimer(&cfg).args(args).assert().code(2);
    assert!(!dir.path().join("state").join("last.toml").exists());
}

#[test]
fn favorite_round_trip_keeps_room_override() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "");
    eggtimer(&cfg)
        .args(["favorite", "save", "--egg", "large", "--start", "room", "--temp", "23.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved favorite."));

    let out = eggtimer(&cfg)
        .args(["--json", "favorite", "show"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["params"]["start_temperature_override_c"], 23.5);
    assert_eq!(v["params"]["start_mode"], "from_room");
    assert_eq!(v["params"]["mass_g"], 65.0);
}

#[test]
fn invalid_config_exits_3() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[timer]\ntick_ms = 0\n").unwrap();
    eggtimer(&path)
        .arg("estimate")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("tick_ms"));
}

#[test]
fn json_errors_are_structured() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "");
    let out = eggtimer(&cfg)
        .args(["--json", "estimate", "--mass", "95"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8(out.stderr).unwrap();
    let line = stderr.lines().last().unwrap();
    let v: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(v["reason"], "Invalid");
    assert_eq!(
        v["details"]["messages"][0],
        "Egg weight must be between 30 and 90 grams."
    );
}

#[test]
fn fact_reads_catalog_relative_to_config() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("breeds.csv"),
        "name,origin,egg_color\nBrahma,United States,brown\n",
    )
    .unwrap();
    let cfg = write_config(&dir, "[breeds]\ncatalog_csv = \"breeds.csv\"\ntimeout_ms = 2000\n");
    eggtimer(&cfg)
        .arg("fact")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "The Brahma comes from United States and lays brown eggs.",
        ));
}

#[test]
fn fact_reports_bad_catalog_header() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("breeds.csv"), "breed,country\nSilkie,China\n").unwrap();
    let cfg = write_config(&dir, "[breeds]\ncatalog_csv = \"breeds.csv\"\n");
    eggtimer(&cfg)
        .arg("fact")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid headers"));
}
