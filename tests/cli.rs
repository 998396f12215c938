use std::fs;
use std::process::Command;

use tempfile::TempDir;

const CONFIG: &str = r#"
reference_epoch_basis = 1551795730.0

[display]
resolution_px = [1920.0, 1088.0]
fov_deg = [60.0, 34.0]

[devices.glasses]
clock = "wall_clock"
correction_hours = 2.0
header = { key = "Date:", format = "%d.%m.%Y %H:%M:%S" }
"#;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("analysis.toml"), CONFIG).unwrap();
    fs::write(
        dir.path().join("targets.csv"),
        "x,y,interval_start,interval_stop\n100,100,0,1\n200,200,2,3\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("samples.csv"),
        "timestamp,x,y\n0.5,100,100\n0.5,104,96\n1.5,,\n2.5,205,195\n",
    )
    .unwrap();
    dir
}

fn gazeval(dir: &TempDir, extra: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_gazeval"))
        .current_dir(dir.path())
        .args(["-c", "analysis.toml", "-d", "glasses", "-t", "targets.csv", "-s", "samples.csv"])
        .args(extra)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn writes_report_json() {
    let dir = workspace();
    let out = gazeval(
        &dir,
        &["--header", "## Date: 05.03.2019 12:22:10", "-o", "report.json"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Device: glasses"));
    assert!(stdout.contains("Targets: 2 measured, 0 without data"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("report.json")).unwrap()).unwrap();
    let t0 = &json["targets"][0]["outcome"];
    assert_eq!(t0["status"], "measured");
    assert_eq!(t0["metrics"]["sample_count"], 2);
    assert_eq!(t0["metrics"]["mean"]["x"], 102.0);
    assert_eq!(json["summary"]["samples_invalid"], 1);
    assert!(json["targets"][1]["outcome"]["metrics"]["inter_sample_rms"].is_null());
}

#[test]
fn header_from_file() {
    let dir = workspace();
    fs::write(dir.path().join("header.txt"), "## Date: 05.03.2019 12:22:10\n## Rate: 60\n").unwrap();
    let out = gazeval(&dir, &["--header-file", "header.txt", "--strategy", "nested"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn unparseable_header_fails() {
    let dir = workspace();
    let out = gazeval(&dir, &["--header", "## Date: not a date"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not a date"));
}

#[test]
fn unknown_device_lists_configured_ones() {
    let dir = workspace();
    let out = Command::new(env!("CARGO_BIN_EXE_gazeval"))
        .current_dir(dir.path())
        .args(["-c", "analysis.toml", "-d", "eyelink", "-t", "targets.csv", "-s", "samples.csv"])
        .args(["--header", "x"])
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("configured: glasses"));
}
