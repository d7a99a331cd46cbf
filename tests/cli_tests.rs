use assert_cmd::Command;
use predicates::prelude::*;

fn window_knob(out: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("window-knob").unwrap();
    cmd.env_remove("KNOB_VIEWER")
        .env_remove("KNOB_OUT_DIR")
        .env_remove("RUST_LOG")
        .arg("--out-dir")
        .arg(out)
        .args(["--segments", "24", "--fillet-segments", "2"]);
    cmd
}

#[test]
fn writes_both_parts() {
    let dir = tempfile::tempdir().unwrap();
    window_knob(dir.path())
        .arg("--no-show")
        .assert()
        .success()
        .stderr(predicate::str::contains("part exported"));

    assert!(dir.path().join("knob.stl").is_file());
    assert!(dir.path().join("backing.stl").is_file());
    assert!(!dir.path().join("assembly.stl").exists());
}

#[test]
fn assembly_flag_writes_the_compound() {
    let dir = tempfile::tempdir().unwrap();
    window_knob(dir.path()).args(["--no-show", "--assembly"]).assert().success();
    assert!(dir.path().join("assembly.stl").is_file());
}

#[test]
fn show_without_viewer_warns_and_writes_assembly() {
    let dir = tempfile::tempdir().unwrap();
    window_knob(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("no viewer configured"));
    assert!(dir.path().join("assembly.stl").is_file());
}

#[test]
fn missing_viewer_fails() {
    let dir = tempfile::tempdir().unwrap();
    window_knob(dir.path())
        .args(["--viewer", "window-knob-no-such-viewer --flag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to launch viewer"));
    assert!(dir.path().join("knob.stl").is_file());
    assert!(dir.path().join("backing.stl").is_file());
}

#[test]
fn json_report_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let output = window_knob(dir.path())
        .args(["--no-show", "--json", "--knob-height", "24"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["params"]["knob_height"], 24.0);
    assert_eq!(report["parts"][0]["name"], "knob");
    assert_eq!(report["parts"][1]["name"], "backing");
    assert_eq!(report["gap"], 14.5);
    assert_eq!(report["coaxial"], true);
    assert_eq!(report["parts"][0]["manifold"], true);
    assert_eq!(report["parts"][1]["manifold"], true);
}

#[test]
fn params_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let params = dir.path().join("params.json");
    std::fs::write(&params, r#"{ "backing_flange_thickness": 6.0 }"#).unwrap();

    let output = window_knob(dir.path())
        .args(["--no-show", "--json", "--format", "ascii", "--params"])
        .arg(&params)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["parts"][1]["bounding_box"][1][2], 3.0);

    let text = std::fs::read_to_string(dir.path().join("knob.stl")).unwrap();
    assert!(text.starts_with("solid knob"));
}

#[test]
fn invalid_dimensions_fail_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    window_knob(&out)
        .args(["--no-show", "--knob-diameter", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HoleTooLarge"));
    assert!(!out.exists());
}

#[test]
fn oversized_fillet_fails() {
    let dir = tempfile::tempdir().unwrap();
    window_knob(dir.path())
        .args(["--no-show", "--fillet-radius", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FilletTooLarge"));
}
