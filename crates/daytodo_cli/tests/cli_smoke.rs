use std::process::Command;

#[test]
fn cli_smoke_help() {
    let exe = env!("CARGO_BIN_EXE_daytodo");
    let output = Command::new(exe)
        .arg("--help")
        .output()
        .expect("failed to run daytodo --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("toggle"));
}

#[test]
fn cli_rejects_unknown_config_override() {
    let exe = env!("CARGO_BIN_EXE_daytodo");
    let store = tempfile::tempdir().unwrap();
    let output = Command::new(exe)
        .args(["list", "--config-override", "colour=blue"])
        .env("DAYTODO_STORE_DIR", store.path())
        .env("DAYTODO_CONFIG_PATH", store.path().join("config.json"))
        .output()
        .expect("failed to run list");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: validation_error - unknown config field 'colour'"));
}
