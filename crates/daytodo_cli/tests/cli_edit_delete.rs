use std::path::Path;
use std::process::{Command, Output};

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_daytodo"))
        .args(args)
        .env("DAYTODO_STORE_DIR", dir)
        .env("DAYTODO_CONFIG_PATH", dir.join("config.json"))
        .output()
        .expect("failed to run daytodo")
}

fn write_store(dir: &Path) {
    let tasks = serde_json::json!([
        {"id": "task-1", "text": "Buy milk", "date": "2024-01-01", "time": "09:00", "completed": false},
        {"id": "task-2", "text": "Call Bob", "date": "2024-01-01", "time": "08:00", "completed": false}
    ]);
    std::fs::write(dir.join("todos.json"), tasks.to_string()).unwrap();
}

fn stored(dir: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.join("todos.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn toggle_command_flips_completed() {
    let dir = tempfile::tempdir().unwrap();
    write_store(dir.path());

    let output = run(dir.path(), &["toggle", "task-1"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Completed task: Buy milk"));
    assert_eq!(stored(dir.path())[0]["completed"], true);
    assert_eq!(stored(dir.path())[1]["completed"], false);

    let output = run(dir.path(), &["toggle", "task-1"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Reopened task: Buy milk"));
    assert_eq!(stored(dir.path())[0]["completed"], false);
}

#[test]
fn edit_command_updates_fields_and_keeps_id() {
    let dir = tempfile::tempdir().unwrap();
    write_store(dir.path());

    let output = run(
        dir.path(),
        &["edit", "task-1", "--text", "Buy oat milk", "--time", "18:30"],
    );

    assert!(output.status.success());
    let tasks = stored(dir.path());
    assert_eq!(tasks[0]["id"], "task-1");
    assert_eq!(tasks[0]["text"], "Buy oat milk");
    assert_eq!(tasks[0]["time"], "18:30");
    assert_eq!(tasks[0]["date"], "2024-01-01");
}

#[test]
fn edit_command_rejects_blank_text() {
    let dir = tempfile::tempdir().unwrap();
    write_store(dir.path());

    let output = run(dir.path(), &["edit", "task-1", "--text", " "]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: validation_error - text is required"));
    assert_eq!(stored(dir.path())[0]["text"], "Buy milk");
}

#[test]
fn delete_command_removes_task() {
    let dir = tempfile::tempdir().unwrap();
    write_store(dir.path());

    let output = run(dir.path(), &["delete", "task-2"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Deleted task: Call Bob"));
    let tasks = stored(dir.path());
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["id"], "task-1");
}

#[test]
fn delete_last_task_leaves_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    write_store(dir.path());

    run(dir.path(), &["delete", "task-1"]);
    run(dir.path(), &["delete", "task-2"]);

    assert_eq!(stored(dir.path()), serde_json::json!([]));
}

#[test]
fn unknown_id_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    write_store(dir.path());
    let before = stored(dir.path());

    for args in [
        vec!["toggle", "task-9"],
        vec!["delete", "task-9"],
        vec!["edit", "task-9", "--text", "x"],
    ] {
        let output = run(dir.path(), &args);
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("No task with id task-9"));
    }

    assert_eq!(stored(dir.path()), before);
}
