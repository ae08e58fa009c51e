//! End-to-end runs of the `playbook` binary.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn playbook() -> Command {
    Command::new(env!("CARGO_BIN_EXE_playbook"))
}

const BOARD: &str = r##"{
    "items": [
        {
            "id": "0f6b3b5e-8a5c-4c35-9d0c-5a8e1c1f2a10",
            "type": "player",
            "data": { "team": "home", "number": 10, "nickname": "Ten", "color": "#1d4ed8" },
            "elementId": "player-10",
            "position": { "x": 1.4, "y": 0.5 }
        }
    ],
    "drawings": []
}"##;

#[test]
fn check_reports_and_rewrites() {
    let dir = TempDir::new().unwrap();
    let board = dir.path().join("board.json");
    fs::write(&board, BOARD).unwrap();

    let out = playbook().arg("check").arg(&board).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("1 items, 0 drawings"));
    assert!(stdout.contains("clamped 1"));

    let out = playbook().arg("check").arg(&board).arg("--write").output().unwrap();
    assert!(out.status.success());
    let out = playbook().arg("check").arg(&board).output().unwrap();
    assert!(String::from_utf8_lossy(&out.stdout).contains("clean"));
}

#[test]
fn render_and_replay() {
    let dir = TempDir::new().unwrap();
    let board = dir.path().join("board.json");
    fs::write(&board, BOARD).unwrap();

    let svg = dir.path().join("board.svg");
    let out = playbook()
        .args(["render", "--orientation", "vertical", "-o"])
        .arg(&svg)
        .arg(&board)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(fs::read_to_string(&svg).unwrap().contains(">10<"));

    let script = dir.path().join("script.json");
    fs::write(
        &script,
        r##"[
            { "step": "tool", "tool": "shaded-area" },
            { "step": "drag", "from": [100, 100], "to": [300, 200], "steps": 3 }
        ]"##,
    )
    .unwrap();
    let result = dir.path().join("result.json");
    let out = playbook()
        .arg("replay")
        .arg(&board)
        .arg(&script)
        .arg("-o")
        .arg(&result)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let saved = fs::read_to_string(&result).unwrap();
    assert!(saved.contains("shaded-area"));
}

#[test]
fn missing_board_fails() {
    let dir = TempDir::new().unwrap();
    let out = playbook().arg("check").arg(dir.path().join("nope.json")).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error"));
}
