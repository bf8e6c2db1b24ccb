use partpick_testkit::{read_jsonl, FrameRecord};
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn temp_path(stem: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("partpick_{stem}_{nanos}.{ext}"))
}

#[test]
fn scripted_click_selects_the_torso() {
    let frame_log = temp_path("frames", "jsonl");
    let output = Command::new(env!("CARGO_BIN_EXE_partpick"))
        .current_dir(manifest_dir())
        .args(["--headless", "--resolution", "1280x720"])
        .args(["--scene", "models/human.json"])
        .args(["--script", "scripts/click_torso.json"])
        .arg("--frame-log")
        .arg(&frame_log)
        .output()
        .expect("run partpick");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("selected: Torso"), "stdout: {stdout}");

    let records: Vec<FrameRecord> = read_jsonl(&frame_log).expect("frame log readable");
    let last = records.last().expect("at least one frame");
    assert_eq!(last.selected.as_deref(), Some("Torso"));
    assert_eq!(last.hovered, None);
    assert_eq!(last.highlighted, vec!["Torso".to_string()]);

    // Frames are numbered without gaps.
    for (index, record) in records.iter().enumerate() {
        assert_eq!(record.frame.0, index as u64);
    }
}

#[test]
fn frame_limit_is_respected_without_a_script() {
    let output = Command::new(env!("CARGO_BIN_EXE_partpick"))
        .current_dir(manifest_dir())
        .args(["--headless", "--frames", "5"])
        .args(["--scene", "models/human.json"])
        .output()
        .expect("run partpick");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("frames: 5 selected: -"), "stdout: {stdout}");
}

#[test]
fn missing_scene_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_partpick"))
        .current_dir(manifest_dir())
        .args(["--headless", "--frames", "1"])
        .args(["--scene", "models/does_not_exist.json"])
        .output()
        .expect("run partpick");
    assert!(!output.status.success());
}
