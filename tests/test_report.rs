#![cfg(feature = "native")]

use assert2::{assert, check};
use common::{
    is_plain_decimal, locked_version, run_bootprobe, run_bootprobe_without_video, stdout_lines,
};

mod common;

const LABELS: [&str; 6] = ["SDL", "SDL_image", "SDL_mixer", "SDL_ttf", "GLM", "ImGui"];

#[test]
fn prints_six_lines_in_order() {
    let output = run_bootprobe(&[]);
    let lines = stdout_lines(&output);

    assert!(lines.len() == 6);
    for (line, label) in lines.iter().zip(LABELS) {
        let prefix = format!("{label} version: ");
        check!(line.starts_with(&prefix), "unexpected line {line:?}");
    }
}

#[test]
fn triples_are_plain_decimal() {
    let output = run_bootprobe(&[]);
    let lines = stdout_lines(&output);

    // Every line but ImGui carries a major.minor.patch triple.
    for line in &lines[..5] {
        let (_, version) = line.split_once(" version: ").unwrap();
        let components: Vec<&str> = version.split('.').collect();

        check!(components.len() == 3, "unexpected version in {line:?}");
        for component in components {
            check!(is_plain_decimal(component), "unexpected component in {line:?}");
        }
    }

    let (_, imgui) = lines[5].split_once(" version: ").unwrap();
    assert!(!imgui.is_empty());
}

#[test]
fn exit_code_is_always_success() {
    let output = run_bootprobe(&[]);

    assert!(output.status.success());
}

#[test]
fn failed_init_still_reports_and_exits_successfully() {
    let working_dir = tempfile::tempdir().unwrap();

    let output = run_bootprobe_without_video(working_dir.path());

    assert!(output.status.success());
    assert!(stdout_lines(&output).len() == 6);
    #[cfg(feature = "log-to-console")]
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to initialize"));
}

#[test]
#[cfg(all(feature = "log-to-console", feature = "log-to-file"))]
fn blocked_log_directory_keeps_failures_on_stderr() {
    let working_dir = tempfile::tempdir().unwrap();
    std::fs::write(working_dir.path().join("logs"), b"not a directory").unwrap();

    let output = run_bootprobe_without_video(working_dir.path());
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(stderr.contains("Failed to open log file"));
    assert!(stderr.contains("Failed to initialize"));
}

#[test]
fn glm_line_matches_the_locked_glam() {
    let output = run_bootprobe(&[]);
    let lines = stdout_lines(&output);
    let expected = locked_version("glam").expect("glam should be in Cargo.lock");

    assert!(lines[4] == format!("GLM version: {expected}"));
}

#[test]
fn arguments_are_ignored() {
    let plain = run_bootprobe(&[]);
    let noisy = run_bootprobe(&["--help", "-x", "whatever", "--version"]);

    assert!(noisy.status.success());
    assert!(plain.stdout == noisy.stdout);
}

#[test]
fn output_is_deterministic() {
    let first = run_bootprobe(&[]);
    let second = run_bootprobe(&[]);

    assert!(first.stdout == second.stdout);
}

#[test]
#[cfg(feature = "log-to-console")]
fn diagnostics_stay_off_stdout() {
    let output = run_bootprobe(&[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("Initializing every subsystem"));
    assert!(stdout_lines(&output)
        .iter()
        .all(|line| !line.contains("Initializing")));
}
