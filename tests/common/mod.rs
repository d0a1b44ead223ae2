use std::path::Path;
use std::process::{Command, Output};

/// Runs the built binary with `args`, with SDL pointed at its dummy drivers.
pub fn run_bootprobe(args: &[&str]) -> Output {
    bootprobe_command(args)
        .output()
        .expect("bootprobe should start")
}

/// Runs the built binary with SDL asked for a video driver that does not exist.
pub fn run_bootprobe_without_video(working_dir: &Path) -> Output {
    bootprobe_command(&[])
        .env("SDL_VIDEODRIVER", "bogus")
        .current_dir(working_dir)
        .output()
        .expect("bootprobe should start")
}

/// The binary with dummy SDL drivers and debug logging.
fn bootprobe_command(args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_bootprobe"));
    command
        .args(args)
        .env("SDL_VIDEODRIVER", "dummy")
        .env("SDL_AUDIODRIVER", "dummy")
        .env("BOOTPROBE_LOG", "debug");
    command
}

/// Stdout of a run, split into lines.
pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .expect("report should be UTF-8")
        .lines()
        .map(str::to_owned)
        .collect()
}

/// Whether `component` is a decimal number without superfluous leading zeros.
pub fn is_plain_decimal(component: &str) -> bool {
    !component.is_empty()
        && component.bytes().all(|byte| byte.is_ascii_digit())
        && (component == "0" || !component.starts_with('0'))
}

/// Version of `name` recorded in this package's `Cargo.lock`.
pub fn locked_version(name: &str) -> Option<String> {
    let lock_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.lock");
    let lockfile: toml::Table = std::fs::read_to_string(lock_path).ok()?.parse().ok()?;

    lockfile
        .get("package")?
        .as_array()?
        .iter()
        .filter(|package| package.get("name").and_then(|name| name.as_str()) == Some(name))
        .filter_map(|package| package.get("version")?.as_str())
        .find(|version| version.starts_with("0.29."))
        .map(str::to_owned)
}
