//! Captures the compile-time version of the math library.
//!
//! `glam` has no version constant of its own, so the version Cargo resolved for it is read from
//! `Cargo.lock` and written to `$OUT_DIR/math_version.rs` as a `Version` expression.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// The crate standing in for GLM in the report.
const MATH_CRATE: &str = "glam";
/// Version prefix requested in `Cargo.toml`, used to pick between several locked versions.
const MATH_REQUIREMENT: &str = "0.29.";
/// Used when no lock file can be found, e.g. when packaged as a dependency.
const MATH_FALLBACK: (u8, u8, u8) = (0, 29, 0);

/// The part of `Cargo.lock` we care about.
#[derive(Deserialize)]
struct Lockfile {
    /// Every `[[package]]` entry.
    #[serde(default)]
    package: Vec<LockedPackage>,
}

/// A single `[[package]]` entry of `Cargo.lock`.
#[derive(Deserialize)]
struct LockedPackage {
    /// Crate name
    name: String,
    /// Resolved version
    version: String,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));

    // Registered even when the lock file does not exist yet, so creating it triggers a rerun.
    println!(
        "cargo:rerun-if-changed={}",
        manifest_dir.join("Cargo.lock").display()
    );

    let version = match find_lockfile(&manifest_dir) {
        Some(lock_path) => {
            println!("cargo:rerun-if-changed={}", lock_path.display());
            locked_version(&lock_path).unwrap_or_else(|| {
                warn_fallback(&format!("{MATH_CRATE} not found in {}", lock_path.display()));
                MATH_FALLBACK
            })
        }
        None => {
            warn_fallback(&format!(
                "no Cargo.lock found above {}",
                manifest_dir.display()
            ));
            MATH_FALLBACK
        }
    };

    let out_path = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"))
        .join("math_version.rs");
    fs::write(
        out_path,
        format!("Version::new({}, {}, {})\n", version.0, version.1, version.2),
    )
    .expect("cannot write math_version.rs");
}

/// Tells cargo the GLM line will report [`MATH_FALLBACK`] instead of the compiled version.
fn warn_fallback(reason: &str) {
    println!(
        "cargo:warning={reason}, the GLM version will be reported as {}.{}.{}",
        MATH_FALLBACK.0, MATH_FALLBACK.1, MATH_FALLBACK.2
    );
}

/// Looks for `Cargo.lock` in the manifest directory and its ancestors (workspace roots).
fn find_lockfile(manifest_dir: &Path) -> Option<PathBuf> {
    manifest_dir
        .ancestors()
        .map(|dir| dir.join("Cargo.lock"))
        .find(|path| path.is_file())
}

/// Reads the locked version of [`MATH_CRATE`], preferring the one matching [`MATH_REQUIREMENT`].
fn locked_version(lock_path: &Path) -> Option<(u8, u8, u8)> {
    let contents = fs::read_to_string(lock_path).ok()?;
    let lockfile: Lockfile = toml::from_str(&contents).ok()?;

    let candidates: Vec<&LockedPackage> = lockfile
        .package
        .iter()
        .filter(|package| package.name == MATH_CRATE)
        .collect();

    let package = candidates
        .iter()
        .find(|package| package.version.starts_with(MATH_REQUIREMENT))
        .or_else(|| candidates.first())?;

    parse_triple(&package.version)
}

/// Parses `major.minor.patch`, ignoring pre-release and build metadata.
fn parse_triple(version: &str) -> Option<(u8, u8, u8)> {
    let core = version.split(['-', '+']).next()?;
    let mut parts = core.split('.').map(|part| part.parse::<u8>());

    let major = parts.next()?.ok()?;
    let minor = parts.next()?.ok()?;
    let patch = parts.next()?.ok()?;

    Some((major, minor, patch))
}
