#![deny(missing_docs)]

//! Prints the linked library versions and smoke-tests SDL initialization.
//!
//! Arguments are ignored and the exit code is always success; failures show up in the logs.

use std::process::ExitCode;

use bootprobe::backend::native::NativeBackend;
use bootprobe::common::trace::init_tracing;

/// The main entry point for the application.
///
/// Initializes tracing, writes the version report to stdout and runs the SDL init/quit cycle.
pub fn main() -> ExitCode {
    init_tracing();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    bootprobe::finish(bootprobe::run(&NativeBackend, &mut out))
}
