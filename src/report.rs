//! The bootstrap sequence: report every version, then bring the subsystems up and down again.

use std::io::Write;
use std::process::ExitCode;

use snafu::{Location, ResultExt, Snafu};
use tracing::{error, info};

use crate::backend::{Backend, SubsystemError};
use crate::version::Library;

/// Error raised while writing the version report.
#[derive(Snafu, Debug)]
#[snafu(context(suffix(Ctx)))]
pub enum ReportError {
    /// The report could not be written out.
    #[snafu(display("Failed to write the version report: {source}. Error occurred at {location}"))]
    Write {
        /// The [`std::io::Error`].
        source: std::io::Error,
        /// The source code location where the error occurred.
        #[snafu(implicit)]
        location: Location,
    },
}

/// How the bootstrap ended once the report was written.
#[derive(Debug)]
pub enum Outcome {
    /// Every subsystem came up and was shut down again.
    Completed,
    /// The multimedia library could not be initialized. Nothing was left to shut down.
    InitFailed(SubsystemError),
}

/// Writes one `<Name> version: <version>` line per library in [`Library::ALL`] and flushes `out`.
pub fn write_report<B, W>(backend: &B, out: &mut W) -> Result<(), ReportError>
where
    B: Backend + ?Sized,
    W: Write + ?Sized,
{
    for library in Library::ALL {
        let version = backend.version(library);
        writeln!(out, "{library} version: {version}").context(WriteCtx)?;
    }

    out.flush().context(WriteCtx)
}

/// Runs the whole bootstrap sequence against `backend`.
///
/// The report is written and flushed before initialization is attempted. The session returned by
/// the backend is dropped before this function returns, on every path.
pub fn run<B, W>(backend: &B, out: &mut W) -> Result<Outcome, ReportError>
where
    B: Backend + ?Sized,
    W: Write + ?Sized,
{
    write_report(backend, out)?;

    info!("Initializing every subsystem...");
    let session = match backend.init() {
        Ok(session) => session,
        Err(err) => return Ok(Outcome::InitFailed(err)),
    };

    info!("Subsystems initialized, shutting down");
    drop(session);

    Ok(Outcome::Completed)
}

/// Logs how the run ended and turns it into the process exit code.
///
/// The exit code is success no matter what: a failed initialization or a closed stdout is logged,
/// never reported through the exit status.
pub fn finish(result: Result<Outcome, ReportError>) -> ExitCode {
    match result {
        Ok(Outcome::Completed) => info!("Bootstrap finished"),
        Ok(Outcome::InitFailed(err)) => error!("{err}"),
        Err(err) => error!("{err}"),
    }

    ExitCode::SUCCESS
}
