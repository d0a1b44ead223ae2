#![deny(missing_docs)]

//! Reports the versions of the multimedia libraries a build links against, then checks that SDL
//! can be brought up and torn down again.
//!
//! The report is six lines on stdout:
//!
//! ```text
//! SDL version: 2.30.0
//! SDL_image version: 2.6.3
//! SDL_mixer version: 2.6.3
//! SDL_ttf version: 2.20.2
//! GLM version: 0.29.2
//! ImGui version: 1.89.2
//! ```
//!
//! Diagnostics go to stderr (and optionally to `logs/`), filtered by the `BOOTPROBE_LOG`
//! environment variable.

pub mod backend;
pub mod common;
pub mod report;
pub mod version;

pub use backend::{Backend, Subsystem, SubsystemError};
pub use report::{finish, run, write_report, Outcome, ReportError};
pub use version::{Library, ReportedVersion, Version};
