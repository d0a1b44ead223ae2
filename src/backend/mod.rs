//! Sources of library versions and of the multimedia subsystem session.

#[cfg(feature = "native")]
pub mod native;

use std::fmt::{Display, Formatter};

use snafu::Snafu;

use crate::version::{Library, ReportedVersion};

/// Something that can tell the version of every reported library and bring the multimedia
/// subsystems up.
pub trait Backend {
    /// Guard returned by [`Backend::init`].
    ///
    /// Holding it keeps every subsystem initialized. Dropping it shuts them down and deinitializes
    /// the library.
    type Session;

    /// Returns the version of `library`. Never fails: versions are either compiled in or read from
    /// a library that is already loaded.
    fn version(&self, library: Library) -> ReportedVersion;

    /// Initializes every subsystem of the multimedia library.
    fn init(&self) -> Result<Self::Session, SubsystemError>;
}

/// The subsystems requested when initializing "everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    /// Timers
    Timer,
    /// Audio output
    Audio,
    /// Video and windowing
    Video,
    /// The event queue
    Events,
    /// Joysticks
    Joystick,
    /// Force feedback
    Haptic,
    /// Game controller mappings
    GameController,
    /// Accelerometers, gyroscopes and friends
    Sensor,
}

impl Subsystem {
    /// Every subsystem, in initialization order.
    pub const ALL: [Subsystem; 8] = [
        Subsystem::Timer,
        Subsystem::Audio,
        Subsystem::Video,
        Subsystem::Events,
        Subsystem::Joystick,
        Subsystem::Haptic,
        Subsystem::GameController,
        Subsystem::Sensor,
    ];
}

impl Display for Subsystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Subsystem::Timer => "timer",
            Subsystem::Audio => "audio",
            Subsystem::Video => "video",
            Subsystem::Events => "events",
            Subsystem::Joystick => "joystick",
            Subsystem::Haptic => "haptic",
            Subsystem::GameController => "game controller",
            Subsystem::Sensor => "sensor",
        })
    }
}

/// Error raised when the multimedia library cannot be initialized.
#[derive(Snafu, Debug)]
#[snafu(context(suffix(Ctx)), visibility(pub(crate)))]
pub enum SubsystemError {
    /// The library itself refused to initialize.
    #[snafu(display("Failed to initialize SDL: {message}"))]
    Sdl {
        /// The message reported by the library.
        message: String,
    },
    /// The library initialized but one of its subsystems did not.
    #[snafu(display("Failed to initialize the {subsystem} subsystem: {message}"))]
    Subsystem {
        /// The subsystem that failed.
        subsystem: Subsystem,
        /// The message reported by the library.
        message: String,
    },
}

/// Shorthand type for [`Result<T, SubsystemError>`]
pub type SubsystemResult<T> = Result<T, SubsystemError>;
