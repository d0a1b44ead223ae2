//! The backend backed by the libraries this binary actually links against.

use sdl2::{
    AudioSubsystem, EventSubsystem, GameControllerSubsystem, HapticSubsystem, JoystickSubsystem,
    Sdl, SensorSubsystem, TimerSubsystem, VideoSubsystem,
};
use tracing::debug;

// Nothing from glam is called, it is linked for the GLM line only.
use glam as _;

use super::{Backend, SdlCtx, Subsystem, SubsystemCtx, SubsystemResult};
use crate::version::{Library, ReportedVersion, Version};

/// Version of `glam` resolved by Cargo, written by the build script.
const GLAM_VERSION: Version = include!(concat!(env!("OUT_DIR"), "/math_version.rs"));

/// Version of the SDL headers this binary was compiled against.
const SDL_COMPILED_VERSION: Version = Version::new(
    sdl2::sys::SDL_MAJOR_VERSION as u8,
    sdl2::sys::SDL_MINOR_VERSION as u8,
    sdl2::sys::SDL_PATCHLEVEL as u8,
);

impl From<sdl2::version::Version> for Version {
    fn from(version: sdl2::version::Version) -> Self {
        Version::new(version.major, version.minor, version.patch)
    }
}

/// Reports the linked SDL extensions, `glam` and Dear ImGui, and initializes SDL for real.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeBackend;

impl Backend for NativeBackend {
    type Session = SdlSession;

    fn version(&self, library: Library) -> ReportedVersion {
        match library {
            Library::Sdl => SDL_COMPILED_VERSION.into(),
            Library::SdlImage => Version::from(sdl2::image::get_linked_version()).into(),
            Library::SdlMixer => Version::from(sdl2::mixer::get_linked_version()).into(),
            Library::SdlTtf => Version::from(sdl2::ttf::get_linked_version()).into(),
            Library::Glm => GLAM_VERSION.into(),
            Library::ImGui => imgui::dear_imgui_version().into(),
        }
    }

    fn init(&self) -> SubsystemResult<SdlSession> {
        let context = sdl2::init().map_err(|message| SdlCtx { message }.build())?;

        let timer = subsystem(Subsystem::Timer, context.timer())?;
        let audio = subsystem(Subsystem::Audio, context.audio())?;
        let video = subsystem(Subsystem::Video, context.video())?;
        let events = subsystem(Subsystem::Events, context.event())?;
        let joystick = subsystem(Subsystem::Joystick, context.joystick())?;
        let haptic = subsystem(Subsystem::Haptic, context.haptic())?;
        let game_controller = subsystem(Subsystem::GameController, context.game_controller())?;
        let sensor = subsystem(Subsystem::Sensor, context.sensor())?;

        Ok(SdlSession {
            _sensor: sensor,
            _game_controller: game_controller,
            _haptic: haptic,
            _joystick: joystick,
            _events: events,
            _video: video,
            _audio: audio,
            _timer: timer,
            _context: context,
        })
    }
}

/// Maps a failed subsystem accessor into a [`SubsystemError`](super::SubsystemError).
fn subsystem<T>(subsystem: Subsystem, result: Result<T, String>) -> SubsystemResult<T> {
    match result {
        Ok(handle) => {
            debug!("Initialized the {subsystem} subsystem");
            Ok(handle)
        }
        Err(message) => Err(SubsystemCtx { subsystem, message }.build()),
    }
}

/// Keeps every SDL subsystem alive.
///
/// Fields drop in declaration order, so the subsystems are released before the context, and
/// dropping the context calls `SDL_Quit`.
pub struct SdlSession {
    /// Sensor subsystem
    _sensor: SensorSubsystem,
    /// Game controller subsystem
    _game_controller: GameControllerSubsystem,
    /// Haptic subsystem
    _haptic: HapticSubsystem,
    /// Joystick subsystem
    _joystick: JoystickSubsystem,
    /// Event subsystem
    _events: EventSubsystem,
    /// Video subsystem
    _video: VideoSubsystem,
    /// Audio subsystem
    _audio: AudioSubsystem,
    /// Timer subsystem
    _timer: TimerSubsystem,
    /// The SDL context itself
    _context: Sdl,
}

impl Drop for SdlSession {
    fn drop(&mut self) {
        debug!("Shutting SDL down");
    }
}
