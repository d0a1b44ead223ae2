//! Version values reported for each linked library.

use std::fmt::{Display, Formatter};

/// A `major.minor.patch` version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major version
    pub major: u8,
    /// Minor version
    pub minor: u8,
    /// Patch level
    pub patch: u8,
}

impl Version {
    /// Creates a version from its three components.
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A version the way a library reports it.
///
/// Some libraries hand out a version triple (either queried from the loaded library or taken from
/// the headers it was compiled against), others only ship a pre-formatted string. Both print the
/// same way so the report never has to know which one it got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportedVersion {
    /// A triple obtained at query time.
    Queried(Version),
    /// A pre-formatted version string baked into the library.
    Constant(&'static str),
}

impl From<Version> for ReportedVersion {
    fn from(version: Version) -> Self {
        ReportedVersion::Queried(version)
    }
}

impl From<&'static str> for ReportedVersion {
    fn from(version: &'static str) -> Self {
        ReportedVersion::Constant(version)
    }
}

impl Display for ReportedVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportedVersion::Queried(version) => version.fmt(f),
            ReportedVersion::Constant(version) => f.write_str(version),
        }
    }
}

/// The libraries covered by the version report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Library {
    /// SDL2 itself, reported with the version it was compiled against.
    Sdl,
    /// SDL2_image
    SdlImage,
    /// SDL2_mixer
    SdlMixer,
    /// SDL2_ttf
    SdlTtf,
    /// The linear algebra library.
    Glm,
    /// The immediate-mode UI library.
    ImGui,
}

impl Library {
    /// Every library, in the order they are reported.
    pub const ALL: [Library; 6] = [
        Library::Sdl,
        Library::SdlImage,
        Library::SdlMixer,
        Library::SdlTtf,
        Library::Glm,
        Library::ImGui,
    ];

    /// The name printed in front of the version.
    pub const fn label(self) -> &'static str {
        match self {
            Library::Sdl => "SDL",
            Library::SdlImage => "SDL_image",
            Library::SdlMixer => "SDL_mixer",
            Library::SdlTtf => "SDL_ttf",
            Library::Glm => "GLM",
            Library::ImGui => "ImGui",
        }
    }
}

impl Display for Library {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
