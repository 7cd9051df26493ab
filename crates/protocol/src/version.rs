//! Protocol version handling for the fellowship sync service
//!
//! Versions travel on the wire as `"major.minor.patch"` strings inside
//! every envelope. Parsing is strict: exactly three dot-separated decimal
//! components, nothing more.
//!
//! ## Compatibility Rule
//!
//! Two versions are compatible when their MAJOR components match; minor
//! and patch are ignored. The rule is enforced on both the send and the
//! receive path.

use thiserror::Error;

/// Current protocol version, compiled in. Not configurable at runtime.
pub const PROTOCOL_VERSION: &str = "2.0.0";

/// A semantic `major.minor.patch` triple.
///
/// Immutable value type; ordering is lexicographic over
/// `(major, minor, patch)`.
///
/// # Example
///
/// ```
/// use fellowship_protocol::version::Version;
///
/// let v: Version = "2.1.3".parse().unwrap();
/// assert_eq!(v.to_string(), "2.1.3");
/// assert!(v.is_compatible_with(&Version::new(2, 0, 0)));
/// assert!(!v.is_compatible_with(&Version::new(3, 0, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// Reasons a version string fails to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("expected exactly three components in {0:?}")]
    WrongComponentCount(String),

    #[error("non-numeric version component {0:?}")]
    InvalidComponent(String),
}

impl Version {
    /// Creates a version from literal components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a strict `"major.minor.patch"` string.
    ///
    /// `"1.0"`, `"1.0.0.0"`, `"a.b.c"`, and `""` all fail.
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        if version.is_empty() {
            return Err(VersionError::Empty);
        }

        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::WrongComponentCount(version.to_string()));
        }

        let component = |part: &str| -> Result<u32, VersionError> {
            part.parse()
                .map_err(|_| VersionError::InvalidComponent(part.to_string()))
        };

        Ok(Self {
            major: component(parts[0])?,
            minor: component(parts[1])?,
            patch: component(parts[2])?,
        })
    }

    /// Returns true when both versions share the same major component.
    #[inline]
    pub fn is_compatible_with(&self, other: &Version) -> bool {
        self.major == other.major
    }
}

impl std::str::FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Returns the process-wide current protocol version.
pub fn current_version() -> Version {
    Version::new(2, 0, 0)
}

/// Checks whether a wire string parses as a version at all.
pub fn is_valid_version(version: &str) -> bool {
    Version::parse(version).is_ok()
}
