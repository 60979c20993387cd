//! Pin controller errors

use core::fmt;

/// Result type alias
pub type Result<T> = core::result::Result<T, Error>;

/// Pin controller error
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// No family owns the requested pad.
    UnknownPad(u32),

    /// The requested function does not fit in the function-select field.
    UnsupportedMode(u32),

    /// The SCU rejected an indirect write, carrying its status code.
    SecureWriteFailed(i32),

    /// A required configuration property was absent.
    MissingField(&'static str),

    /// A family table entry cannot be bound, carrying the family id.
    InvalidFamily(u32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UnknownPad(pad) => write!(f, "no family for pad {}", pad),
            Self::UnsupportedMode(mode) => write!(f, "unsupported mode {}", mode),
            Self::SecureWriteFailed(status) => write!(f, "SCU indirect write failed ({})", status),
            Self::MissingField(name) => write!(f, "missing property `{}`", name),
            Self::InvalidFamily(id) => write!(f, "invalid family {}", id),
        }
    }
}
