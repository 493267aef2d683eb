//! Crate-level error types.

use std::fmt;

/// Errors produced by the orbitcam crate.
#[derive(Debug)]
pub enum OrbitError {
    /// The camera reported a projection the controller cannot drive.
    UnsupportedProjection {
        /// Operation that was attempted (`"pan"` or `"dolly"`).
        operation: &'static str,
    },
    /// Another controller already holds listeners on the input surface.
    SurfaceBusy,
    /// The controller was disposed and accepts no further mutation.
    Disposed,
    /// The shared camera handle was already borrowed by the host.
    CameraBorrowed,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
}

impl fmt::Display for OrbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedProjection { operation } => write!(
                f,
                "unknown camera projection, {operation} disabled"
            ),
            Self::SurfaceBusy => {
                write!(f, "input surface is connected to another controller")
            }
            Self::Disposed => write!(f, "controller has been disposed"),
            Self::CameraBorrowed => {
                write!(f, "camera handle is already borrowed")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for OrbitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OrbitError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
