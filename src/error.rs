// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the timing-table compiler.

use std::fmt;

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Compiler error types.
#[derive(Debug)]
pub enum Error {
    /// Configuration error (missing/invalid intent field, unrecognized topology)
    Config(String),
    /// Registry resolution error
    Resolution(ResolutionError),
    /// Ramp encoding error
    Encoding(EncodingError),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Resolution(e) => write!(f, "Resolution error: {}", e),
            Error::Encoding(e) => write!(f, "Encoding error: {}", e),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Resolution(e) => Some(e),
            Error::Encoding(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ResolutionError> for Error {
    fn from(e: ResolutionError) -> Self {
        Error::Resolution(e)
    }
}

impl From<EncodingError> for Error {
    fn from(e: EncodingError) -> Self {
        Error::Encoding(e)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Registry resolution errors.
///
/// An unknown channel must be surfaced to the caller, never defaulted:
/// a guessed register offset could alias a live hardware register.
#[derive(Debug)]
pub enum ResolutionError {
    /// Canonical name not present in the name table
    UnknownName(String),
    /// Board ID has no address table
    UnknownBoard(u8),
    /// Parameter code not present in the board's address table
    UnknownParameter { board_id: u8, parameter: u16 },
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::UnknownName(name) => {
                write!(f, "Canonical name not found: '{}'", name)
            }
            ResolutionError::UnknownBoard(board_id) => {
                write!(f, "No address table for board {}", board_id)
            }
            ResolutionError::UnknownParameter { board_id, parameter } => {
                write!(
                    f,
                    "No register address for board {} parameter {}",
                    board_id, parameter
                )
            }
        }
    }
}

impl std::error::Error for ResolutionError {}

/// Ramp encoding errors.
#[derive(Debug)]
pub enum EncodingError {
    /// Ramp profile has no ramp points
    EmptyProfile,
    /// Ramp point times must be non-decreasing
    NonMonotonic {
        index: usize,
        prev_ms: f64,
        time_ms: f64,
    },
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::EmptyProfile => write!(f, "Ramp profile has no ramp points"),
            EncodingError::NonMonotonic {
                index,
                prev_ms,
                time_ms,
            } => {
                write!(
                    f,
                    "Ramp point {} at {} ms precedes previous point at {} ms",
                    index, time_ms, prev_ms
                )
            }
        }
    }
}

impl std::error::Error for EncodingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    // =========================================================================
    // Error Display tests
    // =========================================================================

    #[test]
    fn test_error_display_config() {
        let e = Error::Config("missing field 'fill'".into());
        assert_eq!(e.to_string(), "Configuration error: missing field 'fill'");
    }

    #[test]
    fn test_error_display_resolution() {
        let e = Error::Resolution(ResolutionError::UnknownName("Bogus.setpoint".into()));
        assert_eq!(
            e.to_string(),
            "Resolution error: Canonical name not found: 'Bogus.setpoint'"
        );
    }

    #[test]
    fn test_error_display_encoding() {
        let e = Error::Encoding(EncodingError::EmptyProfile);
        assert_eq!(
            e.to_string(),
            "Encoding error: Ramp profile has no ramp points"
        );
    }

    #[test]
    fn test_error_display_io() {
        let e = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(e.to_string(), "IO error: gone");
    }

    #[test]
    fn test_error_display_serialization() {
        let e = Error::Serialization("invalid json".into());
        assert_eq!(e.to_string(), "Serialization error: invalid json");
    }

    // =========================================================================
    // ResolutionError Display tests
    // =========================================================================

    #[test]
    fn test_resolution_error_display_unknown_board() {
        let e = ResolutionError::UnknownBoard(7);
        assert_eq!(e.to_string(), "No address table for board 7");
    }

    #[test]
    fn test_resolution_error_display_unknown_parameter() {
        let e = ResolutionError::UnknownParameter {
            board_id: 4,
            parameter: 999,
        };
        assert_eq!(
            e.to_string(),
            "No register address for board 4 parameter 999"
        );
    }

    // =========================================================================
    // EncodingError Display tests
    // =========================================================================

    #[test]
    fn test_encoding_error_display_non_monotonic() {
        let e = EncodingError::NonMonotonic {
            index: 2,
            prev_ms: 10.0,
            time_ms: 5.0,
        };
        assert_eq!(
            e.to_string(),
            "Ramp point 2 at 5 ms precedes previous point at 10 ms"
        );
    }

    // =========================================================================
    // Error::source() tests
    // =========================================================================

    #[test]
    fn test_error_source_io() {
        let e = Error::Io(std::io::Error::other("disk"));
        assert!(e.source().is_some());
    }

    #[test]
    fn test_error_source_resolution() {
        let e = Error::Resolution(ResolutionError::UnknownBoard(9));
        assert!(e.source().is_some());
    }

    #[test]
    fn test_error_source_encoding() {
        let e = Error::Encoding(EncodingError::EmptyProfile);
        assert!(e.source().is_some());
    }

    #[test]
    fn test_error_source_none_for_config() {
        let e = Error::Config("x".into());
        assert!(e.source().is_none());
    }

    // =========================================================================
    // From impls
    // =========================================================================

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
    }

    #[test]
    fn test_from_resolution_error() {
        let re = ResolutionError::UnknownName("x".into());
        let e: Error = re.into();
        assert!(matches!(
            e,
            Error::Resolution(ResolutionError::UnknownName(_))
        ));
    }

    #[test]
    fn test_from_encoding_error() {
        let ee = EncodingError::EmptyProfile;
        let e: Error = ee.into();
        assert!(matches!(e, Error::Encoding(EncodingError::EmptyProfile)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let e: Error = json_err.into();
        assert!(matches!(e, Error::Serialization(_)));
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("{{{{").unwrap_err();
        let e: Error = yaml_err.into();
        assert!(matches!(e, Error::Serialization(_)));
    }
}
