//! Error types shared by the engine, the exporter and the command-line front end

use std::fmt;
use std::path::PathBuf;

/// Main error type for all wallpaper generation operations
#[derive(Debug)]
pub enum WallgenError {
    /// A user-supplied value could not be parsed or is unusable
    ///
    /// The engine itself clamps percentages and never raises this; it is
    /// produced while parsing colors, palette identifiers and CLI arguments.
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Source image bytes could not be decoded
    ImageDecodeFailure {
        /// Where the bytes came from (a path or an upload label)
        origin: String,
        /// Underlying decoder error
        source: image::ImageError,
    },

    /// Requested export dimensions are non-positive, non-finite or too large
    UnsupportedExportSize {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
        /// Which bound was violated
        reason: &'static str,
    },

    /// Internal geometry produced a coordinate outside the owning structure
    ///
    /// Never returned from a tick: the offending cell or point is dropped and
    /// the error is only logged.
    AlgorithmStateCorruption {
        /// Component in which the inconsistency was detected
        component: &'static str,
        /// Description of the inconsistent state
        detail: String,
    },

    /// Failed to encode or write a finished raster
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for WallgenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageDecodeFailure { origin, source } => {
                write!(f, "Failed to decode image from {origin}: {source}")
            }
            Self::UnsupportedExportSize {
                width,
                height,
                reason,
            } => {
                write!(f, "Unsupported export size {width}x{height}: {reason}")
            }
            Self::AlgorithmStateCorruption { component, detail } => {
                write!(f, "Inconsistent state in {component}: {detail}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for WallgenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecodeFailure { source, .. } | Self::ImageExport { source, .. } => {
                Some(source)
            }
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for wallgen results
pub type Result<T> = std::result::Result<T, WallgenError>;

impl From<image::ImageError> for WallgenError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageDecodeFailure {
            origin: "<unknown>".to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for WallgenError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WallgenError {
    WallgenError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a state corruption error for logging a dropped cell or point
pub fn state_corruption(component: &'static str, detail: &impl ToString) -> WallgenError {
    WallgenError::AlgorithmStateCorruption {
        component,
        detail: detail.to_string(),
    }
}
