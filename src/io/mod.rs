//! Input/output: errors, constants, the command line and file formats

/// GIF capture of a running algorithm
pub mod animation;
/// Command-line interface and logging setup
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Image decoding and raster encoding
pub mod image;
/// Terminal progress bars
pub mod progress;
