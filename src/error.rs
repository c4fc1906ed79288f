//! Unified error type for qrstyler.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a single QR generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A required request field was absent or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The requested design name has no strategy.
    #[error("Unsupported design: {0}. Supported designs: google, multicolored, custom")]
    UnsupportedDesign(String),

    /// A drawing primitive was given geometry outside the canvas.
    #[error(
        "Out of bounds: {width}x{height} at ({x}, {y}) does not fit a {canvas_width}x{canvas_height} canvas"
    )]
    OutOfBounds {
        /// Left edge of the requested area.
        x: u32,
        /// Top edge of the requested area.
        y: u32,
        /// Width of the requested area.
        width: u32,
        /// Height of the requested area.
        height: u32,
        /// Width of the target canvas.
        canvas_width: u32,
        /// Height of the target canvas.
        canvas_height: u32,
    },

    /// The configuration file is missing or malformed.
    #[error("Config error: {0}")]
    Config(String),

    /// The payload could not be encoded as a QR code.
    #[error("QR encoding error: {0}")]
    Encode(String),

    /// The output image could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    FileWrite {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying image or I/O error.
        source: image::ImageError,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a single font candidate could not be used.
///
/// These never abort a generation; the resolver logs them and moves on.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be read.
    #[error("cannot read font {}: {source}", path.display())]
    Read {
        /// The candidate path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but is not a usable font.
    #[error("invalid font data in {}", path.display())]
    Invalid {
        /// The candidate path.
        path: PathBuf,
    },

    /// The font compiled into the binary could not be parsed.
    #[error("embedded font is not a valid font")]
    Embedded,
}
