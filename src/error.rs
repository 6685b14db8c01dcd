//! Error types for image command generation.
//!
//! This module defines all possible errors that can occur while turning a
//! raster image into a printer command stream.

use thiserror::Error;

/// Main error type for encoding operations.
///
/// Every variant is surfaced synchronously to the caller. An encode call
/// that fails never hands back a partially built command stream.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested printer language has no encoder.
    ///
    /// Holds the name that was requested, as given by the caller.
    #[error("{0} image conversion is not yet supported")]
    UnsupportedFormat(String),

    /// Text portions of a command could not be encoded.
    ///
    /// Raised for unknown charset names and for characters that the
    /// selected charset can not represent.
    #[error("Can't encode text as {charset}: {reason}")]
    Encoding { charset: String, reason: String },

    #[error("Invalid configuration parameter: {0}")]
    InvalidConfig(String),

    /// Image decoding or buffer manipulation error.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
