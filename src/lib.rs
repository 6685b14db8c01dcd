//! Thermal Printer Image Encoder
//!
//! This crate converts raster images into the image commands of common
//! dot-matrix and label printer languages: ESC/P, ZPL, EPL and CPCL.
//! It only builds the byte stream, sending it to a printer is up to the caller.
//!
//! # Example
//!
//! ```rust
//! use image::{Rgba, RgbaImage};
//! use thermal_raster::{encode, EncodeConfig, PrinterLanguage, QuantizationMethod};
//!
//! let image = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
//! let config = EncodeConfig::new(PrinterLanguage::Cpcl)
//!     .quantization(QuantizationMethod::CheckBlack)
//!     .position(10, 20);
//! let commands = encode(&image, config).unwrap();
//! assert!(commands.starts_with(b"EG 1 8 10 20 FF"));
//! ```

mod bits;
mod buffer;
mod charset;
mod encoder;
mod error;
mod language;
mod quantize;
mod raster;

pub use crate::{
    bits::{pack, to_hex},
    buffer::CommandBuffer,
    charset::Charset,
    encoder::{encode, EncodeConfig, Encoder, Monochrome, DOUBLE_DENSITY, SINGLE_DENSITY},
    error::Error,
    language::{Capabilities, PrinterLanguage},
    quantize::{classify, luma, QuantizationConfig, QuantizationMethod, DEFAULT_THRESHOLD},
    raster::{pad_to_multiple_of_8, padded_width},
};
