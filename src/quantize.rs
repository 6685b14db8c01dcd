//! Monochrome quantization.
//!
//! Decides for every pixel whether the printer should put a dot there.
//! Classification is independent of the target language; languages that
//! use `0` for black flip the result afterwards.

use std::str::FromStr;

use image::{GenericImageView, Rgba};
use log::debug;

use crate::error::Error;

/// Policy used to reduce a pixel to black or white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizationMethod {
    /// Only fully opaque, fully black pixels are black.
    CheckBlack,
    /// Black when the luma is under the luma threshold. Pixels more
    /// transparent than that same threshold count as background.
    CheckLuma,
    /// Black when the alpha is over the alpha threshold, color is ignored.
    CheckAlpha,
}

impl QuantizationMethod {
    /// Map a numeric method code. Unknown codes fall back to `CheckBlack`.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::CheckLuma,
            2 => Self::CheckAlpha,
            _ => Self::CheckBlack,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::CheckBlack => 0,
            Self::CheckLuma => 1,
            Self::CheckAlpha => 2,
        }
    }
}

impl FromStr for QuantizationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "black" | "check_black" | "0" => Ok(Self::CheckBlack),
            "luma" | "check_luma" | "1" => Ok(Self::CheckLuma),
            "alpha" | "check_alpha" | "2" => Ok(Self::CheckAlpha),
            _ => Err(Error::InvalidConfig(format!(
                "unknown quantization method {}",
                s
            ))),
        }
    }
}

pub const DEFAULT_THRESHOLD: u8 = 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizationConfig {
    pub method: QuantizationMethod,
    pub luma_threshold: u8,
    pub alpha_threshold: u8,
}

impl Default for QuantizationConfig {
    fn default() -> Self {
        QuantizationConfig {
            method: QuantizationMethod::CheckLuma,
            luma_threshold: DEFAULT_THRESHOLD,
            alpha_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl QuantizationConfig {
    pub fn is_black(&self, pixel: &Rgba<u8>) -> bool {
        let [r, g, b, a] = pixel.0;

        match self.method {
            QuantizationMethod::CheckLuma => {
                // The luma threshold gates opacity as well.
                if a < self.luma_threshold {
                    return false;
                }
                luma(r, g, b) < u32::from(self.luma_threshold)
            }
            QuantizationMethod::CheckAlpha => a > self.alpha_threshold,
            QuantizationMethod::CheckBlack => r == 0 && g == 0 && b == 0 && a == 255,
        }
    }
}

/// Weighted brightness, `(299R + 587G + 114B) / 1000`.
pub fn luma(r: u8, g: u8, b: u8) -> u32 {
    (299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000
}

/// Classify every pixel in row-major order.
///
/// The returned grid always holds `width * height` entries. With `invert`
/// set, `true` marks white pixels instead of black ones.
pub fn classify<I>(image: &I, config: &QuantizationConfig, invert: bool) -> Vec<bool>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = image.dimensions();
    debug!(
        "Converting {}x{} image to monochrome with {:?}",
        width, height, config.method
    );

    let mut grid = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let black = config.is_black(&image.get_pixel(x, y));
            grid.push(black != invert);
        }
    }
    grid
}
