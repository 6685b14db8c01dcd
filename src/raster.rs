use image::{GenericImage, GenericImageView, Rgba, RgbaImage};
use log::debug;

use crate::error::Error;

/// Width in dots rounded up to the next multiple of 8.
pub fn padded_width(width: u32) -> u32 {
    (width + 7) / 8 * 8
}

/// Right-pad an image with transparent dots until its width is a multiple of 8.
///
/// The original pixels are copied to the top-left corner of the new image.
/// An image that is already a multiple of 8 wide comes back unchanged.
/// Any monochrome grid derived from the source is stale afterwards.
pub fn pad_to_multiple_of_8<I>(image: &I) -> Result<RgbaImage, Error>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = image.dimensions();
    let new_width = padded_width(width);
    if new_width != width {
        debug!("Padding image width from {} to {}", width, new_width);
    }

    // ImageBuffer::new is zero filled, i.e. fully transparent.
    let mut padded = RgbaImage::new(new_width, height);
    padded.copy_from(image, 0, 0)?;
    Ok(padded)
}
