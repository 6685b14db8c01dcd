use image::{GenericImageView, Rgba};
use log::{debug, info};

use crate::{
    bits,
    buffer::CommandBuffer,
    charset::Charset,
    error::Error,
    language::PrinterLanguage,
    quantize::{self, QuantizationConfig, QuantizationMethod},
    raster,
};

/// ESC/P single density bit image mode.
pub const SINGLE_DENSITY: u8 = 32;
/// ESC/P double density bit image mode.
pub const DOUBLE_DENSITY: u8 = 33;

const ESC: u8 = 0x1B;
/// Height of one ESC/P bit image band in dots.
const BAND_HEIGHT: u32 = 24;
const DEFAULT_LINE_SPACING: u8 = 30;

/// Encode configuration
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeConfig {
    language: PrinterLanguage,
    quantization: QuantizationConfig,
    x: u32,
    y: u32,
    dot_density: u8,
    charset: Charset,
}

impl EncodeConfig {
    /// Initialize configuration data with default values.
    ///
    /// The language is fixed here, everything else can be tuned with the
    /// builder methods.
    ///
    /// # Example
    ///
    /// ```
    /// use thermal_raster::{EncodeConfig, PrinterLanguage, QuantizationMethod};
    ///
    /// let config = EncodeConfig::new(PrinterLanguage::Epl2)
    ///     .quantization(QuantizationMethod::CheckBlack)
    ///     .position(10, 20);
    /// assert_eq!(config.language(), PrinterLanguage::Epl2);
    /// ```
    pub fn new(language: PrinterLanguage) -> EncodeConfig {
        EncodeConfig {
            language,
            quantization: QuantizationConfig::default(),
            x: 0,
            y: 0,
            dot_density: SINGLE_DENSITY,
            charset: Charset::default(),
        }
    }

    pub fn quantization(self, method: QuantizationMethod) -> Self {
        EncodeConfig {
            quantization: QuantizationConfig {
                method,
                ..self.quantization
            },
            ..self
        }
    }

    /// Luma threshold for `CheckLuma`, from 0 (black) to 255 (white).
    pub fn luma_threshold(self, threshold: u8) -> Self {
        EncodeConfig {
            quantization: QuantizationConfig {
                luma_threshold: threshold,
                ..self.quantization
            },
            ..self
        }
    }

    /// Alpha threshold for `CheckAlpha`, from 0 (transparent) to 255 (opaque).
    pub fn alpha_threshold(self, threshold: u8) -> Self {
        EncodeConfig {
            quantization: QuantizationConfig {
                alpha_threshold: threshold,
                ..self.quantization
            },
            ..self
        }
    }

    /// Image origin in dots. Only EPL and CPCL place images by coordinates.
    pub fn position(self, x: u32, y: u32) -> Self {
        EncodeConfig { x, y, ..self }
    }

    /// ESC/P bit image mode, ignored by the other languages.
    pub fn dot_density(self, dot_density: u8) -> Self {
        EncodeConfig {
            dot_density,
            ..self
        }
    }

    pub fn charset(self, charset: Charset) -> Self {
        EncodeConfig { charset, ..self }
    }

    pub fn language(&self) -> PrinterLanguage {
        self.language
    }

    pub fn quantization_config(&self) -> QuantizationConfig {
        self.quantization
    }
}

/// A quantized image ready to be laid out in a printer language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monochrome {
    width: u32,
    height: u32,
    dots: Vec<bool>,
    packed: Vec<u8>,
}

impl Monochrome {
    /// Run classification and bit packing for `language`.
    ///
    /// Pads the image first when the language needs a width that is a
    /// multiple of 8, and flips the dots when it uses `0` for black.
    pub fn new<I>(
        image: &I,
        config: &QuantizationConfig,
        language: PrinterLanguage,
    ) -> Result<Self, Error>
    where
        I: GenericImageView<Pixel = Rgba<u8>>,
    {
        let invert = language.requires_bit_inversion();

        if language.requires_width_multiple_of_8() && image.width() % 8 != 0 {
            let padded = raster::pad_to_multiple_of_8(image)?;
            Ok(Self::classify(&padded, config, invert))
        } else {
            Ok(Self::classify(image, config, invert))
        }
    }

    fn classify<I>(image: &I, config: &QuantizationConfig, invert: bool) -> Self
    where
        I: GenericImageView<Pixel = Rgba<u8>>,
    {
        let (width, height) = image.dimensions();
        let dots = quantize::classify(image, config, invert);
        let packed = bits::pack(&dots);

        Monochrome {
            width,
            height,
            dots,
            packed,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major dots, `true` meaning a set bit in the output.
    pub fn dots(&self) -> &[bool] {
        &self.dots
    }

    pub fn packed(&self) -> &[u8] {
        &self.packed
    }

    fn dot(&self, x: u32, y: u32) -> bool {
        let index = y as usize * self.width as usize + x as usize;
        self.dots.get(index).copied().unwrap_or(false)
    }
}

/// Builds image commands for one configuration.
///
/// The encoder keeps no image state between calls. It owns a single
/// command buffer, so one encoder must not be shared by concurrent callers.
#[derive(Debug, Clone)]
pub struct Encoder {
    config: EncodeConfig,
    buffer: CommandBuffer,
}

impl Encoder {
    pub fn new(config: EncodeConfig) -> Self {
        Encoder {
            config,
            buffer: CommandBuffer::new(),
        }
    }

    pub fn config(&self) -> &EncodeConfig {
        &self.config
    }

    /// Produce the printer commands for `image`.
    ///
    /// An image without any dots (zero width or height) yields an empty
    /// command stream. On error nothing is returned and the internal
    /// buffer is left empty.
    pub fn image_command<I>(&mut self, image: &I) -> Result<Vec<u8>, Error>
    where
        I: GenericImageView<Pixel = Rgba<u8>>,
    {
        self.buffer.clear();

        let (width, height) = image.dimensions();
        debug!("Loading image, dimensions: {}x{}", width, height);
        if width == 0 || height == 0 {
            debug!("Empty image, nothing to encode");
            return Ok(Vec::new());
        }

        let language = self.config.language;
        let bitmap = Monochrome::new(image, &self.config.quantization, language)?;

        debug!("Generating {} image command", language);
        let result = match language {
            PrinterLanguage::EscP | PrinterLanguage::EscP2 => {
                append_escp_slices(&mut self.buffer, &bitmap, self.config.dot_density);
                Ok(())
            }
            PrinterLanguage::Zpl | PrinterLanguage::ZplII => {
                append_zpl(&mut self.buffer, &bitmap, self.config.charset)
            }
            PrinterLanguage::Epl | PrinterLanguage::Epl2 => append_epl(
                &mut self.buffer,
                &bitmap,
                self.config.x,
                self.config.y,
                self.config.charset,
            ),
            PrinterLanguage::Cpcl => append_cpcl(
                &mut self.buffer,
                &bitmap,
                self.config.x,
                self.config.y,
                self.config.charset,
            ),
        };

        match result {
            Ok(()) => {
                info!("Generated {} bytes of {} commands", self.buffer.len(), language);
                Ok(self.buffer.take())
            }
            Err(err) => {
                self.buffer.clear();
                Err(err)
            }
        }
    }
}

/// Encode `image` with a one-off encoder.
pub fn encode<I>(image: &I, config: EncodeConfig) -> Result<Vec<u8>, Error>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    Encoder::new(config).image_command(image)
}

/// ESC/P bit image in 24 dot bands.
///
/// For every column of a band three bytes are sent, stacking 24 vertical
/// dots MSB first. Dots below the bottom of the image are white.
fn append_escp_slices(buffer: &mut CommandBuffer, bitmap: &Monochrome, dot_density: u8) {
    let width = bitmap.width();
    let height = bitmap.height();

    // Line spacing equal to the band height so bands join without gaps
    buffer.append(&[ESC, 0x33, BAND_HEIGHT as u8]);

    let n_l = (width % 256) as u8;
    let n_h = (width / 256) as u8;

    let mut offset = 0;
    while offset < height {
        buffer.append(&[ESC, 0x2A, dot_density, n_l, n_h]);

        for x in 0..width {
            for k in 0..3 {
                let mut slice: u8 = 0;
                for b in 0..8 {
                    let y = ((offset / 8) + k) * 8 + b;
                    if bitmap.dot(x, y) {
                        slice |= 1 << (7 - b);
                    }
                }
                buffer.push(slice);
            }
        }

        offset += BAND_HEIGHT;
        buffer.push(b'\n');
    }

    buffer.append(&[ESC, 0x33, DEFAULT_LINE_SPACING]);
}

/// ZPL `^GFA` graphic field with an ASCII hex payload.
fn append_zpl(
    buffer: &mut CommandBuffer,
    bitmap: &Monochrome,
    charset: Charset,
) -> Result<(), Error> {
    let hex = bits::to_hex(bitmap.packed());
    let byte_len = hex.len() / 2;
    let per_row = byte_len / bitmap.height() as usize;

    let command = format!("^GFA,{},{},{},{}", byte_len, byte_len, per_row, hex);
    buffer.append_str(&command, charset)?;
    Ok(())
}

/// EPL `GW` direct graphic write with raw binary rows.
fn append_epl(
    buffer: &mut CommandBuffer,
    bitmap: &Monochrome,
    x: u32,
    y: u32,
    charset: Charset,
) -> Result<(), Error> {
    let header = format!("GW{},{},{},{},", x, y, bitmap.width() / 8, bitmap.height());
    buffer.append_str(&header, charset)?.append(bitmap.packed());
    Ok(())
}

/// CPCL `EG` expanded graphics with an ASCII hex payload.
fn append_cpcl(
    buffer: &mut CommandBuffer,
    bitmap: &Monochrome,
    x: u32,
    y: u32,
    charset: Charset,
) -> Result<(), Error> {
    let hex = bits::to_hex(bitmap.packed());
    let command = format!(
        "EG {} {} {} {} {}",
        bitmap.width() / 8,
        bitmap.height(),
        x,
        y,
        hex
    );
    buffer.append_str(&command, charset)?;
    Ok(())
}
