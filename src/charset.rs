//! Character sets for the textual portions of printer commands.
//!
//! ZPL, EPL and CPCL embed their parameters (and, for ZPL and CPCL, the
//! hex encoded bitmap) as text. Printers expect that text in a single byte
//! code page most of the time, so the charset is part of the encode
//! configuration.

use std::{fmt, str::FromStr};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    UsAscii,
    Iso8859_1,
    /// IBM code page 437, the power-on default of most thermal printers.
    Ibm437,
}

impl Default for Charset {
    fn default() -> Self {
        Self::Utf8
    }
}

impl Charset {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::UsAscii => "US-ASCII",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::Ibm437 => "IBM437",
        }
    }

    /// Encode `text` into bytes of this charset.
    ///
    /// Fails on the first character the charset has no byte for.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, Error> {
        if *self == Self::Utf8 {
            return Ok(text.as_bytes().to_vec());
        }

        let mut buf = Vec::with_capacity(text.len());
        for ch in text.chars() {
            match self.encode_char(ch) {
                Some(byte) => buf.push(byte),
                None => {
                    return Err(Error::Encoding {
                        charset: self.name().to_string(),
                        reason: format!("unmappable character '{}' (U+{:04X})", ch, ch as u32),
                    })
                }
            }
        }
        Ok(buf)
    }

    fn encode_char(&self, ch: char) -> Option<u8> {
        let code = ch as u32;
        if code < 0x80 {
            return Some(code as u8);
        }
        match self {
            Self::UsAscii => None,
            Self::Iso8859_1 if code <= 0xFF => Some(code as u8),
            Self::Iso8859_1 => None,
            Self::Ibm437 => IBM437_HIGH
                .iter()
                .position(|c| *c == ch)
                .map(|i| 0x80 + i as u8),
            Self::Utf8 => None,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "UTF-8" | "UTF8" => Ok(Self::Utf8),
            "US-ASCII" | "ASCII" => Ok(Self::UsAscii),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" => Ok(Self::Iso8859_1),
            "IBM437" | "CP437" | "437" => Ok(Self::Ibm437),
            _ => Err(Error::Encoding {
                charset: s.to_string(),
                reason: "unsupported character set".to_string(),
            }),
        }
    }
}

/// Code page 437, bytes 0x80 to 0xFF.
const IBM437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', //
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', //
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', //
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', //
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', //
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', //
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', //
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{A0}',
];
