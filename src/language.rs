use std::{fmt, str::FromStr};

use bitflags::bitflags;

use crate::error::Error;

bitflags! {
    /// Constraints a printer language puts on the bitmap it receives.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        /// Image width has to be a multiple of 8 dots, narrower images are padded.
        const WIDTH_MULTIPLE_OF_8 = 0b0000_0001;
        /// Black dots are sent as `0` bits instead of `1`.
        const INVERTED_BITS = 0b0000_0010;
    }
}

/// Printer control languages an image can be encoded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrinterLanguage {
    EscP,
    EscP2,
    Zpl,
    ZplII,
    Epl,
    Epl2,
    Cpcl,
}

impl PrinterLanguage {
    pub const ALL: [PrinterLanguage; 7] = [
        Self::EscP,
        Self::EscP2,
        Self::Zpl,
        Self::ZplII,
        Self::Epl,
        Self::Epl2,
        Self::Cpcl,
    ];

    pub fn capabilities(&self) -> Capabilities {
        match self {
            // EPL uses 0's for black pixels, see the GW command reference.
            Self::Epl | Self::Epl2 => {
                Capabilities::WIDTH_MULTIPLE_OF_8 | Capabilities::INVERTED_BITS
            }
            _ => Capabilities::empty(),
        }
    }

    pub fn requires_width_multiple_of_8(&self) -> bool {
        self.capabilities()
            .contains(Capabilities::WIDTH_MULTIPLE_OF_8)
    }

    pub fn requires_bit_inversion(&self) -> bool {
        self.capabilities().contains(Capabilities::INVERTED_BITS)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::EscP => "ESCP",
            Self::EscP2 => "ESCP2",
            Self::Zpl => "ZPL",
            Self::ZplII => "ZPLII",
            Self::Epl => "EPL",
            Self::Epl2 => "EPL2",
            Self::Cpcl => "CPCL",
        }
    }
}

impl fmt::Display for PrinterLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrinterLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '/' | '-' | '_' | ' '))
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "ESCP" | "ESCPOS" => Ok(Self::EscP),
            "ESCP2" => Ok(Self::EscP2),
            "ZPL" => Ok(Self::Zpl),
            "ZPLII" | "ZPL2" => Ok(Self::ZplII),
            "EPL" => Ok(Self::Epl),
            "EPL2" | "EPLII" => Ok(Self::Epl2),
            "CPCL" => Ok(Self::Cpcl),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}
