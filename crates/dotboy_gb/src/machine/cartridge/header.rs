use crate::error::{GameBoyError, Result};

/// End of the cartridge header (exclusive); shorter images are rejected.
const HEADER_END: usize = 0x150;

const TITLE: std::ops::Range<usize> = 0x134..0x144;
const CARTRIDGE_TYPE: usize = 0x147;
const ROM_SIZE: usize = 0x148;
const RAM_SIZE: usize = 0x149;
const HEADER_CHECKSUM: usize = 0x14D;

/// Parsed fields of the cartridge header at 0x0100-0x014F.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    /// Upper-case ASCII title, trailing padding removed.
    pub title: String,
    pub cartridge_type: u8,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    /// Checksum byte stored at 0x014D.
    pub header_checksum: u8,
    /// Checksum the boot ROM would compute over 0x0134-0x014C.
    pub computed_checksum: u8,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(GameBoyError::RomTooShort { len: rom.len() });
        }

        let title = rom[TITLE]
            .iter()
            .take_while(|&&b| b != 0)
            .filter(|b| b.is_ascii_graphic() || **b == b' ')
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end()
            .to_owned();

        let computed_checksum = rom[0x134..HEADER_CHECKSUM]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1));

        Ok(Self {
            title,
            cartridge_type: rom[CARTRIDGE_TYPE],
            rom_size_code: rom[ROM_SIZE],
            ram_size_code: rom[RAM_SIZE],
            header_checksum: rom[HEADER_CHECKSUM],
            computed_checksum,
        })
    }

    pub fn checksum_ok(&self) -> bool {
        self.header_checksum == self.computed_checksum
    }

    /// External RAM size in bytes as declared by byte 0x0149.
    pub fn ram_size(&self) -> usize {
        match self.ram_size_code {
            0x01 => 0x800,
            0x02 => 0x2000,
            0x03 => 0x8000,
            0x04 => 0x2_0000,
            0x05 => 0x1_0000,
            _ => 0,
        }
    }
}
