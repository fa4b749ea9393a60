mod header;
mod mbc1;
mod mbc5;
mod rom_only;

pub use header::CartridgeHeader;

use mbc1::Mbc1Cartridge;
use mbc5::Mbc5Cartridge;
use rom_only::RomOnlyCartridge;

use crate::error::{GameBoyError, Result};

/// Memory bank controller behind the cartridge slot.
#[derive(Clone, PartialEq, Eq)]
enum Mapper {
    RomOnly(RomOnlyCartridge),
    Mbc1(Mbc1Cartridge),
    Mbc5(Mbc5Cartridge),
}

/// Inserted cartridge: the parsed header plus the mapper owning ROM/RAM.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Cartridge {
    header: CartridgeHeader,
    mapper: Mapper,
}

impl Cartridge {
    /// Parse the header and pick the mapper named by byte 0x0147.
    pub(crate) fn from_rom(rom: &[u8]) -> Result<Self> {
        let header = CartridgeHeader::parse(rom)?;
        if !header.checksum_ok() {
            log::warn!(
                "GB cartridge: header checksum mismatch (stored 0x{:02X}, computed 0x{:02X})",
                header.header_checksum,
                header.computed_checksum,
            );
        }

        let ram_size = header.ram_size();
        let mapper = match header.cartridge_type {
            0x00 | 0x08 | 0x09 => Mapper::RomOnly(RomOnlyCartridge::new(rom, ram_size)),
            0x01..=0x03 => Mapper::Mbc1(Mbc1Cartridge::new(rom, ram_size)),
            0x19..=0x1E => Mapper::Mbc5(Mbc5Cartridge::new(rom, ram_size)),
            cartridge_type => {
                return Err(GameBoyError::UnsupportedCartridge { cartridge_type });
            }
        };

        log::debug!(
            "GB cartridge: \"{}\" type=0x{:02X} rom={} bytes ram={} bytes",
            header.title,
            header.cartridge_type,
            rom.len(),
            ram_size,
        );
        Ok(Self { header, mapper })
    }

    pub(crate) fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    /// Return the mapper registers to their power-on values.
    pub(crate) fn reset(&mut self) {
        match &mut self.mapper {
            Mapper::RomOnly(_) => {}
            Mapper::Mbc1(m) => m.reset(),
            Mapper::Mbc5(m) => m.reset(),
        }
    }

    pub(crate) fn rom_read(&self, addr: u16) -> u8 {
        match &self.mapper {
            Mapper::RomOnly(m) => m.rom_read(addr),
            Mapper::Mbc1(m) => m.rom_read(addr),
            Mapper::Mbc5(m) => m.rom_read(addr),
        }
    }

    /// Writes into the ROM area are bank-control writes.
    pub(crate) fn rom_write(&mut self, addr: u16, value: u8) {
        match &mut self.mapper {
            Mapper::RomOnly(_) => {}
            Mapper::Mbc1(m) => m.rom_write(addr, value),
            Mapper::Mbc5(m) => m.rom_write(addr, value),
        }
    }

    pub(crate) fn ram_read(&self, addr: u16) -> u8 {
        match &self.mapper {
            Mapper::RomOnly(m) => m.ram_read(addr),
            Mapper::Mbc1(m) => m.ram_read(addr),
            Mapper::Mbc5(m) => m.ram_read(addr),
        }
    }

    pub(crate) fn ram_write(&mut self, addr: u16, value: u8) {
        match &mut self.mapper {
            Mapper::RomOnly(m) => m.ram_write(addr, value),
            Mapper::Mbc1(m) => m.ram_write(addr, value),
            Mapper::Mbc5(m) => m.ram_write(addr, value),
        }
    }
}
