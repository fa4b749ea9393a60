/// MBC5 cartridge state.
///
/// Up to 512 ROM banks (9-bit bank number, bank 0 selectable at
/// 0x4000-0x7FFF) and up to 16 RAM banks. The rumble motor bit is ignored.
#[derive(Clone, PartialEq, Eq)]
pub(in super::super) struct Mbc5Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    num_rom_banks: usize,
    rom_bank: u16,
    ram_bank: u8,
    ram_enable: bool,
}

impl Mbc5Cartridge {
    pub(super) fn new(rom: &[u8], ram_size: usize) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0xFF; ram_size],
            num_rom_banks: (rom.len() / 0x4000).max(1),
            rom_bank: 1,
            ram_bank: 0,
            ram_enable: false,
        }
    }

    pub(super) fn reset(&mut self) {
        self.rom_bank = 1;
        self.ram_bank = 0;
        self.ram_enable = false;
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let bank = if addr < 0x4000 {
            0
        } else {
            self.rom_bank as usize % self.num_rom_banks
        };
        let index = bank * 0x4000 + (addr & 0x3FFF) as usize;
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                self.ram_enable = (value & 0x0F) == 0x0A;
            }
            0x2000..=0x2FFF => {
                self.rom_bank = (self.rom_bank & 0x100) | value as u16;
                log::debug!("GB MBC5: ROM bank -> {}", self.rom_bank);
            }
            0x3000..=0x3FFF => {
                self.rom_bank = (self.rom_bank & 0xFF) | (((value & 0x01) as u16) << 8);
                log::debug!("GB MBC5: ROM bank -> {}", self.rom_bank);
            }
            0x4000..=0x5FFF => {
                self.ram_bank = value & 0x0F;
            }
            _ => {}
        }
    }

    fn ram_offset(&self, addr: u16) -> Option<usize> {
        if !self.ram_enable || self.ram.is_empty() {
            return None;
        }
        let offset = self.ram_bank as usize * 0x2000 + (addr as usize - 0xA000);
        Some(offset % self.ram.len())
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        match self.ram_offset(addr) {
            Some(offset) => self.ram[offset],
            None => 0xFF,
        }
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if let Some(offset) = self.ram_offset(addr) {
            self.ram[offset] = value;
        }
    }
}
