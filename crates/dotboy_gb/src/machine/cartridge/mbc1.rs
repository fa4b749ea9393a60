/// MBC1 cartridge state.
///
/// ROM banking uses the 5-bit BANK1 register plus the 2-bit BANK2 register.
/// In mode 0 BANK2 only extends the switchable ROM bank; in mode 1 it also
/// selects the RAM bank and the bank mapped at 0x0000-0x3FFF. Battery
/// persistence is not modelled.
#[derive(Clone, PartialEq, Eq)]
pub(in super::super) struct Mbc1Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    num_rom_banks: usize,
    bank1: u8,
    bank2: u8,
    ram_enable: bool,
    advanced_mode: bool,
}

impl Mbc1Cartridge {
    pub(super) fn new(rom: &[u8], ram_size: usize) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0xFF; ram_size],
            num_rom_banks: (rom.len() / 0x4000).max(1),
            bank1: 1,
            bank2: 0,
            ram_enable: false,
            advanced_mode: false,
        }
    }

    /// Back to the power-on register state; RAM contents survive.
    pub(super) fn reset(&mut self) {
        self.bank1 = 1;
        self.bank2 = 0;
        self.ram_enable = false;
        self.advanced_mode = false;
    }

    fn rom_bank(&self, addr: u16) -> usize {
        let bank = if addr < 0x4000 {
            if self.advanced_mode {
                (self.bank2 as usize) << 5
            } else {
                0
            }
        } else {
            ((self.bank2 as usize) << 5) | self.bank1 as usize
        };
        bank % self.num_rom_banks
    }

    fn ram_offset(&self, addr: u16) -> Option<usize> {
        if !self.ram_enable || self.ram.is_empty() {
            return None;
        }
        let bank = if self.advanced_mode {
            self.bank2 as usize
        } else {
            0
        };
        let offset = bank * 0x2000 + (addr as usize - 0xA000);
        Some(offset % self.ram.len())
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let index = self.rom_bank(addr) * 0x4000 + (addr & 0x3FFF) as usize;
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                // RAM enable: lower 4 bits must be 0x0A.
                self.ram_enable = (value & 0x0F) == 0x0A;
            }
            0x2000..=0x3FFF => {
                // Bank 0 cannot be selected here; it reads as bank 1.
                self.bank1 = (value & 0x1F).max(1);
                log::debug!(
                    "GB MBC1: ROM bank -> {} (BANK1=0x{:02X} BANK2=0x{:02X})",
                    self.rom_bank(0x4000),
                    self.bank1,
                    self.bank2,
                );
            }
            0x4000..=0x5FFF => {
                self.bank2 = value & 0x03;
            }
            0x6000..=0x7FFF => {
                self.advanced_mode = (value & 0x01) != 0;
            }
            _ => {}
        }
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
