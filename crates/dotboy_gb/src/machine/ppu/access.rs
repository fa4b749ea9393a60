use super::registers::Mode;
use super::Ppu;

impl Ppu {
    /// VRAM is locked out during pixel transfer; always open while the LCD is off.
    fn vram_accessible(&self) -> bool {
        !self.lcd_enabled() || self.mode != Mode::Transfer
    }

    /// OAM is locked out during OAM scan and pixel transfer.
    fn oam_accessible(&self) -> bool {
        !self.lcd_enabled() || matches!(self.mode, Mode::HBlank | Mode::VBlank)
    }

    pub(crate) fn cpu_read_vram(&self, addr: u16) -> u8 {
        if self.vram_accessible() {
            self.vram[(addr & 0x1FFF) as usize]
        } else {
            0xFF
        }
    }

    pub(crate) fn cpu_write_vram(&mut self, addr: u16, value: u8) {
        if self.vram_accessible() {
            self.vram[(addr & 0x1FFF) as usize] = value;
        }
    }

    pub(crate) fn cpu_read_oam(&self, addr: u16) -> u8 {
        if self.oam_accessible() {
            self.oam[(addr - 0xFE00) as usize]
        } else {
            0xFF
        }
    }

    pub(crate) fn cpu_write_oam(&mut self, addr: u16, value: u8) {
        if self.oam_accessible() {
            self.oam[(addr - 0xFE00) as usize] = value;
        }
    }

    /// OAM DMA writes bypass the mode lockout.
    pub(crate) fn dma_write_oam(&mut self, index: usize, value: u8) {
        self.oam[index] = value;
    }
}
