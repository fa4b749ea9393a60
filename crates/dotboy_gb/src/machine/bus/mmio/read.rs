use super::super::GameBoyBus;
use super::DMA;
use crate::machine::serial::{SB, SC};
use crate::machine::timer::io::{DIV, TAC};

impl GameBoyBus {
    pub(in crate::machine::bus) fn read_mapped(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_read(addr),
            0x8000..=0x9FFF => self.ppu.cpu_read_vram(addr),
            0xA000..=0xBFFF => self.cartridge.ram_read(addr),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],
            // Echo RAM mirrors C000-DDFF.
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize],
            0xFE00..=0xFE9F => self.ppu.cpu_read_oam(addr),
            0xFEA0..=0xFEFF => 0xFF,

            0xFF00 => self.joypad.read(),
            SB | SC => self.serial.read(addr),
            DIV..=TAC => self.timer.read(addr),
            0xFF0F => self.interrupts.read_if(),
            0xFF10..=0xFF3F => self.sound.read(addr),
            DMA => self.dma,
            0xFF40..=0xFF4B => self.ppu.read_register(addr),

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            0xFFFF => self.interrupts.enable,

            _ => 0xFF,
        }
    }
}
