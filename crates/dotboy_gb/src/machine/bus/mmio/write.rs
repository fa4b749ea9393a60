use super::super::GameBoyBus;
use super::DMA;
use crate::machine::serial::{SB, SC};
use crate::machine::timer::io::{DIV, TAC};

impl GameBoyBus {
    pub(in crate::machine::bus) fn write_mapped(&mut self, addr: u16, value: u8) {
        match addr {
            // Writes into ROM are bank-control writes.
            0x0000..=0x7FFF => self.cartridge.rom_write(addr, value),
            0x8000..=0x9FFF => self.ppu.cpu_write_vram(addr, value),
            0xA000..=0xBFFF => self.cartridge.ram_write(addr, value),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize] = value,
            0xFE00..=0xFE9F => self.ppu.cpu_write_oam(addr, value),
            0xFEA0..=0xFEFF => {}

            0xFF00 => self.joypad.write(value),
            SB | SC => self.serial.write(addr, value),
            DIV..=TAC => self.timer.write(addr, value, &mut self.interrupts),
            0xFF0F => self.interrupts.write_if(value),
            0xFF10..=0xFF3F => self.sound.write(addr, value),
            DMA => self.oam_dma(value),
            0xFF40..=0xFF4B => self.ppu.write_register(addr, value, &mut self.interrupts),

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            0xFFFF => self.interrupts.enable = value,

            _ => {}
        }
    }
}
