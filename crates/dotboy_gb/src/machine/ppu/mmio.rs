use super::registers::{LcdControl, StatSelect};
use super::Ppu;
use crate::machine::interrupts::InterruptController;

pub(crate) const LCDC: u16 = 0xFF40;
pub(crate) const STAT: u16 = 0xFF41;
pub(crate) const SCY: u16 = 0xFF42;
pub(crate) const SCX: u16 = 0xFF43;
pub(crate) const LY: u16 = 0xFF44;
pub(crate) const LYC: u16 = 0xFF45;
pub(crate) const BGP: u16 = 0xFF47;
pub(crate) const OBP0: u16 = 0xFF48;
pub(crate) const OBP1: u16 = 0xFF49;
pub(crate) const WY: u16 = 0xFF4A;
pub(crate) const WX: u16 = 0xFF4B;

impl Ppu {
    pub(crate) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            LCDC => self.lcdc.bits(),
            STAT => {
                let coincidence = if self.ly == self.lyc { 0x04 } else { 0x00 };
                0x80 | self.stat_select.bits() | coincidence | self.visible_mode() as u8
            }
            SCY => self.scy,
            SCX => self.scx,
            LY => self.ly,
            LYC => self.lyc,
            BGP => self.bgp,
            OBP0 => self.obp0,
            OBP1 => self.obp1,
            WY => self.wy,
            WX => self.wx,
            _ => 0xFF,
        }
    }

    pub(crate) fn write_register(
        &mut self,
        addr: u16,
        value: u8,
        interrupts: &mut InterruptController,
    ) {
        match addr {
            LCDC => {
                let was_enabled = self.lcd_enabled();
                self.lcdc = LcdControl::from_bits_truncate(value);
                let now_enabled = self.lcd_enabled();
                if was_enabled != now_enabled {
                    self.set_lcd_enabled(now_enabled, interrupts);
                }
            }
            STAT => {
                // Mode and coincidence bits are read-only.
                self.stat_select = StatSelect::from_bits_truncate(value & 0x78);
                self.update_stat_line(interrupts);
            }
            SCY => self.scy = value,
            SCX => self.scx = value,
            LY => {}
            LYC => {
                self.lyc = value;
                self.update_stat_line(interrupts);
            }
            BGP => self.bgp = value,
            OBP0 => self.obp0 = value,
            OBP1 => self.obp1 = value,
            WY => self.wy = value,
            WX => self.wx = value,
            _ => {}
        }
    }
}
