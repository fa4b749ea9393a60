mod read;
mod write;

use super::GameBoyBus;
use crate::cpu::Bus;

pub(super) const DMA: u16 = 0xFF46;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read_mapped(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write_mapped(addr, value)
    }

    fn take_stop_wake(&mut self) -> bool {
        self.joypad.take_stop_wake()
    }
}
