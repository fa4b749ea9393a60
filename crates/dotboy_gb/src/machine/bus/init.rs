use super::GameBoyBus;
use crate::config::RamInit;
use crate::machine::interrupts::{Interrupt, InterruptController};
use crate::machine::joypad::Joypad;
use crate::machine::ppu::Ppu;
use crate::machine::serial::Serial;
use crate::machine::timer::Timer;

use super::apu::SoundRegisters;

impl GameBoyBus {
    /// Put every unit into the state the DMG boot ROM leaves behind at
    /// PC=0x0100.
    pub(super) fn power_on(&mut self, ram_init: RamInit) {
        self.fill_internal_ram(ram_init);

        self.ppu = Ppu::new();
        self.timer = Timer::new();
        self.joypad = Joypad::new();
        self.serial = Serial::new();
        self.sound = SoundRegisters::new();

        // The boot ROM leaves a V-blank request pending.
        self.interrupts = InterruptController {
            enable: 0x00,
            flags: Interrupt::VBLANK,
        };
        self.dma = 0xFF;
    }

    /// Fill WRAM and HRAM according to `ram_init`.
    ///
    /// The pseudo-random fill is a fixed-seed xorshift32 so runs stay
    /// reproducible.
    fn fill_internal_ram(&mut self, ram_init: RamInit) {
        match ram_init {
            RamInit::Zeroed => {
                self.wram.fill(0);
                self.hram.fill(0);
            }
            RamInit::Pseudorandom { seed } => {
                let mut x = seed;
                let mut next_byte = || {
                    x ^= x << 13;
                    x ^= x >> 17;
                    x ^= x << 5;
                    x as u8
                };
                self.wram.iter_mut().for_each(|b| *b = next_byte());
                self.hram.iter_mut().for_each(|b| *b = next_byte());
            }
        }
    }
}
