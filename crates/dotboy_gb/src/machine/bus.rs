use super::cartridge::Cartridge;
use super::interrupts::InterruptController;
use super::joypad::{Button, Joypad};
use super::ppu::Ppu;
use super::serial::Serial;
use super::timer::Timer;
use crate::config::RamInit;

mod apu;
mod dma;
mod init;
mod mmio;

use apu::SoundRegisters;

const WRAM_SIZE: usize = 0x2000;
const HRAM_SIZE: usize = 0x7F;

/// The DMG memory map.
///
/// Every address is routed to the unit that owns it; the bus itself only
/// stores WRAM and HRAM. The CPU sees it through [`crate::cpu::Bus`].
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct GameBoyBus {
    cartridge: Cartridge,
    wram: Box<[u8; WRAM_SIZE]>,
    hram: [u8; HRAM_SIZE],
    pub(crate) ppu: Ppu,
    pub(crate) timer: Timer,
    pub(crate) interrupts: InterruptController,
    joypad: Joypad,
    serial: Serial,
    sound: SoundRegisters,
    /// Last value written to FF46.
    dma: u8,
}

impl GameBoyBus {
    pub(crate) fn new(cartridge: Cartridge, ram_init: RamInit) -> Self {
        let mut bus = Self {
            cartridge,
            wram: Box::new([0; WRAM_SIZE]),
            hram: [0; HRAM_SIZE],
            ppu: Ppu::new(),
            timer: Timer::new(),
            interrupts: InterruptController::default(),
            joypad: Joypad::new(),
            serial: Serial::new(),
            sound: SoundRegisters::new(),
            dma: 0,
        };
        bus.power_on(ram_init);
        bus
    }

    pub(crate) fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    /// Return every unit to its post-boot state. Cartridge RAM survives.
    pub(crate) fn reset(&mut self, ram_init: RamInit) {
        self.cartridge.reset();
        self.power_on(ram_init);
    }

    /// Advance the clocked units by `cycles` T-cycles: timer first, then PPU.
    pub(crate) fn advance(&mut self, cycles: u32) {
        self.timer.advance(cycles, &mut self.interrupts);
        self.ppu.advance(cycles, &mut self.interrupts);
    }

    pub(crate) fn press_button(&mut self, button: Button) {
        self.joypad.press(button, &mut self.interrupts);
    }

    pub(crate) fn release_button(&mut self, button: Button) {
        self.joypad.release(button);
    }
}
