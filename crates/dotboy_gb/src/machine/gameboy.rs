use crate::config::GameBoyConfig;
use crate::cpu::Cpu;
use crate::error::Result;

use super::cartridge::{Cartridge, CartridgeHeader};
use super::interrupts::InterruptController;
use super::joypad::Button;
use super::ppu::{FrameBuffer, Palettes};
use super::{video, GameBoyBus};

/// High-level Game Boy machine.
///
/// Owns the CPU, the bus and every unit behind it. All stepping goes
/// through here so the CPU, timer and PPU stay on one clock.
pub struct GameBoy {
    pub(super) cpu: Cpu,
    pub(super) bus: GameBoyBus,
    config: GameBoyConfig,
}

impl GameBoy {
    /// Build a machine in its post-boot state with `rom` inserted.
    ///
    /// Fails if the image is too short to hold a header or names a
    /// cartridge type this core does not emulate.
    pub fn new(rom: &[u8], config: GameBoyConfig) -> Result<Self> {
        let cartridge = Cartridge::from_rom(rom)?;
        let bus = GameBoyBus::new(cartridge, config.ram_init);
        Ok(Self {
            cpu: Cpu::new(),
            bus,
            config,
        })
    }

    /// Power-cycle the console. The cartridge, including its RAM, stays in.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset(self.config.ram_init);
    }

    /// Execute one CPU step and advance the timer and PPU by its cycles.
    ///
    /// Returns the T-cycles consumed.
    pub fn step_instruction(&mut self) -> Result<u32> {
        let cycles = self.cpu.step(&mut self.bus)?;
        self.bus.advance(cycles);
        Ok(cycles)
    }

    /// Run until the PPU next enters V-blank (or, with the LCD off, until
    /// one frame's worth of cycles has passed).
    pub fn step_frame(&mut self) -> Result<()> {
        self.bus.ppu.clear_frame_ready();
        loop {
            self.step_instruction()?;
            if self.bus.ppu.take_frame_ready() {
                return Ok(());
            }
        }
    }

    /// Run `frames` whole frames. Zero frames leaves the machine untouched.
    pub fn step_frames(&mut self, frames: u32) -> Result<()> {
        for _ in 0..frames {
            self.step_frame()?;
        }
        Ok(())
    }

    /// Press the button bound to `code`, if any.
    pub fn key_down(&mut self, code: u32) {
        if let Some(button) = self.config.key_map.button(code) {
            self.press(button);
        }
    }

    /// Release the button bound to `code`, if any.
    pub fn key_up(&mut self, code: u32) {
        if let Some(button) = self.config.key_map.button(code) {
            self.release(button);
        }
    }

    pub fn press(&mut self, button: Button) {
        self.bus.press_button(button);
    }

    pub fn release(&mut self, button: Button) {
        self.bus.release_button(button);
    }

    /// The last completed frame as 2-bit shades.
    pub fn frame(&self) -> &FrameBuffer {
        self.bus.ppu.frame()
    }

    pub fn palettes(&self) -> Palettes {
        self.bus.ppu.palettes()
    }

    /// Write the current frame into `buffer` as RGB24 grayscale
    /// (160 * 144 * 3 bytes for a full frame).
    pub fn video_frame(&self, buffer: &mut [u8]) {
        video::render_rgb24(self.bus.ppu.frame(), buffer);
    }

    pub fn header(&self) -> &CartridgeHeader {
        self.bus.cartridge().header()
    }

    /// IE/IF as the CPU will see them at the next instruction boundary.
    pub fn interrupts(&self) -> &InterruptController {
        &self.bus.interrupts
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Current scanline (LY).
    pub fn ly(&self) -> u8 {
        self.bus.ppu.ly()
    }
}

impl std::fmt::Debug for GameBoy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameBoy")
            .field("title", &self.header().title)
            .field("pc", &self.cpu.regs.pc)
            .field("ly", &self.ly())
            .finish_non_exhaustive()
    }
}
