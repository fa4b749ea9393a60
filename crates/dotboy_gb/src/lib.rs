//! DMG emulation core.
//!
//! The crate is split the way the hardware is: [`cpu`] holds the LR35902
//! interpreter and talks to the rest of the machine only through the
//! [`cpu::Bus`] trait, while [`machine`] owns the cartridge, memory map,
//! timer, PPU, joypad and interrupt controller and drives them from
//! [`GameBoy`], the stepper frontends interact with.

pub mod config;
pub mod cpu;
pub mod error;
pub mod machine;

pub use config::{GameBoyConfig, KeyMap, RamInit};
pub use error::{GameBoyError, Result};
pub use machine::{
    Button, CartridgeHeader, FrameBuffer, GameBoy, Interrupt, InterruptController, Palettes,
    RGB24_BYTES_PER_PIXEL,
};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Number of T-cycles in one full LCD frame (154 lines of 456 dots).
pub const CYCLES_PER_FRAME: u32 = 70_224;
