//! Everything outside the CPU: the memory map and the units hanging off it.

mod bus;
mod cartridge;
mod gameboy;
mod interrupts;
mod joypad;
mod ppu;
mod serial;
mod timer;
mod video;

pub(crate) use bus::GameBoyBus;
pub use cartridge::CartridgeHeader;
pub use gameboy::GameBoy;
pub use interrupts::{Interrupt, InterruptController};
pub use joypad::Button;
pub use ppu::{FrameBuffer, Palettes};
pub use video::RGB24_BYTES_PER_PIXEL;

#[cfg(test)]
mod tests;
