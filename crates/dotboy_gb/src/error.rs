use thiserror::Error;

/// Failures surfaced by the emulation core.
///
/// Construction failures (`RomTooShort`, `UnsupportedCartridge`) prevent a
/// [`GameBoy`](crate::GameBoy) from being built at all. `UnimplementedOpcode`
/// is raised while stepping and is sticky: once the CPU has hit an opcode
/// hole every later step reports the same error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameBoyError {
    #[error("ROM image should be at least 336 bytes to hold a header, was {len} bytes")]
    RomTooShort { len: usize },
    #[error("unsupported cartridge type byte in header: {cartridge_type:#04X}")]
    UnsupportedCartridge { cartridge_type: u8 },
    #[error("unimplemented opcode {opcode:#04X} at PC={pc:#06X}")]
    UnimplementedOpcode { opcode: u8, pc: u16 },
}

pub type Result<T, E = GameBoyError> = std::result::Result<T, E>;
