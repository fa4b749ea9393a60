mod ime;
mod poll;
mod service;

/// Interrupt enable register.
pub(super) const IE_ADDR: u16 = 0xFFFF;
/// Interrupt flag register.
pub(super) const IF_ADDR: u16 = 0xFF0F;
