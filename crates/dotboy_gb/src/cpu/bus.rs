/// Abstraction over the Game Boy bus (memory and IO) as seen by the CPU.
///
/// Implementations must be total over the 16-bit address space: unmapped
/// reads return 0xFF and unmapped writes are dropped.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Consume a pending STOP wake-up request.
    ///
    /// The system bus latches one whenever a joypad button goes from
    /// released to pressed. Buses without a joypad never wake the CPU.
    fn take_stop_wake(&mut self) -> bool {
        false
    }
}
