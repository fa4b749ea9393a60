pub(crate) const SB: u16 = 0xFF01;
pub(crate) const SC: u16 = 0xFF02;

/// SB/SC register slots.
///
/// No link partner is emulated: writes are stored and read back, and a
/// transfer is never started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Serial {
    sb: u8,
    sc: u8,
}

impl Serial {
    pub(crate) fn new() -> Self {
        Self { sb: 0x00, sc: 0x7E }
    }

    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            SB => self.sb,
            // Bits 1-6 are unused on DMG.
            SC => self.sc | 0x7E,
            _ => 0xFF,
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            SB => self.sb = value,
            SC => self.sc = value,
            _ => {}
        }
    }
}
