use super::super::{Bus, Cpu};
use super::{IE_ADDR, IF_ADDR};
use crate::machine::Interrupt;

impl Cpu {
    /// `IE & IF` restricted to the five interrupt lines.
    #[inline]
    pub(in crate::cpu) fn pending_interrupts<B: Bus>(&mut self, bus: &mut B) -> u8 {
        bus.read8(IE_ADDR) & bus.read8(IF_ADDR) & 0x1F
    }

    /// Check for an interrupt at an instruction boundary.
    ///
    /// Any pending interrupt ends HALT, whatever IME says. The
    /// highest-priority line is returned only when it should actually be
    /// dispatched.
    pub(in crate::cpu) fn poll_pending_interrupt<B: Bus>(
        &mut self,
        bus: &mut B,
    ) -> Option<Interrupt> {
        let pending = self.pending_interrupts(bus);
        if pending == 0 {
            return None;
        }

        self.halted = false;
        if !self.ime {
            return None;
        }

        Interrupt::from_bits_truncate(pending).highest()
    }
}
