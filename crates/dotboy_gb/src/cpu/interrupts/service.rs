use super::super::{Bus, Cpu};
use super::IF_ADDR;

impl Cpu {
    /// Dispatch the highest-priority pending interrupt if IME allows it.
    ///
    /// Returns `Some(20)` when an interrupt was taken: IME is cleared, the
    /// IF bit acknowledged, PC pushed and execution moved to the vector.
    pub(in crate::cpu) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        let interrupt = self.poll_pending_interrupt(bus)?;

        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;

        let iflags = bus.read8(IF_ADDR);
        bus.write8(IF_ADDR, iflags & !interrupt.bits());

        let mut pc = self.regs.pc;
        // A HALT bug still waiting for its double fetch (EI; HALT) returns
        // to the HALT itself instead.
        if std::mem::take(&mut self.halt_bug) {
            pc = pc.wrapping_sub(1);
        }
        self.push_u16(bus, pc);
        let vector = interrupt.vector();
        self.regs.pc = vector;

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            interrupt,
            vector,
            pc,
            self.regs.sp,
        );
        Some(20)
    }
}
