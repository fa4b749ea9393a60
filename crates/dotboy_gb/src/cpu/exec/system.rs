use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// HALT. With IME clear and an interrupt already pending the CPU does
    /// not halt and instead re-reads the next opcode byte (the HALT bug).
    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if !self.ime && self.pending_interrupts(bus) != 0 {
            self.halt_bug = true;
        } else {
            self.halted = true;
        }
        4
    }

    /// STOP is a 2-byte instruction; the padding byte is fetched and ignored.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let _padding = self.fetch8(bus);
        // Presses that happened before STOP must not end it.
        bus.take_stop_wake();
        self.stopped = true;
        self.halted = false;
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        4
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        // IME becomes 1 after the *next* instruction completes.
        self.ime_enable_pending = true;
        4
    }
}
