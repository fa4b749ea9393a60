use super::super::Cpu;

impl Cpu {
    /// Advance the delayed IME enable requested by EI.
    ///
    /// Called after every executed instruction: the one that ran EI arms the
    /// delay, the next one completes it.
    #[inline]
    pub(in crate::cpu) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
