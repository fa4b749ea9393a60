use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A CPU in the state the DMG boot ROM leaves it in at 0x0100.
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            halt_bug: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            locked: None,
        };
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// Return to the post-boot snapshot, clearing HALT/STOP and any lock.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Register values after the DMG boot ROM hands over to the cartridge
    /// (Pan Docs "Power Up Sequence").
    fn apply_dmg_boot_state(&mut self) {
        self.regs.a = 0x01;
        self.regs.f = 0xB0;
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
        self.ime = false;
    }
}
