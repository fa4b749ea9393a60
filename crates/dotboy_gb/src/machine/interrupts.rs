use bitflags::bitflags;

bitflags! {
    /// The five DMG interrupt lines, laid out as in IE/IF.
    ///
    /// Lower bits have higher priority.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Interrupt: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

impl Interrupt {
    /// The highest-priority line in this set, if any.
    pub fn highest(self) -> Option<Interrupt> {
        let bits = self.bits();
        if bits == 0 {
            None
        } else {
            Some(Interrupt::from_bits_truncate(bits & bits.wrapping_neg()))
        }
    }

    /// Handler address the CPU jumps to when this line is serviced.
    pub fn vector(self) -> u16 {
        0x0040 + (self.bits().trailing_zeros() as u16) * 8
    }
}

/// IE/IF pair shared by every interrupt source.
///
/// IME lives in the CPU; this only tracks which lines are requested and
/// which are enabled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InterruptController {
    /// IE is a full read/write byte on DMG even though only 5 bits matter.
    pub(crate) enable: u8,
    pub(crate) flags: Interrupt,
}

impl InterruptController {
    /// Request `interrupt`. Raising an already requested line is a no-op.
    pub fn raise(&mut self, interrupt: Interrupt) {
        self.flags.insert(interrupt);
    }

    pub fn clear(&mut self, interrupt: Interrupt) {
        self.flags.remove(interrupt);
    }

    pub fn requested_and_enabled(&self) -> Interrupt {
        self.flags & Interrupt::from_bits_truncate(self.enable)
    }

    /// The line the CPU would service next, if any.
    pub fn highest_priority(&self) -> Option<Interrupt> {
        self.requested_and_enabled().highest()
    }

    /// IF with the unused upper bits reading as 1.
    pub fn read_if(&self) -> u8 {
        self.flags.bits() | 0xE0
    }

    pub fn write_if(&mut self, value: u8) {
        self.flags = Interrupt::from_bits_truncate(value);
    }
}
