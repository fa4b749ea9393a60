//! Timer / divider unit.
//!
//! The 16-bit divider advances once per T-cycle and DIV exposes its upper
//! byte. TIMA counts falling edges of one divider bit (chosen by TAC)
//! ANDed with the TAC enable bit, which is what makes DIV and TAC writes
//! able to bump TIMA (Pan Docs "Timer obscure behaviour").

pub(crate) mod io;

use super::interrupts::{Interrupt, InterruptController};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Timer {
    divider: u16,
    tima: u8,
    tma: u8,
    /// TAC raw value (lower 3 bits meaningful).
    tac: u8,
}

impl Timer {
    /// DMG state at PC=0x0100: DIV reads 0xAB, the timer is stopped.
    pub(crate) fn new() -> Self {
        Self {
            divider: 0xABCC,
            tima: 0x00,
            tma: 0x00,
            tac: 0x00,
        }
    }

    /// Divider bit watched for the TAC frequency selection:
    /// 00 -> 4096 Hz, 01 -> 262144 Hz, 10 -> 65536 Hz, 11 -> 16384 Hz.
    #[inline]
    fn input_mask(&self) -> u16 {
        match self.tac & 0x03 {
            0b00 => 1 << 9,
            0b01 => 1 << 3,
            0b10 => 1 << 5,
            _ => 1 << 7,
        }
    }

    #[inline]
    fn enabled(&self) -> bool {
        (self.tac & 0x04) != 0
    }

    /// Current value of the edge-detector input.
    #[inline]
    fn input(&self) -> bool {
        self.enabled() && (self.divider & self.input_mask()) != 0
    }

    /// Increment TIMA; on overflow reload from TMA and request INT $50.
    fn increment_tima(&mut self, interrupts: &mut InterruptController) {
        let (next, overflow) = self.tima.overflowing_add(1);
        if overflow {
            self.tima = self.tma;
            interrupts.raise(Interrupt::TIMER);
        } else {
            self.tima = next;
        }
    }

    /// Advance the divider by `cycles` T-cycles.
    pub(crate) fn advance(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        for _ in 0..cycles {
            let before = self.input();
            self.divider = self.divider.wrapping_add(1);
            if before && !self.input() {
                self.increment_tima(interrupts);
            }
        }
    }
}
