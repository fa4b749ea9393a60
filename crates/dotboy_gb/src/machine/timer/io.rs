use super::super::interrupts::InterruptController;
use super::Timer;

pub(crate) const DIV: u16 = 0xFF04;
pub(crate) const TIMA: u16 = 0xFF05;
pub(crate) const TMA: u16 = 0xFF06;
pub(crate) const TAC: u16 = 0xFF07;

impl Timer {
    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            DIV => (self.divider >> 8) as u8,
            TIMA => self.tima,
            TMA => self.tma,
            TAC => self.tac | 0b1111_1000,
            _ => 0xFF,
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8, interrupts: &mut InterruptController) {
        match addr {
            DIV => {
                // Resetting the divider drops the selected bit to 0, which
                // counts as a falling edge if it was high.
                let before = self.input();
                self.divider = 0;
                if before {
                    self.increment_tima(interrupts);
                }
            }
            TIMA => self.tima = value,
            TMA => self.tma = value,
            TAC => {
                let before = self.input();
                self.tac = value & 0x07;
                if before && !self.input() {
                    self.increment_tima(interrupts);
                }
            }
            _ => {}
        }
    }
}
