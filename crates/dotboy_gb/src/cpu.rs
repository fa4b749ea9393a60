mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;


pub use bus::Bus;
pub use regs::Registers;

use crate::error::GameBoyError;

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

/// LR35902 interpreter state.
///
/// The CPU never advances the rest of the machine itself: [`Cpu::step`]
/// reports how many T-cycles an instruction took and the caller feeds that
/// count to the timer and PPU.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state. Only a joypad press edge (reported through
    /// [`Bus::take_stop_wake`]) brings the CPU back.
    stopped: bool,
    halt_bug: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// Set once an opcode hole has been executed. Real hardware hangs until
    /// power-off; every later `step` reports the same error.
    locked: Option<GameBoyError>,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        let bit = flag as u8;
        (self.regs.f & (1 << bit)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let bit = flag as u8;
        if value {
            self.regs.f |= 1 << bit;
        } else {
            self.regs.f &= !(1 << bit);
        }
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = 0;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// The fatal error the CPU is locked on, if any.
    pub fn fault(&self) -> Option<GameBoyError> {
        self.locked
    }
}
