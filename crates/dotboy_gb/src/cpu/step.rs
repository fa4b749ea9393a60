use super::{Bus, Cpu};
use crate::error::Result;

impl Cpu {
    /// Execute one instruction, one interrupt dispatch, or one idle
    /// HALT/STOP step, and return the number of T-cycles consumed.
    ///
    /// The caller is responsible for advancing the timer and PPU by the
    /// returned count. After an opcode hole every call returns the same
    /// `UnimplementedOpcode` error.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        if let Some(error) = self.locked {
            return Err(error);
        }

        if self.stopped {
            if !bus.take_stop_wake() {
                return Ok(4);
            }
            log::debug!("GB CPU: leaving STOP on joypad press");
            self.stopped = false;
        }

        if let Some(cycles) = self.handle_interrupts(bus) {
            return Ok(cycles);
        }

        if self.halted {
            return Ok(4);
        }

        let opcode = self.fetch8(bus);
        let cycles = self.exec_opcode(bus, opcode)?;
        self.apply_ime_delay();
        Ok(cycles)
    }
}
