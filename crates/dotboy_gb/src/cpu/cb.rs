use super::alu::ShiftOp;
use super::{Bus, Cpu};

impl Cpu {
    /// Execute a CB-prefixed instruction. The prefix byte itself has
    /// already been fetched; the returned cycle count covers both bytes.
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.fetch8(bus);
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;
        let on_hl = z == 6;

        let value = self.read_reg8(bus, z);
        match x {
            0 => {
                let result = self.alu_shift(ShiftOp::from_index(y), value);
                self.write_reg8(bus, z, result);
                if on_hl { 16 } else { 8 }
            }
            1 => {
                // BIT b,(HL) has no write-back cycle.
                self.alu_bit(y, value);
                if on_hl { 12 } else { 8 }
            }
            2 => {
                self.write_reg8(bus, z, value & !(1 << y));
                if on_hl { 16 } else { 8 }
            }
            _ => {
                self.write_reg8(bus, z, value | (1 << y));
                if on_hl { 16 } else { 8 }
            }
        }
    }
}
