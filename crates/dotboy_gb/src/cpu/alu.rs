use super::{Cpu, Flag};

/// Rotate/shift operations shared by the CB table (`y` field) and the
/// unprefixed accumulator rotates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    pub(super) fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => ShiftOp::Rlc,
            1 => ShiftOp::Rrc,
            2 => ShiftOp::Rl,
            3 => ShiftOp::Rr,
            4 => ShiftOp::Sla,
            5 => ShiftOp::Sra,
            6 => ShiftOp::Swap,
            _ => ShiftOp::Srl,
        }
    }
}

impl Cpu {
    #[inline]
    fn set_znhc(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.regs.f = ((z as u8) << Flag::Z as u8)
            | ((n as u8) << Flag::N as u8)
            | ((h as u8) << Flag::H as u8)
            | ((c as u8) << Flag::C as u8);
    }

    #[inline]
    fn carry_bit(&self) -> u8 {
        self.get_flag(Flag::C) as u8
    }

    /// ADD/ADC into A; `use_carry` selects ADC.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = if use_carry { self.carry_bit() } else { 0 };
        let full = a as u16 + value as u16 + carry_in as u16;
        let half = (a & 0x0F) + (value & 0x0F) + carry_in > 0x0F;
        let result = full as u8;
        self.regs.a = result;
        self.set_znhc(result == 0, false, half, full > 0xFF);
    }

    /// SUB/SBC into A; `use_carry` selects SBC.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        self.regs.a = self.subtract(value, use_carry);
    }

    /// CP: flags as for SUB, A untouched.
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.subtract(value, false);
    }

    fn subtract(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry_in = if use_carry { self.carry_bit() } else { 0 };
        let full = a as i16 - value as i16 - carry_in as i16;
        let half = ((a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in as i16) < 0;
        let result = full as u8;
        self.set_znhc(result == 0, true, half, full < 0);
        result
    }

    pub(super) fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.set_znhc(self.regs.a == 0, false, true, false);
    }

    pub(super) fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.set_znhc(self.regs.a == 0, false, false, false);
    }

    pub(super) fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.set_znhc(self.regs.a == 0, false, false, false);
    }

    /// Decimal adjust A after a BCD add or subtract. N is preserved.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let subtract = self.get_flag(Flag::N);
        let mut carry = self.get_flag(Flag::C);

        if subtract {
            if carry {
                a = a.wrapping_sub(0x60);
            }
            if self.get_flag(Flag::H) {
                a = a.wrapping_sub(0x06);
            }
        } else {
            if carry || a > 0x99 {
                a = a.wrapping_add(0x60);
                carry = true;
            }
            if self.get_flag(Flag::H) || (a & 0x0F) > 0x09 {
                a = a.wrapping_add(0x06);
            }
        }

        self.regs.a = a;
        self.set_znhc(a == 0, subtract, false, carry);
    }

    /// INC r / INC (HL). C is preserved.
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        let carry = self.get_flag(Flag::C);
        self.set_znhc(result == 0, false, (value & 0x0F) == 0x0F, carry);
        result
    }

    /// DEC r / DEC (HL). C is preserved.
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        let carry = self.get_flag(Flag::C);
        self.set_znhc(result == 0, true, (value & 0x0F) == 0, carry);
        result
    }

    /// ADD HL,rr. Z is preserved; H and C come from bits 11 and 15.
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let zero = self.get_flag(Flag::Z);
        let half = (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF;
        let carry = hl as u32 + value as u32 > 0xFFFF;
        self.set_znhc(zero, false, half, carry);
        self.regs.set_hl(hl.wrapping_add(value));
    }

    /// `base + (i8)imm8` as used by ADD SP,r8 and LD HL,SP+r8.
    ///
    /// Z and N are cleared; H and C are computed on the low byte as an
    /// unsigned addition.
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        let half = (base & 0x000F) + (offset & 0x000F) > 0x000F;
        let carry = (base & 0x00FF) + (offset & 0x00FF) > 0x00FF;
        self.set_znhc(false, false, half, carry);
        base.wrapping_add(offset)
    }

    /// Rotate/shift `value`, setting Z from the result and C from the bit
    /// shifted out. N and H are cleared.
    pub(super) fn alu_shift(&mut self, op: ShiftOp, value: u8) -> u8 {
        let carry_in = self.carry_bit();
        let (result, carry) = match op {
            ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            ShiftOp::Rl => ((value << 1) | carry_in, value & 0x80 != 0),
            ShiftOp::Rr => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
            ShiftOp::Sla => (value << 1, value & 0x80 != 0),
            ShiftOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            ShiftOp::Swap => (value.rotate_left(4), false),
            ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
        };
        self.set_znhc(result == 0, false, false, carry);
        result
    }

    /// BIT b: Z is set when the bit is clear. C is preserved.
    pub(super) fn alu_bit(&mut self, bit: u8, value: u8) {
        let carry = self.get_flag(Flag::C);
        self.set_znhc(value & (1 << bit) == 0, false, true, carry);
    }
}
