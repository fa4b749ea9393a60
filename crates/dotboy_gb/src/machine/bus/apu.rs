const NR52: u16 = 0xFF26;
const BASE: u16 = 0xFF10;

/// Sound register file FF10-FF3F.
///
/// No audio is produced; the registers only hold what software writes,
/// subject to NR52 power gating.
#[derive(Clone, PartialEq, Eq)]
pub(super) struct SoundRegisters {
    regs: [u8; 0x30],
}

impl SoundRegisters {
    /// Post-boot register values.
    pub(super) fn new() -> Self {
        let mut sound = Self { regs: [0; 0x30] };
        for (addr, value) in [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF13, 0xFF),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF17, 0x00),
            (0xFF18, 0xFF),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1D, 0xFF),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF21, 0x00),
            (0xFF22, 0x00),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
            (NR52, 0xF1),
        ] {
            sound.regs[(addr - BASE) as usize] = value;
        }
        sound
    }

    fn powered(&self) -> bool {
        self.regs[(NR52 - BASE) as usize] & 0x80 != 0
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF15 | 0xFF1F | 0xFF27..=0xFF2F => 0xFF,
            NR52 => self.regs[(NR52 - BASE) as usize] | 0x70,
            _ => self.regs[(addr - BASE) as usize],
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            NR52 => self.write_nr52(value),
            // Wave RAM stays writable regardless of power.
            0xFF30..=0xFF3F => self.regs[(addr - BASE) as usize] = value,
            0xFF10..=0xFF14 | 0xFF16..=0xFF1E | 0xFF20..=0xFF25 => {
                // Read-only while powered off.
                if self.powered() {
                    self.regs[(addr - BASE) as usize] = value;
                }
            }
            _ => {}
        }
    }

    /// Only bit 7 is writable. Powering off clears every register up to NR51
    /// and the channel status bits.
    fn write_nr52(&mut self, value: u8) {
        let index = (NR52 - BASE) as usize;
        if self.powered() && value & 0x80 == 0 {
            log::debug!("GB sound: powered off");
            self.regs[..index].fill(0);
            self.regs[index] = 0;
        }
        self.regs[index] = (self.regs[index] & 0x7F) | (value & 0x80);
    }
}
