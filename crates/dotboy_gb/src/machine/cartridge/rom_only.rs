/// Cartridge without a mapper: 32 KiB of ROM and optionally up to 8 KiB of
/// RAM that is always enabled (types 0x00, 0x08, 0x09).
#[derive(Clone, PartialEq, Eq)]
pub(in super::super) struct RomOnlyCartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
}

impl RomOnlyCartridge {
    pub(super) fn new(rom: &[u8], ram_size: usize) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0xFF; ram_size.min(0x2000)],
        }
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        self.rom.get(addr as usize).copied().unwrap_or(0xFF)
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        if self.ram.is_empty() {
            return 0xFF;
        }
        let offset = (addr as usize - 0xA000) % self.ram.len();
        self.ram[offset]
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if self.ram.is_empty() {
            return;
        }
        let offset = (addr as usize - 0xA000) % self.ram.len();
        self.ram[offset] = value;
    }
}
