use super::GameBoyBus;

const OAM_LEN: u16 = 0xA0;

impl GameBoyBus {
    /// OAM DMA: copy 160 bytes from `XX00..XX9F` to OAM.
    ///
    /// The transfer happens at once; the 160 M-cycle duration and the bus
    /// conflicts it causes are not modelled.
    pub(super) fn oam_dma(&mut self, value: u8) {
        self.dma = value;
        let base = (value as u16) << 8;
        for i in 0..OAM_LEN {
            let byte = self.read_mapped(base.wrapping_add(i));
            self.ppu.dma_write_oam(i as usize, byte);
        }
    }
}
