use bitflags::bitflags;

pub(super) const DOTS_PER_LINE: u32 = 456;
pub(super) const OAM_SCAN_DOTS: u32 = 80;
pub(super) const BASE_TRANSFER_DOTS: u32 = 172;
/// Extra mode 3 dots per sprite on the line.
pub(super) const SPRITE_PENALTY_DOTS: u32 = 6;
pub(super) const VBLANK_START_LINE: u8 = 144;
pub(super) const LINES_PER_FRAME: u8 = 154;
pub(super) const MAX_SPRITES_PER_LINE: usize = 10;

bitflags! {
    /// LCDC (FF40).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(super) struct LcdControl: u8 {
        const LCD_ENABLE = 1 << 7;
        const WINDOW_MAP_9C00 = 1 << 6;
        const WINDOW_ENABLE = 1 << 5;
        const TILE_DATA_8000 = 1 << 4;
        const BG_MAP_9C00 = 1 << 3;
        const OBJ_TALL = 1 << 2;
        const OBJ_ENABLE = 1 << 1;
        const BG_WINDOW_ENABLE = 1 << 0;
    }
}

bitflags! {
    /// STAT (FF41) interrupt source selects, bits 3-6.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(super) struct StatSelect: u8 {
        const LYC = 1 << 6;
        const OAM_SCAN = 1 << 5;
        const VBLANK = 1 << 4;
        const HBLANK = 1 << 3;
    }
}

bitflags! {
    /// OAM attribute byte.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(super) struct SpriteFlags: u8 {
        const BEHIND_BG = 1 << 7;
        const Y_FLIP = 1 << 6;
        const X_FLIP = 1 << 5;
        const PALETTE_1 = 1 << 4;
    }
}

/// PPU mode as reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

/// Map a 2-bit color index through a DMG palette register.
#[inline]
pub(super) fn apply_palette(palette: u8, color: u8) -> u8 {
    (palette >> (color * 2)) & 0x03
}
