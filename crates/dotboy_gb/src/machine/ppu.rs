//! Pixel processing unit.
//!
//! The PPU advances one dot per T-cycle through OAM scan (mode 2), pixel
//! transfer (mode 3) and H-blank (mode 0) for lines 0-143, then ten lines of
//! V-blank (mode 1). Each visible line is rendered in one go when mode 3
//! ends, using the register values current at that point.

mod access;
mod mmio;
mod registers;
mod render;
mod timing;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

use registers::{LcdControl, Mode, StatSelect};

/// One rendered frame as palette-resolved 2-bit shades
/// (0 = lightest, 3 = darkest), row-major, 160x144.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<u8>,
}

impl FrameBuffer {
    fn new() -> Self {
        Self {
            pixels: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * SCREEN_WIDTH + x]
    }

    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        &mut self.pixels[y * SCREEN_WIDTH..(y + 1) * SCREEN_WIDTH]
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dark = self.pixels.iter().filter(|&&p| p != 0).count();
        f.debug_struct("FrameBuffer")
            .field("width", &SCREEN_WIDTH)
            .field("height", &SCREEN_HEIGHT)
            .field("non_zero_pixels", &dark)
            .finish()
    }
}

/// DMG palette registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palettes {
    pub bgp: u8,
    pub obp0: u8,
    pub obp1: u8,
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Ppu {
    vram: Box<[u8; 0x2000]>,
    oam: [u8; 0xA0],

    lcdc: LcdControl,
    stat_select: StatSelect,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,

    mode: Mode,
    /// Dot within the current line (0..456).
    dot: u32,
    /// Length of mode 3 on the current line, fixed at the end of OAM scan.
    transfer_len: u32,
    /// OAM indices of the sprites selected for the current line.
    line_sprites: Vec<u8>,
    /// Internal window line counter; only advances on lines that drew the window.
    window_line: u8,
    /// OR of the enabled STAT sources, for edge detection.
    stat_line: bool,
    /// Cycles counted while the LCD is off, to keep frame pacing.
    off_cycles: u32,
    frame_ready: bool,
    frame: FrameBuffer,
}

impl Ppu {
    /// Post-boot PPU: LCD on, BG on, tile data at 0x8000, BGP=0xFC,
    /// starting at the top of a frame.
    pub(crate) fn new() -> Self {
        Self {
            vram: Box::new([0; 0x2000]),
            oam: [0; 0xA0],
            lcdc: LcdControl::from_bits_truncate(0x91),
            stat_select: StatSelect::empty(),
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            bgp: 0xFC,
            obp0: 0xFF,
            obp1: 0xFF,
            wy: 0,
            wx: 0,
            mode: Mode::OamScan,
            dot: 0,
            transfer_len: registers::BASE_TRANSFER_DOTS,
            line_sprites: Vec::with_capacity(registers::MAX_SPRITES_PER_LINE),
            window_line: 0,
            stat_line: false,
            off_cycles: 0,
            frame_ready: false,
            frame: FrameBuffer::new(),
        }
    }

    pub(crate) fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub(crate) fn palettes(&self) -> Palettes {
        Palettes {
            bgp: self.bgp,
            obp0: self.obp0,
            obp1: self.obp1,
        }
    }

    pub(crate) fn ly(&self) -> u8 {
        self.ly
    }

    pub(crate) fn lcd_enabled(&self) -> bool {
        self.lcdc.contains(LcdControl::LCD_ENABLE)
    }

    /// Clear the frame-completion edge.
    pub(crate) fn clear_frame_ready(&mut self) {
        self.frame_ready = false;
    }

    /// Consume the frame-completion edge set on entering V-blank.
    pub(crate) fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }
}
