use super::registers::{apply_palette, LcdControl, SpriteFlags, MAX_SPRITES_PER_LINE};
use super::Ppu;
use crate::SCREEN_WIDTH;

impl Ppu {
    fn sprite_height(&self) -> u8 {
        if self.lcdc.contains(LcdControl::OBJ_TALL) {
            16
        } else {
            8
        }
    }

    /// OAM scan: pick up to ten sprites overlapping LY, in OAM order.
    pub(super) fn select_line_sprites(&mut self) {
        self.line_sprites.clear();
        let height = self.sprite_height() as u16;
        let line = self.ly as u16 + 16;

        for index in 0..40u8 {
            let y = self.oam[index as usize * 4] as u16;
            if line >= y && line < y + height {
                self.line_sprites.push(index);
                if self.line_sprites.len() == MAX_SPRITES_PER_LINE {
                    break;
                }
            }
        }
    }

    /// VRAM offset of the 16-byte tile used by the BG and window layers.
    fn bg_tile_offset(&self, tile: u8) -> usize {
        if self.lcdc.contains(LcdControl::TILE_DATA_8000) {
            tile as usize * 16
        } else {
            (0x1000 + (tile as i8 as i32) * 16) as usize
        }
    }

    /// Color index (0-3) of pixel (`x`, `y`) in the 256x256 tile map at
    /// `map_offset` within VRAM.
    fn map_pixel(&self, map_offset: usize, x: u8, y: u8) -> u8 {
        let tile = self.vram[map_offset + (y as usize / 8) * 32 + x as usize / 8];
        let row = self.bg_tile_offset(tile) + (y as usize % 8) * 2;
        tile_color(self.vram[row], self.vram[row + 1], x % 8)
    }

    /// Render line LY into the frame buffer.
    pub(super) fn render_line(&mut self) {
        let ly = self.ly;
        let mut bg_colors = [0u8; SCREEN_WIDTH];

        if self.lcdc.contains(LcdControl::BG_WINDOW_ENABLE) {
            let bg_map = if self.lcdc.contains(LcdControl::BG_MAP_9C00) { 0x1C00 } else { 0x1800 };
            let bg_y = ly.wrapping_add(self.scy);
            for (x, color) in bg_colors.iter_mut().enumerate() {
                let bg_x = (x as u8).wrapping_add(self.scx);
                *color = self.map_pixel(bg_map, bg_x, bg_y);
            }

            // WX is offset by 7; values above 166 push the window off-screen.
            let window_visible = self.lcdc.contains(LcdControl::WINDOW_ENABLE)
                && ly >= self.wy
                && self.wx <= 166;
            if window_visible {
                let window_map = if self.lcdc.contains(LcdControl::WINDOW_MAP_9C00) {
                    0x1C00
                } else {
                    0x1800
                };
                let start = self.wx as usize;
                for (x, color) in bg_colors.iter_mut().enumerate() {
                    if x + 7 >= start {
                        let win_x = (x + 7 - start) as u8;
                        *color = self.map_pixel(window_map, win_x, self.window_line);
                    }
                }
                self.window_line = self.window_line.wrapping_add(1);
            }
        }

        // With LCDC.0 clear the BG and window are blank white; sprites still
        // see color 0 underneath them.
        let mut shades = [0u8; SCREEN_WIDTH];
        if self.lcdc.contains(LcdControl::BG_WINDOW_ENABLE) {
            for (shade, &color) in shades.iter_mut().zip(bg_colors.iter()) {
                *shade = apply_palette(self.bgp, color);
            }
        }

        if self.lcdc.contains(LcdControl::OBJ_ENABLE) {
            self.render_sprites(&bg_colors, &mut shades);
        }

        self.frame.row_mut(ly as usize).copy_from_slice(&shades);
    }

    /// Overlay the line's sprites. Lower X wins, ties go to the lower OAM
    /// index; a winning sprite hides lower-priority ones even when it is
    /// itself hidden behind the background.
    fn render_sprites(&self, bg_colors: &[u8; SCREEN_WIDTH], shades: &mut [u8; SCREEN_WIDTH]) {
        let mut order = [0u8; MAX_SPRITES_PER_LINE];
        let order = &mut order[..self.line_sprites.len()];
        order.copy_from_slice(&self.line_sprites);
        order.sort_by_key(|&index| (self.oam[index as usize * 4 + 1], index));

        let height = self.sprite_height();
        let mut claimed = [false; SCREEN_WIDTH];

        for &index in order.iter() {
            let base = index as usize * 4;
            let y = self.oam[base];
            let x = self.oam[base + 1];
            let mut tile = self.oam[base + 2];
            let flags = SpriteFlags::from_bits_truncate(self.oam[base + 3]);

            if height == 16 {
                tile &= 0xFE;
            }
            let mut row = self.ly.wrapping_add(16).wrapping_sub(y);
            if flags.contains(SpriteFlags::Y_FLIP) {
                row = height - 1 - row;
            }
            let addr = tile as usize * 16 + row as usize * 2;
            let (lo, hi) = (self.vram[addr], self.vram[addr + 1]);
            let palette = if flags.contains(SpriteFlags::PALETTE_1) {
                self.obp1
            } else {
                self.obp0
            };

            for col in 0..8u8 {
                let screen_x = x as i16 - 8 + col as i16;
                if !(0..SCREEN_WIDTH as i16).contains(&screen_x) {
                    continue;
                }
                let screen_x = screen_x as usize;
                if claimed[screen_x] {
                    continue;
                }

                let bit = if flags.contains(SpriteFlags::X_FLIP) { 7 - col } else { col };
                let color = tile_color(lo, hi, bit);
                if color == 0 {
                    continue;
                }
                claimed[screen_x] = true;

                if flags.contains(SpriteFlags::BEHIND_BG) && bg_colors[screen_x] != 0 {
                    continue;
                }
                shades[screen_x] = apply_palette(palette, color);
            }
        }
    }
}

/// Color index of column `x` (0 = leftmost) in a 2bpp tile row.
#[inline]
fn tile_color(lo: u8, hi: u8, x: u8) -> u8 {
    let bit = 7 - x;
    (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
}
