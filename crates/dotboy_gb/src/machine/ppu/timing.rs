use super::registers::{
    Mode, StatSelect, BASE_TRANSFER_DOTS, DOTS_PER_LINE, LINES_PER_FRAME, OAM_SCAN_DOTS,
    SPRITE_PENALTY_DOTS, VBLANK_START_LINE,
};
use super::Ppu;
use crate::machine::interrupts::{Interrupt, InterruptController};
use crate::CYCLES_PER_FRAME;

impl Ppu {
    /// Advance the PPU by `cycles` dots.
    pub(crate) fn advance(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        if !self.lcd_enabled() {
            // The LCD is quiescent, but frame pacing keeps going so callers
            // stepping by frames still make progress.
            self.off_cycles += cycles;
            while self.off_cycles >= CYCLES_PER_FRAME {
                self.off_cycles -= CYCLES_PER_FRAME;
                self.frame_ready = true;
            }
            return;
        }

        for _ in 0..cycles {
            self.tick_dot(interrupts);
        }
    }

    fn tick_dot(&mut self, interrupts: &mut InterruptController) {
        self.dot += 1;

        match self.mode {
            Mode::OamScan if self.dot == OAM_SCAN_DOTS => {
                self.select_line_sprites();
                self.transfer_len = BASE_TRANSFER_DOTS
                    + (self.scx % 8) as u32
                    + SPRITE_PENALTY_DOTS * self.line_sprites.len() as u32;
                self.mode = Mode::Transfer;
            }
            Mode::Transfer if self.dot == OAM_SCAN_DOTS + self.transfer_len => {
                self.render_line();
                self.mode = Mode::HBlank;
            }
            Mode::HBlank | Mode::VBlank if self.dot == DOTS_PER_LINE => {
                self.dot = 0;
                self.next_line(interrupts);
            }
            _ => {}
        }

        self.update_stat_line(interrupts);
    }

    fn next_line(&mut self, interrupts: &mut InterruptController) {
        self.ly += 1;

        if self.ly == VBLANK_START_LINE {
            self.mode = Mode::VBlank;
            self.frame_ready = true;
            interrupts.raise(Interrupt::VBLANK);

            // DMG quirk: the mode 2 STAT select also fires at the start of
            // V-blank, even though mode 2 never occurs on line 144.
            if self.stat_select.contains(StatSelect::OAM_SCAN) && !self.stat_line {
                interrupts.raise(Interrupt::LCD_STAT);
            }

            log::debug!(
                "GB PPU: VBlank edge (LY {}->{}), IF=0x{:02X}",
                self.ly - 1,
                self.ly,
                interrupts.read_if(),
            );
        } else if self.ly == LINES_PER_FRAME {
            self.ly = 0;
            self.window_line = 0;
            self.mode = Mode::OamScan;
        } else if self.ly < VBLANK_START_LINE {
            self.mode = Mode::OamScan;
        }
    }

    /// STAT mode bits as the CPU sees them; mode 0 while the LCD is off.
    pub(super) fn visible_mode(&self) -> Mode {
        if self.lcd_enabled() {
            self.mode
        } else {
            Mode::HBlank
        }
    }

    /// Recompute the OR of the enabled STAT sources and raise INT $48 on a
    /// rising edge.
    pub(super) fn update_stat_line(&mut self, interrupts: &mut InterruptController) {
        if !self.lcd_enabled() {
            self.stat_line = false;
            return;
        }

        let select = self.stat_select;
        let line = (select.contains(StatSelect::LYC) && self.ly == self.lyc)
            || (select.contains(StatSelect::OAM_SCAN) && self.mode == Mode::OamScan)
            || (select.contains(StatSelect::VBLANK) && self.mode == Mode::VBlank)
            || (select.contains(StatSelect::HBLANK) && self.mode == Mode::HBlank);

        if line && !self.stat_line {
            interrupts.raise(Interrupt::LCD_STAT);
            log::debug!(
                "GB PPU: STAT IRQ rising edge (LY={} mode={:?} IF=0x{:02X})",
                self.ly,
                self.mode,
                interrupts.read_if(),
            );
        }
        self.stat_line = line;
    }

    /// React to LCDC.7 toggling.
    pub(super) fn set_lcd_enabled(&mut self, enabled: bool, interrupts: &mut InterruptController) {
        if enabled {
            log::debug!("GB PPU: LCD on");
            self.ly = 0;
            self.dot = 0;
            self.mode = Mode::OamScan;
            self.window_line = 0;
            self.off_cycles = 0;
            self.update_stat_line(interrupts);
        } else {
            log::debug!("GB PPU: LCD off at LY={}", self.ly);
            self.ly = 0;
            self.dot = 0;
            self.mode = Mode::HBlank;
            self.stat_line = false;
            self.off_cycles = 0;
        }
    }
}

