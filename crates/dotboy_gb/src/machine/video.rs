use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

use super::ppu::FrameBuffer;

/// Bytes per pixel in the RGB24 output of [`render_rgb24`].
pub const RGB24_BYTES_PER_PIXEL: usize = 3;

/// DMG-style grayscale: 0 = white, 3 = black.
fn shade_to_gray(shade: u8) -> u8 {
    match shade & 0x03 {
        0 => 0xFF,
        1 => 0xAA,
        2 => 0x55,
        _ => 0x00,
    }
}

/// Convert `frame` to RGB24 into `buffer`.
///
/// A short buffer receives as many whole pixels as fit; bytes past the
/// visible area are left untouched.
pub(crate) fn render_rgb24(frame: &FrameBuffer, buffer: &mut [u8]) {
    let pixels = (buffer.len() / RGB24_BYTES_PER_PIXEL).min(SCREEN_WIDTH * SCREEN_HEIGHT);

    for (rgb, &shade) in buffer
        .chunks_exact_mut(RGB24_BYTES_PER_PIXEL)
        .zip(frame.pixels())
        .take(pixels)
    {
        rgb.fill(shade_to_gray(shade));
    }
}
