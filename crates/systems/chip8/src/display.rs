//! The 64x32 monochrome display buffer.
//!
//! Each row is one `u64` bitmask with bit 63 as the leftmost pixel, so an
//! 8-pixel sprite row is a shifted byte and the XOR blit is one operation
//! per row. Sprites use the classic clipping variant: the start coordinate
//! wraps once (mod 64 / mod 32), but pixels running off the right edge and
//! rows running off the bottom are clipped, never wrapped.

use ocho_core::types::Frame;

pub const WIDTH: u32 = 64;
pub const HEIGHT: u32 = 32;

/// Monochrome framebuffer, mutated only by `clear` and `draw_sprite`.
#[derive(Debug, Clone, Default)]
pub struct Display {
    rows: [u64; HEIGHT as usize],
}

impl Display {
    pub fn new() -> Self {
        Self::default()
    }

    /// 00E0: turn every pixel off.
    pub fn clear(&mut self) {
        self.rows = [0; HEIGHT as usize];
    }

    /// XOR-blit a sprite whose rows are the given bytes, starting at
    /// (`x`, `y`) taken modulo the display size. Returns true if any pixel
    /// was turned off by the blit (collision).
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x = (x as u32 % WIDTH) as u64;
        let y = y as u32 % HEIGHT;

        let mut collision = false;
        for (line, &byte) in sprite.iter().enumerate() {
            let row = y + line as u32;
            if row >= HEIGHT {
                break; // clip at the bottom edge
            }
            // Left-align the byte, then shift to the start column. Pixels
            // pushed past bit 0 fall off the right edge.
            let mask = ((byte as u64) << 56) >> x;
            let before = self.rows[row as usize];
            collision |= before & mask != 0;
            self.rows[row as usize] = before ^ mask;
        }
        collision
    }

    /// State of a single pixel; out-of-range coordinates read as off.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.rows[y as usize] & (1u64 << (63 - x)) != 0
    }

    /// Snapshot the buffer as an owned RGBA frame, one `u32` per pixel.
    pub fn to_frame(&self, on: u32, off: u32) -> Frame {
        let mut frame = Frame::new(WIDTH, HEIGHT);
        for (y, row) in self.rows.iter().enumerate() {
            for x in 0..WIDTH as usize {
                frame.pixels[y * WIDTH as usize + x] = if row & (1u64 << (63 - x)) != 0 {
                    on
                } else {
                    off
                };
            }
        }
        frame
    }
}
