use std::sync::{Mutex, MutexGuard};

/// Width of the display in pixels.
pub const WIDTH: usize = 64;

/// Height of the display in pixels.
pub const HEIGHT: usize = 32;

/// A copy of the video memory. Each entry is 1 for a lit pixel and 0 for an
/// unlit one, row-major, so the pixel at (x, y) lives at `y * WIDTH + x`.
pub type Vram = [u8; WIDTH * HEIGHT];

/// The video memory of the CHIP-8.
///
/// The frame buffer is shared between the thread executing instructions and
/// whoever presents the picture. All access goes through an internal lock
/// that covers the whole grid, and readers only ever receive copies via
/// [`FrameBuffer::snapshot`]. It is deliberately neither `Clone` nor `Copy`.
pub struct FrameBuffer {
    vram: Mutex<Vram>,
}

impl FrameBuffer {
    /// Constructs a frame buffer with every pixel unlit.
    pub fn new() -> Self {
        FrameBuffer {
            vram: Mutex::new([0; WIDTH * HEIGHT]),
        }
    }

    /// Unlights every pixel.
    pub fn clear(&self) {
        self.lock().fill(0);
    }

    /// XORs one row of up to eight pixels into the video memory, most
    /// significant bit leftmost, starting at column `x` of row `y`.
    ///
    /// Columns wrap around the right edge onto the same row. Rows do not
    /// wrap: callers drawing multi-row sprites wrap `y` themselves, and a row
    /// outside the display draws nothing.
    ///
    /// Returns whether any pixel was switched from lit to unlit.
    pub fn draw_byte(&self, x: usize, y: usize, data: u8) -> bool {
        if y >= HEIGHT {
            log::debug!("draw_byte below the display at row {}", y);
            return false;
        }

        let mut vram = self.lock();
        let mut collision = false;
        for bit in 0..8 {
            let idx = y * WIDTH + (x + bit) % WIDTH;
            let old = vram[idx];
            let xor = (data >> (7 - bit)) & 0x01;

            collision |= old & xor == 1;
            vram[idx] = old ^ xor;
        }
        collision
    }

    /// Returns a copy of the current video memory. The copy is taken under
    /// the lock, so it never contains a partially drawn row.
    pub fn snapshot(&self) -> Vram {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, Vram> {
        // Every write leaves the grid consistent, so a poisoned lock still
        // guards valid pixels.
        self.vram.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer::new()
    }
}
