use std::sync::Arc;

use cursive::{
    event::{Event, EventResult},
    theme::{BaseColor, Color, ColorStyle},
    view::View,
    Printer, Vec2,
};

use crate::chip::{
    chip8::timers::Timers,
    frame_buffer::{FrameBuffer, Vram, HEIGHT, WIDTH},
};

/// Renders the display of the Chip 8 as a cursive `View`.
///
/// Every redraw takes a fresh snapshot of the frame buffer, so the view can
/// live on the UI thread while another thread keeps drawing.
pub struct Display {
    frame_buffer: Arc<FrameBuffer>,
    timers: Arc<Timers>,
}

impl Display {
    pub fn new(frame_buffer: Arc<FrameBuffer>, timers: Arc<Timers>) -> Self {
        Display {
            frame_buffer,
            timers,
        }
    }
}

/// Coordinates of all lit pixels in `vram`.
fn lit_pixels(vram: &Vram) -> impl Iterator<Item = (usize, usize)> + '_ {
    vram.iter()
        .enumerate()
        .filter(|&(_, &pixel)| pixel != 0)
        .map(|(idx, _)| (idx % WIDTH, idx / WIDTH))
}

/// Implements cursive::view::View for Display to enable drawing it
/// as a View out of the box.
impl View for Display {
    fn draw(&self, printer: &Printer) {
        let vram = self.frame_buffer.snapshot();
        printer.with_color(
            ColorStyle::new(Color::Light(BaseColor::White), Color::Dark(BaseColor::Black)),
            |printer| {
                for (x, y) in lit_pixels(&vram) {
                    printer.print((x, y), "█");
                }
            },
        );

        if self.timers.is_sound_playing() {
            printer.print((0, HEIGHT), "♪ beep");
        }
    }

    fn on_event(&mut self, _event: Event) -> EventResult {
        EventResult::Ignored
    }

    fn required_size(&mut self, _: Vec2) -> Vec2 {
        // one extra row for the sound indicator
        Vec2 {
            x: WIDTH,
            y: HEIGHT + 1,
        }
    }
}
