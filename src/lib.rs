//! A CHIP-8 virtual machine. The instruction set follows the table
//! [here](https://en.wikipedia.org/wiki/CHIP-8#Opcode_table).
//!
//! [`chip::chip8::Chip8`] executes programs one instruction at a time and
//! [`chip::session::Session`] drives it from background threads: one running
//! the instruction cycle and one decrementing the 60 Hz timers. The display
//! lives in a shared [`chip::frame_buffer::FrameBuffer`], which the cursive
//! front end in [`chip::cursive_display`] renders.
pub mod chip;
