pub mod chip8;
pub mod cursive_display;
pub mod frame_buffer;
pub mod session;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::chip::frame_buffer::Vram;

/// The interface through which the outside world drives a chip: loading
/// programs, stepping it, ticking its timers, feeding key presses and
/// reading back picture and sound state.
pub trait Chip {
    /// How keys are addressed.
    type KeyIndex;

    /// Loads the program stored at `path`. Returns the number of bytes loaded.
    fn load_program(&mut self, path: &Path) -> Result<usize, LoadProgramError>;

    /// Loads a program from a slice. Returns the number of bytes loaded. The
    /// chip is left untouched if the program does not fit.
    fn load_program_bytes(&mut self, program: &[u8]) -> Result<usize, LoadProgramError>;

    /// Fetches, decodes and executes a single instruction.
    fn step(&mut self);

    /// Advances the timers by one 60 Hz unit.
    fn tick_timers(&self);

    /// Reports that a key was pressed (`down == true`) or released.
    fn set_key_down(&mut self, key: Self::KeyIndex, down: bool);

    /// Releases all keys.
    fn reset_keys(&mut self);

    /// Whether a tone should currently be playing.
    fn is_sound_playing(&self) -> bool;

    /// A copy of the current picture.
    fn snapshot(&self) -> Vram;
}

/// Errors that occur while loading a program.
#[derive(Debug, Error)]
pub enum LoadProgramError {
    #[error("could not read program from {}: {source}", path.display())]
    CouldNotReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("program is too large ({size} bytes), at most {max} bytes fit into memory")]
    ProgramTooLarge { size: usize, max: usize },
}

/// Errors that occur while constructing a chip.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Chip8Error {
    #[error("font at offset {0:#05X} does not fit into the reserved memory region")]
    FontOffsetOutOfRange(u16),
}
