use std::sync::atomic::{AtomicU8, Ordering};

/// The delay timer (DT) and the sound timer (ST).
///
/// Both registers are atomics so that a timer thread can tick them while
/// another thread executes instructions, without either holding a lock.
#[derive(Debug, Default)]
pub struct Timers {
    delay: AtomicU8,
    sound: AtomicU8,
}

impl Timers {
    pub fn new() -> Self {
        Timers::default()
    }

    /// Decrements both timers by one, stopping at zero. Should be called at
    /// 60 Hz.
    pub fn tick(&self) {
        decrement(&self.delay);
        decrement(&self.sound);
    }

    pub fn delay(&self) -> u8 {
        self.delay.load(Ordering::Acquire)
    }

    pub fn set_delay(&self, value: u8) {
        self.delay.store(value, Ordering::Release);
    }

    pub fn sound(&self) -> u8 {
        self.sound.load(Ordering::Acquire)
    }

    pub fn set_sound(&self, value: u8) {
        self.sound.store(value, Ordering::Release);
    }

    /// A tone should be playing whenever ST is non-zero.
    pub fn is_sound_playing(&self) -> bool {
        self.sound() > 0
    }
}

fn decrement(timer: &AtomicU8) {
    // fetch_update retries if the CPU stores a new value between load and
    // store; Err only means the timer already reached zero.
    let _ = timer.fetch_update(Ordering::AcqRel, Ordering::Acquire, |value| {
        value.checked_sub(1)
    });
}
