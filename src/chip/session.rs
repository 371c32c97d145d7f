use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Receiver, Sender};

use crate::chip::{
    chip8::{timers::Timers, Chip8},
    frame_buffer::{FrameBuffer, Vram},
    Chip,
};

/// Timing of the two periodic actors of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Time between two executed instructions.
    pub cycle_interval: Duration,
    /// Time between two timer ticks.
    pub timer_interval: Duration,
}

impl SessionConfig {
    /// Default timing, but executing roughly `hz` instructions per second.
    pub fn with_cycle_rate(hz: u32) -> Self {
        SessionConfig {
            cycle_interval: Duration::from_secs(1) / hz.max(1),
            ..SessionConfig::default()
        }
    }
}

impl Default for SessionConfig {
    /// 1 ms gives somewhere between 500 and 1000 instructions per second
    /// depending on the time actually waited; timers run at 60 Hz.
    fn default() -> Self {
        SessionConfig {
            cycle_interval: Duration::from_millis(1),
            timer_interval: Duration::from_secs(1) / 60,
        }
    }
}

/// A running emulation session.
///
/// Owns the chip and two threads: one executing instructions, one ticking
/// the timers. The timer thread only holds the timers, never the chip, so
/// ticking does not contend with execution. Both threads stop as soon as the
/// session is shut down or dropped.
pub struct Session {
    cpu: Arc<Mutex<Chip8>>,
    frame_buffer: Arc<FrameBuffer>,
    timers: Arc<Timers>,
    running: Arc<AtomicBool>,
    /// Dropping this sender wakes both actors up and makes them exit.
    shutdown_sender: Option<Sender<()>>,
    actors: Vec<JoinHandle<()>>,
}

impl Session {
    /// Starts executing `chip8` according to `config`.
    pub fn start(chip8: Chip8, config: SessionConfig) -> Session {
        Session::start_with_state(chip8, config, true)
    }

    /// Like [`Session::start`], but the actors idle until
    /// [`Session::set_running`] is called.
    pub fn start_paused(chip8: Chip8, config: SessionConfig) -> Session {
        Session::start_with_state(chip8, config, false)
    }

    fn start_with_state(chip8: Chip8, config: SessionConfig, running: bool) -> Session {
        let frame_buffer = chip8.frame_buffer();
        let timers = chip8.timers();
        let cpu = Arc::new(Mutex::new(chip8));
        let running = Arc::new(AtomicBool::new(running));
        let (shutdown_sender, shutdown_receiver) = bounded::<()>(0);

        let execution = {
            let cpu = Arc::clone(&cpu);
            let running = Arc::clone(&running);
            let shutdown = shutdown_receiver.clone();
            thread::spawn(move || {
                periodic_loop(config.cycle_interval, &shutdown, &running, || {
                    lock(&cpu).step();
                })
            })
        };

        let timer = {
            let timers = Arc::clone(&timers);
            let running = Arc::clone(&running);
            thread::spawn(move || {
                periodic_loop(config.timer_interval, &shutdown_receiver, &running, || {
                    timers.tick();
                })
            })
        };

        log::info!(
            "session started, one instruction every {:?}, timers every {:?}",
            config.cycle_interval,
            config.timer_interval
        );

        Session {
            cpu,
            frame_buffer,
            timers,
            running,
            shutdown_sender: Some(shutdown_sender),
            actors: vec![execution, timer],
        }
    }

    /// Pauses or resumes both actors.
    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn set_key_down(&self, key: u8, down: bool) {
        lock(&self.cpu).set_key_down(key, down);
    }

    pub fn reset_keys(&self) {
        lock(&self.cpu).reset_keys();
    }

    /// A copy of the current picture. Does not touch the chip's lock.
    pub fn snapshot(&self) -> Vram {
        self.frame_buffer.snapshot()
    }

    pub fn is_sound_playing(&self) -> bool {
        self.timers.is_sound_playing()
    }

    pub fn frame_buffer(&self) -> Arc<FrameBuffer> {
        Arc::clone(&self.frame_buffer)
    }

    pub fn timers(&self) -> Arc<Timers> {
        Arc::clone(&self.timers)
    }

    /// Runs `f` with exclusive access to the chip, in between two steps.
    pub fn with_cpu<T>(&self, f: impl FnOnce(&mut Chip8) -> T) -> T {
        f(&mut lock(&self.cpu))
    }

    /// Stops both actors, waits for them and hands back the chip.
    pub fn shutdown(mut self) -> Chip8 {
        self.stop();
        let cpu = Arc::clone(&self.cpu);
        drop(self);
        match Arc::try_unwrap(cpu) {
            Ok(mutex) => mutex
                .into_inner()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
            Err(cpu) => {
                log::warn!("chip still shared after shutdown, taking its state");
                mem::take(&mut *lock(&cpu))
            }
        }
    }

    fn stop(&mut self) {
        if self.shutdown_sender.take().is_none() {
            return;
        }
        for actor in self.actors.drain(..) {
            if actor.join().is_err() {
                log::error!("an actor of the session panicked");
            }
        }
        log::info!("session stopped");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Calls `f` once per `interval` while `running` is set, until the shutdown
/// channel disconnects.
fn periodic_loop(
    interval: Duration,
    shutdown: &Receiver<()>,
    running: &AtomicBool,
    mut f: impl FnMut(),
) {
    let ticker = tick(interval);
    loop {
        select! {
            recv(shutdown) -> _ => return,
            recv(ticker) -> _ => {
                if running.load(Ordering::Acquire) {
                    f();
                }
            }
        }
    }
}

fn lock(cpu: &Mutex<Chip8>) -> MutexGuard<'_, Chip8> {
    cpu.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
