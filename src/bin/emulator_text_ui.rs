use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use cursive::{event::Key, Cursive};

use chip_8_vm::chip::{
    chip8::Chip8,
    cursive_display::Display,
    session::{Session, SessionConfig},
    Chip,
};

/// Runs a CHIP-8 program in the terminal.
///
/// Keys 1-4, q-r, a-f and z-v form the hex keypad. Because terminals only
/// report key presses, space releases all keys. p pauses, ~ shows the log
/// and Esc quits.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path of the program to load.
    rom: PathBuf,

    /// Instructions executed per second.
    #[arg(long, default_value_t = 700)]
    hz: u32,

    /// Start paused; press p to run.
    #[arg(long)]
    paused: bool,
}

/// Mapping from the left-hand side of a qwerty keyboard to the hex keypad.
const KEYMAP: [(char, u8); 16] = [
    ('1', 0x1),
    ('2', 0x2),
    ('3', 0x3),
    ('4', 0xC),
    ('q', 0x4),
    ('w', 0x5),
    ('e', 0x6),
    ('r', 0xD),
    ('a', 0x7),
    ('s', 0x8),
    ('d', 0x9),
    ('f', 0xE),
    ('z', 0xA),
    ('x', 0x0),
    ('c', 0xB),
    ('v', 0xF),
];

/// Registers the keypad, pause and quit callbacks.
fn add_callbacks(siv: &mut Cursive, session: &Arc<Session>) {
    siv.add_global_callback(Key::Esc, |s| s.quit());
    siv.add_global_callback('~', Cursive::toggle_debug_console);

    for &(c, key) in KEYMAP.iter() {
        let session = Arc::clone(session);
        siv.add_global_callback(c, move |_s| {
            session.set_key_down(key, true);
        });
    }

    let sender = Arc::clone(session);
    siv.add_global_callback(' ', move |_s| {
        sender.reset_keys();
    });

    let sender = Arc::clone(session);
    siv.add_global_callback('p', move |_s| {
        sender.set_running(!sender.is_running());
    });
}

/// Loads the program, starts the session and runs the UI until Esc is
/// pressed. The session is shut down once the UI is gone.
fn main() {
    let args = Args::parse();

    let mut chip8 = Chip8::new();
    if let Err(e) = chip8.load_program(&args.rom) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    cursive::logger::init();

    let config = SessionConfig::with_cycle_rate(args.hz);
    let session = Arc::new(if args.paused {
        Session::start_paused(chip8, config)
    } else {
        Session::start(chip8, config)
    });

    let mut siv = cursive::default();
    add_callbacks(&mut siv, &session);
    siv.add_layer(Display::new(session.frame_buffer(), session.timers()));
    siv.set_autorefresh(true);

    siv.run();

    // the callbacks hold the other references, dropping both joins the actors
    drop(siv);
    drop(session);
}
