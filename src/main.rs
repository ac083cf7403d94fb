mod display;

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kong_climber::config::GameConfig;
use kong_climber::controller::GameController;
use kong_climber::error::ConfigError;
use kong_climber::input::{InputSnapshot, Key};

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

const CONFIG_ENV_VAR: &str = "KONG_CONFIG";
const LOG_FILE_ENV_VAR: &str = "KONG_LOG_FILE";

/// Min frames between accepted Shoot presses. Terminals without release
/// events report auto-repeat as fresh presses, which would empty the blaster
/// in a burst.
const SHOOT_COOLDOWN: u32 = 12;

/// Min frames between accepted Jump presses.
const JUMP_COOLDOWN: u32 = 12;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// 8 frames @ 60 FPS is longer than the OS key-repeat interval.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Accepts a press once the cooldown has run out and restarts it.
fn take_press(cooldown: &mut u32, reset: u32) -> bool {
    if *cooldown > 0 {
        return false;
    }
    *cooldown = reset;
    true
}

fn map_key(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Jump),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Shoot),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Char('2') => Some(Key::LevelTwo),
        _ => None,
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs go to a file.
fn init_tracing() {
    let path = std::env::var(LOG_FILE_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("kong_climber.log"));
    let Ok(file) = File::create(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
}

fn load_config() -> Result<GameConfig, ConfigError> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => GameConfig::load(&PathBuf::from(path)),
        Err(_) => GameConfig::builtin(),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, so held keys apply every frame and several keys can
/// be held at once. Keys that went down this frame are reported as pressed,
/// which is what jumping, shooting and menu choices react to.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut GameController,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut shoot_cooldown: u32 = 0;
    let mut jump_cooldown: u32 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut pressed: HashSet<KeyCode> = HashSet::new();
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                    key_frame.insert(code.clone(), frame);
                    pressed.insert(code);
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let mut input = InputSnapshot::new();
        for code in key_frame.keys().filter(|code| is_held(&key_frame, code, frame)) {
            if let Some(key) = map_key(code) {
                input.set_held(key);
            }
        }
        for key in pressed.iter().filter_map(map_key) {
            let accepted = match key {
                Key::Shoot => take_press(&mut shoot_cooldown, SHOOT_COOLDOWN),
                Key::Jump => take_press(&mut jump_cooldown, JUMP_COOLDOWN),
                _ => true,
            };
            if accepted {
                input.set_pressed(key);
            }
        }

        shoot_cooldown = shoot_cooldown.saturating_sub(1);
        jump_cooldown = jump_cooldown.saturating_sub(1);

        if let Err(err) = game.update(&input) {
            error!(error = %err, "level could not be started");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, err));
        }

        display::render(out, game)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "config_invalid");
            eprintln!("kong_climber: {err}");
            std::process::exit(1);
        }
    };
    info!(levels = config.levels.len(), "starting");
    let mut game = GameController::new(config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never
    // blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(total = game.total_score(), "quit");
    result
}
