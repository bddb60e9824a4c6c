mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use archer_arena::compute::{
    attack_completed, drain_events, init_state, resize_view, start_game, tick, GameState,
};
use archer_arena::config::GameConfig;
use archer_arena::entities::GameEvent;
use archer_arena::playback::AnimationClock;
use archer_arena::state::Intent;
use archer_arena::GameError;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Longest simulated step; a stalled terminal must not tunnel bodies.
const MAX_DELTA_MS: f32 = 100.0;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame))
}

/// Snapshot the held keys as this frame's intent.
fn read_intent(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Intent {
    use KeyCode::{Char, Down, Left, Right, Up};
    Intent {
        up: any_held(key_frame, &[Up, Char('w'), Char('W')], frame),
        right: any_held(key_frame, &[Right, Char('d'), Char('D')], frame),
        down: any_held(key_frame, &[Down, Char('s'), Char('S')], frame),
        left: any_held(key_frame, &[Left, Char('a'), Char('A')], frame),
        special: is_held(key_frame, &Char(' '), frame),
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logs go to a file: the terminal belongs to the game while it runs.
fn init_tracing() -> std::io::Result<()> {
    let path = std::env::var("ARCHER_ARENA_LOG").unwrap_or_else(|_| "archer_arena.log".to_string());
    let file = File::create(path)?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .compact()
        .init();

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
    Ok(())
}

fn load_config() -> Result<GameConfig, GameError> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ARCHER_ARENA_CONFIG").ok());
    match path {
        Some(path) => {
            info!(%path, "loading config");
            GameConfig::load(path)
        }
        None => Ok(GameConfig::default()),
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "»  ARCHER  ARENA  «";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(title))?;

    let lines: [(String, Color); 4] = [
        (
            format!(
                "Clear {} levels of orcs in {:.0} seconds.",
                config.levels.len(),
                config.game.max_time_ms / 1000.0
            ),
            Color::White,
        ),
        ("Orcs that get close leap in with a sword.".to_string(), Color::DarkGrey),
        ("[ENTER] Start   [Q] Quit".to_string(), Color::Yellow),
        (
            "Arrows / WASD : Move   SPACE : Shoot".to_string(),
            Color::DarkGrey,
        ),
    ];
    for (i, (line, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16 * 2;
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            row,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(line))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Hand this frame's notifications to the front-end collaborators.
///
/// The clock stands in for the animation provider; sounds only get logged.
fn dispatch_events(state: &mut GameState, clock: &mut AnimationClock) {
    for event in drain_events(state) {
        match &event {
            GameEvent::LevelStarted(_) | GameEvent::GameEnded(_) => clock.clear(),
            GameEvent::Sound(sound) => debug!(?sound, "play sound"),
            _ => {}
        }
        clock.observe(&event);
    }
}

/// Returns `true` → quit program, `false` → back to menu.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key. Each frame the keys that are still "fresh" (within
/// `HOLD_WINDOW` frames) become the intent handed to `tick`, so Space and a
/// direction can be held at the same time.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> Result<bool, GameError> {
    let mut rng = match state.config.game.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut clock = AnimationClock::new(
        state.config.player.attack_duration_ms,
        state.config.enemy.attack_duration_ms,
    );
    dispatch_events(state, &mut clock);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        let delta_ms = (frame_start.duration_since(last).as_secs_f32() * 1000.0).min(MAX_DELTA_MS);
        last = frame_start;
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code.clone(), frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(true);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(true);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') if state.is_over() => {
                                start_game(state)?;
                                clock.clear();
                                key_frame.clear();
                            }
                            KeyCode::Char('m') | KeyCode::Char('M') if state.is_over() => {
                                return Ok(false);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code.clone(), frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => {
                    let (w, h) = display::view_size(&state.config.display, cols, rows);
                    resize_view(state, w, h);
                }
                _ => {}
            }
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        if !state.is_over() {
            let intent = read_intent(&key_frame, frame);
            tick(state, &intent, delta_ms, &mut rng)?;

            for entity in clock.advance(delta_ms) {
                if let Err(err) = attack_completed(state, entity) {
                    warn!(%entity, %err, "attack completion rejected");
                }
            }
        }
        dispatch_events(state, &mut clock);

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_tracing()?;
    let config = load_config()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(%err, "game aborted");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
) -> Result<(), GameError> {
    loop {
        match show_menu(out, rx, &config)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let (cols, rows) = terminal::size()?;
                let (view_w, view_h) = display::view_size(&config.display, cols, rows);

                let mut state = init_state(config.clone(), view_w, view_h)?;
                info!(levels = state.level_count(), "run started");
                if game_loop(out, &mut state, rx)? {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
