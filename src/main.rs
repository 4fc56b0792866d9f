mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use console_invaders::clock::{frames_per_second, Clock, SystemClock};
use console_invaders::input::{InputState, Key, KeySnapshot};
use console_invaders::screen::{compose, draw_game_over, Screen};
use console_invaders::{FrameOutcome, GameConfig, GameError, Session};

use display::{blit, TerminalGuard};

/// Poll interval on the game-over screen.
const IDLE_POLL: Duration = Duration::from_millis(5);

/// A key counts as held while its last press/repeat event is this recent.
/// Covers terminals that never report key releases.
const HOLD_WINDOW: Duration = Duration::from_millis(130);

/// Hold window after a fresh press. Longer than common autorepeat delays so
/// the first repeat arrives before the key lapses.
const PRESS_HOLD_WINDOW: Duration = Duration::from_millis(750);

#[derive(Parser, Debug)]
#[command(name = "console_invaders", about = "Space Invaders in the terminal")]
struct Cli {
    /// Seed for the hostile fire RNG (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum milliseconds per frame
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Screen width in cells
    #[arg(long, default_value_t = 120)]
    width: usize,

    /// Screen height in cells
    #[arg(long, default_value_t = 30)]
    height: usize,

    /// Write logs here instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<(), GameError> {
    let default_level = if log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if let Some(path) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

// ── Key sampling ──────────────────────────────────────────────────────────────

fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::MoveRight),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Exit),
        KeyCode::Pause | KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),
        _ => None,
    }
}

/// Turns the terminal's key events into per-frame key-down snapshots.
///
/// A fresh press holds its key for `PRESS_HOLD_WINDOW`; later press/repeat
/// events while it is held only extend it by `HOLD_WINDOW`. A repeat for a
/// key that is not held is ignored, so autorepeat never starts a new edge.
/// Terminals that report releases drop the key immediately.
struct KeySampler {
    rx: mpsc::Receiver<Event>,
    held_until: HashMap<Key, Instant>,
}

impl KeySampler {
    fn new(rx: mpsc::Receiver<Event>) -> Self {
        Self { rx, held_until: HashMap::new() }
    }

    fn sample(&mut self) -> KeySnapshot {
        self.sample_at(Instant::now())
    }

    /// Drain pending events without blocking and report which keys are down
    /// at `now`.
    fn sample_at(&mut self, now: Instant) -> KeySnapshot {
        self.held_until.retain(|_, until| *until >= now);
        while let Ok(ev) = self.rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            let key = if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                Some(Key::Exit)
            } else {
                key_for(code)
            };
            let Some(key) = key else { continue };
            let held = self.held_until.contains_key(&key);
            match kind {
                // Without release reporting, autorepeat arrives as presses.
                KeyEventKind::Press if !held => {
                    self.held_until.insert(key, now + PRESS_HOLD_WINDOW);
                }
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if let Some(until) = self.held_until.get_mut(&key) {
                        *until = (*until).max(now + HOLD_WINDOW);
                    }
                }
                KeyEventKind::Release => {
                    self.held_until.remove(&key);
                }
            }
        }

        let mut snapshot = KeySnapshot::new();
        for key in Key::ALL {
            snapshot.set(key, self.held_until.contains_key(&key));
        }
        snapshot
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Play until the session ends. Returns `true` if the player asked to exit.
fn play<W: Write>(
    out: &mut W,
    session: &mut Session,
    keys: &mut KeySampler,
    input: &mut InputState,
    rng: &mut StdRng,
    frame_time: Duration,
) -> Result<bool, GameError> {
    let mut clock = SystemClock::new();
    let mut screen = Screen::new(session.config.screen_width, session.config.screen_height);

    loop {
        let frame_start = Instant::now();
        let dt = clock.tick();
        let frame_input = input.sample(&keys.sample());

        let outcome = session.update(dt, &frame_input, rng);
        if outcome == FrameOutcome::Exit {
            return Ok(true);
        }

        compose(session, frames_per_second(dt), &mut screen);
        if let FrameOutcome::GameOver(_) = outcome {
            draw_game_over(&mut screen);
            blit(out, &screen)?;
            return Ok(false);
        }
        blit(out, &screen)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

/// Wait on the game-over screen. Returns `true` to exit, `false` to restart.
fn wait_for_restart(keys: &mut KeySampler, input: &mut InputState) -> bool {
    loop {
        let frame_input = input.sample(&keys.sample());
        // Exit wins over restart.
        if frame_input.exit {
            return true;
        }
        if frame_input.fire {
            return false;
        }
        thread::sleep(IDLE_POLL);
    }
}

fn run<W: Write>(out: &mut W, cli: &Cli, config: GameConfig) -> Result<(), GameError> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Dedicate a thread to blocking event reads so the frame loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let mut keys = KeySampler::new(rx);
    // Latches persist across restarts so a held Space does not fire at once.
    let mut input = InputState::new();
    let frame_time = Duration::from_millis(cli.frame_ms);
    let mut session = Session::new(&config);

    loop {
        if play(out, &mut session, &mut keys, &mut input, &mut rng, frame_time)? {
            break;
        }
        if wait_for_restart(&mut keys, &mut input) {
            break;
        }
        session.restart();
    }
    log::info!("exiting with score {}", session.score);
    Ok(())
}

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = GameConfig {
        screen_width: cli.width,
        screen_height: cli.height,
        ..GameConfig::default()
    };
    config.validate()?;

    let mut guard = TerminalGuard::enter(BufWriter::new(stdout()))?;
    let result = run(guard.out(), &cli, config);
    drop(guard);

    if let Err(err) = &result {
        log::error!("{}", err);
    }
    result
}
