//! Terminal runner for the assisted falling-block game (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `tetris-assist-term`. Logging goes to a file because the terminal is in raw
//! alternate-screen mode while the game runs.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use tetris_assist::core::GameState;
use tetris_assist::engine::{AssistConfig, GameSession, MonotonicClock, SessionSnapshot};
use tetris_assist::input::{should_quit, EdgeTrigger};
use tetris_assist::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetris_assist::types::{AssistMode, TICK_MS};

#[derive(Debug, Parser)]
#[command(version, about = "Falling-block puzzle with a move-advisory assist layer")]
struct Cli {
    #[arg(long, help = "Seed for the piece queue (default: derived from the system time)")]
    seed: Option<u32>,

    #[arg(
        long,
        default_value = "advise",
        value_parser = parse_mode,
        help = "Initial assist mode: advise, timed, autopilot or emergency"
    )]
    mode: AssistMode,

    #[arg(long, help = "Play without the assist layer")]
    simple: bool,

    #[arg(long, help = "JSON file with assist timing and heuristic weights")]
    config: Option<PathBuf>,

    #[arg(long, help = "Write logs to this file (logging is off without it)")]
    log_file: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v = DEBUG, -vv = TRACE)")]
    verbose: u8,
}

fn parse_mode(s: &str) -> Result<AssistMode, String> {
    AssistMode::from_str(s).ok_or_else(|| format!("unknown assist mode '{s}'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    // Config errors surface before the terminal switches to raw mode.
    let session = build_session(&cli)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    info!(keyboard_enhanced = term.keyboard_enhanced(), "terminal ready");

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(LevelFilter::from_level(level))
        .init();
    info!("Logging initialized at level: {}", level);
    Ok(())
}

fn build_session(cli: &Cli) -> Result<GameSession<MonotonicClock>> {
    let seed = cli.seed.unwrap_or_else(time_seed);
    let game = GameState::new(seed);
    info!(seed, mode = cli.mode.as_str(), simple = cli.simple, "starting session");

    if cli.simple {
        return Ok(GameSession::unassisted(game, MonotonicClock::new()));
    }

    let config = match &cli.config {
        Some(path) => AssistConfig::load(path)?,
        None => AssistConfig::default(),
    };
    Ok(GameSession::assisted(game, config, cli.mode, MonotonicClock::new()))
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, mut session: GameSession<MonotonicClock>) -> Result<()> {
    let view = GameView::default();
    let mut edge = EdgeTrigger::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, session.log(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        info!(
                            score = session.game().score(),
                            lines = session.game().lines(),
                            "quit"
                        );
                        return Ok(());
                    }
                    if let Some(action) = edge.handle_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            edge.update(elapsed.as_millis() as u32);
            session.frame();
        }
    }
}
