mod audio;
mod config;
mod debug;
mod frame;
mod game;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use audio::SoundBank;
use config::Config;
use frame::FrameClock;
use game::{Flow, GameEngine, KeyboardState};
use ui::{Palette, Renderer, TerminalRenderer};

#[derive(Parser, Debug)]
#[command(name = "termpong")]
#[command(about = "Terminal ping pong against a simple AI paddle")]
struct Args {
    /// Config file (defaults to <config dir>/termpong/config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a debug log (see --log-file)
    #[arg(long)]
    debug: bool,

    /// Debug log location
    #[arg(long, requires = "debug")]
    log_file: Option<PathBuf>,

    /// Disable sound effects
    #[arg(long)]
    mute: bool,

    /// Seed for the serve direction RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks per second
    #[arg(long)]
    fps: Option<u64>,
}

impl Args {
    /// Command line flags win over the config file
    fn apply_to(&self, config: &mut Config) {
        if self.mute {
            config.audio.enabled = false;
        }
        if let Some(seed) = self.seed {
            config.gameplay.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.display.target_fps = fps;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logging comes up before anything else so config problems are recorded
    debug::init(args.debug, args.log_file.as_deref())?;

    let mut config = config::load_config(args.config.as_deref())?;
    args.apply_to(&mut config);
    tracing::debug!(?config, "effective configuration");

    let sounds = SoundBank::load(&config.audio);
    let rng = match config.gameplay.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let engine = GameEngine::new(config.gameplay.default_winning_score, sounds, rng);

    // Release events are only reported with the kitty keyboard protocol
    // (and always on Windows)
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);

    // Setup terminal; the guard puts it back even if a later step fails
    let guard = TerminalGuard::enter(enhanced)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut renderer = TerminalRenderer::new(Terminal::new(backend)?)?;

    let keyboard = KeyboardState::new(enhanced || cfg!(windows));
    let result = run_game(&mut renderer, engine, keyboard, &config);

    let restored = guard.restore();
    result.context("game loop failed")?;
    restored.context("failed to restore terminal")
}

/// Raw mode, alternate screen and keyboard flags, undone on drop.
struct TerminalGuard {
    enhanced: bool,
    restored: bool,
}

impl TerminalGuard {
    fn enter(enhanced: bool) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self {
            enhanced: false,
            restored: false,
        };

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        if enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            guard.enhanced = true;
        }
        Ok(guard)
    }

    fn restore(mut self) -> io::Result<()> {
        self.restored = true;
        restore_terminal(io::stdout(), self.enhanced)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(e) = restore_terminal(io::stdout(), self.enhanced) {
                tracing::warn!("failed to restore terminal: {e}");
            }
        }
    }
}

/// Runs every restore step even when an earlier one fails; reports the
/// first failure.
fn restore_terminal(mut out: impl Write, enhanced: bool) -> io::Result<()> {
    let popped = if enhanced {
        execute!(out, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen);
    let cursor = execute!(out, Show);

    popped.and(raw).and(screen).and(cursor)
}

/// Poll, simulate, draw, sleep; until a quit command arrives.
fn run_game<R: Renderer>(
    renderer: &mut R,
    mut engine: GameEngine,
    mut keyboard: KeyboardState,
    config: &Config,
) -> Result<(), io::Error> {
    let clock = FrameClock::from_fps(config.display.target_fps);
    let palette = Palette::from(&config.display);

    tracing::info!(
        tick_ms = clock.frame_duration().as_secs_f32() * 1000.0,
        "game loop started"
    );

    loop {
        let frame_start = Instant::now();

        let input = keyboard.poll()?;
        for command in input.commands {
            if engine.handle_command(command) == Flow::Quit {
                return Ok(());
            }
        }

        engine.update(input.movement);

        ui::draw(&engine, renderer, &palette);
        renderer.present()?;

        clock.limit_frame_rate(frame_start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from(["termpong", "--mute", "--seed", "9", "--fps", "30"]);
        let mut config = Config::default();
        args.apply_to(&mut config);

        assert!(!config.audio.enabled);
        assert_eq!(config.gameplay.seed, Some(9));
        assert_eq!(config.display.target_fps, 30);
    }

    /// Fails its first `fails` writes, records the rest
    struct FlakyWriter {
        fails: usize,
        written: Vec<u8>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fails > 0 {
                self.fails -= 1;
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_restore_continues_after_failed_step() {
        let mut out = FlakyWriter {
            fails: 1,
            written: Vec::new(),
        };
        let result = restore_terminal(&mut out, true);

        assert!(result.is_err());
        let written = String::from_utf8_lossy(&out.written);
        assert!(written.contains("\x1b[?1049l"), "alternate screen not left: {written:?}");
        assert!(written.contains("\x1b[?25h"), "cursor not shown: {written:?}");
    }

    #[test]
    fn test_restore_without_enhancement_writes_no_pop() {
        let mut out = FlakyWriter {
            fails: 0,
            written: Vec::new(),
        };
        restore_terminal(&mut out, false).unwrap();

        let written = String::from_utf8_lossy(&out.written);
        assert!(!written.contains("\x1b[<1u"));
        assert!(written.contains("\x1b[?1049l"));
    }

    #[test]
    fn test_log_file_requires_debug() {
        assert!(Args::try_parse_from(["termpong", "--log-file", "x.log"]).is_err());
        assert!(Args::try_parse_from(["termpong", "--debug", "--log-file", "x.log"]).is_ok());
    }
}
