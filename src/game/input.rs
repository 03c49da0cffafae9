use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use super::state::MatchLength;

/// Without release events a key counts as held this long after an
/// autorepeat. Long enough to bridge autorepeat gaps, short enough that
/// the paddle stops promptly.
pub const HOLD_WINDOW: Duration = Duration::from_millis(180);

/// Window after the first press, covering the terminal's delay before
/// autorepeat kicks in (commonly 300-500 ms).
pub const INITIAL_HOLD_WINDOW: Duration = Duration::from_millis(550);

/// Discrete key-down commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SelectMode(MatchLength),
    Confirm,
    Menu,
    Quit,
}

/// Continuous movement keys held during this tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Movement {
    pub up: bool,
    pub down: bool,
}

/// Everything the engine needs from the keyboard for one tick
#[derive(Debug, Default)]
pub struct InputFrame {
    pub commands: Vec<Command>,
    pub movement: Movement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MoveKey {
    Up,
    Down,
}

/// A movement key seen down at `at`, held for `window` unless refreshed
#[derive(Clone, Copy, Debug)]
struct Held {
    at: Instant,
    window: Duration,
}

/// Tracks which movement keys are down.
///
/// With release reporting (kitty keyboard protocol) a key is held from
/// Press until Release. Otherwise a fresh press is held for
/// `INITIAL_HOLD_WINDOW`, and each autorepeat after that for `HOLD_WINDOW`.
#[derive(Debug)]
pub struct KeyboardState {
    reports_release: bool,
    up: Option<Held>,
    down: Option<Held>,
}

impl KeyboardState {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            up: None,
            down: None,
        }
    }

    /// Drain all pending terminal events without blocking.
    pub fn poll(&mut self) -> Result<InputFrame, std::io::Error> {
        let mut frame = InputFrame::default();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if let Some(command) = self.apply(key, Instant::now()) {
                    frame.commands.push(command);
                }
            }
        }

        frame.movement = self.movement(Instant::now());
        Ok(frame)
    }

    /// Feed one key event; returns a command for discrete key presses.
    pub fn apply(&mut self, key: KeyEvent, now: Instant) -> Option<Command> {
        if let Some(move_key) = movement_key(key.code) {
            self.track(move_key, key.kind, now);
            return None;
        }

        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::Menu),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Confirm),
            KeyCode::Char(c) => MatchLength::from_key(c).map(Command::SelectMode),
            _ => None,
        }
    }

    pub fn movement(&self, now: Instant) -> Movement {
        Movement {
            up: self.is_held(self.up, now),
            down: self.is_held(self.down, now),
        }
    }

    fn track(&mut self, key: MoveKey, kind: KeyEventKind, now: Instant) {
        let previous = match key {
            MoveKey::Up => self.up,
            MoveKey::Down => self.down,
        };
        // Plain terminals report autorepeat as Press, so a press while the
        // key is still held counts as a repeat
        let repeating = kind == KeyEventKind::Repeat || self.is_held(previous, now);

        let held = match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => Some(Held {
                at: now,
                window: if repeating { HOLD_WINDOW } else { INITIAL_HOLD_WINDOW },
            }),
            KeyEventKind::Release => None,
        };

        match key {
            MoveKey::Up => self.up = held,
            MoveKey::Down => self.down = held,
        }

        // Without release events the opposite key would linger for a window
        if !self.reports_release && held.is_some() {
            match key {
                MoveKey::Up => self.down = None,
                MoveKey::Down => self.up = None,
            }
        }
    }

    fn is_held(&self, held: Option<Held>, now: Instant) -> bool {
        match held {
            Some(_) if self.reports_release => true,
            Some(h) => now.saturating_duration_since(h.at) < h.window,
            None => false,
        }
    }
}

fn movement_key(code: KeyCode) -> Option<MoveKey> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(MoveKey::Up),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(MoveKey::Down),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyEventKind::Press)
    }

    #[test]
    fn test_discrete_commands() {
        let mut keyboard = KeyboardState::new(false);
        let now = Instant::now();

        assert_eq!(
            keyboard.apply(press(KeyCode::Char('3')), now),
            Some(Command::SelectMode(MatchLength::BestOf3))
        );
        assert_eq!(
            keyboard.apply(press(KeyCode::Char('7')), now),
            Some(Command::SelectMode(MatchLength::BestOf7))
        );
        assert_eq!(keyboard.apply(press(KeyCode::Enter), now), Some(Command::Confirm));
        assert_eq!(keyboard.apply(press(KeyCode::Char('m')), now), Some(Command::Menu));
        assert_eq!(keyboard.apply(press(KeyCode::Char('Q')), now), Some(Command::Quit));
        assert_eq!(keyboard.apply(press(KeyCode::Esc), now), Some(Command::Quit));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut keyboard = KeyboardState::new(false);
        let mut event = press(KeyCode::Char('c'));
        event.modifiers = KeyModifiers::CONTROL;
        assert_eq!(keyboard.apply(event, Instant::now()), Some(Command::Quit));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut keyboard = KeyboardState::new(false);
        let now = Instant::now();
        assert_eq!(keyboard.apply(press(KeyCode::Char('x')), now), None);
        assert_eq!(keyboard.apply(press(KeyCode::Char('4')), now), None);
        assert_eq!(keyboard.apply(press(KeyCode::Tab), now), None);
    }

    #[test]
    fn test_release_ignored_for_commands() {
        let mut keyboard = KeyboardState::new(true);
        let release = key(KeyCode::Char('q'), KeyEventKind::Release);
        assert_eq!(keyboard.apply(release, Instant::now()), None);
    }

    #[test]
    fn test_held_until_release_with_enhancement() {
        let mut keyboard = KeyboardState::new(true);
        let start = Instant::now();

        assert_eq!(keyboard.apply(press(KeyCode::Char('w')), start), None);
        let later = start + Duration::from_secs(2);
        assert!(keyboard.movement(later).up);

        keyboard.apply(key(KeyCode::Char('w'), KeyEventKind::Release), later);
        assert!(!keyboard.movement(later).up);
    }

    #[test]
    fn test_both_directions_can_be_held() {
        let mut keyboard = KeyboardState::new(true);
        let now = Instant::now();
        keyboard.apply(press(KeyCode::Up), now);
        keyboard.apply(press(KeyCode::Down), now);
        assert_eq!(keyboard.movement(now), Movement { up: true, down: true });
    }

    #[test]
    fn test_fallback_hold_window_expires() {
        let mut keyboard = KeyboardState::new(false);
        let start = Instant::now();
        keyboard.apply(press(KeyCode::Char('s')), start);

        assert!(keyboard.movement(start + Duration::from_millis(50)).down);
        assert!(!keyboard.movement(start + INITIAL_HOLD_WINDOW).down);

        // Autorepeat refreshes with the shorter window
        let repeat_at = start + Duration::from_millis(400);
        keyboard.apply(key(KeyCode::Char('s'), KeyEventKind::Repeat), repeat_at);
        assert!(keyboard.movement(repeat_at + Duration::from_millis(100)).down);
        assert!(!keyboard.movement(repeat_at + HOLD_WINDOW).down);
    }

    #[test]
    fn test_fallback_hold_bridges_autorepeat_delay() {
        // Plain terminals: first press, ~500 ms pause, then repeats sent as Press
        let mut keyboard = KeyboardState::new(false);
        let start = Instant::now();
        keyboard.apply(press(KeyCode::Char('w')), start);

        for ms in (0..500).step_by(16) {
            assert!(keyboard.movement(start + Duration::from_millis(ms)).up, "stalled at {ms} ms");
        }

        let first_repeat = start + Duration::from_millis(500);
        keyboard.apply(press(KeyCode::Char('w')), first_repeat);
        assert!(keyboard.movement(first_repeat + Duration::from_millis(100)).up);
        assert!(!keyboard.movement(first_repeat + HOLD_WINDOW).up);
    }

    #[test]
    fn test_fresh_press_after_expiry_gets_initial_window() {
        let mut keyboard = KeyboardState::new(false);
        let start = Instant::now();
        keyboard.apply(press(KeyCode::Down), start);

        let again = start + Duration::from_secs(2);
        keyboard.apply(press(KeyCode::Down), again);
        assert!(keyboard.movement(again + Duration::from_millis(400)).down);
    }

    #[test]
    fn test_fallback_opposite_key_releases_other() {
        let mut keyboard = KeyboardState::new(false);
        let now = Instant::now();
        keyboard.apply(press(KeyCode::Up), now);
        keyboard.apply(press(KeyCode::Down), now);
        assert_eq!(keyboard.movement(now), Movement { up: false, down: true });
    }
}
