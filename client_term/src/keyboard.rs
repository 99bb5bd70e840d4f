//! Keyboard input handling

use crate::error::TerminalError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_core::{HeldKeys, InputEvent, InputSource, TickInput};
use std::time::{Duration, Instant};
use tracing::trace;

/// How long a first press counts as held; covers the auto-repeat delay
pub const FIRST_PRESS_WINDOW: Duration = Duration::from_millis(500);
/// How long each auto-repeat extends the hold
pub const REPEAT_WINDOW: Duration = Duration::from_millis(150);

/// A movement key that terminals only report as presses and repeats
#[derive(Debug, Default, Clone, Copy)]
struct KeyHold {
    held_until: Option<Instant>,
}

impl KeyHold {
    fn press(&mut self, now: Instant) {
        let window = if self.is_held(now) {
            REPEAT_WINDOW
        } else {
            FIRST_PRESS_WINDOW
        };
        self.held_until = Some(now + window);
    }

    fn release(&mut self) {
        self.held_until = None;
    }

    fn is_held(&self, now: Instant) -> bool {
        self.held_until.map_or(false, |until| now <= until)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Movement {
    Up,
    Down,
}

fn movement(code: KeyCode) -> Option<Movement> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Movement::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Movement::Down),
        _ => None,
    }
}

fn command(key: &KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(InputEvent::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(' ') => Some(InputEvent::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Reset),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Reads crossterm key events without blocking
#[derive(Debug, Default)]
pub struct TerminalInput {
    up: KeyHold,
    down: KeyHold,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one key event into the held state; returns a discrete command
    /// if the key is one
    pub fn apply_key(&mut self, key: KeyEvent, now: Instant) -> Option<InputEvent> {
        if let Some(dir) = movement(key.code) {
            let hold = match dir {
                Movement::Up => &mut self.up,
                Movement::Down => &mut self.down,
            };
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => hold.press(now),
                KeyEventKind::Release => hold.release(),
            }
            return None;
        }

        if key.kind != KeyEventKind::Press {
            return None;
        }
        command(&key)
    }

    pub fn held(&self, now: Instant) -> HeldKeys {
        HeldKeys {
            up: self.up.is_held(now),
            down: self.down.is_held(now),
        }
    }
}

impl InputSource for TerminalInput {
    type Error = TerminalError;

    fn poll(&mut self) -> Result<TickInput, TerminalError> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                trace!(?key, "key");
                if let Some(cmd) = self.apply_key(key, Instant::now()) {
                    events.push(cmd);
                }
            }
        }
        Ok(TickInput {
            events,
            held: self.held(Instant::now()),
        })
    }
}
