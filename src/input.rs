use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Direction(Direction),
    /// Start a game from the intro screen, or restart after game over.
    Start,
    Quit,
}

pub trait InputSource {
    /// Waits up to `timeout` for the next event. `Ok(None)` means nothing
    /// arrived in time.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;
}

/// Keyboard input from the terminal. Keys that mean nothing to the game are
/// swallowed while waiting.
pub struct Keyboard;

impl InputSource for Keyboard {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        if !poll(timeout).context("Error polling for input")? {
            return Ok(None);
        }

        match read().context("Error reading input")? {
            Event::Key(ev) => Ok(map_key(&ev)),
            _ => Ok(None),
        }
    }
}

pub fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    let event = match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => InputEvent::Direction(Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => InputEvent::Direction(Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => InputEvent::Direction(Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => InputEvent::Direction(Right),
        KeyCode::Enter | KeyCode::Char(' ') => InputEvent::Start,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputEvent::Quit,
        _ => return None,
    };

    Some(event)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
