use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::error;

/// What a key press means to the main loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyInput {
    /// Forwarded to the controller as a command token.
    Token(String),
    Quit,
}

pub fn key_to_input(key: KeyEvent) -> Option<KeyInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(KeyInput::Quit),
        KeyCode::Char(c) => Some(KeyInput::Token(c.to_string())),
        KeyCode::Enter => Some(KeyInput::Token("\n".to_string())),
        _ => None,
    }
}

/// Waits up to `timeout` for a key press on the real terminal.
pub fn poll_key(timeout: Duration) -> io::Result<Option<KeyInput>> {
    if !event::poll(timeout).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
        return Ok(None);
    }
    match event::read().map_err(|e| { error!("Failed to read event: {}", e); e })? {
        Event::Key(key) => Ok(key_to_input(key)),
        _ => Ok(None),
    }
}

// --- SimulatedInput for headless runs ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<KeyInput>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<KeyInput>>) -> Self {
        SimulatedInput { events }
    }

    /// A short scripted session: a few moves, some shots and a pause round-trip.
    pub fn demo_script() -> Self {
        let token = |s: &str| KeyInput::Token(s.to_string());
        let mut events = HashMap::new();
        events.insert(1, vec![token("a")]);
        events.insert(2, vec![token("f")]);
        events.insert(3, vec![token("W"), token("f")]);
        events.insert(5, vec![token("d"), token("d")]);
        events.insert(6, vec![token("F")]);
        events.insert(8, vec![token("x")]);
        events.insert(9, vec![token("p")]);
        events.insert(10, vec![token("f"), token("p")]);
        events.insert(12, vec![token("s")]);
        events.insert(40, vec![KeyInput::Quit]);
        SimulatedInput::new(events)
    }

    /// Inputs scheduled for `tick`, removed once taken.
    pub fn take(&mut self, tick: u64) -> Vec<KeyInput> {
        self.events.remove(&tick).unwrap_or_default()
    }

    pub fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn printable_keys_become_tokens() {
        let key = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(key_to_input(key), Some(KeyInput::Token("w".to_string())));
    }

    #[test]
    fn escape_quits_and_arrows_are_ignored() {
        assert_eq!(
            key_to_input(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(KeyInput::Quit)
        );
        assert_eq!(key_to_input(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)), None);
    }

    #[test]
    fn simulated_input_hands_out_each_tick_once() {
        let mut input = SimulatedInput::demo_script();
        assert_eq!(input.take(3).len(), 2);
        assert!(input.take(3).is_empty());
        assert!(input.take(4).is_empty());
        assert!(!input.is_exhausted());
    }
}
