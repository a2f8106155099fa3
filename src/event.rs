use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::keyboard::key_input::{Key, KeyInput};
use crate::keyboard::model;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if tx.send(AppEvent::Key(key)).is_err() {
                            return;
                        }
                    }
                } else if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

/// Converts a terminal key event into a `KeyInput`. Terminals report the
/// produced character only, so the physical code is inferred from the US
/// board when the character sits on it. Only presses are converted; repeats
/// and releases yield `None`.
pub fn key_input_from_event(event: &KeyEvent) -> Option<KeyInput> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let mods = event.modifiers;
    let mut input = match event.code {
        KeyCode::Char(ch) => {
            let mut input = KeyInput::char(ch);
            if let Some((base, shifted)) = model::base_and_shift(ch) {
                if let Some(code) = model::physical_code(&base.to_string()) {
                    input = input.with_code(code);
                }
                input.shift = shifted;
            }
            if ch == ' ' {
                input = input.with_code("Space");
            }
            input
        }
        KeyCode::Enter => KeyInput::new(Key::Enter).with_code("Enter"),
        KeyCode::Tab => KeyInput::new(Key::Tab).with_code("Tab"),
        KeyCode::Backspace => KeyInput::new(Key::Backspace),
        KeyCode::Esc => KeyInput::new(Key::Escape),
        KeyCode::Modifier(_) | KeyCode::CapsLock | KeyCode::NumLock => KeyInput::new(Key::Modifier),
        other => KeyInput::new(Key::Other(format!("{other:?}"))),
    };
    input.shift |= mods.contains(KeyModifiers::SHIFT);
    input.ctrl = mods.contains(KeyModifiers::CONTROL);
    input.alt = mods.contains(KeyModifiers::ALT);
    input.meta = mods.intersects(KeyModifiers::SUPER | KeyModifiers::META);
    Some(input)
}
