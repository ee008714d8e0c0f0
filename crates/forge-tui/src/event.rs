//! Terminal event handling. Captures keyboard, paste and resize events
//! from crossterm and dispatches them as Actions.
//!
//! The handler operates in two modes:
//! - Normal: keys are mapped to global shortcuts (quit, focus, cycle, copy).
//! - Editing: keys are forwarded as raw CharInput/BackspaceInput so the
//!   prompt editor can receive typed characters.
//!
//! The current InputMode is shared between the App and EventHandler via
//! an Arc<AtomicU8>.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::{Action, InputMode};

/// Encode InputMode as u8 for atomic sharing.
const MODE_NORMAL: u8 = 0;
const MODE_EDITING: u8 = 1;

/// Shared flag the App sets so the EventHandler knows which keymap to use.
pub type InputModeFlag = Arc<AtomicU8>;

pub fn new_input_mode_flag() -> InputModeFlag {
    Arc::new(AtomicU8::new(MODE_NORMAL))
}

pub fn set_input_mode(flag: &InputModeFlag, mode: InputMode) {
    let val = match mode {
        InputMode::Normal => MODE_NORMAL,
        InputMode::Editing => MODE_EDITING,
    };
    flag.store(val, Ordering::Relaxed);
}

pub fn get_input_mode(flag: &InputModeFlag) -> InputMode {
    match flag.load(Ordering::Relaxed) {
        MODE_EDITING => InputMode::Editing,
        _ => InputMode::Normal,
    }
}

/// Event loop that reads terminal events and sends Actions.
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Action>,
    tick_rate: Duration,
    mode_flag: InputModeFlag,
}

impl EventHandler {
    pub fn new(
        tx: mpsc::UnboundedSender<Action>,
        tick_rate: Duration,
        mode_flag: InputModeFlag,
    ) -> Self {
        Self {
            tx,
            tick_rate,
            mode_flag,
        }
    }

    /// Run the event loop. This blocks and should be spawned in a task.
    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.tick_rate);

        loop {
            let action = tokio::select! {
                _ = interval.tick() => {
                    Some(Action::Tick)
                }
                result = tokio::task::spawn_blocking({
                    || {
                        if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                            event::read().ok()
                        } else {
                            None
                        }
                    }
                }) => {
                    match result {
                        Ok(Some(event)) => self.map_event(event),
                        _ => None,
                    }
                }
            };

            if let Some(action) = action {
                if self.tx.send(action).is_err() {
                    break;
                }
            }
        }
    }

    fn map_event(&self, event: Event) -> Option<Action> {
        match event {
            // Windows reports releases too; only act on presses.
            Event::Key(key) if key.kind != KeyEventKind::Release => self.map_key(key),
            Event::Paste(text) => Some(Action::PasteBulk(text)),
            Event::Resize(_, _) => Some(Action::Tick),
            _ => None,
        }
    }

    fn map_key(&self, key: KeyEvent) -> Option<Action> {
        map_key(get_input_mode(&self.mode_flag), key)
    }
}

/// Translate a key press into an action for the given mode.
pub fn map_key(mode: InputMode, key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits regardless of mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        InputMode::Editing => map_key_editing(key),
        InputMode::Normal => map_key_normal(key),
    }
}

/// Key mapping when the prompt editor is focused. Most keys become character
/// input; only a few are reserved for navigation.
fn map_key_editing(key: KeyEvent) -> Option<Action> {
    // Ctrl shortcuts that work in editing mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') | KeyCode::Backspace => Some(Action::DeleteWord),
            KeyCode::Char('v') => Some(Action::PasteInput),
            KeyCode::Char('s') => Some(Action::SubmitForm),
            KeyCode::Enter => Some(Action::SubmitForm),
            _ => None,
        };
    }

    // Alt+Enter also submits (some terminals send this instead of Ctrl+Enter).
    if key.modifiers.contains(KeyModifiers::ALT) && key.code == KeyCode::Enter {
        return Some(Action::SubmitForm);
    }

    match key.code {
        KeyCode::Esc => Some(Action::Escape),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Enter => Some(Action::NewlineInput),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Backspace => Some(Action::BackspaceInput),
        KeyCode::Char(c) => Some(Action::CharInput(c)),
        _ => None,
    }
}

/// Key mapping in normal mode: global shortcuts.
fn map_key_normal(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => Some(Action::FocusNext),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => Some(Action::FocusPrev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::CycleNext),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::CyclePrev),
        KeyCode::Enter | KeyCode::Char('g') => Some(Action::SubmitForm),
        KeyCode::Char('c') | KeyCode::Char('y') => Some(Action::CopyOutput),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Esc => Some(Action::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn mode_flag_round_trips() {
        let flag = new_input_mode_flag();
        assert_eq!(get_input_mode(&flag), InputMode::Normal);
        set_input_mode(&flag, InputMode::Editing);
        assert_eq!(get_input_mode(&flag), InputMode::Editing);
    }

    #[test]
    fn ctrl_c_quits_in_both_modes() {
        for mode in [InputMode::Normal, InputMode::Editing] {
            assert!(matches!(
                map_key(mode, ctrl(KeyCode::Char('c'))),
                Some(Action::Quit)
            ));
        }
    }

    #[test]
    fn letters_are_text_while_editing() {
        assert!(matches!(
            map_key(InputMode::Editing, press(KeyCode::Char('q'))),
            Some(Action::CharInput('q'))
        ));
        assert!(matches!(
            map_key(InputMode::Editing, press(KeyCode::Char('c'))),
            Some(Action::CharInput('c'))
        ));
        assert!(matches!(
            map_key(InputMode::Editing, press(KeyCode::Enter)),
            Some(Action::NewlineInput)
        ));
    }

    #[test]
    fn submit_shortcuts() {
        assert!(matches!(
            map_key(InputMode::Editing, ctrl(KeyCode::Char('s'))),
            Some(Action::SubmitForm)
        ));
        assert!(matches!(
            map_key(
                InputMode::Editing,
                KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)
            ),
            Some(Action::SubmitForm)
        ));
        assert!(matches!(
            map_key(InputMode::Normal, press(KeyCode::Enter)),
            Some(Action::SubmitForm)
        ));
    }

    #[test]
    fn normal_mode_shortcuts() {
        assert!(matches!(
            map_key(InputMode::Normal, press(KeyCode::Char('q'))),
            Some(Action::Quit)
        ));
        assert!(matches!(
            map_key(InputMode::Normal, press(KeyCode::Char('c'))),
            Some(Action::CopyOutput)
        ));
        assert!(matches!(
            map_key(InputMode::Normal, press(KeyCode::Right)),
            Some(Action::CycleNext)
        ));
        assert!(matches!(
            map_key(InputMode::Normal, press(KeyCode::Tab)),
            Some(Action::FocusNext)
        ));
    }
}
