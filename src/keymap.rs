//! Key bindings for the picker
//!
//! Maps crossterm key events onto the small set of actions the state machine
//! understands, and provides the help line shown under the list.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use strum::{Display, EnumIter};

/// Actions that can be triggered from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum KeyAction {
    CursorUp,
    CursorDown,
    PrevPage,
    NextPage,
    GoToStart,
    GoToEnd,
    Select,
    Quit,
}

/// A key binding shown in the help line
#[derive(Debug, Clone, Copy)]
pub struct Keybinding {
    pub action: KeyAction,
    pub display: &'static str,
    pub description: &'static str,
}

/// Bindings advertised under the list, in display order
pub const HELP_BINDINGS: &[Keybinding] = &[
    Keybinding {
        action: KeyAction::CursorUp,
        display: "↑/k",
        description: "up",
    },
    Keybinding {
        action: KeyAction::CursorDown,
        display: "↓/j",
        description: "down",
    },
    Keybinding {
        action: KeyAction::NextPage,
        display: "→/l",
        description: "next page",
    },
    Keybinding {
        action: KeyAction::Select,
        display: "enter",
        description: "install",
    },
    Keybinding {
        action: KeyAction::Quit,
        display: "q",
        description: "quit",
    },
];

/// Resolve a key event to an action.
///
/// Release and repeat events (reported on Windows) resolve to nothing.
pub fn action_for(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(KeyAction::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(KeyAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(KeyAction::CursorDown),
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => Some(KeyAction::PrevPage),
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => Some(KeyAction::NextPage),
        KeyCode::Home | KeyCode::Char('g') => Some(KeyAction::GoToStart),
        KeyCode::End | KeyCode::Char('G') => Some(KeyAction::GoToEnd),
        KeyCode::Enter => Some(KeyAction::Select),
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
        _ => None,
    }
}

/// `↑/k up • ↓/j down • ...`
pub fn help_line() -> String {
    HELP_BINDINGS
        .iter()
        .map(|b| format!("{} {}", b.display, b.description))
        .collect::<Vec<_>>()
        .join(" • ")
}
