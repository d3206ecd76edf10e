//! Key-to-action mapping for the repository browser.
//!
//! Converts raw `(KeyCode, KeyModifiers)` pairs into [`BrowserAction`]
//! values, taking the current input mode into account so that each key
//! press resolves to at most one action.

use iocraft::prelude::{KeyCode, KeyModifiers};

use super::dispatch::ActionKind;
use super::model::BrowserAction;

/// Read-only snapshot of which input modes are active, so the mapping
/// stays a pure function.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeymapSnapshot {
    pub search_focused: bool,
    pub show_help: bool,
}

/// Map a raw key event to a [`BrowserAction`].
///
/// Returns `None` when the key has no mapping in the current mode (e.g.
/// ordinary characters while the search box is focused fall through to
/// the text input).
pub fn key_to_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    snapshot: &KeymapSnapshot,
) -> Option<BrowserAction> {
    // Ctrl+C quits from any mode.
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(BrowserAction::Quit);
    }

    // Help modal captures all keys until dismissed.
    if snapshot.show_help {
        return match code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                Some(BrowserAction::ToggleHelp)
            }
            _ => None,
        };
    }

    // Search mode: Esc/Enter/Tab are intercepted, everything else goes
    // to the search box.
    if snapshot.search_focused {
        return match code {
            KeyCode::Esc => Some(BrowserAction::ClearSearch),
            KeyCode::Enter | KeyCode::Tab => Some(BrowserAction::ExitSearch),
            _ => None,
        };
    }

    match code {
        // Navigation
        KeyCode::Char('j') | KeyCode::Down => Some(BrowserAction::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(BrowserAction::MoveUp),
        KeyCode::Char('g') => Some(BrowserAction::GoToTop),
        KeyCode::Char('G') => Some(BrowserAction::GoToBottom),
        KeyCode::PageUp => Some(BrowserAction::PageUp),
        KeyCode::PageDown => Some(BrowserAction::PageDown),

        // Search and filter
        KeyCode::Char('/') => Some(BrowserAction::FocusSearch),
        KeyCode::Esc => Some(BrowserAction::ClearSearch),
        KeyCode::Tab => Some(BrowserAction::NextCategory),
        KeyCode::BackTab => Some(BrowserAction::PrevCategory),

        // Actions on the selected repository
        KeyCode::Char('s') => Some(BrowserAction::Trigger(ActionKind::Star)),
        KeyCode::Char('f') => Some(BrowserAction::Trigger(ActionKind::Fork)),
        KeyCode::Char('y') => Some(BrowserAction::Trigger(ActionKind::Clone)),
        KeyCode::Char('o') => Some(BrowserAction::Trigger(ActionKind::OpenBrowser)),
        KeyCode::Char('i') => Some(BrowserAction::Trigger(ActionKind::Issues)),
        KeyCode::Char('p') => Some(BrowserAction::Trigger(ActionKind::PullRequests)),
        KeyCode::Char('w') => Some(BrowserAction::Trigger(ActionKind::Watch)),

        // Session
        KeyCode::Char('r') => Some(BrowserAction::Refresh),
        KeyCode::Char('?') => Some(BrowserAction::ToggleHelp),
        KeyCode::Char('q') => Some(BrowserAction::Quit),

        _ => None,
    }
}
