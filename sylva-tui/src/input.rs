//! Maps terminal events to application actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::trace;

/// What the user is currently doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the tree.
    #[default]
    Browse,
    /// Typing into the search box.
    Search,
    /// Typing a new label.
    Rename,
    /// Answering the delete confirmation.
    ConfirmDelete,
}

/// An input, decoded for the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    PageUp,
    PageDown,
    /// Enter / double click.
    Activate,
    /// Collapse the selected branch.
    Left,
    /// Expand the selected branch.
    Right,
    ToggleCheck,
    ToggleCheckable,
    ToggleMode,
    CycleTheme,
    ExpandAll,
    CollapseAll,
    BeginSearch,
    BeginRename,
    RequestDelete,
    /// Add a child under the selection and start renaming it.
    NewNode,
    Type(char),
    Backspace,
    /// Enter while typing.
    Submit,
    /// Escape while typing or confirming.
    Cancel,
    Confirm,
    /// Click on a screen row.
    Click { row: u16 },
    ScrollUp,
    ScrollDown,
    Resize { width: u16, height: u16 },
}

/// Decodes an event. Returns `None` for events the mode ignores.
pub fn map_event(event: Event, mode: Mode) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key, mode),
        Event::Mouse(mouse) => map_mouse(mouse, mode),
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        other => {
            trace!("Ignoring event {:?}", other);
            None
        }
    }
}

fn map_key(key: KeyEvent, mode: Mode) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        Mode::Browse => map_browse_key(key),
        Mode::Search | Mode::Rename => match key.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Up => Some(Action::Up),
            KeyCode::Down => Some(Action::Down),
            KeyCode::Char(c) => Some(Action::Type(c)),
            _ => None,
        },
        Mode::ConfirmDelete => match key.code {
            KeyCode::Enter | KeyCode::Char('y') => Some(Action::Confirm),
            KeyCode::Esc | KeyCode::Char('n') => Some(Action::Cancel),
            _ => None,
        },
    }
}

fn map_browse_key(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Left | KeyCode::Char('h') => Action::Left,
        KeyCode::Right | KeyCode::Char('l') => Action::Right,
        KeyCode::Enter => Action::Activate,
        KeyCode::Char(' ') => Action::ToggleCheck,
        KeyCode::Char('/') => Action::BeginSearch,
        KeyCode::Char('r') | KeyCode::F(2) => Action::BeginRename,
        KeyCode::Char('d') | KeyCode::Delete => Action::RequestDelete,
        KeyCode::Char('n') => Action::NewNode,
        KeyCode::Char('c') => Action::ToggleCheckable,
        KeyCode::Char('v') => Action::ToggleMode,
        KeyCode::Char('t') => Action::CycleTheme,
        KeyCode::Char('E') => Action::ExpandAll,
        KeyCode::Char('C') => Action::CollapseAll,
        KeyCode::Esc => Action::Cancel,
        _ => return None,
    };
    Some(action)
}

fn map_mouse(mouse: MouseEvent, mode: Mode) -> Option<Action> {
    if mode == Mode::ConfirmDelete {
        return None;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click { row: mouse.row }),
        MouseEventKind::ScrollUp => Some(Action::ScrollUp),
        MouseEventKind::ScrollDown => Some(Action::ScrollDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_browse_keys() {
        assert_eq!(map_event(key(KeyCode::Char('q')), Mode::Browse), Some(Action::Quit));
        assert_eq!(map_event(key(KeyCode::Char('/')), Mode::Browse), Some(Action::BeginSearch));
        assert_eq!(map_event(key(KeyCode::Char(' ')), Mode::Browse), Some(Action::ToggleCheck));
    }

    #[test]
    fn test_typing_modes_capture_letters() {
        assert_eq!(map_event(key(KeyCode::Char('q')), Mode::Search), Some(Action::Type('q')));
        assert_eq!(map_event(key(KeyCode::Enter), Mode::Rename), Some(Action::Submit));
        assert_eq!(map_event(key(KeyCode::Esc), Mode::Rename), Some(Action::Cancel));
    }

    #[test]
    fn test_confirm_mode() {
        assert_eq!(map_event(key(KeyCode::Char('y')), Mode::ConfirmDelete), Some(Action::Confirm));
        assert_eq!(map_event(key(KeyCode::Char('n')), Mode::ConfirmDelete), Some(Action::Cancel));
        assert_eq!(map_event(key(KeyCode::Char('x')), Mode::ConfirmDelete), None);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(event, Mode::Rename), Some(Action::Quit));
    }

    #[test]
    fn test_release_ignored() {
        let event = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(event, Mode::Browse), None);
    }
}
