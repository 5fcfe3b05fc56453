//! Application state and the event loop.

use std::time::{Duration, Instant};

use crossterm::event::EventStream;
use futures::StreamExt;
use log::{debug, info};

use sylva_lib::{Command, RenderMode, TreeEvent, TreeNode, TreeStore, model};

use crate::error::AppError;
use crate::input::{self, Action, Mode};
use crate::render::{self, BODY_TOP, Frame};
use crate::terminal::TerminalGuard;
use crate::theme::Theme;

/// Two clicks on the same row within this window count as a double click.
const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// Rows moved per wheel notch.
const WHEEL_STEP: i64 = 3;

/// Whether the loop should keep going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The terminal tree browser.
pub struct App {
    store: TreeStore,
    mode: Mode,
    theme: Theme,
    /// Message shown in the status line.
    status: String,
    /// Terminal size as (width, height).
    size: (u16, u16),
    /// Row index and time of the last click.
    last_click: Option<(usize, Instant)>,
    /// Counter for ids of nodes added from the keyboard.
    next_new: usize,
}

impl App {
    pub fn new(store: TreeStore, theme: Theme) -> Self {
        Self {
            store,
            mode: Mode::Browse,
            theme,
            status: String::new(),
            size: (80, 24),
            last_click: None,
            next_new: 1,
        }
    }

    /// Runs until the user quits.
    pub async fn run(mut self, terminal: &mut TerminalGuard) -> Result<(), AppError> {
        let (width, height) = terminal.size()?;
        self.handle(Action::Resize { width, height })?;
        self.draw(terminal)?;

        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            let Some(action) = input::map_event(event?, self.mode) else {
                continue;
            };
            if self.handle(action)? == Flow::Quit {
                info!("Quit requested");
                break;
            }
            self.draw(terminal)?;
        }
        Ok(())
    }

    fn draw(&self, terminal: &mut TerminalGuard) -> Result<(), AppError> {
        let frame = Frame {
            width: self.size.0,
            height: self.size.1,
            mode: self.mode,
            palette: self.theme.palette(),
            theme_name: self.theme.name(),
            status: &self.status,
        };
        render::draw(terminal.out(), &self.store, &frame)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Applies one decoded input.
    pub fn handle(&mut self, action: Action) -> Result<Flow, AppError> {
        debug!("Action {:?} in {:?}", action, self.mode);

        match action {
            Action::Quit => return Ok(Flow::Quit),
            Action::Resize { width, height } => {
                self.size = (width, height);
                let body = render::body_height(height) as u32;
                self.apply(Command::Resize(Some(body)))?;
            }

            Action::Up => self.apply(Command::MoveSelection(-1))?,
            Action::Down => self.apply(Command::MoveSelection(1))?,
            Action::PageUp => {
                let page = render::body_height(self.size.1).max(1) as isize;
                self.apply(Command::MoveSelection(-page))?;
            }
            Action::PageDown => {
                let page = render::body_height(self.size.1).max(1) as isize;
                self.apply(Command::MoveSelection(page))?;
            }
            Action::Activate => {
                if let Some(id) = self.selected_id() {
                    self.apply(Command::Activate(id))?;
                }
            }
            Action::Left => self.set_selected_open(false)?,
            Action::Right => self.set_selected_open(true)?,

            Action::ToggleCheck => match self.selected_id() {
                Some(id) if self.store.is_checkable() => self.apply(Command::ToggleCheck(id))?,
                Some(_) => self.status = "checkboxes are off, press c".into(),
                None => {}
            },
            Action::ToggleCheckable => {
                let checkable = !self.store.is_checkable();
                self.apply(Command::SetCheckable(checkable))?;
            }
            Action::ToggleMode => {
                let mode = match self.store.config().mode {
                    RenderMode::Full => RenderMode::Virtual,
                    RenderMode::Virtual => RenderMode::Full,
                };
                self.apply(Command::SetMode(mode))?;
            }
            Action::CycleTheme => {
                self.theme = self.theme.next();
                info!("Theme set to {}", self.theme.name());
            }
            Action::ExpandAll => self.apply(Command::ExpandAll)?,
            Action::CollapseAll => self.apply(Command::CollapseAll)?,

            Action::BeginSearch => self.mode = Mode::Search,
            Action::BeginRename | Action::RequestDelete if self.store.is_checkable() => {
                self.status = "editing is off while checkboxes are shown".into();
            }
            Action::BeginRename => {
                if let Some(id) = self.selected_id() {
                    self.apply(Command::BeginRename(id))?;
                    self.mode = Mode::Rename;
                }
            }
            Action::RequestDelete => {
                if let Some(id) = self.selected_id() {
                    self.apply(Command::RequestDelete(id))?;
                    self.mode = Mode::ConfirmDelete;
                }
            }
            Action::NewNode => self.new_node()?,

            Action::Type(c) => self.edit_text(|text| text.push(c))?,
            Action::Backspace => self.edit_text(|text| {
                text.pop();
            })?,
            Action::Submit => match self.mode {
                Mode::Rename => self.apply(Command::CommitRename)?,
                _ => self.mode = Mode::Browse,
            },
            Action::Cancel => match self.mode {
                Mode::Search => {
                    self.apply(Command::SetQuery(String::new()))?;
                    self.mode = Mode::Browse;
                }
                Mode::Rename => self.apply(Command::CancelRename)?,
                Mode::ConfirmDelete => self.apply(Command::CancelDelete)?,
                Mode::Browse => {
                    if !self.store.query().is_empty() {
                        self.apply(Command::SetQuery(String::new()))?;
                    }
                }
            },
            Action::Confirm => self.apply(Command::ConfirmDelete)?,

            Action::Click { row } => self.click(row)?,
            Action::ScrollUp => self.apply(Command::ScrollBy(-WHEEL_STEP))?,
            Action::ScrollDown => self.apply(Command::ScrollBy(WHEEL_STEP))?,
        }

        self.sync_mode();
        Ok(Flow::Continue)
    }

    fn selected_id(&self) -> Option<String> {
        self.store.selected().map(str::to_string)
    }

    /// Expands or collapses the selected branch.
    fn set_selected_open(&mut self, open: bool) -> Result<(), AppError> {
        let Some(index) = self.store.selected_index() else {
            return Ok(());
        };
        let row = &self.store.rows()[index];
        if row.has_children && row.is_open != open {
            let id = row.id.clone();
            self.apply(Command::ToggleExpand(id))?;
        }
        Ok(())
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) -> Result<(), AppError> {
        match self.mode {
            Mode::Search => {
                let mut query = self.store.query().to_string();
                edit(&mut query);
                self.apply(Command::SetQuery(query))?;
            }
            Mode::Rename => {
                if let Some(pending) = self.store.editing() {
                    let mut value = pending.value.clone();
                    edit(&mut value);
                    self.apply(Command::EditRename(value))?;
                }
            }
            Mode::Browse | Mode::ConfirmDelete => {}
        }
        Ok(())
    }

    fn click(&mut self, screen_row: u16) -> Result<(), AppError> {
        let body = render::body_height(self.size.1);
        let Some(line) = screen_row.checked_sub(BODY_TOP).filter(|l| *l < body) else {
            return Ok(());
        };
        let index = self.store.scroll_offset() as usize + line as usize;
        let Some(row) = self.store.rows().get(index) else {
            return Ok(());
        };
        let id = row.id.clone();

        let now = Instant::now();
        let double = matches!(
            self.last_click,
            Some((last, at)) if last == index && now.duration_since(at) <= DOUBLE_CLICK
        );

        if double {
            self.last_click = None;
            self.apply(Command::Activate(id))?;
        } else {
            self.last_click = Some((index, now));
            self.apply(Command::Select(id))?;
        }
        Ok(())
    }

    /// Adds a leaf under the selection (or at the top level) and renames it.
    fn new_node(&mut self) -> Result<(), AppError> {
        let id = loop {
            let candidate = format!("new-{}", self.next_new);
            self.next_new += 1;
            if model::find(self.store.data(), &candidate).is_none() {
                break candidate;
            }
        };
        let parent = self.selected_id();

        self.apply(Command::Insert {
            parent: parent.clone(),
            node: TreeNode::new(id.clone(), "New node"),
        })?;
        if let Some(parent) = parent
            && !self.store.expansion().is_expanded(&parent)
        {
            self.apply(Command::ToggleExpand(parent))?;
        }
        self.apply(Command::Select(id.clone()))?;
        self.apply(Command::BeginRename(id))?;
        self.mode = Mode::Rename;
        Ok(())
    }

    /// Leaves dialog modes once the store no longer has anything pending.
    fn sync_mode(&mut self) {
        let done = match self.mode {
            Mode::Rename => self.store.editing().is_none(),
            Mode::ConfirmDelete => self.store.pending_delete().is_none(),
            Mode::Browse | Mode::Search => false,
        };
        if done {
            self.mode = Mode::Browse;
        }
    }

    // -------------------------------------------------------------------------
    // Store
    // -------------------------------------------------------------------------

    fn apply(&mut self, command: Command) -> Result<(), AppError> {
        let events = self.store.apply(command)?;
        for event in events {
            self.on_event(event);
        }
        Ok(())
    }

    fn on_event(&mut self, event: TreeEvent) {
        match event {
            TreeEvent::SelectionChanged(node) => {
                info!("Selected '{}' ({})", node.label, node.id);
                self.status = format!("selected {}", node.label);
            }
            TreeEvent::OpenRequested(node) => {
                info!("Open requested for '{}' ({})", node.label, node.id);
                self.status = format!("opened {}", node.label);
            }
            TreeEvent::DataChanged(data) => {
                let count = model::count(&data);
                info!("Tree changed, {} nodes", count);
                self.status = format!("tree updated, {count} nodes");
            }
            TreeEvent::CheckChanged(checked) => {
                info!("Checked set now has {} ids", checked.len());
                self.status = format!("{} checked", checked.len());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sylva_lib::TreeConfig;

    use super::*;
    use crate::sample;

    fn app() -> App {
        let config = TreeConfig::default().with_row_height(1);
        let store = TreeStore::new(sample::demo(), config).unwrap();
        let mut app = App::new(store, Theme::default());
        app.handle(Action::Resize { width: 80, height: 10 }).unwrap();
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(Action::Type(c)).unwrap();
        }
    }

    #[test]
    fn test_resize_sets_viewport() {
        let app = app();
        assert_eq!(app.store.viewport_height(), Some(7));
    }

    #[test]
    fn test_search_and_escape() {
        let mut app = app();
        app.handle(Action::BeginSearch).unwrap();
        type_text(&mut app, "styles");
        assert_eq!(app.store.query(), "styles");
        let ids: Vec<&str> = app.store.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["2", "2-2"]);

        app.handle(Action::Cancel).unwrap();
        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(app.store.query(), "");
    }

    #[test]
    fn test_rename_flow() {
        let mut app = app();
        app.handle(Action::Down).unwrap();
        assert_eq!(app.store.selected(), Some("1"));
        app.handle(Action::BeginRename).unwrap();
        assert_eq!(app.mode, Mode::Rename);

        for _ in 0..app.store.editing().unwrap().value.len() {
            app.handle(Action::Backspace).unwrap();
        }
        type_text(&mut app, "config");
        app.handle(Action::Submit).unwrap();

        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(model::find(app.store.data(), "1").unwrap().label, "config");
        assert_eq!(app.status, "tree updated, 5 nodes");
    }

    #[test]
    fn test_delete_confirm() {
        let mut app = app();
        app.handle(Action::Down).unwrap();
        app.handle(Action::RequestDelete).unwrap();
        assert_eq!(app.mode, Mode::ConfirmDelete);
        app.handle(Action::Confirm).unwrap();
        assert_eq!(app.mode, Mode::Browse);
        assert!(model::find(app.store.data(), "1").is_none());
    }

    #[test]
    fn test_delete_cancel() {
        let mut app = app();
        app.handle(Action::Down).unwrap();
        app.handle(Action::RequestDelete).unwrap();
        app.handle(Action::Cancel).unwrap();
        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(model::count(app.store.data()), 5);
    }

    #[test]
    fn test_check_requires_checkable() {
        let mut app = app();
        app.handle(Action::Down).unwrap();
        app.handle(Action::ToggleCheck).unwrap();
        assert!(app.store.checked().is_empty());

        app.handle(Action::ToggleCheckable).unwrap();
        app.handle(Action::ToggleCheck).unwrap();
        assert!(app.store.checked().contains("1"));
        assert_eq!(app.status, "1 checked");
    }

    #[test]
    fn test_rename_and_delete_disabled_in_check_mode() {
        let mut app = app();
        app.handle(Action::Down).unwrap();
        app.handle(Action::ToggleCheckable).unwrap();

        app.handle(Action::BeginRename).unwrap();
        assert_eq!(app.mode, Mode::Browse);
        assert!(app.store.editing().is_none());

        app.handle(Action::RequestDelete).unwrap();
        assert_eq!(app.mode, Mode::Browse);
        assert!(app.store.pending_delete().is_none());
        assert_eq!(app.status, "editing is off while checkboxes are shown");
    }

    #[test]
    fn test_click_and_double_click() {
        let mut app = app();
        // Full mode starts expanded: 1, 2, 2-1, 2-2, 3
        app.handle(Action::Click { row: BODY_TOP + 2 }).unwrap();
        assert_eq!(app.store.selected(), Some("2-1"));
        app.handle(Action::Click { row: BODY_TOP + 2 }).unwrap();
        assert_eq!(app.status, "opened Main_Module.ts");
    }

    #[test]
    fn test_click_outside_body_ignored() {
        let mut app = app();
        app.handle(Action::Click { row: 0 }).unwrap();
        app.handle(Action::Click { row: BODY_TOP + 6 }).unwrap();
        assert_eq!(app.store.selected(), None);
    }

    #[test]
    fn test_left_right_toggle_branch() {
        let mut app = app();
        app.handle(Action::Click { row: BODY_TOP + 1 }).unwrap();
        assert_eq!(app.store.selected(), Some("2"));
        app.handle(Action::Left).unwrap();
        assert_eq!(app.store.rows().len(), 3);
        app.handle(Action::Left).unwrap();
        assert_eq!(app.store.rows().len(), 3);
        app.handle(Action::Right).unwrap();
        assert_eq!(app.store.rows().len(), 5);
    }

    #[test]
    fn test_new_node_under_selection() {
        let mut app = app();
        app.handle(Action::Click { row: BODY_TOP + 1 }).unwrap();
        app.handle(Action::NewNode).unwrap();
        assert_eq!(app.mode, Mode::Rename);
        assert_eq!(app.store.selected(), Some("new-1"));

        let parent = model::find(app.store.data(), "2").unwrap();
        assert_eq!(parent.children.last().unwrap().id, "new-1");
    }

    #[test]
    fn test_toggle_mode_and_theme() {
        let mut app = app();
        app.handle(Action::ToggleMode).unwrap();
        assert_eq!(app.store.config().mode, RenderMode::Virtual);
        assert_eq!(app.store.rows().len(), 3);
        app.handle(Action::CycleTheme).unwrap();
        assert_eq!(app.theme, Theme::Neon);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert_eq!(app.handle(Action::Quit).unwrap(), Flow::Quit);
    }
}
