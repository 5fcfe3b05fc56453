//! Draws the tree view onto the terminal.
//!
//! Layout, top to bottom: title bar, search line, tree body, status line.
//! Only rows the store materializes are considered for drawing, and of those
//! only the ones inside the body are written.

use std::io::{self, Write};

use crossterm::{
    cursor::{self, MoveTo},
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use sylva_lib::{CheckState, RenderMode, Row, TreeStore};

use crate::input::Mode;
use crate::theme::{Palette, parse_hex};

/// Rows above the tree body.
pub const BODY_TOP: u16 = 2;
/// Rows taken by chrome (title, search, status).
pub const CHROME_ROWS: u16 = 3;

/// Height of the tree body for a terminal of `height` rows.
pub fn body_height(height: u16) -> u16 {
    height.saturating_sub(CHROME_ROWS)
}

/// Everything the renderer needs besides the store.
pub struct Frame<'a> {
    pub width: u16,
    pub height: u16,
    pub mode: Mode,
    pub palette: Palette,
    pub theme_name: &'a str,
    pub status: &'a str,
}

/// Draws a full frame and flushes.
pub fn draw(out: &mut impl Write, store: &TreeStore, frame: &Frame) -> io::Result<()> {
    let p = frame.palette;
    queue!(
        out,
        SetBackgroundColor(p.background),
        Clear(ClearType::All),
        cursor::Hide
    )?;

    draw_title(out, store, frame)?;
    draw_search(out, store, frame)?;
    draw_body(out, store, frame)?;
    draw_status(out, store, frame)?;

    if frame.mode == Mode::ConfirmDelete
        && let Some(node) = store.pending_delete()
    {
        draw_confirm(out, &node.label, frame)?;
    }

    queue!(out, ResetColor)?;
    out.flush()
}

// -----------------------------------------------------------------------------
// Sections
// -----------------------------------------------------------------------------

fn draw_title(out: &mut impl Write, store: &TreeStore, frame: &Frame) -> io::Result<()> {
    let p = frame.palette;
    let mode = match store.config().mode {
        RenderMode::Full => "full",
        RenderMode::Virtual => "virtual",
    };
    let check = if store.is_checkable() { "on" } else { "off" };
    let text = format!(
        " sylva  mode:{mode}  checkboxes:{check}  theme:{}",
        frame.theme_name
    );
    queue!(
        out,
        MoveTo(0, 0),
        SetForegroundColor(p.branch),
        SetAttribute(Attribute::Bold),
        Print(fit(&text, frame.width as usize)),
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(p.background)
    )
}

fn draw_search(out: &mut impl Write, store: &TreeStore, frame: &Frame) -> io::Result<()> {
    let p = frame.palette;
    let active = frame.mode == Mode::Search;
    let text = if store.query().is_empty() && !active {
        " / search".to_string()
    } else {
        format!(" / {}{}", store.query(), if active { "_" } else { "" })
    };
    let color = if active { p.text } else { p.muted };
    queue!(
        out,
        MoveTo(0, 1),
        SetForegroundColor(color),
        Print(fit(&text, frame.width as usize))
    )
}

fn draw_body(out: &mut impl Write, store: &TreeStore, frame: &Frame) -> io::Result<()> {
    let p = frame.palette;
    let body = body_height(frame.height) as usize;
    let first = store.scroll_offset() as usize;
    let selected = store.selected_index();

    if store.rows().is_empty() {
        let text = if store.query().trim().is_empty() {
            "  (empty tree)"
        } else {
            "  no matches"
        };
        return queue!(
            out,
            MoveTo(0, BODY_TOP),
            SetForegroundColor(p.muted),
            Print(fit(text, frame.width as usize))
        );
    }

    for (index, row) in store.window_rows() {
        let Some(line) = index.checked_sub(first).filter(|l| *l < body) else {
            continue;
        };
        let y = BODY_TOP + line as u16;
        let is_selected = selected == Some(index);
        let bg = if is_selected { p.selected_bg } else { p.background };

        queue!(out, MoveTo(0, y), SetBackgroundColor(bg))?;
        draw_row(out, store, row, frame)?;
        queue!(out, SetBackgroundColor(p.background))?;
    }
    Ok(())
}

fn draw_row(out: &mut impl Write, store: &TreeStore, row: &Row, frame: &Frame) -> io::Result<()> {
    let p = frame.palette;
    let width = frame.width as usize;

    let mut prefix = " ".repeat(1 + row.level as usize * 2);
    prefix.push_str(match (row.has_children, row.is_open) {
        (true, true) => "▾ ",
        (true, false) => "▸ ",
        (false, _) => "  ",
    });
    if store.is_checkable() {
        prefix.push_str(checkbox(store.check_state(&row.id)));
        prefix.push(' ');
    }
    prefix.push_str(if row.has_children { "■ " } else { "· " });

    let (label, label_color) = match store.editing() {
        Some(edit) if edit.id == row.id => (format!("{}_", edit.value), p.text),
        _ => {
            let color = if row.has_children {
                p.branch
            } else {
                row.color.as_deref().and_then(parse_hex).unwrap_or(p.leaf)
            };
            (row.label.clone(), color)
        }
    };

    let prefix_width = prefix.width().min(width);
    queue!(
        out,
        SetForegroundColor(p.muted),
        Print(fit(&prefix, prefix_width)),
        SetForegroundColor(label_color),
        Print(fit(&label, width - prefix_width))
    )
}

fn draw_status(out: &mut impl Write, store: &TreeStore, frame: &Frame) -> io::Result<()> {
    let p = frame.palette;
    let window = store.window();
    let hint = match frame.mode {
        Mode::Browse => "q quit  / search  r rename  d delete  c checks  v mode  t theme",
        Mode::Search => "type to filter  enter keep  esc clear",
        Mode::Rename => "enter save  esc cancel",
        Mode::ConfirmDelete => "y delete  n keep",
    };
    let text = format!(
        " {} rows  {} drawn  {}  {}",
        store.rows().len(),
        window.len(),
        frame.status,
        hint
    );
    queue!(
        out,
        MoveTo(0, frame.height.saturating_sub(1)),
        SetForegroundColor(p.muted),
        Print(fit(&text, frame.width as usize))
    )
}

fn draw_confirm(out: &mut impl Write, label: &str, frame: &Frame) -> io::Result<()> {
    let p = frame.palette;
    let inner = (frame.width as usize).saturating_sub(8).clamp(10, 60);
    let lines = [
        String::new(),
        format!(" Delete \"{}\"?", truncate(label, inner.saturating_sub(11))),
        " Children are removed too.".to_string(),
        " [y] delete   [n] keep".to_string(),
        String::new(),
    ];
    let x = (frame.width as usize).saturating_sub(inner) / 2;
    let y = (frame.height as usize).saturating_sub(lines.len()) / 2;

    for (i, line) in lines.iter().enumerate() {
        let color = if i == 1 { p.danger } else { p.text };
        queue!(
            out,
            MoveTo(x as u16, (y + i) as u16),
            SetBackgroundColor(p.selected_bg),
            SetForegroundColor(color),
            Print(fit(line, inner))
        )?;
    }
    queue!(out, SetBackgroundColor(p.background))
}

fn checkbox(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
    }
}

// -----------------------------------------------------------------------------
// Text
// -----------------------------------------------------------------------------

/// Cuts `text` to `max_width` columns, ending with `…` when shortened.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > target {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

/// Truncates, then pads with spaces to exactly `width` columns.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let used = out.width();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 6), "hello…");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is two columns
        assert_eq!(truncate("日本語", 4), "日…");
    }

    #[test]
    fn test_fit_pads() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4).width(), 4);
    }

    #[test]
    fn test_body_height() {
        assert_eq!(body_height(24), 21);
        assert_eq!(body_height(2), 0);
    }
}
