//! Viewport windowing.

use std::ops::Range;

/// Parameters for [`window_rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Fixed row height. Must be non-zero.
    pub row_height: u32,
    /// Rows materialized above the first visible row.
    pub overscan_before: usize,
    /// Exclusive bound past `end_index`. Values below one are treated as one
    /// so the last visible row is always materialized.
    pub overscan_after: usize,
    /// Used when the host has not measured its viewport yet.
    pub default_viewport_height: u32,
    /// When false, every row is materialized.
    pub virtualized: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            row_height: 26,
            overscan_before: 5,
            overscan_after: 15,
            default_viewport_height: 500,
            virtualized: true,
        }
    }
}

/// The slice of rows to materialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// First row intersecting the viewport.
    pub start_index: usize,
    /// `ceil((offset + viewport) / row_height)`, clamped to the last row.
    pub end_index: usize,
    /// Rows to materialize, including overscan (half-open).
    pub range: Range<usize>,
    /// Height of the full list, for sizing the scroll spacer.
    pub total_height: u64,
    /// Row height the window was computed with.
    pub row_height: u32,
}

impl Window {
    /// Whether nothing needs to be materialized.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Number of rows to materialize.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Absolute top offset of a row.
    pub fn offset_of(&self, index: usize) -> u64 {
        index as u64 * self.row_height as u64
    }

    /// Whether `index` falls in the materialized range.
    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }
}

/// Computes which of `len` rows to materialize for a scroll position.
///
/// A `viewport_height` of `None` or zero means the host has not measured yet
/// and falls back to [`WindowConfig::default_viewport_height`].
///
/// ```
/// use sylva_lib::view::{WindowConfig, window_rows};
///
/// let window = window_rows(1000, 2600, Some(500), &WindowConfig::default());
/// assert_eq!(window.start_index, 100);
/// assert_eq!(window.range, 95..135);
/// ```
pub fn window_rows(
    len: usize,
    scroll_offset: u32,
    viewport_height: Option<u32>,
    config: &WindowConfig,
) -> Window {
    let row_height = config.row_height.max(1);
    let total_height = len as u64 * row_height as u64;

    if len == 0 {
        return Window {
            start_index: 0,
            end_index: 0,
            range: 0..0,
            total_height,
            row_height,
        };
    }

    let viewport = match viewport_height {
        Some(h) if h > 0 => h,
        _ => config.default_viewport_height,
    };

    let offset = scroll_offset as u64;
    let rh = row_height as u64;
    let start_index = usize::try_from(offset / rh).unwrap_or(usize::MAX);
    let reach = usize::try_from((offset + viewport as u64).div_ceil(rh)).unwrap_or(usize::MAX);
    let end_index = reach.min(len - 1);

    let range = if config.virtualized {
        let end = end_index.saturating_add(config.overscan_after.max(1)).min(len);
        let begin = start_index.saturating_sub(config.overscan_before).min(end);
        begin..end
    } else {
        0..len
    };

    Window {
        start_index,
        end_index,
        range,
        total_height,
        row_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_row_height_does_not_divide_by_zero() {
        let config = WindowConfig {
            row_height: 0,
            ..Default::default()
        };
        let window = window_rows(10, 5, Some(3), &config);
        assert_eq!(window.row_height, 1);
        assert_eq!(window.start_index, 5);
    }

    #[test]
    fn test_offset_of() {
        let window = window_rows(10, 0, Some(52), &WindowConfig::default());
        assert_eq!(window.offset_of(3), 78);
    }
}
