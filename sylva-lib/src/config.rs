//! Tree view configuration

use serde::{Deserialize, Serialize};

use crate::filter::MatchMode;
use crate::view::WindowConfig;

/// Which rendering strategy the view uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Materialize every visible row. All branches start expanded.
    #[default]
    Full,
    /// Materialize only the rows around the viewport. All branches start
    /// collapsed.
    Virtual,
}

/// Configuration for a tree view.
///
/// # Example
///
/// ```
/// use sylva_lib::config::{RenderMode, TreeConfig};
///
/// let config = TreeConfig::default()
///     .with_mode(RenderMode::Virtual)
///     .with_row_height(1)
///     .with_overscan(2, 4);
/// assert_eq!(config.window().overscan_after, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Fixed height of one row, in host units.
    ///
    /// Default: 26
    pub row_height: u32,

    /// Rows materialized above the viewport.
    ///
    /// Default: 5
    pub overscan_before: usize,

    /// Rows materialized below the viewport.
    ///
    /// Default: 15
    pub overscan_after: usize,

    /// Viewport height assumed before the host has measured it.
    ///
    /// Default: 500
    pub default_viewport_height: u32,

    /// Label matching used by search.
    pub match_mode: MatchMode,

    /// Rendering strategy.
    pub mode: RenderMode,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            row_height: 26,
            overscan_before: 5,
            overscan_after: 15,
            default_viewport_height: 500,
            match_mode: MatchMode::Substring,
            mode: RenderMode::Full,
        }
    }
}

impl TreeConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row height. Zero is bumped to one.
    pub fn with_row_height(mut self, height: u32) -> Self {
        self.row_height = height.max(1);
        self
    }

    /// Sets the overscan on both sides of the viewport.
    pub fn with_overscan(mut self, before: usize, after: usize) -> Self {
        self.overscan_before = before;
        self.overscan_after = after;
        self
    }

    /// Sets the fallback viewport height.
    pub fn with_default_viewport_height(mut self, height: u32) -> Self {
        self.default_viewport_height = height;
        self
    }

    /// Sets the match mode.
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Sets the rendering strategy.
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Windowing parameters derived from this config.
    pub fn window(&self) -> WindowConfig {
        WindowConfig {
            row_height: self.row_height.max(1),
            overscan_before: self.overscan_before,
            overscan_after: self.overscan_after,
            default_viewport_height: self.default_viewport_height,
            virtualized: self.mode == RenderMode::Virtual,
        }
    }
}
