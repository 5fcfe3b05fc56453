//! Sylva tree engine
//!
//! State and virtualization engine for a filterable, editable tree widget with
//! tri-state checkboxes. Rendering is left to the embedder; this crate turns a
//! tree plus user commands into the rows that need to be drawn.

pub mod check;
pub mod config;
pub mod error;
pub mod expansion;
pub mod filter;
pub mod model;
pub mod store;
pub mod view;

pub use check::CheckState;
pub use config::{RenderMode, TreeConfig};
pub use error::TreeError;
pub use expansion::ExpansionState;
pub use filter::MatchMode;
pub use model::TreeNode;
pub use store::{Command, TreeEvent, TreeStore};
pub use view::{Row, Window, WindowConfig};
