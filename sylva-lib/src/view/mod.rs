//! Flattening and windowing.
//!
//! A tree is turned into the ordered list of rows a user would see given the
//! current expansion, and the row list is cut down to the slice that
//! intersects the viewport. Scrolling only ever re-runs the second step.

mod flatten;
mod window;

pub use flatten::{Row, flatten};
pub use window::{Window, WindowConfig, window_rows};
