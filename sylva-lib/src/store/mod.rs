//! The tree store.
//!
//! [`TreeStore`] is the single owner of the tree, query, expansion, checked
//! set, selection and edit slots. Hosts drive it with [`Command`] values and
//! react to the [`TreeEvent`]s it returns, which keeps every interaction
//! replayable in tests.

mod command;
mod event;
mod state;

pub use command::Command;
pub use event::TreeEvent;
pub use state::{PendingEdit, TreeStore};
