//! Error types

mod tree;

pub use tree::*;
