//! Plain data types shared across the workspace.

mod blob;

pub use blob::*;
