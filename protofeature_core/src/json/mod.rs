//! A minimal JSON value model with compact and pretty serialization.
//!
//! Objects are backed by a `BTreeMap`, so keys always serialize in sorted order and two
//! serializations of equal values are byte-identical.

mod stringify;
mod types;

pub use stringify::*;
pub use types::{JsonArray, JsonObject, JsonValue};
