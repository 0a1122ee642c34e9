//! Filter language: query parsing and the per-line match predicate.

pub mod query;

pub use query::{matches, Query, MIN_EXCLUDE_CHARS};
