//! Full-text search helpers.
//!
//! # Responsibility
//! - Turn free-form title filters into safe FTS5 match expressions.
//! - Keep FTS5 syntax knowledge out of repository SQL builders.

pub mod fts;
