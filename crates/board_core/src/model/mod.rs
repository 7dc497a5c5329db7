//! Domain model for posts, comments and keyword alerts.
//!
//! # Responsibility
//! - Define the records the services validate and the repositories persist.
//! - Keep presentation-facing shapes (`NestedComment`) next to their sources.
//!
//! # Invariants
//! - Posts are hard-deleted; comments are only ever soft-deleted.
//! - Post credentials are held as digests, never as plaintext.

pub mod alert;
pub mod comment;
pub mod credential;
pub mod post;
