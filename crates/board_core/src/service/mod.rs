//! Board use-case services.
//!
//! # Responsibility
//! - Enforce authorization and reference integrity above the repositories.
//! - Trigger keyword alerts after successful content mutations.
//! - Keep callers decoupled from storage details.

pub mod comment_service;
pub mod comment_tree;
pub mod post_service;
