//! Keyword alert fan-out.
//!
//! # Responsibility
//! - Match newly published text against every registered keyword watch.
//! - Hand matching notifications to an injected delivery sink.
//!
//! # Invariants
//! - An author is never notified about their own text.
//! - Dispatch never fails the mutation that triggered it.

pub mod dispatcher;
pub mod sink;
