//! Caller-facing error taxonomy shared by all services.

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Classification every service error reduces to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Referenced post or comment is missing, or belongs to another post.
    NotFound,
    /// Input is invalid for the target (parent comment, paging).
    BadRequest,
    /// Post password mismatch.
    Forbidden,
    /// Persistence collaborator failed.
    StorageUnavailable,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::Forbidden => "forbidden",
            Self::StorageUnavailable => "storage_unavailable",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
