//! Keyword alert and notification records.

use serde::Serialize;
use uuid::Uuid;

/// Storage identity of a keyword alert.
pub type AlertId = i64;

/// One registered watch. `keyword` is matched as a case-sensitive substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordAlert {
    pub id: AlertId,
    pub owner: String,
    pub keyword: String,
}

/// Ephemeral message addressed to an alert owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub owner: String,
    pub keyword: String,
    /// Shared by every notification produced by one dispatch.
    pub dispatch_id: Uuid,
}
