//! Keyword alert dispatcher.
//!
//! # Invariants
//! - Keywords match as exact, case-sensitive substrings.
//! - One notification per matching alert, in registry order; duplicate alerts
//!   notify independently.
//! - Registry and sink failures are logged and swallowed.

use crate::alert::sink::NotificationSink;
use crate::model::alert::{KeywordAlert, Notification};
use crate::repo::alert_repo::KeywordRegistry;
use log::{debug, warn};
use regex::RegexSet;
use std::sync::Arc;
use uuid::Uuid;

/// Diagnostics for one dispatch call. Callers must not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub dispatch_id: Uuid,
    pub matched: usize,
    pub delivered: usize,
    pub failed: usize,
}

impl DispatchSummary {
    fn empty(dispatch_id: Uuid) -> Self {
        Self {
            dispatch_id,
            matched: 0,
            delivered: 0,
            failed: 0,
        }
    }
}

/// Matches text against the registry and notifies owners.
pub struct AlertDispatcher<K: KeywordRegistry> {
    registry: K,
    sink: Arc<dyn NotificationSink>,
}

impl<K: KeywordRegistry> AlertDispatcher<K> {
    pub fn new(registry: K, sink: Arc<dyn NotificationSink>) -> Self {
        Self { registry, sink }
    }

    /// Notifies every alert owner other than `author` whose keyword occurs in
    /// `text`.
    pub fn dispatch(&self, text: &str, author: &str) -> DispatchSummary {
        let dispatch_id = Uuid::new_v4();
        let alerts = match self.registry.all_alerts() {
            Ok(alerts) => alerts,
            Err(err) => {
                warn!(
                    "event=alert_dispatch module=alert status=error dispatch_id={dispatch_id} error_code=registry_unavailable error={err}"
                );
                return DispatchSummary::empty(dispatch_id);
            }
        };

        let matches = matching_alerts(&alerts, text, author);
        let mut summary = DispatchSummary {
            matched: matches.len(),
            ..DispatchSummary::empty(dispatch_id)
        };

        for alert in matches {
            let notification = Notification {
                owner: alert.owner.clone(),
                keyword: alert.keyword.clone(),
                dispatch_id,
            };
            match self.sink.deliver(&notification) {
                Ok(()) => summary.delivered += 1,
                Err(err) => {
                    summary.failed += 1;
                    warn!(
                        "event=alert_deliver module=alert status=error dispatch_id={dispatch_id} alert_id={} error={err}",
                        alert.id
                    );
                }
            }
        }

        debug!(
            "event=alert_dispatch module=alert status=ok dispatch_id={dispatch_id} alerts={} matched={} delivered={} failed={}",
            alerts.len(),
            summary.matched,
            summary.delivered,
            summary.failed
        );
        summary
    }
}

/// Selects alerts whose owner is not `author` and whose keyword occurs in
/// `text`, preserving input order.
pub fn matching_alerts<'a>(
    alerts: &'a [KeywordAlert],
    text: &str,
    author: &str,
) -> Vec<&'a KeywordAlert> {
    let candidates = alerts
        .iter()
        .filter(|alert| alert.owner != author)
        .collect::<Vec<_>>();
    if candidates.is_empty() {
        return Vec::new();
    }

    match RegexSet::new(candidates.iter().map(|alert| regex::escape(&alert.keyword))) {
        Ok(set) => {
            let hits = set.matches(text);
            candidates
                .into_iter()
                .enumerate()
                .filter(|(index, _)| hits.matched(*index))
                .map(|(_, alert)| alert)
                .collect()
        }
        Err(err) => {
            // Only reachable when the compiled set exceeds the size limit.
            debug!("event=alert_match module=alert status=fallback error={err}");
            candidates
                .into_iter()
                .filter(|alert| text.contains(alert.keyword.as_str()))
                .collect()
        }
    }
}
