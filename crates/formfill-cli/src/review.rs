//! Post-fill session handling.
//!
//! The fill pass leaves the browser session open for manual review. This
//! module owns the rule that a session, once the page has been reached, is
//! closed on every exit path: after the operator hold, after a hold failure,
//! and after a fill error alike.

use std::io;

use formfill_browser::{fill_form, BrowserSession, FillReport};
use formfill_domain::{FillTable, FormMapping};
use tracing::info;

use crate::error::Result;

/// Fill the form, hold for operator review, and close the session.
///
/// `hold` blocks until the operator is done with the page. Its outcome is
/// reported only after the session has been closed, so a failing hold (a
/// closed stdin, for instance) never leaks the session.
pub async fn fill_and_review<S, F>(
    mut session: S,
    mapping: &FormMapping,
    table: &FillTable,
    hold: F,
) -> Result<FillReport>
where
    S: BrowserSession,
    F: FnOnce() -> io::Result<()>,
{
    match fill_form(&mut session, mapping, table).await {
        Ok(report) => {
            info!(
                filled = report.filled.len(),
                skipped = report.skipped.len(),
                "form fill finished"
            );
            let held = hold();
            session.close().await?;
            held?;
            Ok(report)
        }
        Err(e) => {
            session.close().await.ok();
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use async_trait::async_trait;
    use formfill_browser::{BrowserError, FieldKind};
    use indexmap::IndexMap;
    use std::result::Result as StdResult;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Session that records its lifecycle events and fills every field as a
    /// plain text input.
    struct TrackedSession {
        events: Arc<Mutex<Vec<String>>>,
        fail_navigate: bool,
    }

    impl TrackedSession {
        fn new(events: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                events,
                fail_navigate: false,
            }
        }
    }

    #[async_trait]
    impl BrowserSession for TrackedSession {
        async fn navigate(&mut self, _url: &str) -> StdResult<(), BrowserError> {
            if self.fail_navigate {
                return Err(BrowserError::SessionOpen("connection refused".into()));
            }
            Ok(())
        }

        async fn await_ready(
            &mut self,
            _locator: Option<&str>,
            _timeout: Duration,
        ) -> StdResult<(), BrowserError> {
            Ok(())
        }

        async fn probe_field(
            &mut self,
            _locator: &str,
            _visible: Duration,
            _clickable: Duration,
        ) -> StdResult<FieldKind, BrowserError> {
            Ok(FieldKind::Text)
        }

        async fn clear_and_type(
            &mut self,
            _locator: &str,
            _value: &str,
        ) -> StdResult<(), BrowserError> {
            Ok(())
        }

        async fn set_value_with_event(
            &mut self,
            _locator: &str,
            _value: &str,
        ) -> StdResult<(), BrowserError> {
            Ok(())
        }

        async fn select_by_value(
            &mut self,
            _locator: &str,
            _value: &str,
        ) -> StdResult<bool, BrowserError> {
            Ok(true)
        }

        async fn select_by_visible_text(
            &mut self,
            _locator: &str,
            _text: &str,
        ) -> StdResult<(), BrowserError> {
            Ok(())
        }

        async fn close(self) -> StdResult<(), BrowserError> {
            self.events.lock().unwrap().push("close".to_string());
            Ok(())
        }
    }

    fn mapping_and_table() -> (FormMapping, FillTable) {
        let mut fields = IndexMap::new();
        fields.insert("#name".to_string(), "name".to_string());
        let mapping = FormMapping::new("http://example.test/form", fields);
        let table: FillTable = vec![("#name".to_string(), "Ada".to_string())]
            .into_iter()
            .collect();
        (mapping, table)
    }

    #[tokio::test]
    async fn test_session_closes_after_operator_hold() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let session = TrackedSession::new(events.clone());
        let (mapping, table) = mapping_and_table();

        let hold_events = events.clone();
        let report = fill_and_review(session, &mapping, &table, move || {
            hold_events.lock().unwrap().push("hold".to_string());
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(report.filled, vec!["#name"]);
        // The operator sees the page before the session goes away.
        assert_eq!(*events.lock().unwrap(), vec!["hold", "close"]);
    }

    #[tokio::test]
    async fn test_failed_hold_still_closes_session() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let session = TrackedSession::new(events.clone());
        let (mapping, table) = mapping_and_table();

        let err = fill_and_review(session, &mapping, &table, || {
            Err(io::Error::other("stdin closed"))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(*events.lock().unwrap(), vec!["close"]);
    }

    #[tokio::test]
    async fn test_fill_failure_still_closes_session() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut session = TrackedSession::new(events.clone());
        session.fail_navigate = true;
        let (mapping, table) = mapping_and_table();

        let err = fill_and_review(session, &mapping, &table, || Ok(()))
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Browser(_)));
        assert_eq!(*events.lock().unwrap(), vec!["close"]);
    }
}
