//! One update run: load → prompt → research → validate → reconcile → persist.

use scotus_ai::{ResearchClient, ResearchError, SYSTEM_PROMPT, build_user_prompt, strip_code_fences};
use scotus_core::{Reconciliation, ValidationError, parse_dataset, reconcile};
use scotus_store::{JsonStore, StoreError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to render prompt: {0}")]
    Prompt(serde_json::Error),
    #[error("research request failed: {0}")]
    Research(#[from] ResearchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// What a completed run did.
#[derive(Debug)]
pub struct UpdateReport {
    pub reconciliation: Reconciliation,
    /// False only for dry runs.
    pub written: bool,
}

/// Execute one update run against `store`.
///
/// The store is written at most once, and only after the response has been
/// validated and reconciled. Any error leaves the stored file untouched.
pub async fn run_update<C>(
    store: &JsonStore,
    client: &C,
    today: &str,
    dry_run: bool,
) -> Result<UpdateReport, UpdateError>
where
    C: ResearchClient + ?Sized,
{
    let current = store.load()?;
    let user_prompt = build_user_prompt(&current, today).map_err(UpdateError::Prompt)?;

    let raw = client.research(SYSTEM_PROMPT, &user_prompt).await?;
    let candidate = parse_dataset(strip_code_fences(&raw))?;
    info!(cases = candidate.cases.len(), "research response validated");

    let reconciliation = reconcile(current, candidate, today);
    if dry_run {
        info!(path = %store.path().display(), "dry run, dataset not written");
    } else {
        store.save(&reconciliation.dataset)?;
    }

    Ok(UpdateReport {
        reconciliation,
        written: !dry_run,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use scotus_core::{CaseChange, Outcome, ShapeError, Status};
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use super::*;

    const TODAY: &str = "2026-10-15";

    /// Returns a canned response and remembers the prompt it was given.
    struct CannedClient {
        response: Result<String, u16>,
        seen_prompt: Mutex<Option<String>>,
    }

    impl CannedClient {
        fn ok(response: impl Into<String>) -> Self {
            Self {
                response: Ok(response.into()),
                seen_prompt: Mutex::new(None),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                response: Err(status),
                seen_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ResearchClient for CannedClient {
        async fn research(&self, _system: &str, user: &str) -> Result<String, ResearchError> {
            *self.seen_prompt.lock().unwrap() = Some(user.to_string());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(ResearchError::Server {
                    status: *status,
                    body: "overloaded".into(),
                }),
            }
        }
    }

    fn case(id: u64, name: &str, status: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "docket": format!("25-{id}"),
            "status": status,
            "statusDetail": "Argued November 5, 2025",
            "category": "Executive Authority",
            "urgency": "high",
            "question": "Does IEEPA authorize the tariffs?",
            "background": "Emergency tariffs challenged by importers.",
            "firstOrder": "Tariff collection.",
            "secondOrder": "Limits on emergency powers.",
            "sources": ["Oral argument transcript"]
        })
    }

    fn document(last_updated: &str, cases: Vec<Value>) -> Value {
        json!({ "lastUpdated": last_updated, "term": "OCT 2025", "cases": cases })
    }

    fn write_store(doc: &Value) -> (TempDir, JsonStore, String) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cases.json");
        let text = format!("{}\n", serde_json::to_string_pretty(doc).unwrap());
        fs::write(&path, &text).unwrap();
        (tmp, JsonStore::new(path), text)
    }

    fn stored(store: &JsonStore) -> String {
        fs::read_to_string(store.path()).unwrap()
    }

    #[tokio::test]
    async fn status_change_writes_candidate() {
        let (_tmp, store, _) = write_store(&document(
            "2026-10-01",
            vec![case(1, "Learning Resources v. Trump", "Argued")],
        ));
        let candidate = document(TODAY, vec![case(1, "Learning Resources v. Trump", "Decided")]);
        let client = CannedClient::ok(candidate.to_string());

        let report = run_update(&store, &client, TODAY, false).await.unwrap();

        assert!(report.written);
        assert_eq!(report.reconciliation.outcome, Outcome::Changed);
        assert_eq!(
            report.reconciliation.changes,
            vec![CaseChange::StatusChange {
                id: 1,
                name: "Learning Resources v. Trump".into(),
                from: Status::Argued,
                to: Status::Decided,
            }]
        );
        let written: Value = serde_json::from_str(&stored(&store)).unwrap();
        assert_eq!(written, candidate);
    }

    #[tokio::test]
    async fn new_case_is_reported() {
        let (_tmp, store, _) =
            write_store(&document("2026-10-01", vec![case(1, "A", "Argued")]));
        let candidate = document(
            TODAY,
            vec![case(1, "A", "Argued"), case(42, "Trump v. Orr", "Pending")],
        );
        let client = CannedClient::ok(candidate.to_string());

        let report = run_update(&store, &client, TODAY, false).await.unwrap();
        assert_eq!(
            report.reconciliation.changes,
            vec![CaseChange::New {
                id: 42,
                name: "Trump v. Orr".into()
            }]
        );
    }

    #[tokio::test]
    async fn fenced_response_is_accepted() {
        let (_tmp, store, _) =
            write_store(&document("2026-10-01", vec![case(1, "A", "Argued")]));
        let candidate = document(TODAY, vec![case(1, "A", "Decided")]);
        let fenced = format!(
            "```json\n{}\n```",
            serde_json::to_string_pretty(&candidate).unwrap()
        );
        let client = CannedClient::ok(fenced);

        let report = run_update(&store, &client, TODAY, false).await.unwrap();
        assert_eq!(report.reconciliation.outcome, Outcome::Changed);
        let written: Value = serde_json::from_str(&stored(&store)).unwrap();
        assert_eq!(written, candidate);
    }

    #[tokio::test]
    async fn unchanged_content_only_refreshes_timestamp() {
        let old = document("2026-10-01", vec![case(1, "A", "Argued")]);
        let (_tmp, store, _) = write_store(&old);
        let echoed = document("2026-10-14", vec![case(1, "A", "Argued")]);
        let client = CannedClient::ok(echoed.to_string());

        let report = run_update(&store, &client, TODAY, false).await.unwrap();
        assert_eq!(report.reconciliation.outcome, Outcome::Unchanged);
        assert!(report.reconciliation.changes.is_empty());

        let written: Value = serde_json::from_str(&stored(&store)).unwrap();
        assert_eq!(written, document(TODAY, vec![case(1, "A", "Argued")]));
    }

    #[tokio::test]
    async fn invalid_json_leaves_store_untouched() {
        let (_tmp, store, original) =
            write_store(&document("2026-10-01", vec![case(1, "A", "Argued")]));
        let client = CannedClient::ok("I could not find any updates.");

        let err = run_update(&store, &client, TODAY, false).await.unwrap_err();
        assert!(matches!(
            err,
            UpdateError::Validation(ValidationError::Parse { .. })
        ));
        assert_eq!(stored(&store), original);
    }

    #[tokio::test]
    async fn missing_field_leaves_store_untouched() {
        let (_tmp, store, original) =
            write_store(&document("2026-10-01", vec![case(1, "A", "Argued")]));
        let mut broken = case(1, "A", "Decided");
        broken.as_object_mut().unwrap().remove("firstOrder");
        let client = CannedClient::ok(document(TODAY, vec![broken]).to_string());

        let err = run_update(&store, &client, TODAY, false).await.unwrap_err();
        match err {
            UpdateError::Validation(ValidationError::Shape(ShapeError::MissingFields {
                name,
                fields,
            })) => {
                assert_eq!(name, "A");
                assert_eq!(fields, vec!["firstOrder"]);
            }
            other => panic!("expected missing fields, got {other:?}"),
        }
        assert_eq!(stored(&store), original);
    }

    #[tokio::test]
    async fn research_failure_leaves_store_untouched() {
        let (_tmp, store, original) =
            write_store(&document("2026-10-01", vec![case(1, "A", "Argued")]));
        let client = CannedClient::failing(529);

        let err = run_update(&store, &client, TODAY, false).await.unwrap_err();
        assert!(matches!(
            err,
            UpdateError::Research(ResearchError::Server { status: 529, .. })
        ));
        assert_eq!(stored(&store), original);
    }

    #[tokio::test]
    async fn dry_run_does_not_write() {
        let (_tmp, store, original) =
            write_store(&document("2026-10-01", vec![case(1, "A", "Argued")]));
        let client = CannedClient::ok(document(TODAY, vec![case(1, "A", "Decided")]).to_string());

        let report = run_update(&store, &client, TODAY, true).await.unwrap();
        assert!(!report.written);
        assert_eq!(report.reconciliation.outcome, Outcome::Changed);
        assert_eq!(stored(&store), original);
    }

    #[tokio::test]
    async fn prompt_carries_current_dataset() {
        let (_tmp, store, _) = write_store(&document(
            "2026-10-01",
            vec![case(3, "A", "Argued"), case(7, "B", "Argued"), case(5, "C", "Argued")],
        ));
        let client = CannedClient::ok("not json");

        let _ = run_update(&store, &client, TODAY, false).await;
        let prompt = client.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.starts_with("Today is 2026-10-15."));
        assert!(prompt.contains("unique id (starting from 8)"));
    }

    #[tokio::test]
    async fn missing_store_fails_before_research() {
        let store = JsonStore::new("/nonexistent/cases.json");
        let client = CannedClient::ok("{}");

        let err = run_update(&store, &client, TODAY, false).await.unwrap_err();
        assert!(matches!(err, UpdateError::Store(StoreError::NotFound(_))));
        assert!(client.seen_prompt.lock().unwrap().is_none());
    }
}
