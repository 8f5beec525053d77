//! Overlapping submits through one `SessionHandle`.
//!
//! The backend answers each request after a delay chosen by the status in
//! the payload, so an earlier submit can be made to resolve after a later
//! one.

use std::time::Duration;

use async_trait::async_trait;
use paylens_core::{Field, QueryPayload, RawSearchForm};
use paylens_remote::{RemoteError, SearchBackend};
use paylens_session::{Phase, SearchOutcome, SessionHandle};
use serde_json::json;

struct DelayedBackend;

#[async_trait]
impl SearchBackend for DelayedBackend {
    async fn search(&self, payload: &QueryPayload) -> Result<serde_json::Value, RemoteError> {
        let status = payload.get(Field::Status).unwrap_or("Authorised").to_string();
        let delay = if status == "Authorised" { 150 } else { 0 };
        tokio::time::sleep(Duration::from_millis(delay)).await;

        Ok(json!({
            "paymentRecords": [{
                "paymentId": format!("{}-1", status.to_lowercase()),
                "status": status.to_lowercase(),
                "amount": 1,
                "cardNumber": "4242424242424242",
                "cardExpiry": "12/30",
                "brand": "visa"
            }]
        }))
    }

    fn backend_id(&self) -> &str {
        "delayed"
    }
}

fn status_form(status: &str) -> RawSearchForm {
    RawSearchForm::from_pairs([("status", status)])
}

#[tokio::test]
async fn second_submit_wins_when_it_resolves_first() {
    let handle = SessionHandle::new(DelayedBackend);
    let slow = status_form("Authorised");
    let fast = status_form("Captured");

    let (first, second) = tokio::join!(handle.submit(&slow), async {
        // Let the slow submit take its sequence number first.
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.submit(&fast).await
    });

    assert_eq!(first, SearchOutcome::Superseded);
    let SearchOutcome::Completed(rows) = second else {
        panic!("expected the later submit to complete, got {:?}", second);
    };
    assert_eq!(rows[0].payment_id, "captured-1");

    assert_eq!(handle.phase().await, Phase::Ready);
    let shown = handle.display_rows().await;
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].payment_id, "captured-1");
    assert_eq!(shown[0].status, "Captured");
}

#[tokio::test]
async fn sequential_submits_both_complete() {
    let handle = SessionHandle::new(DelayedBackend);

    assert!(matches!(
        handle.submit(&status_form("Captured")).await,
        SearchOutcome::Completed(_)
    ));
    assert!(matches!(
        handle.submit(&status_form("Voided")).await,
        SearchOutcome::Completed(_)
    ));
    assert_eq!(handle.display_rows().await[0].payment_id, "voided-1");
}
