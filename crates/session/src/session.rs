//! The search lifecycle as an explicit state machine.
//!
//! ```text
//!          submit                 valid              Ok(records)
//! Idle ─────────────▶ Validating ───────▶ Loading ──────────────▶ Ready
//!  ▲                      │                  │
//!  └──────── invalid ─────┘                  └── Err(remote) ───▶ Failed
//! ```
//!
//! `Ready` and `Failed` accept a new submit; there is no terminal state.
//! Transitions are synchronous. The caller performs the remote call between
//! [`SearchSession::submit`] and [`SearchSession::resolve`].
//!
//! ## Ordering
//!
//! Every submit attempt takes the next sequence number, and `resolve` only
//! applies a response carrying the latest one. A slow response to an older
//! submit can therefore never overwrite the result of a newer one, and a
//! submit while `Loading` simply supersedes the request in flight.

use serde::Serialize;
use tracing::{debug, info, warn};

use paylens_core::{
    build, filter_by_status, present_all, validate, DisplayRecord, FieldError, PaymentRecord,
    QueryPayload, RawSearchForm, SearchCriteria, ValidationErrors,
};
use paylens_remote::{ErrorKind, RemoteError};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No search attempted yet, or the last submit failed validation.
    Idle,
    /// A submitted form is being checked. Only observable inside `submit`.
    Validating,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded; `records` holds its filtered result.
    Ready,
    /// The latest request failed; `records` is empty.
    Failed,
}

/// Why the latest search failed. Distinct from an empty `Ready` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&RemoteError> for SearchFailure {
    fn from(err: &RemoteError) -> Self {
        SearchFailure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// A request the caller must send, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub payload: QueryPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was invalid. Nothing must be sent.
    Rejected(ValidationErrors),
    /// The form was valid. Send `ticket.payload`, then call `resolve`.
    Dispatch(SearchTicket),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The response was applied and the session is `Ready`.
    Ready { records: usize },
    /// The failure was applied and the session is `Failed`.
    Failed(SearchFailure),
    /// The response belongs to a superseded submit and was discarded.
    Stale,
}

/// State of one search front end.
#[derive(Debug, Clone)]
pub struct SearchSession {
    phase: Phase,
    criteria: Option<SearchCriteria>,
    records: Vec<PaymentRecord>,
    field_errors: Vec<FieldError>,
    failure: Option<SearchFailure>,
    latest_seq: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        SearchSession {
            phase: Phase::Idle,
            criteria: None,
            records: Vec::new(),
            field_errors: Vec::new(),
            failure: None,
            latest_seq: 0,
        }
    }

    /// Validate `raw` and, if it passes, move to `Loading`.
    ///
    /// Any request still in flight is superseded, whether or not this submit
    /// passes validation. A rejected submit returns to `Idle`: the failure of
    /// an earlier search is cleared, the records of the last successful one
    /// stay.
    pub fn submit(&mut self, raw: &RawSearchForm) -> SubmitOutcome {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.phase = Phase::Validating;

        match validate(raw) {
            Err(errors) => {
                debug!(seq, errors = errors.len(), "search form rejected");
                self.field_errors = errors.errors().to_vec();
                self.failure = None;
                self.phase = Phase::Idle;
                SubmitOutcome::Rejected(errors)
            }
            Ok(criteria) => {
                let payload = build(&criteria);
                debug!(seq, constraints = payload.len(), "search dispatched");
                self.field_errors.clear();
                self.failure = None;
                self.criteria = Some(criteria);
                self.phase = Phase::Loading;
                SubmitOutcome::Dispatch(SearchTicket { seq, payload })
            }
        }
    }

    /// Apply the outcome of the request issued with sequence number `seq`.
    pub fn resolve(
        &mut self,
        seq: u64,
        result: Result<Vec<PaymentRecord>, RemoteError>,
    ) -> Resolution {
        if seq != self.latest_seq || self.phase != Phase::Loading {
            debug!(seq, latest = self.latest_seq, "discarding stale search response");
            return Resolution::Stale;
        }

        match result {
            Ok(records) => {
                let status = self.criteria.as_ref().and_then(SearchCriteria::status);
                let received = records.len();
                self.records = filter_by_status(records, status);
                self.failure = None;
                self.phase = Phase::Ready;
                info!(seq, received, shown = self.records.len(), "search completed");
                Resolution::Ready {
                    records: self.records.len(),
                }
            }
            Err(err) => {
                let failure = SearchFailure::from(&err);
                warn!(seq, kind = %failure.kind, error = %err, "search failed");
                self.records.clear();
                self.failure = Some(failure.clone());
                self.phase = Phase::Failed;
                Resolution::Failed(failure)
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Criteria of the latest submit that passed validation.
    pub fn criteria(&self) -> Option<&SearchCriteria> {
        self.criteria.as_ref()
    }

    /// Filtered records of the latest successful search.
    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn display_rows(&self) -> Vec<DisplayRecord> {
        present_all(&self.records)
    }

    /// Field errors of the latest submit; empty once a submit passes.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn failure(&self) -> Option<&SearchFailure> {
        self.failure.as_ref()
    }

    /// Sequence number of the most recent submit attempt.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use paylens_core::Field;
    use serde_json::json;

    fn form(pairs: &[(&str, &str)]) -> RawSearchForm {
        RawSearchForm::from_pairs(pairs.iter().copied())
    }

    fn record(id: &str, status: &str) -> PaymentRecord {
        PaymentRecord::from_json(&json!({
            "paymentId": id,
            "status": status,
            "amount": 42.1,
            "cardNumber": "1234567812345678",
            "cardExpiry": "03/29",
            "brand": "visa",
            "createdAt": "2024-01-15T08:00:00Z",
        }))
        .unwrap()
    }

    fn dispatch(session: &mut SearchSession, pairs: &[(&str, &str)]) -> SearchTicket {
        match session.submit(&form(pairs)) {
            SubmitOutcome::Dispatch(ticket) => ticket,
            SubmitOutcome::Rejected(errors) => panic!("unexpected rejection: {}", errors),
        }
    }

    fn transport_error() -> RemoteError {
        RemoteError::Transport {
            endpoint: "http://store".to_string(),
            message: "connection refused".to_string(),
        }
    }

    #[test]
    fn starts_idle_and_empty() {
        let session = SearchSession::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.is_loading());
        assert!(session.records().is_empty());
        assert!(session.failure().is_none());
        assert!(session.criteria().is_none());
    }

    #[test]
    fn captured_scenario_shows_only_captured_row_masked() {
        let mut session = SearchSession::new();
        let ticket = dispatch(
            &mut session,
            &[
                ("paymentId", ""),
                ("startDate", "2024-01-01"),
                ("endDate", "2024-01-31"),
                ("status", "Captured"),
            ],
        );
        assert!(session.is_loading());
        assert_eq!(
            ticket.payload.to_json(),
            json!({"startDate": "2024-01-01", "endDate": "2024-01-31", "status": "Captured"})
        );

        let resolution = session.resolve(
            ticket.seq,
            Ok(vec![record("auth-1", "authorised"), record("cap-1", "captured")]),
        );
        assert_eq!(resolution, Resolution::Ready { records: 1 });
        assert_eq!(session.phase(), Phase::Ready);

        let rows = session.display_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].payment_id, "cap-1");
        assert_eq!(rows[0].status, "Captured");
        assert_eq!(rows[0].card_number, "1234 **** **** 5678");
        assert_eq!(rows[0].amount, "42.10");
        assert_eq!(rows[0].voided_at, "-");
    }

    #[test]
    fn half_date_range_is_rejected_without_request() {
        let mut session = SearchSession::new();
        let outcome = session.submit(&form(&[("startDate", "2024-02-10"), ("endDate", "")]));

        let SubmitOutcome::Rejected(errors) = outcome else {
            panic!("expected rejection");
        };
        assert!(errors.has_field(Field::StartDate));
        assert!(errors.has_field(Field::EndDate));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.field_errors().len(), 2);
    }

    #[test]
    fn transport_failure_empties_records() {
        let mut session = SearchSession::new();
        let first = dispatch(&mut session, &[]);
        session.resolve(first.seq, Ok(vec![record("a", "voided")]));
        assert_eq!(session.records().len(), 1);

        let second = dispatch(&mut session, &[]);
        let resolution = session.resolve(second.seq, Err(transport_error()));

        assert!(matches!(
            resolution,
            Resolution::Failed(SearchFailure {
                kind: ErrorKind::Transport,
                ..
            })
        ));
        assert_eq!(session.phase(), Phase::Failed);
        assert!(session.records().is_empty());
        assert_eq!(session.failure().unwrap().kind, ErrorKind::Transport);
    }

    #[test]
    fn malformed_response_has_its_own_kind() {
        let mut session = SearchSession::new();
        let ticket = dispatch(&mut session, &[]);
        session.resolve(
            ticket.seq,
            Err(RemoteError::MalformedResponse("missing field".to_string())),
        );
        assert_eq!(
            session.failure().unwrap().kind,
            ErrorKind::MalformedResponse
        );
    }

    #[test]
    fn empty_result_is_ready_not_failed() {
        let mut session = SearchSession::new();
        let ticket = dispatch(&mut session, &[]);
        assert_eq!(
            session.resolve(ticket.seq, Ok(vec![])),
            Resolution::Ready { records: 0 }
        );
        assert_eq!(session.phase(), Phase::Ready);
        assert!(session.failure().is_none());
    }

    #[test]
    fn later_submit_wins_over_earlier_response() {
        let mut session = SearchSession::new();
        let first = dispatch(&mut session, &[("status", "Authorised")]);
        let second = dispatch(&mut session, &[("status", "Captured")]);

        let applied = session.resolve(second.seq, Ok(vec![record("new", "captured")]));
        assert_eq!(applied, Resolution::Ready { records: 1 });

        let late = session.resolve(first.seq, Ok(vec![record("old", "authorised")]));
        assert_eq!(late, Resolution::Stale);
        assert_eq!(session.records()[0].payment_id, "new");
    }

    #[test]
    fn stale_failure_does_not_clobber_ready() {
        let mut session = SearchSession::new();
        let first = dispatch(&mut session, &[]);
        let second = dispatch(&mut session, &[]);
        session.resolve(second.seq, Ok(vec![record("a", "captured")]));

        assert_eq!(
            session.resolve(first.seq, Err(transport_error())),
            Resolution::Stale
        );
        assert_eq!(session.phase(), Phase::Ready);
        assert!(session.failure().is_none());
    }

    #[test]
    fn invalid_submit_supersedes_request_in_flight() {
        let mut session = SearchSession::new();
        let ticket = dispatch(&mut session, &[]);
        session.submit(&form(&[("paymentId", "nope")]));

        assert_eq!(
            session.resolve(ticket.seq, Ok(vec![record("a", "captured")])),
            Resolution::Stale
        );
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn duplicate_resolve_is_ignored() {
        let mut session = SearchSession::new();
        let ticket = dispatch(&mut session, &[]);
        session.resolve(ticket.seq, Ok(vec![record("a", "captured")]));
        assert_eq!(
            session.resolve(ticket.seq, Ok(vec![])),
            Resolution::Stale
        );
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn session_is_reusable_after_failure() {
        let mut session = SearchSession::new();
        let first = dispatch(&mut session, &[]);
        session.resolve(first.seq, Err(transport_error()));

        let retry = dispatch(&mut session, &[]);
        assert!(session.failure().is_none());
        assert!(session.is_loading());
        session.resolve(retry.seq, Ok(vec![record("a", "refunded")]));
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[test]
    fn rejected_submit_after_failure_clears_the_failure() {
        let mut session = SearchSession::new();
        let ticket = dispatch(&mut session, &[]);
        session.resolve(
            ticket.seq,
            Err(RemoteError::MalformedResponse("x".to_string())),
        );
        assert_eq!(session.phase(), Phase::Failed);

        let outcome = session.submit(&form(&[("status", "bogus")]));
        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.failure().is_none());
        assert!(session.records().is_empty());
        assert!(!session.field_errors().is_empty());
    }

    #[test]
    fn rejected_submit_keeps_last_results() {
        let mut session = SearchSession::new();
        let ticket = dispatch(&mut session, &[]);
        session.resolve(ticket.seq, Ok(vec![record("a", "captured")]));

        session.submit(&form(&[("startDate", "2024-02-10"), ("endDate", "")]));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.records().len(), 1);
        assert!(session.failure().is_none());
    }

    #[test]
    fn valid_submit_clears_previous_field_errors() {
        let mut session = SearchSession::new();
        session.submit(&form(&[("status", "bogus")]));
        assert_eq!(session.field_errors().len(), 1);

        dispatch(&mut session, &[("status", "voided")]);
        assert!(session.field_errors().is_empty());
    }

    #[test]
    fn new_search_replaces_records() {
        let mut session = SearchSession::new();
        let first = dispatch(&mut session, &[]);
        session.resolve(first.seq, Ok(vec![record("a", "captured"), record("b", "voided")]));
        let second = dispatch(&mut session, &[]);
        session.resolve(second.seq, Ok(vec![record("c", "refunded")]));

        let ids: Vec<&str> = session
            .records()
            .iter()
            .map(|r| r.payment_id.as_str())
            .collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn sequence_numbers_increase_per_attempt() {
        let mut session = SearchSession::new();
        let a = dispatch(&mut session, &[]);
        session.submit(&form(&[("status", "bogus")]));
        let b = dispatch(&mut session, &[]);
        assert_eq!(a.seq, 1);
        assert_eq!(b.seq, 3);
        assert_eq!(session.latest_seq(), 3);
    }
}
