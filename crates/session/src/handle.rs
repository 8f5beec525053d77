//! Async driver pairing a [`SearchSession`] with a [`SearchBackend`].

use tokio::sync::Mutex;

use paylens_core::{DisplayRecord, RawSearchForm, ValidationErrors};
use paylens_remote::{fetch_records, SearchBackend};

use crate::session::{Phase, Resolution, SearchFailure, SearchSession, SubmitOutcome};

/// What a single [`SessionHandle::submit`] call ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Validation failed; no request was sent.
    Rejected(ValidationErrors),
    /// The search succeeded; rows are filtered and display-ready.
    Completed(Vec<DisplayRecord>),
    /// The search failed; the session is `Failed`.
    Failed(SearchFailure),
    /// A newer submit started before this one resolved; its result was dropped.
    Superseded,
}

/// Shared handle running searches through one session.
///
/// The session lock is never held across the backend call, so a second
/// `submit` can start while the first is in flight. The session's sequence
/// numbers make the later submit win.
pub struct SessionHandle<B> {
    session: Mutex<SearchSession>,
    backend: B,
}

impl<B: SearchBackend> SessionHandle<B> {
    pub fn new(backend: B) -> Self {
        SessionHandle {
            session: Mutex::new(SearchSession::new()),
            backend,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn submit(&self, raw: &RawSearchForm) -> SearchOutcome {
        let outcome = self.session.lock().await.submit(raw);
        let ticket = match outcome {
            SubmitOutcome::Rejected(errors) => return SearchOutcome::Rejected(errors),
            SubmitOutcome::Dispatch(ticket) => ticket,
        };

        let result = fetch_records(&self.backend, &ticket.payload).await;

        let mut session = self.session.lock().await;
        match session.resolve(ticket.seq, result) {
            Resolution::Ready { .. } => SearchOutcome::Completed(session.display_rows()),
            Resolution::Failed(failure) => SearchOutcome::Failed(failure),
            Resolution::Stale => SearchOutcome::Superseded,
        }
    }

    pub async fn phase(&self) -> Phase {
        self.session.lock().await.phase()
    }

    pub async fn display_rows(&self) -> Vec<DisplayRecord> {
        self.session.lock().await.display_rows()
    }

    pub async fn failure(&self) -> Option<SearchFailure> {
        self.session.lock().await.failure().cloned()
    }

    /// Read the session under its lock.
    pub async fn inspect<R>(&self, f: impl FnOnce(&SearchSession) -> R) -> R {
        f(&*self.session.lock().await)
    }
}
