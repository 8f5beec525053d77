//! Fixture search backend: answers every search with a canned document.
//!
//! The canned response ignores the query payload, the way a store without
//! server-side filtering would. Used by tests and by `paylens search
//! --fixture`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use paylens_core::{PaymentRecord, QueryPayload};

use crate::error::RemoteError;
use crate::traits::SearchBackend;

/// Errors loading a fixture file.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("could not read fixture '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("fixture '{}' is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Backend with a fixed outcome.
///
/// Every payload it receives is recorded, so tests can assert whether (and
/// with what) a request was made.
pub struct FixtureBackend {
    outcome: Result<serde_json::Value, RemoteError>,
    requests: Mutex<Vec<QueryPayload>>,
}

impl FixtureBackend {
    /// Answer every search with `body`.
    pub fn with_response(body: serde_json::Value) -> Self {
        FixtureBackend {
            outcome: Ok(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every search with a well-formed response holding `records`.
    pub fn with_records(records: &[PaymentRecord]) -> Self {
        Self::with_response(serde_json::json!({ "paymentRecords": records }))
    }

    /// Fail every search with `err`.
    pub fn failing(err: RemoteError) -> Self {
        FixtureBackend {
            outcome: Err(err),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Load the response document from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let body = serde_json::from_str(&content).map_err(|source| FixtureError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_response(body))
    }

    /// Payloads received so far, oldest first.
    pub fn requests(&self) -> Vec<QueryPayload> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl SearchBackend for FixtureBackend {
    async fn search(&self, payload: &QueryPayload) -> Result<serde_json::Value, RemoteError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(payload.clone());
        self.outcome.clone()
    }

    fn backend_id(&self) -> &str {
        "fixture"
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
