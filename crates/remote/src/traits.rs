use async_trait::async_trait;

use paylens_core::{parse_search_response, PaymentRecord, QueryPayload};

use crate::error::RemoteError;

/// The remote search boundary.
///
/// A `SearchBackend` takes a minimal query payload and returns the raw
/// response document. It knows nothing about validation, filtering or
/// display; the session layer drives it.
///
/// ## Failure semantics
///
/// A non-success status or any transport problem must come back as an
/// `Err`, never as an empty record list. "Zero matches" and "the search
/// failed" are different conditions for the operator.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` so a backend can be shared
/// by a session handle across async task boundaries.
#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    /// Run one search. Returns the response body as JSON.
    async fn search(&self, payload: &QueryPayload) -> Result<serde_json::Value, RemoteError>;

    /// Short identifier used in logs (e.g. `"http"`, `"fixture"`).
    fn backend_id(&self) -> &str;
}

#[async_trait]
impl<B: SearchBackend + ?Sized> SearchBackend for Box<B> {
    async fn search(&self, payload: &QueryPayload) -> Result<serde_json::Value, RemoteError> {
        (**self).search(payload).await
    }

    fn backend_id(&self) -> &str {
        (**self).backend_id()
    }
}

/// Run a search and check the response shape.
///
/// Shape problems surface as [`RemoteError::MalformedResponse`].
pub async fn fetch_records<B: SearchBackend + ?Sized>(
    backend: &B,
    payload: &QueryPayload,
) -> Result<Vec<PaymentRecord>, RemoteError> {
    let body = backend.search(payload).await?;
    Ok(parse_search_response(&body)?)
}
