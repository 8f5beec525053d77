mod error;
mod fixture;
mod http;
mod traits;

pub use error::{ErrorKind, RemoteError};
pub use fixture::{FixtureBackend, FixtureError};
pub use http::{HttpBackend, HttpConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use traits::{fetch_records, SearchBackend};
