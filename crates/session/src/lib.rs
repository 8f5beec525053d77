//! paylens-session: lifecycle of a payment search.
//!
//! [`SearchSession`] is the pure state machine; [`SessionHandle`] drives it
//! against a [`paylens_remote::SearchBackend`].

mod handle;
mod session;

pub use handle::{SearchOutcome, SessionHandle};
pub use session::{Phase, Resolution, SearchFailure, SearchSession, SearchTicket, SubmitOutcome};
