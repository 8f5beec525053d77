//! paylens-core: validation and presentation engine for payment-record search.
//!
//! The pipeline from raw form input to display rows, with no I/O:
//!
//! - [`validate()`] -- raw form to [`SearchCriteria`] or field-tagged errors
//! - [`build()`] -- criteria to the minimal [`QueryPayload`]
//! - [`parse_search_response()`] -- response JSON to [`PaymentRecord`]s
//! - [`filter()`] -- defensive client-side status filter
//! - [`present()`] -- record to display-safe [`DisplayRecord`]
//!
//! The formatting helpers in [`fields`] are public for front ends that need
//! them individually (e.g. masking a single card number).

pub mod criteria;
pub mod fields;
pub mod filter;
pub mod present;
pub mod query;
pub mod record;
pub mod validate;

// ── Convenience re-exports: key types ────────────────────────────────

pub use criteria::{
    DateRange, Field, PaymentStatus, RawSearchForm, SearchCriteria, UnknownStatus,
};
pub use present::DisplayRecord;
pub use query::QueryPayload;
pub use record::{PaymentRecord, ResponseError};
pub use validate::{FieldError, ValidationErrors};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use filter::{filter, filter_by_status};
pub use present::{present, present_all};
pub use query::build;
pub use record::parse_search_response;
pub use validate::validate;
