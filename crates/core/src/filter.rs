//! Client-side status filter over search results.
//!
//! The remote store is not trusted to have applied the status constraint
//! (it may ignore it or compare with different casing), so the same predicate
//! is applied again here. The filter is order-preserving and idempotent.

use crate::criteria::{PaymentStatus, ALL_STATUSES};
use crate::record::PaymentRecord;

/// Keep records whose status matches `selected`, ignoring case.
///
/// `None`, the empty string and `All` select everything and return the input
/// unchanged.
pub fn filter(records: Vec<PaymentRecord>, selected: Option<&str>) -> Vec<PaymentRecord> {
    match selected {
        None => records,
        Some(s) if s.is_empty() || s.eq_ignore_ascii_case(ALL_STATUSES) => records,
        Some(s) => records
            .into_iter()
            .filter(|r| r.status.eq_ignore_ascii_case(s))
            .collect(),
    }
}

/// [`filter`] with an already-validated status.
pub fn filter_by_status(
    records: Vec<PaymentRecord>,
    status: Option<PaymentStatus>,
) -> Vec<PaymentRecord> {
    filter(records, status.map(PaymentStatus::as_str))
}
