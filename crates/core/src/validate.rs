//! Field-level and cross-field validation of the raw search form.
//!
//! Validation never short-circuits: every rule runs and every violation is
//! collected, in field order (`paymentId`, `startDate`, `endDate`, `status`).

use std::fmt;

use serde::Serialize;

use crate::criteria::{
    DateRange, Field, PaymentStatus, RawSearchForm, SearchCriteria, ALL_STATUSES,
};
use crate::fields::{is_blank, is_uuid, parse_iso_date, PAYMENT_ID_MAX_LEN};

pub const PAYMENT_ID_TOO_LONG: &str = "paymentId must be at most 36 characters";
pub const PAYMENT_ID_NOT_UUID: &str = "paymentId must be a UUID when provided";
pub const DATE_PAIR_INVALID: &str =
    "startDate and endDate must both be empty or both be dates in YYYY-MM-DD format";
pub const STATUS_UNKNOWN: &str = "status must be one of Authorised, Captured, Voided, Refunded";

/// A validation failure attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors produced by one validation run. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }

    /// Messages attached to `field`, in the order they were raised.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "invalid search: {}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a raw form into [`SearchCriteria`].
pub fn validate(raw: &RawSearchForm) -> Result<SearchCriteria, ValidationErrors> {
    let mut errors = Vec::new();

    let payment_id = check_payment_id(&raw.payment_id, &mut errors);
    let date_range = check_date_pair(&raw.start_date, &raw.end_date, &mut errors);
    let status = check_status(&raw.status, &mut errors);

    if errors.is_empty() {
        Ok(SearchCriteria::new(payment_id, date_range, status))
    } else {
        Err(ValidationErrors(errors))
    }
}

fn check_payment_id(value: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let before = errors.len();
    if value.chars().count() > PAYMENT_ID_MAX_LEN {
        errors.push(FieldError::new(Field::PaymentId, PAYMENT_ID_TOO_LONG));
    }
    if !is_uuid(value) {
        errors.push(FieldError::new(Field::PaymentId, PAYMENT_ID_NOT_UUID));
    }
    (errors.len() == before).then(|| value.to_string())
}

/// Both dates absent, or both present and real calendar dates. Anything else
/// flags both fields with the same message.
fn check_date_pair(start: &str, end: &str, errors: &mut Vec<FieldError>) -> Option<DateRange> {
    if is_blank(start) && is_blank(end) {
        return None;
    }
    match (parse_iso_date(start), parse_iso_date(end)) {
        (Some(start), Some(end)) => Some(DateRange { start, end }),
        _ => {
            errors.push(FieldError::new(Field::StartDate, DATE_PAIR_INVALID));
            errors.push(FieldError::new(Field::EndDate, DATE_PAIR_INVALID));
            None
        }
    }
}

fn check_status(value: &str, errors: &mut Vec<FieldError>) -> Option<PaymentStatus> {
    if value.is_empty() || value.eq_ignore_ascii_case(ALL_STATUSES) {
        return None;
    }
    match value.parse::<PaymentStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.push(FieldError::new(Field::Status, STATUS_UNKNOWN));
            None
        }
    }
}
