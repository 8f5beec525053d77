//! Search request shapes: the raw form and the validated criteria.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

/// Status value that means "no status constraint".
pub const ALL_STATUSES: &str = "All";

/// Lifecycle status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Authorised,
    Captured,
    Voided,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Authorised,
        PaymentStatus::Captured,
        PaymentStatus::Voided,
        PaymentStatus::Refunded,
    ];

    /// Canonical label sent to the remote store.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Authorised => "Authorised",
            PaymentStatus::Captured => "Captured",
            PaymentStatus::Voided => "Voided",
            PaymentStatus::Refunded => "Refunded",
        }
    }

    /// Case-insensitive comparison against a stored status string.
    pub fn matches(self, status: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(status)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the four statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.matches(s))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Form field names, as they appear in raw input and query payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    PaymentId,
    StartDate,
    EndDate,
    Status,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::PaymentId => "paymentId",
            Field::StartDate => "startDate",
            Field::EndDate => "endDate",
            Field::Status => "status",
        }
    }

    fn from_key(key: &str) -> Option<Field> {
        match key {
            "paymentId" => Some(Field::PaymentId),
            "startDate" => Some(Field::StartDate),
            "endDate" => Some(Field::EndDate),
            "status" => Some(Field::Status),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated search form state.
///
/// A field that was never filled in is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSearchForm {
    pub payment_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl RawSearchForm {
    /// Build a form from `field → value` pairs. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = RawSearchForm::default();
        for (key, value) in pairs {
            if let Some(field) = Field::from_key(key.as_ref()) {
                *form.field_mut(field) = value.into();
            }
        }
        form
    }

    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::from_pairs(map.iter().map(|(k, v)| (k.as_str(), v.clone())))
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::PaymentId => &self.payment_id,
            Field::StartDate => &self.start_date,
            Field::EndDate => &self.end_date,
            Field::Status => &self.status,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::PaymentId => &mut self.payment_id,
            Field::StartDate => &mut self.start_date,
            Field::EndDate => &mut self.end_date,
            Field::Status => &mut self.status,
        }
    }
}

/// Inclusive calendar date range. Both ends are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

/// A validated, normalized search request.
///
/// Only [`crate::validate::validate`] constructs these from user input, so a
/// `SearchCriteria` in hand always satisfies the field rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    payment_id: Option<String>,
    date_range: Option<DateRange>,
    status: Option<PaymentStatus>,
}

impl SearchCriteria {
    pub(crate) fn new(
        payment_id: Option<String>,
        date_range: Option<DateRange>,
        status: Option<PaymentStatus>,
    ) -> Self {
        SearchCriteria {
            payment_id,
            date_range,
            status,
        }
    }

    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    pub fn status(&self) -> Option<PaymentStatus> {
        self.status
    }

    /// True if no field constrains the search.
    pub fn is_unconstrained(&self) -> bool {
        self.payment_id.is_none() && self.date_range.is_none() && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            "captured".parse::<PaymentStatus>(),
            Ok(PaymentStatus::Captured)
        );
        assert_eq!(
            "REFUNDED".parse::<PaymentStatus>(),
            Ok(PaymentStatus::Refunded)
        );
        assert!("settled".parse::<PaymentStatus>().is_err());
        assert!("".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn status_display_is_canonical() {
        assert_eq!(PaymentStatus::Authorised.to_string(), "Authorised");
    }

    #[test]
    fn form_from_pairs_ignores_unknown_keys() {
        let form = RawSearchForm::from_pairs([
            ("paymentId", "abc"),
            ("status", "Voided"),
            ("merchant", "ignored"),
        ]);
        assert_eq!(form.payment_id, "abc");
        assert_eq!(form.status, "Voided");
        assert_eq!(form.start_date, "");
    }

    #[test]
    fn form_deserializes_camel_case_with_missing_fields() {
        let form: RawSearchForm =
            serde_json::from_str(r#"{"startDate": "2024-01-01", "endDate": "2024-01-31"}"#)
                .unwrap();
        assert_eq!(form.start_date, "2024-01-01");
        assert_eq!(form.end_date, "2024-01-31");
        assert_eq!(form.payment_id, "");
    }

    #[test]
    fn field_serializes_as_form_key() {
        assert_eq!(
            serde_json::to_value(Field::StartDate).unwrap(),
            serde_json::json!("startDate")
        );
    }
}
