//! Minimal request payload for the remote store.
//!
//! The store reads an omitted key as "no constraint" and a present key as a
//! constraint, so unconstrained fields are left out entirely rather than sent
//! as empty strings.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::criteria::{Field, SearchCriteria};
use crate::fields::format_iso_date;

/// Flat `field → value` request body. Never holds an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryPayload(BTreeMap<&'static str, String>);

impl QueryPayload {
    fn insert(&mut self, field: Field, value: String) {
        if !value.is_empty() {
            self.0.insert(field.as_str(), value);
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(field.as_str()).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(field.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }
}

/// Build the request payload for validated criteria.
pub fn build(criteria: &SearchCriteria) -> QueryPayload {
    let mut payload = QueryPayload::default();
    if let Some(id) = criteria.payment_id() {
        payload.insert(Field::PaymentId, id.to_string());
    }
    if let Some(range) = criteria.date_range() {
        payload.insert(Field::StartDate, format_iso_date(range.start));
        payload.insert(Field::EndDate, format_iso_date(range.end));
    }
    if let Some(status) = criteria.status() {
        payload.insert(Field::Status, status.as_str().to_string());
    }
    payload
}
