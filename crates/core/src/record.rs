//! Payment records and the response boundary.
//!
//! Search responses arrive as untyped JSON. They are checked once, here, and
//! everything downstream works with [`PaymentRecord`] values.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

/// Key holding the record list in a search response.
pub const RECORDS_KEY: &str = "paymentRecords";

/// A payment as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub payment_id: String,
    /// Stored as received; casing varies between sources.
    pub status: String,
    pub amount: Decimal,
    pub card_number: String,
    pub card_expiry: String,
    pub brand: String,
    pub created_at: Option<String>,
    pub captured_at: Option<String>,
    pub voided_at: Option<String>,
    pub refunded_at: Option<String>,
}

/// The response did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response has no 'paymentRecords' array")]
    MissingRecords,

    #[error("record {index}: {message}")]
    Record { index: usize, message: String },
}

/// Parse a search response body into records, preserving order.
pub fn parse_search_response(body: &Value) -> Result<Vec<PaymentRecord>, ResponseError> {
    let obj = body.as_object().ok_or(ResponseError::NotAnObject)?;
    let records = obj
        .get(RECORDS_KEY)
        .and_then(Value::as_array)
        .ok_or(ResponseError::MissingRecords)?;

    records
        .iter()
        .enumerate()
        .map(|(index, value)| {
            PaymentRecord::from_json(value)
                .map_err(|message| ResponseError::Record { index, message })
        })
        .collect()
}

impl PaymentRecord {
    /// Read one record object. The error is a human-readable reason.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        let obj = value
            .as_object()
            .ok_or_else(|| "not a JSON object".to_string())?;

        Ok(PaymentRecord {
            payment_id: required_str(obj, "paymentId")?,
            status: required_str(obj, "status")?,
            amount: amount(obj)?,
            card_number: required_str(obj, "cardNumber")?,
            card_expiry: required_str(obj, "cardExpiry")?,
            brand: required_str(obj, "brand")?,
            created_at: optional_timestamp(obj, "createdAt")?,
            captured_at: optional_timestamp(obj, "capturedAt")?,
            voided_at: optional_timestamp(obj, "voidedAt")?,
            refunded_at: optional_timestamp(obj, "refundedAt")?,
        })
    }
}

fn required_str(obj: &Map<String, Value>, key: &str) -> Result<String, String> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(format!("'{}' must be a string, got {}", key, kind(other))),
        None => Err(format!("missing required field '{}'", key)),
    }
}

/// Amounts may be JSON numbers or numeric strings.
fn amount(obj: &Map<String, Value>) -> Result<Decimal, String> {
    let text = match obj.get("amount") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => return Err(format!("'amount' must be a number, got {}", kind(other))),
        None => return Err("missing required field 'amount'".to_string()),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| format!("'amount' is not a decimal number: {}", text))
}

/// Timestamps are passed through as text; `null` and absence both mean unset.
fn optional_timestamp(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(format!(
            "'{}' must be a string or number, got {}",
            key,
            kind(other)
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
