//! Display projection of payment records.

use serde::Serialize;

use crate::fields::{format_amount, mask_card, status_label, timestamp_or_placeholder};
use crate::record::PaymentRecord;

/// A [`PaymentRecord`] reshaped for display: card masked, amount formatted,
/// status capitalized, missing timestamps replaced with `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub payment_id: String,
    pub status: String,
    pub amount: String,
    pub card_number: String,
    pub card_expiry: String,
    pub brand: String,
    pub created_at: String,
    pub captured_at: String,
    pub voided_at: String,
    pub refunded_at: String,
}

pub fn present(record: &PaymentRecord) -> DisplayRecord {
    DisplayRecord {
        payment_id: record.payment_id.clone(),
        status: status_label(&record.status),
        amount: format_amount(record.amount),
        card_number: mask_card(&record.card_number),
        card_expiry: record.card_expiry.clone(),
        brand: record.brand.clone(),
        created_at: timestamp_or_placeholder(record.created_at.as_deref()),
        captured_at: timestamp_or_placeholder(record.captured_at.as_deref()),
        voided_at: timestamp_or_placeholder(record.voided_at.as_deref()),
        refunded_at: timestamp_or_placeholder(record.refunded_at.as_deref()),
    }
}

pub fn present_all(records: &[PaymentRecord]) -> Vec<DisplayRecord> {
    records.iter().map(present).collect()
}
