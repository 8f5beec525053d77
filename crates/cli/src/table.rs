//! Plain-text table rendering for search results.

use paylens_core::DisplayRecord;

const HEADERS: [&str; 10] = [
    "Authorised At",
    "Id",
    "Status",
    "Amount",
    "Card Number",
    "Card Expiry",
    "Brand",
    "Captured At",
    "Voided At",
    "Refunded At",
];

fn cells(row: &DisplayRecord, currency_symbol: &str) -> [String; 10] {
    [
        row.created_at.clone(),
        row.payment_id.clone(),
        row.status.clone(),
        format!("{}{}", currency_symbol, row.amount),
        row.card_number.clone(),
        row.card_expiry.clone(),
        row.brand.clone(),
        row.captured_at.clone(),
        row.voided_at.clone(),
        row.refunded_at.clone(),
    ]
}

/// Render rows under a header line, columns padded to their widest cell.
///
/// Amounts are right-aligned and prefixed with `currency_symbol`.
pub(crate) fn render(rows: &[DisplayRecord], currency_symbol: &str) -> String {
    let body: Vec<[String; 10]> = rows.iter().map(|r| cells(r, currency_symbol)).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS.iter().map(|h| h.to_string()), &widths);
    push_line(
        &mut out,
        widths.iter().map(|w| "-".repeat(*w)),
        &widths,
    );
    for row in body {
        push_line(&mut out, row.into_iter(), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize; 10]) {
    let line: Vec<String> = cells
        .zip(widths.iter())
        .enumerate()
        .map(|(col, (cell, width))| {
            let pad = width.saturating_sub(cell.chars().count());
            if col == 3 {
                format!("{}{}", " ".repeat(pad), cell)
            } else {
                format!("{}{}", cell, " ".repeat(pad))
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, amount: &str) -> DisplayRecord {
        DisplayRecord {
            payment_id: id.to_string(),
            status: "Captured".to_string(),
            amount: amount.to_string(),
            card_number: "4242 **** **** 4242".to_string(),
            card_expiry: "12/29".to_string(),
            brand: "visa".to_string(),
            created_at: "2024-01-02T10:00:00Z".to_string(),
            captured_at: "-".to_string(),
            voided_at: "-".to_string(),
            refunded_at: "-".to_string(),
        }
    }

    #[test]
    fn header_and_separator_come_first() {
        let text = render(&[], "¥");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Authorised At  Id"));
        assert!(lines[1].chars().all(|c| c == '-' || c == ' '));
    }

    #[test]
    fn amounts_carry_symbol_and_align_right() {
        let text = render(&[row("a", "5.00"), row("b", "1250.00")], "¥");
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[2].contains("   ¥5.00"));
        assert!(lines[3].contains("¥1250.00"));
        let pos = |l: &str| l.find(".00").unwrap() - l.find("Captured").unwrap();
        assert_eq!(pos(lines[2]), pos(lines[3]));
    }

    #[test]
    fn rows_keep_input_order() {
        let text = render(&[row("first", "1.00"), row("second", "2.00")], "$");
        let first = text.find("first").unwrap();
        let second = text.find("second").unwrap();
        assert!(first < second);
        assert!(text.contains("$2.00"));
    }
}
