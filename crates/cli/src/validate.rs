//! `paylens validate`: run the validator only and show the outgoing query.

use std::process;

use paylens_core::{build, RawSearchForm, ValidationErrors};

use crate::OutputFormat;

pub(crate) fn cmd_validate(form: RawSearchForm, output: OutputFormat, quiet: bool) {
    let criteria = match paylens_core::validate(&form) {
        Ok(c) => c,
        Err(errors) => {
            if !quiet {
                report_field_errors(&errors, output);
            }
            process::exit(2);
        }
    };

    let payload = build(&criteria);
    match output {
        OutputFormat::Json => {
            let doc = serde_json::json!({ "valid": true, "query": payload });
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string())
            );
        }
        OutputFormat::Text => {
            if !quiet {
                println!("valid");
            }
            if payload.is_empty() {
                println!("(no constraints)");
            }
            for (key, value) in payload.iter() {
                println!("  {} = {}", key, value);
            }
        }
    }
}

/// Print per-field validation errors.
///
/// JSON goes to stdout as a structured document; text goes to stderr.
pub(crate) fn report_field_errors(errors: &ValidationErrors, output: OutputFormat) {
    match output {
        OutputFormat::Json => {
            let doc = serde_json::json!({ "valid": false, "errors": errors });
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string())
            );
        }
        OutputFormat::Text => {
            eprintln!("invalid search criteria:");
            for e in errors.errors() {
                eprintln!("  {}: {}", e.field.as_str(), e.message);
            }
        }
    }
}
