//! `paylens search`: one submit through a search session.

use std::path::Path;
use std::process;

use paylens_core::{DisplayRecord, RawSearchForm, ValidationErrors};
use paylens_remote::{FixtureBackend, HttpBackend, SearchBackend};
use paylens_session::{SearchFailure, SearchOutcome, SessionHandle};

use crate::config::Config;
use crate::validate::report_field_errors;
use crate::{report_error, table, OutputFormat};

pub(crate) fn cmd_search(
    form: RawSearchForm,
    fixture: Option<&Path>,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let (backend, source) = match fixture {
        Some(path) => match FixtureBackend::from_file(path) {
            Ok(b) => (
                Box::new(b) as Box<dyn SearchBackend>,
                path.display().to_string(),
            ),
            Err(e) => {
                report_error(&format!("error: {}", e), output, quiet);
                process::exit(1);
            }
        },
        None => {
            let backend = HttpBackend::new(config.http_config());
            let endpoint = backend.endpoint().to_string();
            (Box::new(backend) as Box<dyn SearchBackend>, endpoint)
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            report_error(
                &format!("error: could not start runtime: {}", e),
                output,
                quiet,
            );
            process::exit(1);
        }
    };

    let handle = SessionHandle::new(backend);
    if paylens_core::validate(&form).is_ok() {
        show_loading(&source, output, quiet);
    }
    match rt.block_on(handle.submit(&form)) {
        SearchOutcome::Rejected(errors) => {
            report_rejected(&errors, output, quiet);
            process::exit(2);
        }
        SearchOutcome::Completed(rows) => {
            print_rows(&rows, &config.display.currency_symbol, output, quiet);
        }
        SearchOutcome::Failed(failure) => {
            report_failure(&failure, output, quiet);
            process::exit(1);
        }
        SearchOutcome::Superseded => {
            // Only one submit is made per invocation.
            report_error("error: search was superseded", output, quiet);
            process::exit(1);
        }
    }
}

/// Loading indicator for the request about to be sent. Text mode only.
fn show_loading(source: &str, output: OutputFormat, quiet: bool) {
    if quiet || output == OutputFormat::Json {
        return;
    }
    eprintln!("searching {}...", source);
}

fn report_rejected(errors: &ValidationErrors, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    report_field_errors(errors, output);
}

fn print_rows(rows: &[DisplayRecord], currency_symbol: &str, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "count": rows.len(),
                "records": rows,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string())
            );
        }
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("no payments found");
                return;
            }
            print!("{}", table::render(rows, currency_symbol));
            if !quiet {
                println!(
                    "{} payment{}",
                    rows.len(),
                    if rows.len() == 1 { "" } else { "s" }
                );
            }
        }
    }
}

fn report_failure(failure: &SearchFailure, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => {
            eprintln!("search failed ({}): {}", failure.kind, failure.message);
        }
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "error": failure.message,
                "kind": failure.kind,
            });
            eprintln!("{}", doc);
        }
    }
}
