mod config;
mod logging;
mod mask;
mod search;
mod table;
mod validate;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use time::OffsetDateTime;

use paylens_core::{fields, RawSearchForm};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Payment record search.
#[derive(Parser)]
#[command(name = "paylens", version, about = "Search and inspect payment records")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a paylens.toml (defaults to ./paylens.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search payment records
    Search {
        #[command(flatten)]
        form: FormArgs,
        /// Answer from a JSON response file instead of the remote endpoint
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// Validate search criteria and print the query that would be sent
    Validate {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Mask a card number for display
    Mask {
        /// Card number to mask
        card: String,
    },
}

/// Search form fields shared by `search` and `validate`.
#[derive(Debug, Args)]
pub(crate) struct FormArgs {
    /// Payment id (UUID)
    #[arg(long)]
    payment_id: Option<String>,
    /// First day of the range, YYYY-MM-DD
    #[arg(long)]
    start_date: Option<String>,
    /// Last day of the range, YYYY-MM-DD
    #[arg(long)]
    end_date: Option<String>,
    /// Authorised, Captured, Voided, Refunded or All
    #[arg(long)]
    status: Option<String>,
}

impl FormArgs {
    /// Build the raw form. With neither date flag given, both dates are
    /// `today`; an explicit empty string clears a date.
    pub(crate) fn into_form(self, today: &str) -> RawSearchForm {
        let (start_date, end_date) = match (self.start_date, self.end_date) {
            (None, None) => (today.to_string(), today.to_string()),
            (start, end) => (start.unwrap_or_default(), end.unwrap_or_default()),
        };
        RawSearchForm {
            payment_id: self.payment_id.unwrap_or_default(),
            start_date,
            end_date,
            status: self.status.unwrap_or_default(),
        }
    }
}

fn today() -> String {
    fields::format_iso_date(OffsetDateTime::now_utc().date())
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&format!("error: {}", e), cli.output, cli.quiet);
            process::exit(1);
        }
    };
    logging::init_logging(&config.log.level, cli.verbose);

    match cli.command {
        Commands::Search { form, fixture } => {
            search::cmd_search(
                form.into_form(&today()),
                fixture.as_deref(),
                &config,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Validate { form } => {
            validate::cmd_validate(form.into_form(&today()), cli.output, cli.quiet);
        }
        Commands::Mask { card } => {
            mask::cmd_mask(&card, cli.output);
        }
    }
}

/// Report an error to stderr, honoring output format and quiet mode.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
