mod cli;

use anyhow::Result;
use clap::Parser;
use coordcheck::RunSummary;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use cli::Cli;

/// Exit status for fatal errors: bad invocation, unreadable or empty input, unresolved columns.
const EXIT_FATAL: i32 = 1;

/// Exit status when the output was written but some rows could not be repaired.
const EXIT_INVALID_ROWS: i32 = 2;

/// `--help` and `--version` exit cleanly; every other rejected command line is fatal.
fn usage_exit_status(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        EXIT_FATAL
    } else {
        0
    }
}

fn exit_status(result: &Result<RunSummary>) -> i32 {
    match result {
        Ok(summary) if summary.passed() => 0,
        Ok(_) => EXIT_INVALID_ROWS,
        Err(_) => EXIT_FATAL,
    }
}

fn invalid_rows_message(invalid: usize) -> String {
    format!(
        "✘ Rows still invalid after normalization: {}. Review the input file.",
        invalid
    )
}

fn run(cli: &Cli) -> Result<RunSummary> {
    let config = cli.to_config()?;
    info!(input = %config.input.display(), output = %config.output.display(), "startup");
    coordcheck::normalize_file(&config)
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(usage_exit_status(&e));
        }
    };

    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) normalize ────────────────────────────────────────────────
    let result = run(&cli);

    // ─── 3) report + exit policy ─────────────────────────────────────
    match &result {
        Ok(summary) => {
            println!(
                "✔ Normalization complete. Rows fixed: {}, rows invalid: {}.",
                summary.fixed, summary.invalid
            );
            if !summary.passed() {
                error!(rows = ?summary.invalid_rows, "unrepaired rows");
                eprintln!("{}", invalid_rows_message(summary.invalid));
            }
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:?}", e);
        }
    }

    std::process::exit(exit_status(&result));
}
