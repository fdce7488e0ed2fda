use std::path::PathBuf;

use coordcheck::normalize::{parse_delimiter, DEFAULT_INPUT, DEFAULT_OUTPUT};
use coordcheck::{NormalizeConfig, NormalizeError};

/// Normalize latitude/longitude columns of a delimited CSV file
#[derive(clap::Parser, Debug)]
#[command(name = "coordcheck", version, about)]
pub struct Cli {
    /// Input CSV file
    #[arg(default_value = DEFAULT_INPUT, value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Normalized output CSV file
    #[arg(default_value = DEFAULT_OUTPUT, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Field delimiter for both input and output (use \t for tab)
    #[arg(short, long, default_value = ";")]
    pub delimiter: String,

    /// Latitude header name, skips alias matching
    #[arg(long)]
    pub lat_column: Option<String>,

    /// Longitude header name, skips alias matching
    #[arg(long)]
    pub lon_column: Option<String>,

    /// Also write the run summary as JSON
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub report: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn to_config(&self) -> Result<NormalizeConfig, NormalizeError> {
        Ok(NormalizeConfig {
            input: self.input.clone(),
            output: self.output.clone(),
            delimiter: parse_delimiter(&self.delimiter)?,
            lat_column: self.lat_column.clone(),
            lon_column: self.lon_column.clone(),
            report: self.report.clone(),
        })
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "info,coordcheck=debug",
            _ => "trace",
        }
    }
}
