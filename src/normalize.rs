// src/normalize.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::{
    coords::{repair_pair, resolve_columns, CoordColumns, RowOutcome},
    error::NormalizeError,
    table::RawTable,
};

pub const DEFAULT_INPUT: &str = "rubros_csv.csv";
pub const DEFAULT_OUTPUT: &str = "rubros_csv.normalized.csv";
pub const DEFAULT_DELIMITER: u8 = b';';

/// Everything a run needs to know.
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub delimiter: u8,
    /// Explicit latitude header; alias matching is used when `None`.
    pub lat_column: Option<String>,
    /// Explicit longitude header; alias matching is used when `None`.
    pub lon_column: Option<String>,
    /// Where to write the JSON run summary, if anywhere.
    pub report: Option<PathBuf>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            delimiter: DEFAULT_DELIMITER,
            lat_column: None,
            lon_column: None,
            report: None,
        }
    }
}

/// Accepts a single ASCII character, or `\t` spelled out.
pub fn parse_delimiter(raw: &str) -> Result<u8, NormalizeError> {
    match raw {
        "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        s => Err(NormalizeError::InvalidDelimiter(s.to_string())),
    }
}

/// Counts for one run, plus the data rows that still need a human.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub lat_column: String,
    pub lon_column: String,
    pub rows: usize,
    pub fixed: usize,
    pub swapped: usize,
    pub invalid: usize,
    /// 1-based data row numbers (header excluded).
    pub invalid_rows: Vec<usize>,
}

impl RunSummary {
    pub fn passed(&self) -> bool {
        self.invalid == 0
    }
}

/// Repair the coordinate cells of every row in place.
pub fn normalize_table(table: &mut RawTable, columns: &CoordColumns) -> RunSummary {
    let mut summary = RunSummary {
        lat_column: columns.lat_name.clone(),
        lon_column: columns.lon_name.clone(),
        rows: table.rows.len(),
        ..Default::default()
    };

    for (idx, row) in table.rows.iter_mut().enumerate() {
        let row_no = idx + 1;
        let repaired = repair_pair(&row[columns.lat_index], &row[columns.lon_index]);

        match repaired.outcome {
            RowOutcome::Unchanged => {}
            RowOutcome::Fixed { swapped } => {
                summary.fixed += 1;
                if swapped {
                    summary.swapped += 1;
                    debug!(
                        row = row_no,
                        lat = %repaired.lat,
                        lon = %repaired.lon,
                        "swapped transposed coordinates"
                    );
                }
            }
            RowOutcome::Invalid => {
                summary.invalid += 1;
                summary.invalid_rows.push(row_no);
                warn!(
                    row = row_no,
                    lat = %repaired.lat,
                    lon = %repaired.lon,
                    "coordinates out of range, left as-is"
                );
                continue;
            }
        }

        row[columns.lat_index] = repaired.lat;
        row[columns.lon_index] = repaired.lon;
    }

    summary
}

fn write_report(path: &Path, summary: &RunSummary) -> Result<()> {
    let mut f = fs::File::create(path).with_context(|| format!("creating report {:?}", path))?;
    serde_json::to_writer_pretty(&mut f, summary).context("serializing run summary")?;
    f.write_all(b"\n")?;
    Ok(())
}

/// Load, repair and write one file.
///
/// Fatal conditions (unreadable or empty input, unresolved columns) return an
/// error before anything is written. Rows that can't be repaired do not fail
/// this function; check [`RunSummary::passed`].
#[tracing::instrument(level = "info", skip(config), fields(input = %config.input.display()))]
pub fn normalize_file(config: &NormalizeConfig) -> Result<RunSummary> {
    let mut table = RawTable::load(&config.input, config.delimiter)?;
    if table.rows.is_empty() {
        return Err(NormalizeError::EmptyInput.into());
    }

    let columns = resolve_columns(
        &table.headers,
        config.lat_column.as_deref(),
        config.lon_column.as_deref(),
    )?;
    info!(lat = %columns.lat_name, lon = %columns.lon_name, "coordinate columns");

    let summary = normalize_table(&mut table, &columns);

    table.write(&config.output, config.delimiter)?;
    info!(output = %config.output.display(), rows = summary.rows, "wrote normalized table");

    if let Some(report) = &config.report {
        write_report(report, &summary)?;
        info!(report = %report.display(), "wrote run report");
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,coordcheck=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn config_for(dir: &TempDir, content: &str) -> Result<NormalizeConfig> {
        let input = dir.path().join("in.csv");
        fs::write(&input, content)?;
        Ok(NormalizeConfig {
            input,
            output: dir.path().join("out.csv"),
            ..Default::default()
        })
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_normalize_file_example() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let config = config_for(
            &dir,
            "\u{feff}AMIE;Nombre;Latitud;LONGITUD ;Zona\n\
             17H001;Escuela Uno;-0,180653;-78,467838;9\n\
             17H002;Escuela Dos;-1500000;-7900115439;9\n\
             17H003;Escuela Tres;-1.234567;-79.123456;9\n\
             17H004;Escuela Cuatro;-100.25;-1.5;9\n",
        )?;

        let summary = normalize_file(&config)?;

        assert_eq!(summary.lat_column, "Latitud");
        assert_eq!(summary.lon_column, "LONGITUD ");
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.fixed, 3);
        assert_eq!(summary.swapped, 2);
        assert_eq!(summary.invalid, 0);
        assert!(summary.passed());

        assert_eq!(
            read(&config.output),
            "AMIE;Nombre;Latitud;LONGITUD ;Zona\n\
             17H001;Escuela Uno;-0.180653;-78.467838;9\n\
             17H002;Escuela Dos;-79.001154;-150.000000;9\n\
             17H003;Escuela Tres;-1.234567;-79.123456;9\n\
             17H004;Escuela Cuatro;-1.500000;-100.250000;9\n"
        );
        Ok(())
    }

    #[test]
    fn test_output_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let first = config_for(&dir, "LAT;LON\n1.234.567,89;-7900115439\n-0,5;-78,25\n")?;
        normalize_file(&first)?;
        let once = read(&first.output);

        let second = NormalizeConfig {
            input: first.output.clone(),
            output: dir.path().join("again.csv"),
            ..Default::default()
        };
        let summary = normalize_file(&second)?;

        assert_eq!(summary.fixed, 0);
        assert_eq!(read(&second.output), once);
        Ok(())
    }

    #[test]
    fn test_invalid_rows_are_kept_and_counted() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let mut config = config_for(&dir, "ID;LAT;LON\na;999;999\nb;-0.5;-78.5\nc;;-78.5\n")?;
        config.report = Some(dir.path().join("report.json"));

        let summary = normalize_file(&config)?;

        assert!(!summary.passed());
        assert_eq!(summary.invalid, 2);
        assert_eq!(summary.invalid_rows, vec![1, 3]);
        assert_eq!(summary.fixed, 1);
        assert_eq!(
            read(&config.output),
            "ID;LAT;LON\na;999;999\nb;-0.500000;-78.500000\nc;;-78.5\n"
        );

        let report: serde_json::Value = serde_json::from_str(&read(&dir.path().join("report.json")))?;
        assert_eq!(report["invalid"], 2);
        assert_eq!(report["invalid_rows"], serde_json::json!([1, 3]));
        assert_eq!(report["lat_column"], "LAT");
        Ok(())
    }

    #[test]
    fn test_header_only_is_fatal_and_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        let config = config_for(&dir, "LATITUD;LONGITUD\n")?;

        let err = normalize_file(&config).unwrap_err();

        assert_eq!(
            err.downcast_ref::<NormalizeError>(),
            Some(&NormalizeError::EmptyInput)
        );
        assert!(!config.output.exists());
        Ok(())
    }

    #[test]
    fn test_unresolved_columns_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let config = config_for(&dir, "NOMBRE;ZONA\nUno;9\n")?;

        let err = normalize_file(&config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<NormalizeError>(),
            Some(NormalizeError::MissingColumns { lat: None, lon: None })
        ));
        assert!(!config.output.exists());
        Ok(())
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let config = NormalizeConfig {
            input: PathBuf::from("/nonexistent/coordcheck/in.csv"),
            ..Default::default()
        };
        assert!(normalize_file(&config).is_err());
    }

    #[test]
    fn test_custom_delimiter_and_explicit_columns() -> Result<()> {
        let dir = tempdir()?;
        let mut config = config_for(&dir, "norte,este,nota\n\"-0,25\",-78.5,\"a, b\"\n")?;
        config.delimiter = parse_delimiter(",")?;
        config.lat_column = Some("Norte".into());
        config.lon_column = Some("ESTE".into());

        let summary = normalize_file(&config)?;

        assert_eq!(summary.fixed, 1);
        assert_eq!(
            read(&config.output),
            "norte,este,nota\n-0.250000,-78.500000,\"a, b\"\n"
        );
        Ok(())
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(
            parse_delimiter(";;"),
            Err(NormalizeError::InvalidDelimiter(";;".into()))
        );
        assert!(parse_delimiter("é").is_err());
    }
}
