// src/table/mod.rs
use anyhow::{Context, Result};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column names from the header row, in file order.
    pub headers: Vec<String>,
    /// Each data row, one string per header.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse delimited text. A leading byte-order mark is dropped and blank lines are skipped;
    /// rows whose width differs from the header are an error.
    pub fn parse(text: &str, delimiter: u8) -> Result<Self> {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = rdr
            .headers()
            .context("reading header row")?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("CSV parse error at data row {}", idx + 1))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Read and parse `path`. Invalid UTF-8 is replaced rather than rejected.
    #[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("reading {:?}", path))?;
        let text = String::from_utf8_lossy(&bytes);
        let table = Self::parse(&text, delimiter).with_context(|| format!("parsing {:?}", path))?;
        debug!(
            columns = table.headers.len(),
            rows = table.rows.len(),
            "loaded table"
        );
        Ok(table)
    }

    /// Render with the same header order, quoting only where needed.
    pub fn to_bytes(&self, delimiter: u8) -> Result<Vec<u8>> {
        let mut wtr = WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        wtr.write_record(&self.headers).context("writing header row")?;
        for row in &self.rows {
            wtr.write_record(row).context("writing data row")?;
        }
        wtr.into_inner().context("flushing CSV writer")
    }

    /// Write atomically: to a hidden tmp file beside `path`, then rename over it.
    pub fn write<P: AsRef<Path>>(&self, path: P, delimiter: u8) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(delimiter)?;

        let tmp_path = tmp_sibling(path);
        fs::write(&tmp_path, &bytes).with_context(|| format!("creating {:?}", tmp_path))?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path));
        }

        debug!(path = %path.display(), bytes = bytes.len(), "wrote table");
        Ok(())
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
