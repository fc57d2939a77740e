//! CSV and JSON export of the word table.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{WordCatalog, WordEntry};
use crate::error::{Result, ValidationError};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ValidationError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// JSON export layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// ISO-8601 time the export was produced.
    pub export_date: String,
    pub total_words: usize,
    pub words: Vec<WordEntry>,
}

const CSV_HEADER: [&str; 5] = [
    "word",
    "category",
    "subcategory",
    "efficiency_impact",
    "is_efficient",
];

/// Write `words` as CSV with a header row.
pub fn write_csv<W: Write>(out: W, words: &[WordEntry]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for w in words {
        let impact = w.efficiency_impact.to_string();
        wtr.write_record([
            w.word.as_str(),
            w.category.as_str(),
            w.subcategory.as_deref().unwrap_or(""),
            impact.as_str(),
            if w.is_efficient { "true" } else { "false" },
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `words` as a pretty-printed [`ExportDocument`].
pub fn write_json<W: Write>(out: W, words: Vec<WordEntry>) -> Result<()> {
    let doc = ExportDocument {
        export_date: Utc::now().to_rfc3339(),
        total_words: words.len(),
        words,
    };
    serde_json::to_writer_pretty(out, &doc)?;
    Ok(())
}

fn default_file_name(format: ExportFormat) -> String {
    format!(
        "word_efficiency_export_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Resolve the destination file. Directories receive a timestamped file name.
fn resolve_destination(format: ExportFormat, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(default_file_name(format)),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_file_name(format)),
    }
}

impl WordCatalog<'_> {
    /// Export every word, ordered by category then word.
    ///
    /// `output` may be a file path, an existing directory, or `None` for a
    /// timestamped file in the working directory. Returns the written path.
    ///
    /// # Errors
    /// Returns an error if the words cannot be read or the file cannot be written.
    pub fn export(&self, format: ExportFormat, output: Option<&Path>) -> Result<PathBuf> {
        let words = self.all_words()?;
        let path = resolve_destination(format, output);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let total = words.len();
        let file = std::io::BufWriter::new(std::fs::File::create(&path)?);
        match format {
            ExportFormat::Csv => write_csv(file, &words)?,
            ExportFormat::Json => write_json(file, words)?,
        }
        info!(path = %path.display(), %format, total, "catalog exported");
        Ok(path)
    }
}
