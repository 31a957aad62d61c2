//! Output files for persisted runs.
//!
//! Rows are written without quoting, so responses containing commas or line
//! breaks will shift columns in the resulting CSV.

use crate::core::data::{ResponseRow, RunParameters, SurveyTable};
use crate::utils::error::{AppError, AppResult};
use csv::{QuoteStyle, WriterBuilder};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// First path in `path`, `stem_1.ext`, `stem_2.ext`, ... for which `exists` is false.
pub fn next_available_path(path: &Path, exists: impl Fn(&Path) -> bool) -> PathBuf {
    if !exists(path) {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());

    let mut counter = 1usize;
    loop {
        let file_name = match &extension {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        let candidate = path.with_file_name(file_name);
        if !exists(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Sibling metadata file: `results.csv` becomes `results_params.json`.
pub fn params_path_for(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{}_params.json", stem))
}

fn write_record<W: Write>(writer: W, record: &[&str]) -> AppResult<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(record)
        .map_err(|e| AppError::Io(format!("Failed to write CSV record: {}", e)))?;
    wtr.flush()
        .map_err(|e| AppError::Io(format!("Failed to flush CSV record: {}", e)))?;
    Ok(())
}

/// Create `path` and write the header line. Fails if `path` already exists.
pub fn write_header(path: &Path, columns: &[String]) -> AppResult<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| AppError::from_io(path, e))?;
    let record: Vec<&str> = columns.iter().map(String::as_str).collect();
    write_record(file, &record)
}

/// Open `path` for append, write one row, and close it again.
pub fn append_row(path: &Path, row: &ResponseRow) -> AppResult<()> {
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| AppError::from_io(path, e))?;
    write_record(file, &row.cells())
}

pub fn write_params(path: &Path, params: &RunParameters) -> AppResult<()> {
    let content = serde_json::to_string_pretty(params)
        .map_err(|e| AppError::Unexpected(format!("Failed to serialize run parameters: {}", e)))?;
    std::fs::write(path, content).map_err(|e| AppError::from_io(path, e))
}

/// Write a whole table, header first, to any writer.
pub fn write_table<W: Write>(mut writer: W, table: &SurveyTable) -> AppResult<()> {
    let header: Vec<&str> = table.columns().iter().map(String::as_str).collect();
    write_record(&mut writer, &header)?;
    for row in table.rows() {
        write_record(&mut writer, &row.cells())?;
    }
    Ok(())
}
