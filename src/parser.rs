//! Result-sheet parser.
//!
//! Decodes the first sheet of an Excel/OpenDocument workbook (via calamine)
//! or a CSV export into [`CourseRecord`]s keyed by the header row.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use thiserror::Error;
use tracing::debug;

use crate::gpa::CourseRecord;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("not a spreadsheet or CSV file")]
    InvalidFile,

    #[error("sheet has no header row")]
    EmptySheet,

    #[error("workbook could not be read: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV could not be read: {0}")]
    Csv(#[from] csv::Error),
}

/// Container format detected from the leading bytes of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// xlsx, xlsb or ods (ZIP container).
    Zip,
    /// Legacy xls (OLE compound document).
    Ole,
    /// Plain-text CSV.
    Csv,
}

impl SheetFormat {
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(ZIP_MAGIC) {
            Some(SheetFormat::Zip)
        } else if bytes.starts_with(OLE_MAGIC) {
            Some(SheetFormat::Ole)
        } else if std::str::from_utf8(bytes).is_ok() {
            Some(SheetFormat::Csv)
        } else {
            None
        }
    }
}

/// Decodes raw file bytes into course rows from the first sheet.
///
/// # Errors
///
/// Returns [`ParseError::InvalidFile`] for bytes that are neither a workbook
/// nor UTF-8 text, [`ParseError::EmptySheet`] when no header row exists, and
/// the underlying decoder error for a corrupt workbook or CSV.
pub fn parse_sheet(bytes: &[u8]) -> Result<Vec<CourseRecord>, ParseError> {
    let format = SheetFormat::detect(bytes).ok_or(ParseError::InvalidFile)?;
    debug!(?format, bytes = bytes.len(), "Decoding result sheet");

    match format {
        SheetFormat::Zip | SheetFormat::Ole => parse_workbook(bytes),
        SheetFormat::Csv => parse_csv(bytes),
    }
}

fn parse_workbook(bytes: &[u8]) -> Result<Vec<CourseRecord>, ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ParseError::EmptySheet)??;

    let grid = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());

    records_from_grid(grid)
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<CourseRecord>, ParseError> {
    let bytes = bytes.strip_prefix("\u{feff}".as_bytes()).unwrap_or(bytes);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut grid = Vec::new();
    for result in rdr.records() {
        let record = result?;
        grid.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    records_from_grid(grid.into_iter())
}

/// Turns a grid whose first row is the header into keyed records.
///
/// Empty cells and cells under a blank header are left out; rows left with no
/// cells at all are dropped.
fn records_from_grid<I>(mut grid: I) -> Result<Vec<CourseRecord>, ParseError>
where
    I: Iterator<Item = Vec<String>>,
{
    let header: Vec<String> = grid
        .next()
        .ok_or(ParseError::EmptySheet)?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let records: Vec<CourseRecord> = grid
        .map(|row| {
            let mut record = CourseRecord::new();
            for (column, cell) in header.iter().zip(row.iter()) {
                if !column.is_empty() && !cell.is_empty() {
                    record.insert(column, cell);
                }
            }
            record
        })
        .filter(|record| !record.is_empty())
        .collect();

    debug!(columns = header.len(), rows = records.len(), "Sheet decoded");
    Ok(records)
}

/// Renders a workbook cell as text. Whole-number floats drop their decimal part.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        other => other.to_string(),
    }
}
