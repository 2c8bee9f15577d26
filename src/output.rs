//! Output formatting and persistence for GPA results.
//!
//! Supports a human-readable summary, JSON serialization, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::gpa::GpaResult;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// A GPA result together with its classification, as written to JSON.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub gpa: &'a str,
    pub total_credits: u32,
    pub class: &'static str,
}

impl<'a> From<&'a GpaResult> for Summary<'a> {
    fn from(result: &'a GpaResult) -> Self {
        Summary {
            gpa: &result.gpa,
            total_credits: result.total_credits,
            class: result.class(),
        }
    }
}

/// One row of the CSV history log.
#[derive(Debug, Serialize)]
pub struct ResultRecord {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub gpa: String,
    pub total_credits: u32,
    pub class: String,
}

impl ResultRecord {
    pub fn new(source: &str, result: &GpaResult) -> Self {
        ResultRecord {
            timestamp: Utc::now(),
            source: source.to_string(),
            gpa: result.gpa.clone(),
            total_credits: result.total_credits,
            class: result.class().to_string(),
        }
    }
}

/// Renders the GPA breakdown shown to the user.
pub fn render_summary(result: &GpaResult) -> String {
    format!(
        "Your GPA Breakdown\n\
         Total Credits Counted: {}\n\
         Final GPA Score: {}\n\
         Awarded Class: {}",
        result.total_credits,
        result.gpa,
        result.class()
    )
}

/// Renders the result and its class as a single-line JSON object.
pub fn render_json(result: &GpaResult) -> Result<String> {
    Ok(serde_json::to_string(&Summary::from(result))?)
}

/// Appends a [`ResultRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &ResultRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
