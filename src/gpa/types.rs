//! Data types used by the GPA pipeline.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::gpa::grade::classify;

/// Column holding the course code in a result sheet.
pub const COURSE_CODE_COLUMN: &str = "Course Code";
/// Column holding the letter grade in a result sheet.
pub const GRADE_COLUMN: &str = "Grade";

/// A single result-sheet row, keyed by column header.
///
/// Empty cells are not stored, so a missing key and an empty cell look the same.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CourseRecord(HashMap<String, String>);

impl CourseRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record carrying only a course code and a grade.
    pub fn course(code: &str, grade: &str) -> Self {
        Self::new()
            .with(COURSE_CODE_COLUMN, code)
            .with(GRADE_COLUMN, grade)
    }

    /// Sets a cell, returning the record for chaining.
    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: &str) {
        self.0.insert(column.to_string(), value.to_string());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn course_code(&self) -> Option<&str> {
        self.get(COURSE_CODE_COLUMN)
    }

    pub fn grade(&self) -> Option<&str> {
        self.get(GRADE_COLUMN)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Uppercase course codes left out of the GPA by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a free-text, comma-separated list such as `"cs1013, CS2024,"`.
    ///
    /// Each entry is trimmed and uppercased; empty entries are dropped.
    pub fn parse(list: &str) -> Self {
        list.split(',').collect()
    }

    pub fn insert(&mut self, code: &str) {
        let code = code.trim();
        if !code.is_empty() {
            self.0.insert(code.to_uppercase());
        }
    }

    /// Adds every code from `other` to this set.
    pub fn extend(&mut self, other: ExclusionSet) {
        self.0.extend(other.0);
    }

    /// Membership test against an already-uppercased course code.
    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = ExclusionSet::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}

/// Credit-weighted GPA over every counted course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpaResult {
    /// Weighted mean grade point, fixed to three decimal places.
    pub gpa: String,
    pub total_credits: u32,
}

impl GpaResult {
    /// The GPA as a number, read back from its rounded three-decimal form.
    pub fn value(&self) -> f64 {
        self.gpa.parse().unwrap_or(f64::NAN)
    }

    /// Honors classification of the rounded GPA.
    pub fn class(&self) -> &'static str {
        classify(self.value())
    }
}
