use crate::gpa::grade::{credit_from_code, grade_point, is_non_countable, lookup_grade_point};
use crate::gpa::types::{CourseRecord, ExclusionSet, GpaResult};
use thiserror::Error;
use tracing::{debug, warn};

/// Raised when no row survives filtering, so no average exists.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Error: No GPA courses available or data is invalid")]
    NoQualifyingCourses,
}

/// Why a row was left out of the average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty, dash, or pending/withdrawn/pass-only grade.
    NonCountableGrade,
    /// Course code is in the user's exclusion list.
    Excluded,
    /// Course code does not carry a credit digit at index 4.
    NoCredit,
}

/// Computes the credit-weighted GPA of `rows`.
///
/// Rows with a non-countable grade, an excluded course code, or no credit
/// digit are skipped. Grades off the scale still count, at 0.0 points.
///
/// # Errors
///
/// Returns [`EvaluationError::NoQualifyingCourses`] when no credits accumulate.
pub fn evaluate(rows: &[CourseRecord], excluded: &ExclusionSet) -> Result<GpaResult, EvaluationError> {
    let mut total_credits = 0u32;
    let mut weighted_points = 0.0;

    for (index, row) in rows.iter().enumerate() {
        let code = row.course_code().unwrap_or_default().to_uppercase();
        let grade = row.grade().unwrap_or_default();

        let (point, credit) = match qualify(&code, grade, excluded) {
            Ok(counted) => counted,
            Err(reason) => {
                debug!(row = index, code = %code, grade, ?reason, "Row skipped");
                continue;
            }
        };

        if lookup_grade_point(grade).is_none() {
            warn!(row = index, code = %code, grade, "Unrecognized grade counted as 0.0");
        }

        total_credits += credit;
        weighted_points += point * credit as f64;
    }

    if total_credits == 0 {
        return Err(EvaluationError::NoQualifyingCourses);
    }

    let gpa = weighted_points / total_credits as f64;
    debug!(total_credits, weighted_points, gpa, "GPA computed");

    Ok(GpaResult {
        gpa: fixed3(gpa),
        total_credits,
    })
}

/// Applies the filtering rules to one row, yielding its grade point and credit.
fn qualify(code: &str, grade: &str, excluded: &ExclusionSet) -> Result<(f64, u32), SkipReason> {
    if is_non_countable(grade) {
        return Err(SkipReason::NonCountableGrade);
    }
    if excluded.contains(code) {
        return Err(SkipReason::Excluded);
    }
    let credit = credit_from_code(code).ok_or(SkipReason::NoCredit)?;

    Ok((grade_point(grade), credit))
}

/// Formats to three decimals from the exact binary value, rounding exact
/// halves away from zero.
///
/// A double lies exactly halfway between two thousandths only when it is an
/// odd number of sixteenths, and `value * 16.0` is exact, so that case is
/// detected without rounding error. Every other value already formats
/// correctly with `{:.3}`.
fn fixed3(value: f64) -> String {
    let sixteenths = value * 16.0;
    if sixteenths.fract() == 0.0 && sixteenths.abs() % 2.0 == 1.0 {
        let thousandths = (sixteenths.abs() as u64 * 125 + 1) / 2;
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{}.{:03}", thousandths / 1000, thousandths % 1000);
    }
    format!("{value:.3}")
}
