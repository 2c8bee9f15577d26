/// Grade points for each recognized letter grade. Lookups are case-sensitive.
static GRADE_POINTS: &[(&str, f64)] = &[
    ("A+", 4.0),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("E", 0.0),
    ("F", 0.0),
];

/// Grade tokens that mark a result as not counting towards the GPA.
/// Compared case-insensitively.
static NON_COUNTABLE_GRADES: &[&str] = &["-", "pending", "rx", "fa", "n/a", "p"];

/// Lower bounds of each honors band, highest first.
///
/// | Range        | Class              |
/// |--------------|--------------------|
/// | >= 3.7       | First Class        |
/// | >= 3.3       | Second Class Upper |
/// | >= 3.0       | Second Class Lower |
/// | >= 2.0       | General Pass       |
/// | >= 0.0       | Below Pass         |
/// | < 0.0        | Invalid GPA        |
static CLASS_BANDS: &[(f64, &str)] = &[
    (3.7, "First Class"),
    (3.3, "Second Class Upper"),
    (3.0, "Second Class Lower"),
    (2.0, "General Pass"),
    (0.0, "Below Pass"),
];

const INVALID_CLASS: &str = "Invalid GPA";

/// Returns the full grade scale in table order.
pub fn grade_scale() -> &'static [(&'static str, f64)] {
    GRADE_POINTS
}

/// Looks up a recognized grade token, returning `None` for anything off the scale.
pub fn lookup_grade_point(grade: &str) -> Option<f64> {
    GRADE_POINTS
        .iter()
        .find(|(token, _)| *token == grade)
        .map(|(_, points)| *points)
}

/// Converts a letter grade into grade points. Unrecognized tokens count as 0.0.
pub fn grade_point(grade: &str) -> f64 {
    lookup_grade_point(grade).unwrap_or(0.0)
}

/// Returns `true` when the grade must not count towards the GPA:
/// an empty cell, a dash, or a pending/withdrawn/pass-only sentinel.
pub fn is_non_countable(grade: &str) -> bool {
    grade.is_empty()
        || NON_COUNTABLE_GRADES
            .iter()
            .any(|sentinel| grade.eq_ignore_ascii_case(sentinel))
}

/// Derives the credit weight encoded in a course code.
///
/// The weight is the fifth character (index 4) of the code read as a decimal
/// digit, so `CS2024` carries 2 credits. Codes shorter than five characters,
/// a non-digit in that position, or a zero digit yield `None`.
pub fn credit_from_code(code: &str) -> Option<u32> {
    code.chars()
        .nth(4)
        .and_then(|c| c.to_digit(10))
        .filter(|credit| *credit > 0)
}

/// Maps a GPA onto its honors classification.
pub fn classify(gpa: f64) -> &'static str {
    CLASS_BANDS
        .iter()
        .find(|(floor, _)| gpa >= *floor)
        .map(|(_, class)| *class)
        .unwrap_or(INVALID_CLASS)
}
