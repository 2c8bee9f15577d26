use gpa_rater::config::resolve_exclusions;
use gpa_rater::gpa::{EvaluationError, ExclusionSet, classify, evaluate};
use gpa_rater::parser::parse_sheet;

const FIXTURE: &[u8] = include_bytes!("fixtures/results.csv");

#[test]
fn test_full_pipeline() {
    let rows = parse_sheet(FIXTURE).expect("Failed to parse result sheet");
    assert_eq!(rows.len(), 8);

    // Counted: CS1013 A (1), CS2024 B+ (2), MA1013 A- (1), MA2013 C+ (1), PH1012 Z (1)
    let result = evaluate(&rows, &ExclusionSet::new()).unwrap();
    assert_eq!(result.total_credits, 6);
    assert_eq!(result.gpa, "2.767");
    assert_eq!(result.class(), "General Pass");
}

#[test]
fn test_pipeline_with_exclusions() {
    let rows = parse_sheet(FIXTURE).unwrap();
    let excluded = resolve_exclusions(Some(" ph1012 , MA2013,cs2024"), None).unwrap();

    let result = evaluate(&rows, &excluded).unwrap();
    assert_eq!(result.total_credits, 2);
    assert_eq!(result.gpa, "3.850");
    assert_eq!(classify(result.value()), "First Class");
}

#[test]
fn test_pipeline_everything_excluded() {
    let rows = parse_sheet(FIXTURE).unwrap();
    let excluded = ExclusionSet::parse("CS1013,CS2024,MA1013,MA2013,PH1012");

    assert_eq!(
        evaluate(&rows, &excluded),
        Err(EvaluationError::NoQualifyingCourses)
    );
}

#[test]
fn test_xlsx_pipeline() {
    let bytes = include_bytes!("fixtures/results.xlsx");
    let rows = parse_sheet(bytes).expect("Failed to parse workbook");

    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].course_code(), Some("CS1013"));
    assert_eq!(rows[0].get("Course Title"), Some("Programming Fundamentals"));
    // numeric cells render without a trailing ".0"
    assert_eq!(rows[0].get("Credits"), Some("3"));
    assert_eq!(rows[2].grade(), Some("P"));

    // Counted: CS1013 A (1), CS2024 B+ (2), MA1013 A- (1), MA2013 C+ (1)
    let result = evaluate(&rows, &ExclusionSet::new()).unwrap();
    assert_eq!(result.total_credits, 5);
    assert_eq!(result.gpa, "3.320");
    assert_eq!(result.class(), "Second Class Upper");
}
