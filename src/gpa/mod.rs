//! GPA computation and honors classification.
//!
//! Course rows are filtered by grade and by the user's exclusion list,
//! weighted by the credit digit embedded in each course code, and averaged.
//! The resulting GPA is mapped onto an honors band.

pub mod evaluator;
pub mod grade;
pub mod types;

pub use evaluator::{EvaluationError, SkipReason, evaluate};
pub use grade::{classify, credit_from_code, grade_point};
pub use types::{CourseRecord, ExclusionSet, GpaResult};
