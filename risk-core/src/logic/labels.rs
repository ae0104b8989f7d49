//! Training label policies.
//!
//! No historical payroll outcomes exist, so labels are synthesized from the
//! same attributes the model sees. The heuristic below is a placeholder
//! ground truth; a policy backed by real outcomes can replace it by
//! implementing `LabelPolicy`.

use crate::constants::{ABSENCE_RISK_THRESHOLD, PERFORMANCE_RISK_CEILING};
use crate::logic::features::EmployeeAttributes;

/// Produces the at-risk label for one employee
pub trait LabelPolicy {
    /// Name recorded in model metadata
    fn name(&self) -> &'static str;

    fn label(&self, attrs: &EmployeeAttributes) -> bool;
}

/// At-risk when salary is pending, absences reach 5, or performance is
/// "Below Average"
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicLabelPolicy;

impl LabelPolicy for HeuristicLabelPolicy {
    fn name(&self) -> &'static str {
        "heuristic-v1"
    }

    fn label(&self, attrs: &EmployeeAttributes) -> bool {
        synthesize_label(attrs)
    }
}

pub fn synthesize_label(attrs: &EmployeeAttributes) -> bool {
    attrs.is_salary_pending()
        || attrs.absence_count.unwrap_or(0) >= ABSENCE_RISK_THRESHOLD
        || attrs.performance_score() <= PERFORMANCE_RISK_CEILING
}
