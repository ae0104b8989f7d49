//! Training table construction

use serde::{Deserialize, Serialize};

use crate::constants::MIN_TRAINING_ROWS;
use crate::logic::features::{derive_features, EmployeeAttributes, FeatureVector, FEATURE_COUNT};
use crate::logic::labels::{HeuristicLabelPolicy, LabelPolicy};

/// One (features, label) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub features: FeatureVector,
    pub label: bool,
}

/// Where the rows of a table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSource {
    Employees,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingTable {
    rows: Vec<TrainingRow>,
    source: TableSource,
    label_policy: &'static str,
}

/// Label policy name reported for the fallback table
pub const FALLBACK_POLICY: &str = "fallback-table";

impl TrainingTable {
    pub fn new(rows: Vec<TrainingRow>, source: TableSource, label_policy: &'static str) -> Self {
        Self {
            rows,
            source,
            label_policy,
        }
    }

    /// The hand-authored table used when real data is too sparse
    pub fn fallback() -> Self {
        let rows = FALLBACK_ROWS
            .iter()
            .map(|&(tenure, salary, perf, absence, label)| TrainingRow {
                features: FeatureVector::new(tenure, salary, perf, absence),
                label,
            })
            .collect();

        Self::new(rows, TableSource::Fallback, FALLBACK_POLICY)
    }

    pub fn rows(&self) -> &[TrainingRow] {
        &self.rows
    }

    pub fn source(&self) -> TableSource {
        self.source
    }

    pub fn label_policy(&self) -> &'static str {
        self.label_policy
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn positive_count(&self) -> usize {
        self.rows.iter().filter(|r| r.label).count()
    }

    /// Feature matrix in layout order
    pub fn feature_matrix(&self) -> Vec<[f64; FEATURE_COUNT]> {
        self.rows.iter().map(|r| r.features.to_f64()).collect()
    }

    pub fn labels(&self) -> Vec<bool> {
        self.rows.iter().map(|r| r.label).collect()
    }
}

/// (tenure, salary, performance_score, absence, label); covers both classes
const FALLBACK_ROWS: [(i64, i64, i64, i64, bool); 8] = [
    (1, 30_000, 2, 0, false),
    (2, 40_000, 3, 1, false),
    (3, 50_000, 1, 6, true),
    (4, 45_000, 2, 2, false),
    (5, 35_000, 3, 0, false),
    (6, 60_000, 1, 7, true),
    (2, 32_000, 0, 4, true),
    (3, 41_000, 2, 1, false),
];

/// Build the table with the heuristic label policy
pub fn build_training_table(employees: &[EmployeeAttributes]) -> TrainingTable {
    build_training_table_with(employees, &HeuristicLabelPolicy)
}

/// Build the table with an arbitrary label policy.
///
/// Fewer than `MIN_TRAINING_ROWS` derived rows are replaced by the fallback
/// table, so the result is never empty.
pub fn build_training_table_with(
    employees: &[EmployeeAttributes],
    policy: &dyn LabelPolicy,
) -> TrainingTable {
    let rows: Vec<TrainingRow> = employees
        .iter()
        .map(|attrs| TrainingRow {
            features: derive_features(attrs),
            label: policy.label(attrs),
        })
        .collect();

    if rows.len() < MIN_TRAINING_ROWS {
        log::info!(
            "Only {} employee rows (< {}), using fallback training table",
            rows.len(),
            MIN_TRAINING_ROWS
        );
        return TrainingTable::fallback();
    }

    let table = TrainingTable::new(rows, TableSource::Employees, policy.name());
    log::debug!(
        "Built training table: {} rows, {} at-risk ({})",
        table.len(),
        table.positive_count(),
        table.label_policy()
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::Performance;
    use crate::logic::labels::synthesize_label;

    fn sample_employees(n: usize) -> Vec<EmployeeAttributes> {
        (0..n)
            .map(|i| {
                let perf = Performance::ALL[i % 4];
                EmployeeAttributes::new(
                    (i % 11) as i64,
                    30_000 + (i % 7) as i64 * 5_000,
                    perf,
                    (i % 9) as i64,
                    i % 4 == 3,
                )
            })
            .collect()
    }

    #[test]
    fn test_small_input_uses_fallback() {
        let table = build_training_table(&sample_employees(3));
        assert_eq!(table.len(), 8);
        assert_eq!(table.source(), TableSource::Fallback);
        assert_eq!(table.label_policy(), FALLBACK_POLICY);
        assert_eq!(table, TrainingTable::fallback());
    }

    #[test]
    fn test_empty_input_uses_fallback() {
        let table = build_training_table(&[]);
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_fallback_covers_both_classes() {
        let table = TrainingTable::fallback();
        assert_eq!(table.positive_count(), 3);
        assert_eq!(table.rows()[2].features, FeatureVector::new(3, 50_000, 1, 6));
        assert!(table.rows()[2].label);
    }

    #[test]
    fn test_full_input_is_row_per_employee() {
        let employees = sample_employees(20);
        let table = build_training_table(&employees);

        assert_eq!(table.len(), 20);
        assert_eq!(table.source(), TableSource::Employees);

        for (row, attrs) in table.rows().iter().zip(&employees) {
            assert_eq!(row.features, derive_features(attrs));
            assert_eq!(row.label, synthesize_label(attrs));
        }
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(build_training_table(&sample_employees(4)).source(), TableSource::Fallback);
        assert_eq!(build_training_table(&sample_employees(5)).source(), TableSource::Employees);
    }

    struct NeverAtRisk;

    impl LabelPolicy for NeverAtRisk {
        fn name(&self) -> &'static str {
            "never"
        }

        fn label(&self, _attrs: &EmployeeAttributes) -> bool {
            false
        }
    }

    #[test]
    fn test_custom_policy() {
        let table = build_training_table_with(&sample_employees(10), &NeverAtRisk);
        assert_eq!(table.len(), 10);
        assert_eq!(table.positive_count(), 0);
        assert_eq!(table.label_policy(), "never");
    }
}
