//! Raw employee attributes as read from the employee store.
//!
//! Every field is optional because store documents may omit any of them;
//! defaults are applied by the deriver, not here.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PERFORMANCE_SCORE;

/// Performance rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Performance {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

impl Performance {
    pub const ALL: [Performance; 4] = [
        Performance::Excellent,
        Performance::Good,
        Performance::Average,
        Performance::BelowAverage,
    ];

    /// Parse the label stored on employee records
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Excellent" => Some(Self::Excellent),
            "Good" => Some(Self::Good),
            "Average" => Some(Self::Average),
            "Below Average" => Some(Self::BelowAverage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::BelowAverage => "Below Average",
        }
    }

    pub fn score(&self) -> i64 {
        match self {
            Self::Excellent => 3,
            Self::Good => 2,
            Self::Average => 1,
            Self::BelowAverage => 0,
        }
    }

    /// Score for an arbitrary label; unknown labels count as "Average"
    pub fn score_label(label: Option<&str>) -> i64 {
        label
            .and_then(Self::from_label)
            .map(|p| p.score())
            .unwrap_or(DEFAULT_PERFORMANCE_SCORE)
    }
}

impl std::fmt::Display for Performance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee attributes consumed by the deriver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAttributes {
    #[serde(default)]
    pub tenure_years: Option<i64>,
    #[serde(default)]
    pub salary: Option<i64>,
    /// Raw label, kept as text so unrecognized values reach the deriver
    #[serde(default)]
    pub performance: Option<String>,
    #[serde(default)]
    pub absence_count: Option<i64>,
    #[serde(default)]
    pub salary_pending: Option<bool>,
}

impl EmployeeAttributes {
    /// Fully populated attributes
    pub fn new(
        tenure_years: i64,
        salary: i64,
        performance: Performance,
        absence_count: i64,
        salary_pending: bool,
    ) -> Self {
        Self {
            tenure_years: Some(tenure_years),
            salary: Some(salary),
            performance: Some(performance.as_str().to_string()),
            absence_count: Some(absence_count),
            salary_pending: Some(salary_pending),
        }
    }

    pub fn performance_score(&self) -> i64 {
        Performance::score_label(self.performance.as_deref())
    }

    pub fn is_salary_pending(&self) -> bool {
        self.salary_pending.unwrap_or(false)
    }
}
