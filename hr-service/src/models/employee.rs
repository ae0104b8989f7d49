//! Employee model

use payroll_risk_core::{EmployeeAttributes, EmployeeSource, RiskSubject, SourceError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::db::DocumentStore;
use crate::error::AppResult;

pub const EMPLOYEES: &str = "employees";

/// Stored employee record. Everything but the id and name may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub salary: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub tenure_years: Option<i64>,
    #[serde(default)]
    pub performance: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub absence_count: Option<i64>,
    #[serde(default)]
    pub salary_pending: Option<bool>,
}

impl Employee {
    pub fn list(store: &DocumentStore) -> AppResult<Vec<Self>> {
        store.find_all(EMPLOYEES)
    }

    pub fn find_by_employee_id(store: &DocumentStore, employee_id: &str) -> AppResult<Option<Self>> {
        store.find_one_by(EMPLOYEES, "employee_id", employee_id)
    }

    pub fn count(store: &DocumentStore) -> AppResult<i64> {
        store.count(EMPLOYEES)
    }

    pub fn insert_many(store: &mut DocumentStore, employees: &[Self]) -> AppResult<usize> {
        store.insert_many(EMPLOYEES, employees)
    }

    pub fn to_attributes(&self) -> EmployeeAttributes {
        EmployeeAttributes {
            tenure_years: self.tenure_years,
            salary: self.salary,
            performance: self.performance.clone(),
            absence_count: self.absence_count,
            salary_pending: self.salary_pending,
        }
    }
}

/// Accept integers, floats and numeric strings the way loosely typed writers
/// store them. Floats truncate toward zero; anything else reads as absent.
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_i64))
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_f64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_f64))
        }
        _ => None,
    }
}

fn truncate_f64(f: f64) -> Option<i64> {
    let t = f.trunc();
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

impl RiskSubject for Employee {
    fn subject_id(&self) -> &str {
        &self.employee_id
    }

    fn subject_name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> EmployeeAttributes {
        self.to_attributes()
    }
}

impl EmployeeSource for DocumentStore {
    fn all_employees(&self) -> Result<Vec<EmployeeAttributes>, SourceError> {
        let employees = Employee::list(self).map_err(|e| Box::new(e) as SourceError)?;
        Ok(employees.iter().map(Employee::to_attributes).collect())
    }
}
