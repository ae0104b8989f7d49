//! Payroll model

use serde::{Deserialize, Serialize};

use crate::db::DocumentStore;
use crate::error::AppResult;

pub const PAYROLL: &str = "payroll";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    Processed,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub employee_id: String,
    /// "YYYY-MM"
    pub month: String,
    pub amount: i64,
    pub status: PayrollStatus,
}

impl PayrollRecord {
    pub fn list(store: &DocumentStore) -> AppResult<Vec<Self>> {
        store.find_all(PAYROLL)
    }

    pub fn for_employee(store: &DocumentStore, employee_id: &str) -> AppResult<Vec<Self>> {
        store.find_by(PAYROLL, "employee_id", employee_id)
    }

    pub fn count(store: &DocumentStore) -> AppResult<i64> {
        store.count(PAYROLL)
    }

    pub fn insert_many(store: &mut DocumentStore, records: &[Self]) -> AppResult<usize> {
        store.insert_many(PAYROLL, records)
    }

    pub fn is_pending(&self) -> bool {
        self.status == PayrollStatus::Pending
    }
}
