//! Attendance model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::DocumentStore;
use crate::error::AppResult;

pub const ATTENDANCE: &str = "attendance";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn list(store: &DocumentStore) -> AppResult<Vec<Self>> {
        store.find_all(ATTENDANCE)
    }

    /// Records for one employee, oldest first. ISO dates sort lexically.
    pub fn for_employee(store: &DocumentStore, employee_id: &str) -> AppResult<Vec<Self>> {
        store.find_by_sorted(ATTENDANCE, "employee_id", employee_id, "date")
    }

    pub fn count(store: &DocumentStore) -> AppResult<i64> {
        store.count(ATTENDANCE)
    }

    pub fn insert_many(store: &mut DocumentStore, records: &[Self]) -> AppResult<usize> {
        store.insert_many(ATTENDANCE, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: "E101".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
            status,
        }
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(record(3, AttendanceStatus::Absent)).unwrap();
        assert_eq!(json["date"], "2025-09-03");
        assert_eq!(json["status"], "absent");
    }

    #[test]
    fn test_for_employee_sorted_by_date() {
        let mut store = DocumentStore::open_in_memory().unwrap();
        AttendanceRecord::insert_many(
            &mut store,
            &[
                record(10, AttendanceStatus::Present),
                record(2, AttendanceStatus::Absent),
                record(5, AttendanceStatus::Present),
            ],
        )
        .unwrap();

        let days: Vec<u32> = AttendanceRecord::for_employee(&store, "E101")
            .unwrap()
            .iter()
            .map(|r| chrono::Datelike::day(&r.date))
            .collect();
        assert_eq!(days, vec![2, 5, 10]);
    }
}
