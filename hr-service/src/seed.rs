//! Sample data for an empty store
//!
//! Each collection is only filled when it is empty, so running the seeder
//! against a populated store is a no-op.

use chrono::NaiveDate;
use payroll_risk_core::constants::DEFAULT_SALARY;
use payroll_risk_core::Performance;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::db::DocumentStore;
use crate::error::AppResult;
use crate::models::{
    AttendanceRecord, AttendanceStatus, Employee, PayrollRecord, PayrollStatus,
};

pub const SAMPLE_EMPLOYEES: usize = 20;
pub const SAMPLE_MONTH: &str = "2025-09";
pub const ATTENDANCE_DAYS: u32 = 10;

const DEPARTMENTS: [&str; 6] = ["Sales", "HR", "Dev", "Support", "Finance", "Marketing"];
const SALARIES: [i64; 7] = [30_000, 35_000, 40_000, 45_000, 50_000, 55_000, 60_000];

/// Documents inserted by one seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub employees: usize,
    pub payroll: usize,
    pub attendance: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.employees == 0 && self.payroll == 0 && self.attendance == 0
    }
}

pub fn seed_sample_data<R: Rng + ?Sized>(
    store: &mut DocumentStore,
    rng: &mut R,
) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    if Employee::count(store)? == 0 {
        let employees: Vec<Employee> = (1..=SAMPLE_EMPLOYEES)
            .map(|i| sample_employee(i, rng))
            .collect();
        report.employees = Employee::insert_many(store, &employees)?;
    }

    // Payroll and attendance follow whatever employees are stored
    if PayrollRecord::count(store)? == 0 {
        let payroll: Vec<PayrollRecord> = Employee::list(store)?
            .into_iter()
            .map(|e| PayrollRecord {
                amount: e.salary.unwrap_or(DEFAULT_SALARY),
                employee_id: e.employee_id,
                month: SAMPLE_MONTH.to_string(),
                status: if rng.gen_bool(0.5) {
                    PayrollStatus::Processed
                } else {
                    PayrollStatus::Pending
                },
            })
            .collect();
        report.payroll = PayrollRecord::insert_many(store, &payroll)?;
    }

    if AttendanceRecord::count(store)? == 0 {
        let mut attendance = Vec::new();
        for employee in Employee::list(store)? {
            for day in 1..=ATTENDANCE_DAYS {
                let Some(date) = NaiveDate::from_ymd_opt(2025, 9, day) else {
                    continue;
                };
                attendance.push(AttendanceRecord {
                    employee_id: employee.employee_id.clone(),
                    date,
                    status: if rng.gen_bool(0.2) {
                        AttendanceStatus::Absent
                    } else {
                        AttendanceStatus::Present
                    },
                });
            }
        }
        report.attendance = AttendanceRecord::insert_many(store, &attendance)?;
    }

    if report.is_empty() {
        tracing::debug!("Store already populated, nothing seeded");
    } else {
        tracing::info!(
            employees = report.employees,
            payroll = report.payroll,
            attendance = report.attendance,
            "Seeded sample data"
        );
    }

    Ok(report)
}

fn sample_employee<R: Rng + ?Sized>(i: usize, rng: &mut R) -> Employee {
    Employee {
        employee_id: format!("E{:03}", 100 + i),
        name: format!("Employee {i}"),
        department: DEPARTMENTS.choose(rng).map(|d| d.to_string()),
        salary: SALARIES.choose(rng).copied(),
        tenure_years: Some(rng.gen_range(0..=10)),
        performance: Performance::ALL.choose(rng).map(|p| p.as_str().to_string()),
        absence_count: Some(rng.gen_range(0..=8)),
        salary_pending: Some(rng.gen_bool(0.25)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seed_counts() {
        let mut store = DocumentStore::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let report = seed_sample_data(&mut store, &mut rng).unwrap();

        assert_eq!(
            report,
            SeedReport {
                employees: 20,
                payroll: 20,
                attendance: 200,
            }
        );
        assert_eq!(Employee::count(&store).unwrap(), 20);
        assert_eq!(PayrollRecord::count(&store).unwrap(), 20);
        assert_eq!(AttendanceRecord::count(&store).unwrap(), 200);
    }

    #[test]
    fn test_seed_is_idempotent() {
        let mut store = DocumentStore::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        seed_sample_data(&mut store, &mut rng).unwrap();
        let second = seed_sample_data(&mut store, &mut rng).unwrap();

        assert!(second.is_empty());
        assert_eq!(Employee::count(&store).unwrap(), 20);
    }

    #[test]
    fn test_seeded_values_in_range() {
        let mut store = DocumentStore::open_in_memory().unwrap();
        seed_sample_data(&mut store, &mut StdRng::seed_from_u64(11)).unwrap();

        let employees = Employee::list(&store).unwrap();
        assert_eq!(employees[0].employee_id, "E101");
        assert_eq!(employees[19].employee_id, "E120");
        assert_eq!(employees[19].name, "Employee 20");

        for e in &employees {
            assert!(SALARIES.contains(&e.salary.unwrap()));
            assert!((0..=10).contains(&e.tenure_years.unwrap()));
            assert!((0..=8).contains(&e.absence_count.unwrap()));
            assert!(Performance::from_label(e.performance.as_deref().unwrap()).is_some());
        }

        let payroll = PayrollRecord::list(&store).unwrap();
        for (record, employee) in payroll.iter().zip(&employees) {
            assert_eq!(record.employee_id, employee.employee_id);
            assert_eq!(Some(record.amount), employee.salary);
            assert_eq!(record.month, SAMPLE_MONTH);
        }
    }

    #[test]
    fn test_related_collections_follow_existing_employees() {
        let mut store = DocumentStore::open_in_memory().unwrap();
        let only = Employee {
            employee_id: "E500".to_string(),
            name: "Solo".to_string(),
            department: None,
            salary: None,
            tenure_years: None,
            performance: None,
            absence_count: None,
            salary_pending: None,
        };
        Employee::insert_many(&mut store, &[only]).unwrap();

        let report = seed_sample_data(&mut store, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(report.employees, 0);
        assert_eq!(report.payroll, 1);
        assert_eq!(report.attendance, 10);
        assert_eq!(PayrollRecord::list(&store).unwrap()[0].amount, DEFAULT_SALARY);
    }
}
