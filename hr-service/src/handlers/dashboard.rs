//! HR dashboard handler

use payroll_risk_core::{annotate, risk_count, RiskAnnotation};
use serde::Serialize;

use crate::models::{AttendanceRecord, Employee, PayrollRecord};
use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct HrDashboard {
    pub total_employees: usize,
    pub pending_payroll: usize,
    /// Integer part of the mean salary; a missing salary counts as 0
    pub avg_salary: i64,
    pub risk_count: usize,
    pub predictions: Vec<RiskAnnotation>,
    pub employees: Vec<Employee>,
    pub payroll: Vec<PayrollRecord>,
    pub attendance: Vec<AttendanceRecord>,
}

/// Build the HR dashboard summary
pub fn hr_dashboard(state: &AppState) -> AppResult<HrDashboard> {
    let employees = Employee::list(&state.store)?;
    let payroll = PayrollRecord::list(&state.store)?;
    let attendance = AttendanceRecord::list(&state.store)?;

    let total_employees = employees.len();
    let pending_payroll = payroll.iter().filter(|p| p.is_pending()).count();
    let avg_salary = average_salary(&employees);

    let predictions = annotate(&state.model, &employees);
    let risk_count = risk_count(&predictions);

    tracing::debug!(total_employees, risk_count, "Dashboard built");

    Ok(HrDashboard {
        total_employees,
        pending_payroll,
        avg_salary,
        risk_count,
        predictions,
        employees,
        payroll,
        attendance,
    })
}

fn average_salary(employees: &[Employee]) -> i64 {
    let total: i64 = employees.iter().map(|e| e.salary.unwrap_or(0)).sum();
    (total as f64 / employees.len().max(1) as f64) as i64
}
