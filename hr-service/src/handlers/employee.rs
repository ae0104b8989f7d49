//! Employee detail handler

use payroll_risk_core::{score, Prediction};
use serde::Serialize;

use crate::models::{AttendanceRecord, Employee, PayrollRecord};
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct EmployeeView {
    pub employee: Employee,
    pub payroll: Vec<PayrollRecord>,
    /// Oldest first
    pub attendance: Vec<AttendanceRecord>,
    pub prediction: Prediction,
}

/// Get one employee with payroll, attendance and risk
pub fn employee_view(state: &AppState, employee_id: &str) -> AppResult<EmployeeView> {
    let employee = Employee::find_by_employee_id(&state.store, employee_id)?
        .ok_or_else(|| AppError::NotFound(format!("Employee {employee_id}")))?;

    let payroll = PayrollRecord::for_employee(&state.store, employee_id)?;
    let attendance = AttendanceRecord::for_employee(&state.store, employee_id)?;
    let prediction = score(&state.model, &employee.to_attributes());

    Ok(EmployeeView {
        employee,
        payroll,
        attendance,
        prediction,
    })
}
