//! Data models

pub mod employee;
pub mod payroll;
pub mod attendance;

pub use employee::*;
pub use payroll::*;
pub use attendance::*;
