//! Command handlers

pub mod dashboard;
pub mod employee;
pub mod predict;
pub mod model;
