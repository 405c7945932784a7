//! Payroll cost engine for Mexican payroll
//!
//! This crate computes, from a gross salary, the employer's total cost and
//! the employee's net pay: progressive ISR, IMSS/SAR/INFONAVIT
//! contributions, state payroll tax, mandatory benefits, and optional
//! employer-paid extras, in any pay period and annualized.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod models;
pub mod precision;
