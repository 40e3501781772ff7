//! Core domain types and logic.

pub mod bar;
pub mod indicator;
pub mod engine;
pub mod signal;
pub mod simulator;
pub mod report;
pub mod config_validation;
pub mod error;
