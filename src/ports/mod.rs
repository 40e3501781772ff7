//! Port traits at the boundary of the core.

pub mod config_port;
pub mod data_port;
pub mod report_port;
