//! Data models for backend checks
//!
//! This module contains all data structures used throughout the application.

mod check_result;
mod status_check;

pub use check_result::{CheckCase, CheckResult, CheckStatus, RunSummary};
pub use status_check::{
    json_type_name, missing_required_field, StatusCheckCreate, PROBE_CLIENT_NAME,
    REQUIRED_FIELDS,
};
