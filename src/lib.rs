//! Credit intake and analysis workflows for a cooperative lender.
//!
//! The scoring engine lives in [`workflows::credit::analysis`]; the intake
//! service, HTTP boundary, and 5C review tracking sit around it.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
