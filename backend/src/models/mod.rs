//! Response models for the Weather Health Alerts service
//!
//! Re-exports models from the shared crate and adds the HTTP envelopes

mod report;

pub use report::*;
pub use shared::models::*;
