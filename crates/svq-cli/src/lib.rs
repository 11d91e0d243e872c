//! CLI library components for the survey quality screener.

pub mod logging;
