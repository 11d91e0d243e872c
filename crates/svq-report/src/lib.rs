//! Screening result outputs.
//!
//! Two artifacts per run: an SPSS-style exclusion syntax file the analyst
//! executes against the data, and a versioned JSON report for tooling.

mod json_report;
mod syntax;

pub use json_report::{ScreeningReportPayload, write_screening_report_json};
pub use syntax::{SyntaxOptions, generate_exclusion_syntax, write_exclusion_syntax};
