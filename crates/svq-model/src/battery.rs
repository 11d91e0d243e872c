use serde::{Deserialize, Serialize};

/// A group of dataset columns believed to hold the items of one rating
/// battery. Groups are only formed with at least four columns; smaller grids
/// give too many coincidental straight lines to be usable evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryGroup {
    /// Question code or shared column prefix the group was derived from.
    pub code: String,
    /// Dataset column names, in dataset order.
    pub columns: Vec<String>,
}

impl BatteryGroup {
    pub fn new(code: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            code: code.into(),
            columns,
        }
    }

    pub fn item_count(&self) -> usize {
        self.columns.len()
    }
}
