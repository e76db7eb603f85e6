use google_sheets4::api::ValueRange;
use serde_json::Value;

use crate::domain::SheetRow;

pub const ROWS_DIMENSION: &str = "ROWS";

pub trait ValueRangeFactory {
    fn from_sheet_row(row: &SheetRow) -> Self;
}

impl ValueRangeFactory for ValueRange {
    /// A single row of string cells. The target range is left to the append call.
    fn from_sheet_row(row: &SheetRow) -> Self {
        let cells = row.cells().iter().cloned().map(Value::String).collect();

        Self {
            major_dimension: Some(ROWS_DIMENSION.to_string()),
            range: None,
            values: Some(vec![cells]),
        }
    }
}
