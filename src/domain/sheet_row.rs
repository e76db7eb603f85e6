use chrono::{DateTime, SecondsFormat, Utc};

use super::normalize::normalize;
use super::submission::{FormSubmission, FIXED_FIELDS};

/// One spreadsheet row: timestamp, fixed fields, then every other submitted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow(Vec<String>);

impl SheetRow {
    pub fn from_submission(submission: &FormSubmission, received_at: DateTime<Utc>) -> Self {
        let mut cells = Vec::with_capacity(1 + FIXED_FIELDS.len() + submission.len());

        cells.push(format_timestamp(received_at));
        cells.extend(
            FIXED_FIELDS
                .iter()
                .map(|field| normalize(submission.get(field))),
        );
        cells.extend(
            submission
                .extra_fields()
                .map(|(_, value)| normalize(Some(value))),
        );

        SheetRow(cells)
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn timestamp(&self) -> &str {
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
