use chrono::NaiveDate;
use serde::Serialize;

use crate::{dates::parse_flexible_date, rows::Row};

/// Column whose first value names the week a sheet describes.
pub const WEEK_START_COLUMN: &str = "WEEK_START_DATE";

/// Rows from one fetch plus the week date the sheet declares, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub rows: Vec<Row>,
    pub week_start_date: Option<NaiveDate>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        let week_start_date = resolve_week_start(&rows);
        Self {
            rows,
            week_start_date,
        }
    }

    pub fn from_csv(text: &str) -> Self {
        Self::new(crate::rows::decode(text))
    }

    /// Column names in header order, taken from the first row.
    pub fn headers(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.columns().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn is_week_start_column(name: &str) -> bool {
    name.trim().to_uppercase() == WEEK_START_COLUMN
}

/// Reads the week date from the first row only; later rows are ignored.
pub fn resolve_week_start(rows: &[Row]) -> Option<NaiveDate> {
    let first = rows.first()?;
    let column = first.columns().find(|name| is_week_start_column(name))?;
    first
        .get(column)
        .filter(|value| !value.is_empty())
        .and_then(parse_flexible_date)
}
