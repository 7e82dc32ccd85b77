//! Turns filtered rows into the week grid shown to the user.

use chrono::NaiveDate;

use crate::{
    dataset::is_week_start_column,
    dates::{day_header_parts, day_identifier},
    filter::Category,
    rows::Row,
};

const HIGHLIGHT_DESIGNATION: &str = "store manager";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub cells: Vec<String>,
    pub highlight: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleGrid {
    pub headers: Vec<String>,
    pub rows: Vec<GridRow>,
}

impl ScheduleGrid {
    /// Builds the grid for `rows`, titling weekday columns with the matching
    /// date from `week_days`.
    pub fn build(rows: &[&Row], week_days: &[NaiveDate]) -> Self {
        let Some(first) = rows.first() else {
            return Self::default();
        };
        let columns = first
            .columns()
            .filter(|name| !is_week_start_column(name))
            .map(str::to_string)
            .collect::<Vec<_>>();
        let identifiers = week_days
            .iter()
            .map(|day| day_identifier(*day))
            .collect::<Vec<_>>();

        let headers = columns
            .iter()
            .map(|column| column_title(column, week_days, &identifiers))
            .collect();
        let rows = rows
            .iter()
            .map(|row| GridRow {
                cells: columns
                    .iter()
                    .map(|column| row.get(column).unwrap_or_default().to_string())
                    .collect(),
                highlight: is_store_manager(row),
            })
            .collect();
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn column_title(column: &str, week_days: &[NaiveDate], identifiers: &[String]) -> String {
    let lowered = column.to_lowercase();
    match identifiers.iter().position(|id| *id == lowered) {
        Some(idx) => {
            let parts = day_header_parts(week_days[idx]);
            format!("{} {}", parts.day, parts.date)
        }
        None => column.replace('_', " "),
    }
}

fn is_store_manager(row: &Row) -> bool {
    row.get(Category::Designation.column())
        .is_some_and(|value| value.to_lowercase().contains(HIGHLIGHT_DESIGNATION))
}
