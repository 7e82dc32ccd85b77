//! Row records and the schedule CSV decoder.
//!
//! [`decode()`] is a deliberately naive line/comma splitter that mirrors how
//! published schedules have always been read: every field is trimmed and has
//! its `"` characters removed, and short lines are padded with empty cells.
//!
//! Known limitation: commas inside quoted fields and newlines inside quoted
//! fields are not supported. A quoted `"Smith, J"` becomes two cells. Switching
//! to a full RFC 4180 reader would change which column such values land in, so
//! the splitter is kept as is.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One schedule record: column name to cell value, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `column`, matched exactly.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    // A repeated column keeps its first position and takes the newest value.
    fn insert(&mut self, column: String, value: String) {
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.insert(column.into(), value.into());
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Decodes CSV text into rows keyed by the header line.
///
/// Input with no data line (empty, or a header only) yields no rows.
pub fn decode(text: &str) -> Vec<Row> {
    let mut lines = text.trim().split('\n');
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = split_fields(header_line);
    lines
        .map(|line| {
            let values = split_fields(line);
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = values.get(idx).cloned().unwrap_or_default();
                    (header.clone(), value)
                })
                .collect()
        })
        .collect()
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| field.trim().replace('"', ""))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_fields_trims_before_unquoting() {
        assert_eq!(split_fields(r#" " a " ,b"#), vec![" a ", "b"]);
    }

    #[test]
    fn split_fields_handles_carriage_returns() {
        assert_eq!(split_fields("x,y\r"), vec!["x", "y"]);
    }
}
