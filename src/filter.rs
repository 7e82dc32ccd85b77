//! Category filters over schedule rows.
//!
//! Four columns can be filtered. Within a category a row matches when its
//! value is one of the selected values; across categories every non-empty
//! selection must match. An empty selection does not restrict anything.

use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;

use crate::rows::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    #[serde(rename = "EMPLOYEE NAME")]
    EmployeeName,
    #[serde(rename = "STORE NAME")]
    StoreName,
    #[serde(rename = "DESIGNATION")]
    Designation,
    #[serde(rename = "NATIONALITY")]
    Nationality,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::EmployeeName,
        Category::StoreName,
        Category::Designation,
        Category::Nationality,
    ];

    /// Exact (case-sensitive) header the category reads.
    pub fn column(self) -> &'static str {
        match self {
            Category::EmployeeName => "EMPLOYEE NAME",
            Category::StoreName => "STORE NAME",
            Category::Designation => "DESIGNATION",
            Category::Nationality => "NATIONALITY",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::EmployeeName => "Employee Name",
            Category::StoreName => "Store Name",
            Category::Designation => "Designation",
            Category::Nationality => "Nationality",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Chosen values per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    chosen: [BTreeSet<String>; 4],
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self, category: Category) -> &BTreeSet<String> {
        &self.chosen[category.index()]
    }

    pub fn insert(&mut self, category: Category, value: impl Into<String>) -> bool {
        self.chosen[category.index()].insert(value.into())
    }

    pub fn remove(&mut self, category: Category, value: &str) -> bool {
        self.chosen[category.index()].remove(value)
    }

    pub fn set<I, S>(&mut self, category: Category, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chosen[category.index()] = values.into_iter().map(Into::into).collect();
    }

    pub fn with<I, S>(mut self, category: Category, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(category, values);
        self
    }

    pub fn clear(&mut self) {
        for values in &mut self.chosen {
            values.clear();
        }
    }

    /// True when at least one category restricts rows.
    pub fn is_active(&self) -> bool {
        self.chosen.iter().any(|values| !values.is_empty())
    }

    pub fn matches(&self, row: &Row) -> bool {
        Category::ALL.iter().all(|&category| {
            let chosen = self.values(category);
            chosen.is_empty()
                || row
                    .get(category.column())
                    .is_some_and(|value| chosen.contains(value))
        })
    }
}

/// Rows that satisfy `selection`, in their original order.
pub fn apply<'a>(rows: &'a [Row], selection: &Selection) -> Vec<&'a Row> {
    if !selection.is_active() {
        return rows.iter().collect();
    }
    rows.iter().filter(|row| selection.matches(row)).collect()
}

/// Sorted distinct non-empty values of the category's column.
pub fn distinct_values(rows: &[Row], category: Category) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(category.column()))
        .filter(|value| !value.is_empty())
        .sorted_unstable()
        .dedup()
        .map(str::to_string)
        .collect()
}

/// Choices offered for each category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    #[serde(rename = "EMPLOYEE NAME")]
    pub employee_names: Vec<String>,
    #[serde(rename = "STORE NAME")]
    pub store_names: Vec<String>,
    #[serde(rename = "DESIGNATION")]
    pub designations: Vec<String>,
    #[serde(rename = "NATIONALITY")]
    pub nationalities: Vec<String>,
}

impl FilterOptions {
    pub fn from_rows(rows: &[Row]) -> Self {
        Self {
            employee_names: distinct_values(rows, Category::EmployeeName),
            store_names: distinct_values(rows, Category::StoreName),
            designations: distinct_values(rows, Category::Designation),
            nationalities: distinct_values(rows, Category::Nationality),
        }
    }

    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::EmployeeName => &self.employee_names,
            Category::StoreName => &self.store_names,
            Category::Designation => &self.designations,
            Category::Nationality => &self.nationalities,
        }
    }
}
