mod common;

use schedule_viewer::{
    dataset::Dataset,
    filter::{Category, FilterOptions, Selection, apply, distinct_values},
    rows::Row,
};

fn names(rows: &[&Row]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            format!(
                "{}@{}",
                row.get("EMPLOYEE NAME").unwrap_or_default(),
                row.get("STORE NAME").unwrap_or_default()
            )
        })
        .collect()
}

fn schedule() -> Dataset {
    Dataset::from_csv(&common::weekly_schedule())
}

#[test]
fn empty_selection_keeps_every_row_in_order() {
    let dataset = schedule();
    let visible = apply(&dataset.rows, &Selection::new());
    assert_eq!(visible.len(), dataset.len());
    assert!(visible.iter().zip(&dataset.rows).all(|(a, b)| std::ptr::eq(*a, b)));
}

#[test]
fn single_value_keeps_matching_rows_in_order() {
    let dataset = schedule();
    let selection = Selection::new().with(Category::StoreName, ["Harbour Mall"]);
    assert_eq!(
        names(&apply(&dataset.rows, &selection)),
        vec!["Chen Wei@Harbour Mall", "Dina Roy@Harbour Mall", "Ben Ortiz@Harbour Mall"]
    );
}

#[test]
fn values_within_a_category_are_alternatives() {
    let dataset = schedule();
    let selection = Selection::new().with(Category::Nationality, ["Chinese", "Pakistani"]);
    assert_eq!(
        names(&apply(&dataset.rows, &selection)),
        vec!["Aisha Khan@Downtown", "Chen Wei@Harbour Mall"]
    );
}

#[test]
fn categories_combine_with_and() {
    let dataset = schedule();
    let selection = Selection::new()
        .with(Category::Designation, ["Cashier"])
        .with(Category::StoreName, ["Downtown"]);
    assert_eq!(
        names(&apply(&dataset.rows, &selection)),
        vec!["Ben Ortiz@Downtown"]
    );
}

#[test]
fn rows_without_the_column_never_match_a_selection() {
    let dataset = Dataset::from_csv("NAME\nAisha\nBen");
    let selection = Selection::new().with(Category::Designation, ["Cashier"]);
    assert!(apply(&dataset.rows, &selection).is_empty());
}

#[test]
fn selection_tracks_activity() {
    let mut selection = Selection::new();
    assert!(!selection.is_active());
    assert!(selection.insert(Category::EmployeeName, "Ben Ortiz"));
    assert!(selection.is_active());
    assert!(selection.remove(Category::EmployeeName, "Ben Ortiz"));
    assert!(!selection.is_active());
    selection.insert(Category::Nationality, "Indian");
    selection.clear();
    assert!(selection.values(Category::Nationality).is_empty());
}

#[test]
fn distinct_values_are_sorted_unique_and_non_empty() {
    let dataset = Dataset::from_csv("DESIGNATION\nCashier\n\nAuditor\nCashier");
    assert_eq!(
        distinct_values(&dataset.rows, Category::Designation),
        vec!["Auditor", "Cashier"]
    );
}

#[test]
fn filter_options_cover_all_categories() {
    let options = FilterOptions::from_rows(&schedule().rows);
    assert_eq!(
        options.get(Category::EmployeeName),
        ["Aisha Khan", "Ben Ortiz", "Chen Wei", "Dina Roy"]
    );
    assert_eq!(options.get(Category::StoreName), ["Downtown", "Harbour Mall"]);
    assert_eq!(
        options.get(Category::Designation),
        ["Cashier", "Stock Associate", "Store Manager"]
    );
    assert_eq!(
        options.get(Category::Nationality),
        ["Chinese", "Filipino", "Indian", "Pakistani"]
    );
}

#[test]
fn column_names_are_case_sensitive() {
    let dataset = Dataset::from_csv("designation\nCashier");
    assert!(distinct_values(&dataset.rows, Category::Designation).is_empty());
}
