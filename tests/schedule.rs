use chrono::NaiveDate;
use schedule_viewer::{
    dataset::Dataset,
    dates::week_days,
    schedule::ScheduleGrid,
    table::{render_grid, render_table},
};

fn june_week() -> Vec<NaiveDate> {
    week_days(NaiveDate::from_ymd_opt(2024, 6, 24).expect("valid date"))
}

#[test]
fn grid_titles_day_columns_with_dates() {
    let dataset = Dataset::from_csv(
        "EMPLOYEE_NAME,Monday,SUNDAY,WEEK_START_DATE\nAisha,9-5,OFF,24.06.2024",
    );
    let rows = dataset.rows.iter().collect::<Vec<_>>();
    let grid = ScheduleGrid::build(&rows, &june_week());

    assert_eq!(grid.headers, vec!["EMPLOYEE NAME", "Mon 24", "Sun 30"]);
    assert_eq!(grid.rows[0].cells, vec!["Aisha", "9-5", "OFF"]);
}

#[test]
fn grid_highlights_store_managers() {
    let dataset = Dataset::from_csv(
        "EMPLOYEE NAME,DESIGNATION\nAisha,Assistant STORE MANAGER\nBen,Cashier\nChen,",
    );
    let rows = dataset.rows.iter().collect::<Vec<_>>();
    let grid = ScheduleGrid::build(&rows, &june_week());

    let flags = grid.rows.iter().map(|row| row.highlight).collect::<Vec<_>>();
    assert_eq!(flags, vec![true, false, false]);
}

#[test]
fn grid_without_rows_is_empty() {
    let grid = ScheduleGrid::build(&[], &june_week());
    assert!(grid.is_empty());
    assert!(grid.headers.is_empty());
}

#[test]
fn render_table_aligns_columns() {
    let headers = vec!["filter".to_string(), "value".to_string()];
    let rows = vec![
        vec!["Store Name".to_string(), "Downtown".to_string()],
        vec!["Nationality".to_string(), "Indian".to_string()],
    ];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "filter       value",
            "-----------  --------",
            "Store Name   Downtown",
            "Nationality  Indian",
        ]
    );
}

#[test]
fn render_grid_colours_highlighted_rows_only_when_asked() {
    let dataset = Dataset::from_csv("NAME,DESIGNATION\nAisha,Store Manager\nBen,Cashier");
    let rows = dataset.rows.iter().collect::<Vec<_>>();
    let grid = ScheduleGrid::build(&rows, &june_week());

    let plain = render_grid(&grid, false);
    assert!(!plain.contains('\u{1b}'));

    let coloured = render_grid(&grid, true);
    let lines: Vec<&str> = coloured.lines().collect();
    assert!(lines[2].starts_with("\u{1b}[32mAisha\u{1b}[0m"));
    assert!(!lines[3].contains('\u{1b}'));
    // escape codes do not widen the column
    assert_eq!(
        lines[2].replace("\u{1b}[32m", "").replace("\u{1b}[0m", ""),
        "Aisha  Store Manager"
    );
}

#[test]
fn render_grid_flattens_control_characters() {
    let grid = ScheduleGrid {
        headers: vec!["note".to_string()],
        rows: vec![schedule_viewer::schedule::GridRow {
            cells: vec!["line1\nline2\tvalue".to_string()],
            highlight: false,
        }],
    };
    let rendered = render_grid(&grid, false);
    assert_eq!(rendered.lines().nth(2), Some("line1 line2 value"));
}

#[test]
fn render_grid_neutralises_escape_sequences_in_cells() {
    let grid = ScheduleGrid {
        headers: vec!["note".to_string(), "x".to_string()],
        rows: vec![schedule_viewer::schedule::GridRow {
            cells: vec!["\u{1b}[31mred".to_string(), "1".to_string()],
            highlight: false,
        }],
    };
    let rendered = render_grid(&grid, false);
    assert!(!rendered.contains('\u{1b}'));
    assert_eq!(rendered.lines().nth(2), Some(" [31mred  1"));
}
