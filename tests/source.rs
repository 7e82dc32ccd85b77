use schedule_viewer::source::{is_export_link, normalize};

const SHEET_ID: &str = "1oK3_Hkfx7SMDrCfNUn3VhAPbca6PL2lIEBQhUydS6oM";

#[test]
fn share_link_without_gid_exports_first_sheet() {
    let link = format!("https://docs.google.com/spreadsheets/d/{SHEET_ID}/edit?usp=sharing");
    assert_eq!(
        normalize(&link),
        format!("https://docs.google.com/spreadsheets/d/{SHEET_ID}/export?format=csv&gid=0")
    );
}

#[test]
fn share_link_keeps_gid_from_fragment() {
    let link = format!("https://docs.google.com/spreadsheets/d/{SHEET_ID}/edit#gid=1234567");
    assert!(normalize(&link).ends_with("/export?format=csv&gid=1234567"));
}

#[test]
fn share_link_keeps_gid_from_query() {
    let link = format!("https://docs.google.com/spreadsheets/d/{SHEET_ID}/edit?gid=42&usp=drive");
    assert!(normalize(&link).ends_with("&gid=42"));
}

#[test]
fn export_and_publish_links_are_untouched() {
    let export = format!("https://docs.google.com/spreadsheets/d/{SHEET_ID}/export?format=csv&gid=7");
    let publish = "https://docs.google.com/spreadsheets/d/e/2PACX-abc/pub?output=csv";
    assert_eq!(normalize(&export), export);
    assert_eq!(normalize(publish), publish);
    assert!(is_export_link(publish));
}

#[test]
fn normalizing_twice_changes_nothing() {
    let link = format!("https://docs.google.com/spreadsheets/d/{SHEET_ID}/edit#gid=9");
    let once = normalize(&link);
    assert_eq!(normalize(&once), once);
}

#[test]
fn unrelated_links_pass_through() {
    assert_eq!(
        normalize("https://example.com/schedule.csv"),
        "https://example.com/schedule.csv"
    );
    assert_eq!(normalize(""), "");
}
