//! Source link normalization.
//!
//! People share spreadsheets with the link they see in the browser
//! (`.../spreadsheets/d/<id>/edit#gid=<n>`), which serves HTML rather than
//! CSV. [`normalize()`] rewrites such links into the CSV export endpoint and
//! leaves everything else alone.

use std::sync::OnceLock;

use regex::Regex;

/// Substrings that identify a link which already returns CSV.
pub const EXPORT_MARKERS: &[&str] = &["/pub?output=csv", "/export?format=csv"];

/// Grid used when the link does not name one (the first sheet).
pub const DEFAULT_GID: &str = "0";

fn sheet_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"spreadsheets/d/([a-zA-Z0-9_-]+)").expect("valid regex"))
}

fn gid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[#&?]gid=(\d+)").expect("valid regex"))
}

/// Rewrites a spreadsheet share link into its CSV export link.
///
/// Links that are already export or publish links, and links that do not look
/// like a spreadsheet at all, are returned unchanged.
pub fn normalize(raw: &str) -> String {
    if is_export_link(raw) {
        return raw.to_string();
    }
    let Some(id) = sheet_id_pattern()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return raw.to_string();
    };
    let gid = gid_pattern()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_GID);
    export_link(id, gid)
}

pub fn is_export_link(raw: &str) -> bool {
    EXPORT_MARKERS.iter().any(|marker| raw.contains(marker))
}

pub fn export_link(sheet_id: &str, gid: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{sheet_id}/export?format=csv&gid={gid}")
}
