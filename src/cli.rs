use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    dates::parse_flexible_date,
    filter::{Category, Selection},
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "View weekly schedules published from a spreadsheet as CSV",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch a schedule once and print the selected week
    Show(ShowArgs),
    /// Keep a schedule on screen, refreshing it in the background
    Watch(WatchArgs),
    /// List the values each filter can take
    Options(OptionsArgs),
    /// Print the CSV export link for a spreadsheet share link
    Normalize(NormalizeArgs),
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Spreadsheet share link or published CSV link (empty prints setup instructions)
    #[arg(short = 'u', long = "url")]
    pub url: String,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only show these designations (repeatable or comma-separated)
    #[arg(long = "designation", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub designations: Vec<String>,
    /// Only show these nationalities (repeatable or comma-separated)
    #[arg(long = "nationality", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub nationalities: Vec<String>,
    /// Only show these store names (repeatable or comma-separated)
    #[arg(long = "store", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub stores: Vec<String>,
    /// Only show these employee names (repeatable or comma-separated)
    #[arg(long = "employee", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub employees: Vec<String>,
}

impl FilterArgs {
    pub fn selection(&self) -> Selection {
        let trimmed = |values: &[String]| {
            values
                .iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
        };
        Selection::new()
            .with(Category::Designation, trimmed(&self.designations))
            .with(Category::Nationality, trimmed(&self.nationalities))
            .with(Category::StoreName, trimmed(&self.stores))
            .with(Category::EmployeeName, trimmed(&self.employees))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned week grid
    Table,
    /// Visible rows as CSV
    Csv,
    /// Week metadata and visible rows as JSON
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Date whose week is shown when the sheet does not name one (defaults to today)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
    /// Move the displayed week forwards or backwards by this many weeks
    #[arg(long = "week-offset", default_value_t = 0, allow_negative_numbers = true)]
    pub week_offset: i32,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// Output file (stdout if omitted or '-')
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Do not colour highlighted rows
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub filters: FilterArgs,
    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub filters: FilterArgs,
    #[command(flatten)]
    pub view: ViewArgs,
    /// Seconds between background refreshes
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,
}

#[derive(Debug, Args)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Link to rewrite
    pub url: String,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_flexible_date(value.trim()).ok_or_else(|| format!("Unrecognized date '{value}'"))
}
