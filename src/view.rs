//! Rendering of a loaded schedule for the terminal, CSV or JSON.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, NaiveDate};
use reqwest::Client;
use serde::Serialize;

use crate::{
    acquire::{AcquisitionState, Controller, Phase},
    cli::{OutputFormat, ViewArgs},
    dataset::Dataset,
    output,
    rows::Row,
    schedule::ScheduleGrid,
    session::Session,
    table,
};

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

pub const INSTRUCTIONS: &str = "\
Welcome to the Schedule Viewer!
To get started, publish your Google Sheet to the web as a CSV file:
  1. Open your Google Sheet.
  2. Go to File > Share > Publish to web.
  3. In the dialog, select the sheet you want to display.
  4. In the dropdown, choose Comma-separated values (.csv).
  5. Click Publish.
  6. Pass the generated URL with --url.

Tip: add a WEEK_START_DATE column (e.g. 2024-06-24 or 24.06.2024) and the
viewer jumps to that week automatically.
";

const NO_MATCHES: &str = "No Matching Results\nNo staff members found with the selected filters.\n";

const NO_DATA: &str = "No schedule data found.\n\
The Google Sheet might be empty or formatted incorrectly. Please ensure it has a header row.\n";

pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("schedule-viewer/", env!("CARGO_PKG_VERSION")))
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("Building HTTP client")
}

impl ViewArgs {
    pub fn start_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Outcome of the first load of a link.
pub enum Loaded {
    /// No link was given.
    Idle,
    Ready {
        dataset: Dataset,
        last_updated: Option<DateTime<Local>>,
    },
}

/// Submits `link` through the session and waits for the foreground fetch.
/// A failed fetch becomes an error carrying the user-facing message.
pub async fn load(
    session: &mut Session,
    controller: &mut Controller,
    link: &str,
) -> Result<Loaded> {
    session.change_source(controller, link).await;
    loaded_from(controller.state())
}

pub fn loaded_from(state: AcquisitionState) -> Result<Loaded> {
    match state.phase() {
        Phase::Idle => Ok(Loaded::Idle),
        Phase::Errored | Phase::Loading => Err(anyhow!(
            state
                .error
                .unwrap_or_else(|| "The schedule did not finish loading.".to_string())
        )),
        Phase::Ready => Ok(Loaded::Ready {
            dataset: state.dataset.unwrap_or_default(),
            last_updated: state.last_updated,
        }),
    }
}

#[derive(Debug, Serialize)]
struct WeekView<'a> {
    week: String,
    week_start: NaiveDate,
    days: Vec<NaiveDate>,
    last_updated: Option<DateTime<Local>>,
    filtered: bool,
    rows: Vec<&'a Row>,
}

/// Moves the session to the sheet's week (plus the requested offset) and
/// writes the visible rows in the requested format.
pub fn render(
    session: &mut Session,
    dataset: &Dataset,
    last_updated: Option<DateTime<Local>>,
    args: &ViewArgs,
) -> Result<()> {
    position(session, dataset, args);
    write_week(session, dataset, last_updated, args)
}

/// Shows the week named by the sheet, or the requested date's week when it
/// names none, shifted by `--week-offset`.
pub fn position(session: &mut Session, dataset: &Dataset, args: &ViewArgs) {
    session.go_to(args.start_date());
    session.follow_sheet_date(dataset.week_start_date);
    session.shift_weeks(args.week_offset);
}

/// Writes the session's current week without moving it.
pub fn write_week(
    session: &Session,
    dataset: &Dataset,
    last_updated: Option<DateTime<Local>>,
    args: &ViewArgs,
) -> Result<()> {
    let visible = session.visible_rows(dataset);
    let writer = output::open_writer(args.output.as_deref())?;
    match args.format {
        OutputFormat::Table => {
            let text = render_text(session, dataset, &visible, last_updated, !args.no_color);
            output::write_text(writer, &text)
        }
        OutputFormat::Csv => output::write_csv(writer, &dataset.headers(), &visible),
        OutputFormat::Json => {
            let view = WeekView {
                week: session.heading(),
                week_start: session.week_start(),
                days: session.week_days(),
                last_updated,
                filtered: session.selection().is_active(),
                rows: visible,
            };
            output::write_json(writer, &view)
        }
    }
}

pub fn render_text(
    session: &Session,
    dataset: &Dataset,
    visible: &[&Row],
    last_updated: Option<DateTime<Local>>,
    colour: bool,
) -> String {
    let mut text = format!("{}\n", session.heading());
    if let Some(updated) = last_updated {
        text.push_str(&format!("Updated {}\n", updated.format("%-I:%M %p")));
    }
    text.push('\n');

    let grid = ScheduleGrid::build(visible, &session.week_days());
    if grid.is_empty() {
        let message = if !dataset.is_empty() && session.selection().is_active() {
            NO_MATCHES
        } else {
            NO_DATA
        };
        text.push_str(message);
        return text;
    }

    text.push_str(&table::render_grid(&grid, colour));
    text
}
