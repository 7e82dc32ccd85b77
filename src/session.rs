//! Per-viewer context: filter selection and the date being looked at.

use chrono::{Local, NaiveDate};

use crate::{
    acquire::Controller,
    dataset::Dataset,
    dates,
    filter::{self, Selection},
    rows::Row,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    selection: Selection,
    current_date: NaiveDate,
}

impl Session {
    pub fn new(current_date: NaiveDate) -> Self {
        Self {
            selection: Selection::default(),
            current_date,
        }
    }

    pub fn starting_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// Points the controller at a new link. Selections belong to the previous
    /// sheet, so they are cleared first.
    pub async fn change_source(&mut self, controller: &mut Controller, link: &str) {
        self.selection.clear();
        controller.submit(link).await;
    }

    /// Jumps to the week the sheet declares, when it declares one.
    pub fn follow_sheet_date(&mut self, date: Option<NaiveDate>) {
        if let Some(date) = date {
            self.current_date = date;
        }
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.current_date = date;
    }

    pub fn go_to_today(&mut self) {
        self.go_to(Local::now().date_naive());
    }

    pub fn shift_weeks(&mut self, weeks: i32) {
        self.current_date = dates::add_weeks(self.current_date, weeks);
    }

    pub fn previous_week(&mut self) {
        self.shift_weeks(-1);
    }

    pub fn next_week(&mut self) {
        self.shift_weeks(1);
    }

    pub fn week_start(&self) -> NaiveDate {
        dates::week_start(self.current_date)
    }

    pub fn week_days(&self) -> Vec<NaiveDate> {
        dates::week_days(self.week_start())
    }

    pub fn heading(&self) -> String {
        dates::format_date_range(self.week_start())
    }

    pub fn visible_rows<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Row> {
        filter::apply(&dataset.rows, &self.selection)
    }
}
