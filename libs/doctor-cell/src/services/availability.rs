//! Client-side derivation of bookable dates from a doctor's declared working days.
//!
//! The backend only reports weekday names; the date picker needs the concrete
//! dates to disable. Weekdays are indexed Sunday = 0 through Saturday = 6.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use shared_models::error::AppError;

use crate::models::WorkingDay;

pub const BOOKING_HORIZON_DAYS: u32 = 365;

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Index of an English weekday name. Matching is exact.
pub fn weekday_index(name: &str) -> Option<u8> {
    WEEKDAY_NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .map(|i| i as u8)
}

pub fn weekday_name(index: u8) -> Option<&'static str> {
    WEEKDAY_NAMES.get(index as usize).copied()
}

pub fn date_weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Weekday indices a doctor works on. Unrecognised names contribute nothing.
pub fn allowed_day_indices<'a, I>(names: I) -> BTreeSet<u8>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter_map(|name| {
            let index = weekday_index(name);
            if index.is_none() {
                debug!("Ignoring unrecognised weekday name {:?}", name);
            }
            index
        })
        .collect()
}

/// Names that do not map to any weekday.
pub fn unrecognised_day_names<'a, I>(names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter(|name| weekday_index(name).is_none())
        .collect()
}

/// Dates in `[start, start + horizon_days)` whose weekday is not allowed.
pub fn excluded_dates(allowed: &BTreeSet<u8>, start: NaiveDate, horizon_days: u32) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take(horizon_days as usize)
        .filter(|date| !allowed.contains(&date_weekday_index(*date)))
        .collect()
}

/// A bookable date picked for a doctor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingSelection {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub day_index: u8,
}

impl BookingSelection {
    /// `dd/MM/yyyy`, the form shown to patients.
    pub fn display_date(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.day_index).unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone)]
pub struct BookingCalendar {
    doctor_id: i64,
    allowed: BTreeSet<u8>,
    start: NaiveDate,
    horizon_days: u32,
}

impl BookingCalendar {
    pub fn new(doctor_id: i64, working_days: &[WorkingDay], start: NaiveDate) -> Self {
        let names = || working_days.iter().map(|d| d.day_of_week.as_str());
        let allowed = allowed_day_indices(names());
        let unrecognised = unrecognised_day_names(names());
        if !unrecognised.is_empty() {
            warn!(
                "Doctor {} declares working days with unrecognised names: {:?}",
                doctor_id, unrecognised
            );
        }

        Self {
            doctor_id,
            allowed,
            start,
            horizon_days: BOOKING_HORIZON_DAYS,
        }
    }

    pub fn with_horizon(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn allowed_days(&self) -> &BTreeSet<u8> {
        &self.allowed
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    pub fn excluded_dates(&self) -> Vec<NaiveDate> {
        excluded_dates(&self.allowed, self.start, self.horizon_days)
    }

    fn in_window(&self, date: NaiveDate) -> bool {
        let offset = (date - self.start).num_days();
        offset >= 0 && offset < self.horizon_days as i64
    }

    pub fn is_bookable(&self, date: NaiveDate) -> bool {
        self.in_window(date) && self.allowed.contains(&date_weekday_index(date))
    }

    pub fn bookable_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start
            .iter_days()
            .take(self.horizon_days as usize)
            .filter(move |date| self.allowed.contains(&date_weekday_index(*date)))
    }

    pub fn next_bookable(&self, count: usize) -> Vec<NaiveDate> {
        self.bookable_dates().take(count).collect()
    }

    pub fn select(&self, date: NaiveDate) -> Result<BookingSelection, AppError> {
        if date < self.start {
            return Err(AppError::ValidationError(format!(
                "{} is in the past",
                date.format("%d/%m/%Y")
            )));
        }
        if !self.in_window(date) {
            return Err(AppError::ValidationError(format!(
                "{} is more than {} days ahead",
                date.format("%d/%m/%Y"),
                self.horizon_days
            )));
        }

        let day_index = date_weekday_index(date);
        if !self.allowed.contains(&day_index) {
            return Err(AppError::ValidationError(format!(
                "Doctor does not work on {}s",
                weekday_name(day_index).unwrap_or("that day")
            )));
        }

        Ok(BookingSelection {
            doctor_id: self.doctor_id,
            date,
            day_index,
        })
    }
}
