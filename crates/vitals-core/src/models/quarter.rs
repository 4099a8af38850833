// ABOUTME: Calendar quarter value type (Q1=Jan-Mar .. Q4=Oct-Dec) with its UTC date range
// ABOUTME: Identity half of a quarterly aggregate; the owner supplies the other half
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{Datelike, NaiveDate};

use super::calendar::days_inclusive;
use crate::constants::quarterly::{MONTHS_PER_QUARTER, QUARTERS_PER_YEAR};
use crate::errors::{AppError, AppResult};

/// A fixed three-month calendar period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quarter {
    year: i32,
    number: u8,
    start: NaiveDate,
    end: NaiveDate,
}

impl Quarter {
    /// Create a quarter
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `number` is not 1-4 and `ValueOutOfRange` when
    /// the year cannot be represented as a calendar date
    pub fn new(year: i32, number: u8) -> AppResult<Self> {
        if !(1..=QUARTERS_PER_YEAR).contains(&number) {
            return Err(AppError::invalid_input(format!(
                "Quarter must be between 1 and {QUARTERS_PER_YEAR}, got {number}"
            )));
        }

        let first_month = (u32::from(number) - 1) * MONTHS_PER_QUARTER + 1;
        let start = NaiveDate::from_ymd_opt(year, first_month, 1)
            .ok_or_else(|| AppError::out_of_range(format!("Year {year} is not supported")))?;
        let end = if number == QUARTERS_PER_YEAR {
            NaiveDate::from_ymd_opt(year, 12, 31)
        } else {
            NaiveDate::from_ymd_opt(year, first_month + MONTHS_PER_QUARTER, 1)
                .and_then(|next| next.pred_opt())
        }
        .ok_or_else(|| AppError::out_of_range(format!("Year {year} is not supported")))?;

        Ok(Self {
            year,
            number,
            start,
            end,
        })
    }

    /// Quarter that contains `date`
    ///
    /// # Errors
    ///
    /// Returns an error only when `date` sits at the very edge of the supported calendar
    pub fn containing(date: NaiveDate) -> AppResult<Self> {
        let number = u8::try_from((date.month() - 1) / MONTHS_PER_QUARTER + 1)
            .map_err(|e| AppError::internal(format!("Quarter number overflow: {e}")))?;
        Self::new(date.year(), number)
    }

    /// Calendar year
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Quarter number, 1-4
    #[must_use]
    pub const fn number(self) -> u8 {
        self.number
    }

    /// First day of the quarter
    #[must_use]
    pub const fn start_date(self) -> NaiveDate {
        self.start
    }

    /// Last day of the quarter
    #[must_use]
    pub const fn end_date(self) -> NaiveDate {
        self.end
    }

    /// Calendar days in the quarter (90-92)
    #[must_use]
    pub fn total_days(self) -> u32 {
        days_inclusive(self.start, self.end)
    }

    /// Whether `date` falls inside the quarter
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }

    /// The quarter before this one
    ///
    /// # Errors
    ///
    /// Returns an error when the previous year is not representable
    pub fn previous(self) -> AppResult<Self> {
        if self.number == 1 {
            Self::new(self.year - 1, QUARTERS_PER_YEAR)
        } else {
            Self::new(self.year, self.number - 1)
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{} {}", self.number, self.year)
    }
}
