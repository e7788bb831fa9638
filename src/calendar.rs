//! Calendar date decoding for day counts since the NTP epoch (1 January 1900).
//!
//! Only era 0 is handled: the decoder walks years from 1900 and stops before 2037. The bit-0
//! rule of RFC 4330 that maps timestamps into 2036-2104 is not implemented, so anything that
//! would land in 2037 or later is rejected with [`DateError::UnsupportedDateRange`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// First year of the NTP epoch.
pub const NTP_ORIGIN_YEAR: u32 = 1900;

/// First year the decoder refuses to produce.
pub const FIRST_UNSUPPORTED_YEAR: u32 = 2037;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Errors that can occur while decoding a calendar date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The day count would need a year of 2037 or later.
    #[error("{days} days since 1900-01-01 is past the supported range (year 2036)")]
    UnsupportedDateRange { days: u32 },
}

/// A proleptic Gregorian date. Month and day are 0-based, matching the wire arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CalendarDate {
    /// Year, 1900-2036.
    pub year: u32,
    /// Month, 0 (January) to 11 (December).
    pub month: u32,
    /// Day of month, 0 to 30.
    pub day: u32,
}

impl fmt::Display for CalendarDate {
    /// Formats the date as `DD/MM/YYYY` with 1-based day and month.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.day + 1, self.month + 1, self.year)
    }
}

/// Whether `year` is a Gregorian leap year.
///
/// ```
/// use sntp_header::calendar::is_leap_year;
/// assert!(!is_leap_year(1900));
/// assert!(is_leap_year(2000));
/// ```
#[must_use]
pub const fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year`.
#[must_use]
pub const fn days_in_year(year: u32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Number of days in a 0-based `month` of `year`.
///
/// # Panics
/// Panics if `month` is greater than 11.
#[must_use]
pub fn days_in_month(year: u32, month: u32) -> u32 {
    if month == 1 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Converts a day count since 1 January 1900 into a calendar date.
///
/// # Errors
/// Returns [`DateError::UnsupportedDateRange`] when the date falls in 2037 or later.
pub fn date_from_days(days_since_epoch: u32) -> Result<CalendarDate, DateError> {
    let mut remaining = days_since_epoch;
    let mut year = NTP_ORIGIN_YEAR;

    while year < FIRST_UNSUPPORTED_YEAR {
        let year_length = days_in_year(year);
        if remaining < year_length {
            break;
        }
        remaining -= year_length;
        year += 1;
    }

    if year >= FIRST_UNSUPPORTED_YEAR {
        return Err(DateError::UnsupportedDateRange {
            days: days_since_epoch,
        });
    }

    let mut month = 0;
    while remaining >= days_in_month(year, month) {
        remaining -= days_in_month(year, month);
        month += 1;
    }

    Ok(CalendarDate {
        year,
        month,
        day: remaining,
    })
}
