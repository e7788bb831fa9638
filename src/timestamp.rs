//! NTP timestamps and their decomposition into time of day and day count.
//!
//! Only era 0 (1900-01-01 to 2036-02-07) is decoded to a calendar date.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    calendar::{date_from_days, CalendarDate, DateError},
    fixed_point::UnsignedFixed32_32,
};

/// Seconds between the NTP epoch (1900-01-01) and the Unix epoch (1970-01-01).
pub const NTP_UNIX_OFFSET: i64 = 2_208_988_800;

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 3_600;
const SECONDS_PER_DAY: u32 = 86_400;

/// NTP timestamp: seconds since 1900-01-01 00:00 UTC in 32.32 fixed point.
///
/// ```
/// use sntp_header::timestamp::Timestamp;
/// let ts = Timestamp::from_parts(3661, 0);
/// let tod = ts.time_of_day();
/// assert_eq!((tod.hours, tod.minutes, tod.seconds), (1, 1, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize)]
pub struct Timestamp(UnsignedFixed32_32);

/// Time of day carried by a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeOfDay {
    /// Hours since midnight, 0-23.
    pub hours: u32,
    /// Minutes after the hour, 0-59.
    pub minutes: u32,
    /// Seconds after the minute, 0-59.
    pub seconds: u32,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

impl Timestamp {
    /// Wraps a raw host-order 64-bit value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(UnsignedFixed32_32::from_raw(raw))
    }

    /// Builds a timestamp from whole seconds and a 2^-32 fraction.
    #[must_use]
    pub const fn from_parts(seconds: u32, fraction: u32) -> Self {
        Self(UnsignedFixed32_32::from_parts(seconds, fraction))
    }

    /// Samples the system clock.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Converts a UTC date and time into a timestamp.
    ///
    /// The seconds field wraps modulo 2^32, the same as on the wire, so dates after
    /// 2036-02-07 land in era 1. A leap second (nanoseconds of one second or more) is held
    /// at the last representable instant of second 59.
    #[must_use]
    pub fn from_datetime(date: DateTime<Utc>) -> Self {
        let secs = (date.timestamp() + NTP_UNIX_OFFSET) as u32;
        let nanos = date.timestamp_subsec_nanos().min(999_999_999);
        let fraction = (((nanos as u64) << 32) / 1_000_000_000) as u32;

        Self::from_parts(secs, fraction)
    }

    /// Converts the timestamp into a UTC date and time, assuming era 0.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let secs = self.seconds() as i64 - NTP_UNIX_OFFSET;
        let nanos = ((self.fraction() as u64 * 1_000_000_000) >> 32) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }

    /// Raw 64-bit value.
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.0.raw()
    }

    /// Whole seconds since the epoch.
    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.0.integer()
    }

    /// Fractional second in units of 2^-32.
    #[must_use]
    pub const fn fraction(&self) -> u32 {
        self.0.fraction()
    }

    /// Underlying fixed-point value.
    #[must_use]
    pub const fn as_fixed(&self) -> UnsignedFixed32_32 {
        self.0
    }

    /// Whether this is the all-zero timestamp that SNTP uses for "not set".
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.raw() == 0
    }

    /// Seconds after the minute, 0-59.
    #[must_use]
    pub const fn seconds_after_minute(&self) -> u32 {
        self.seconds() % SECONDS_PER_MINUTE
    }

    /// Minutes after the hour, 0-59.
    #[must_use]
    pub const fn minutes_after_hour(&self) -> u32 {
        (self.seconds() / SECONDS_PER_MINUTE) % 60
    }

    /// Hours since midnight UTC, 0-23.
    #[must_use]
    pub const fn hours_since_midnight(&self) -> u32 {
        (self.seconds() / SECONDS_PER_HOUR) % 24
    }

    /// Whole days since 1900-01-01.
    #[must_use]
    pub const fn days_since_epoch(&self) -> u32 {
        self.seconds() / SECONDS_PER_DAY
    }

    /// Milliseconds after the second. Lossy, for display only.
    #[must_use]
    pub fn millis_after_second(&self) -> f64 {
        self.fraction() as f64 * 1000.0 / 4_294_967_296.0
    }

    /// Hours, minutes and seconds of the day. The fraction is not consumed.
    #[must_use]
    pub const fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay {
            hours: self.hours_since_midnight(),
            minutes: self.minutes_after_hour(),
            seconds: self.seconds_after_minute(),
        }
    }

    /// Calendar date of the timestamp.
    ///
    /// # Errors
    /// Returns [`DateError::UnsupportedDateRange`] for dates past 2036.
    pub fn date(&self) -> Result<CalendarDate, DateError> {
        date_from_days(self.days_since_epoch())
    }
}

impl From<u64> for Timestamp {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Timestamp> for u64 {
    fn from(ts: Timestamp) -> Self {
        ts.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_3661() {
        let ts = Timestamp::from_parts(3661, 0);
        assert_eq!(ts.hours_since_midnight(), 1);
        assert_eq!(ts.minutes_after_hour(), 1);
        assert_eq!(ts.seconds_after_minute(), 1);
        assert_eq!(ts.days_since_epoch(), 0);
        assert_eq!(ts.time_of_day().to_string(), "01:01:01");
    }

    #[test]
    fn test_last_second_of_day() {
        let ts = Timestamp::from_parts(86_399, u32::MAX);
        let tod = ts.time_of_day();
        assert_eq!((tod.hours, tod.minutes, tod.seconds), (23, 59, 59));
        assert_eq!(ts.days_since_epoch(), 0);

        let next = Timestamp::from_parts(86_400, 0);
        assert_eq!(next.days_since_epoch(), 1);
        assert_eq!(next.time_of_day().hours, 0);
    }

    #[test]
    fn test_fraction_not_consumed_by_decomposition() {
        let a = Timestamp::from_parts(1_000_000, 0);
        let b = Timestamp::from_parts(1_000_000, 0xFFFF_FFFF);
        assert_eq!(a.time_of_day(), b.time_of_day());
        assert_eq!(a.days_since_epoch(), b.days_since_epoch());
    }

    #[test]
    fn test_millis_after_second() {
        assert_eq!(Timestamp::from_parts(0, 0).millis_after_second(), 0.0);
        assert_eq!(
            Timestamp::from_parts(0, 0x8000_0000).millis_after_second(),
            500.0
        );
        assert!(Timestamp::from_parts(0, u32::MAX).millis_after_second() < 1000.0);
    }

    #[test]
    fn test_unix_epoch() {
        let ts = Timestamp::from_parts(NTP_UNIX_OFFSET as u32, 0);
        let date = ts.date().unwrap();
        assert_eq!((date.year, date.month, date.day), (1970, 0, 0));
        assert_eq!(ts.to_datetime().unwrap().timestamp(), 0);
    }

    #[test]
    fn test_convert_datetime_to_ntp() {
        const TEST_CASES: &[(i64, u32)] = &[(1_525_987, 0), (0, 0), (2_584_229, 151_000_000)];

        for &(secs, nanos) in TEST_CASES {
            let sample = DateTime::<Utc>::from_timestamp(secs, nanos).expect("Invalid timestamp");
            let ts = Timestamp::from_datetime(sample);

            assert_eq!(
                ts.seconds() as i64,
                secs + NTP_UNIX_OFFSET,
                "Mismatch in seconds field"
            );

            let back = ts.to_datetime().unwrap();
            assert_eq!(back.timestamp(), secs);
            assert!(
                (back.timestamp_subsec_nanos() as i64 - nanos as i64).abs() <= 1,
                "Mismatch in fractional nanos: expected {}, got {}",
                nanos,
                back.timestamp_subsec_nanos()
            );
        }
    }

    #[test]
    fn test_leap_second_held_at_second_59() {
        let leap = DateTime::<Utc>::from_timestamp(59, 1_500_000_000).expect("Invalid timestamp");
        let ts = Timestamp::from_datetime(leap);
        assert_eq!(ts.seconds() as i64, 59 + NTP_UNIX_OFFSET);
        assert_eq!(ts.seconds_after_minute(), 59);
        assert_eq!(ts.fraction(), 0xFFFF_FFFB);
        assert!(ts < Timestamp::from_parts((60 + NTP_UNIX_OFFSET) as u32, 0));
    }

    #[test]
    fn test_date_agrees_with_chrono() {
        use chrono::Datelike;

        let samples = [0u32, 59, 86_400 * 365, 3_000_000_000, 3_900_000_000, u32::MAX];
        for secs in samples {
            let ts = Timestamp::from_parts(secs, 0);
            let ours = ts.date().unwrap();
            let theirs = ts.to_datetime().unwrap();
            assert_eq!(ours.year as i32, theirs.year(), "year for {}", secs);
            assert_eq!(ours.month, theirs.month0(), "month for {}", secs);
            assert_eq!(ours.day, theirs.day0(), "day for {}", secs);
        }
    }

    #[test]
    fn test_dates_are_monotonic() {
        let mut previous = Timestamp::from_parts(0, 0).date().unwrap();
        let mut secs: u32 = 0;
        while let Some(next) = secs.checked_add(7_777_777) {
            secs = next;
            let date = Timestamp::from_parts(secs, 0).date().unwrap();
            assert!(date >= previous, "{:?} decoded before {:?}", date, previous);
            previous = date;
        }
    }

    #[test]
    fn test_now_is_nonzero() {
        assert!(!Timestamp::now().is_zero());
    }

    #[test]
    fn test_raw_conversion() {
        let ts = Timestamp::from(0x0000_0001_8000_0000u64);
        assert_eq!(ts.seconds(), 1);
        assert_eq!(ts.fraction(), 0x8000_0000);
        assert_eq!(u64::from(ts), 0x0000_0001_8000_0000);
    }
}
