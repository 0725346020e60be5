//! Regular-session calendar for US equity and option markets.
//!
//! Times are configured in US/Eastern local time. The Eastern offset is
//! derived from the US daylight-saving rule, so no timezone database is
//! needed. Exchange holidays are not modelled.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc, Weekday};

/// Regular trading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketHours {
    open: NaiveTime,
    close: NaiveTime,
}

impl MarketHours {
    /// Session between `open` and `close`, Eastern time.
    #[must_use]
    pub const fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self { open, close }
    }

    /// The 09:30 to 16:00 session.
    #[must_use]
    pub fn regular() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 30, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }

    /// Session open.
    #[must_use]
    pub const fn open(&self) -> NaiveTime {
        self.open
    }

    /// Session close.
    #[must_use]
    pub const fn close(&self) -> NaiveTime {
        self.close
    }

    /// Returns true if `now` falls inside a weekday session.
    ///
    /// The open is inclusive, the close exclusive.
    #[must_use]
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        let local = now.naive_utc() + Duration::hours(eastern_offset_hours(now));
        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        let time = local.time().with_nanosecond(0).unwrap_or(local.time());
        time >= self.open && time < self.close
    }
}

impl Default for MarketHours {
    fn default() -> Self {
        Self::regular()
    }
}

/// UTC offset of US/Eastern at `now`, in hours (-4 or -5).
///
/// Daylight time runs from 02:00 local on the second Sunday of March to
/// 02:00 local on the first Sunday of November.
#[must_use]
pub fn eastern_offset_hours(now: DateTime<Utc>) -> i64 {
    let year = now.year();
    let start = NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Sun, 2)
        .and_then(|d| d.and_hms_opt(7, 0, 0));
    let end = NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Sun, 1)
        .and_then(|d| d.and_hms_opt(6, 0, 0));

    match (start, end) {
        (Some(start), Some(end)) if now.naive_utc() >= start && now.naive_utc() < end => -4,
        _ => -5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test_case(utc(2026, 1, 15, 12, 0), -5 ; "winter")]
    #[test_case(utc(2026, 7, 15, 12, 0), -4 ; "summer")]
    #[test_case(utc(2026, 3, 8, 6, 59), -5 ; "just before spring forward")]
    #[test_case(utc(2026, 3, 8, 7, 0), -4 ; "spring forward")]
    #[test_case(utc(2026, 11, 1, 5, 59), -4 ; "just before fall back")]
    #[test_case(utc(2026, 11, 1, 6, 0), -5 ; "fall back")]
    fn eastern_offset(now: DateTime<Utc>, expected: i64) {
        assert_eq!(eastern_offset_hours(now), expected);
    }

    #[test_case(utc(2026, 1, 15, 14, 30), true ; "winter open bell")]
    #[test_case(utc(2026, 1, 15, 14, 29), false ; "winter pre-market")]
    #[test_case(utc(2026, 1, 15, 21, 0), false ; "winter close bell")]
    #[test_case(utc(2026, 7, 15, 13, 30), true ; "summer open bell")]
    #[test_case(utc(2026, 7, 15, 19, 59), true ; "summer last minute")]
    #[test_case(utc(2026, 7, 15, 20, 0), false ; "summer after close")]
    #[test_case(utc(2026, 7, 18, 15, 0), false ; "saturday")]
    #[test_case(utc(2026, 7, 19, 15, 0), false ; "sunday")]
    fn regular_session(now: DateTime<Utc>, open: bool) {
        assert_eq!(MarketHours::regular().is_open_at(now), open);
    }

    #[test]
    fn friday_evening_utc_is_still_friday_in_new_york() {
        // 23:00 UTC Friday is 19:00 EDT Friday, after close but not weekend.
        let hours = MarketHours::new(
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        );
        assert!(hours.is_open_at(utc(2026, 7, 17, 23, 0)));
    }
}
