//! Calendar period boundaries for aggregation queries.
//!
//! Ranges are inclusive on both ends: the end bound is the first instant of
//! the following period minus one nanosecond, so `Dec 31 23:59:59` (and any
//! sub-second instant after it) still belongs to the closing year while
//! `Jan 1 00:00:00` of the next year does not.

use chrono::{DateTime, Duration, TimeZone, Utc};

use factura_core::{Error, Result};

/// English month names in calendar order.
pub const MONTH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Inclusive UTC range covering the whole of `year`.
///
/// Fails with `InvalidArgument` when the year is outside the representable
/// calendar, before any store is consulted.
pub fn year_range(year: i32) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = first_instant(year, 1)?;
    let next_year = year
        .checked_add(1)
        .ok_or_else(|| Error::invalid_argument(format!("year {year} is out of range")))?;
    let next = first_instant(next_year, 1)?;
    Ok((start, last_instant_before(next, year)?))
}

/// Inclusive UTC range covering `month` (1-indexed) of `year`.
///
/// The end of the month is derived from the first instant of the following
/// month, so 28/29/30/31-day months and leap Februaries come out right
/// without a day table.
pub fn month_range(year: i32, month: u32) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    if !(1..=12).contains(&month) {
        return Err(Error::invalid_argument(format!(
            "month {month} is out of range (1-12)"
        )));
    }

    let start = first_instant(year, month)?;
    let next = if month == 12 {
        let next_year = year
            .checked_add(1)
            .ok_or_else(|| Error::invalid_argument(format!("year {year} is out of range")))?;
        first_instant(next_year, 1)?
    } else {
        first_instant(year, month + 1)?
    };
    Ok((start, last_instant_before(next, year)?))
}

fn first_instant(year: i32, month: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| Error::invalid_argument(format!("year {year} is out of range")))
}

fn last_instant_before(next_period: DateTime<Utc>, year: i32) -> Result<DateTime<Utc>> {
    next_period
        .checked_sub_signed(Duration::nanoseconds(1))
        .ok_or_else(|| Error::invalid_argument(format!("year {year} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn year_end_keeps_the_last_second_inside_the_year() {
        let (start, end) = year_range(2024).unwrap();

        assert_eq!(start, at(2024, 1, 1, 0, 0, 0));
        assert!(at(2024, 12, 31, 23, 59, 59) <= end);
        assert!(at(2025, 1, 1, 0, 0, 0) > end);
    }

    #[test]
    fn year_end_is_one_nanosecond_before_new_year() {
        let (_, end) = year_range(2024).unwrap();
        assert_eq!(end.nanosecond(), 999_999_999);
        assert_eq!(
            end.checked_add_signed(Duration::nanoseconds(1)).unwrap(),
            at(2025, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn month_lengths_follow_the_calendar() {
        let (_, jan) = month_range(2024, 1).unwrap();
        let (_, apr) = month_range(2024, 4).unwrap();
        assert!(at(2024, 1, 31, 23, 59, 59) <= jan);
        assert!(at(2024, 4, 30, 23, 59, 59) <= apr);
        assert!(at(2024, 5, 1, 0, 0, 0) > apr);
    }

    #[test]
    fn february_respects_leap_years() {
        let (_, leap) = month_range(2024, 2).unwrap();
        assert!(at(2024, 2, 29, 23, 59, 59) <= leap);

        let (_, common) = month_range(2023, 2).unwrap();
        assert!(at(2023, 2, 28, 23, 59, 59) <= common);
        assert!(at(2023, 3, 1, 0, 0, 0) > common);
    }

    #[test]
    fn december_rolls_into_the_next_year() {
        let (start, end) = month_range(2024, 12).unwrap();
        assert_eq!(start, at(2024, 12, 1, 0, 0, 0));
        assert!(at(2024, 12, 31, 23, 59, 59) <= end);
        assert!(at(2025, 1, 1, 0, 0, 0) > end);
    }

    #[test]
    fn out_of_range_months_are_rejected() {
        assert!(matches!(
            month_range(2024, 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            month_range(2024, 13),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn unrepresentable_years_are_rejected() {
        assert!(year_range(i32::MAX).is_err());
        assert!(year_range(300_000).is_err());
        assert!(month_range(300_000, 5).is_err());
    }

    #[test]
    fn month_and_year_ranges_tile_exactly() {
        let (year_start, year_end) = year_range(2024).unwrap();
        let (jan_start, _) = month_range(2024, 1).unwrap();
        let (_, dec_end) = month_range(2024, 12).unwrap();

        assert_eq!(year_start, jan_start);
        assert_eq!(year_end, dec_end);

        for month in 1..=11 {
            let (_, end) = month_range(2024, month).unwrap();
            let (next_start, _) = month_range(2024, month + 1).unwrap();
            assert_eq!(
                end.checked_add_signed(Duration::nanoseconds(1)).unwrap(),
                next_start
            );
        }
    }
}
