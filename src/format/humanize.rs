//! Human readable dates and countdowns for airing times.

use chrono::{DateTime, NaiveDate, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

fn date_of(timestamp: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).map(|at| at.date_naive())
}

/// `today`, `tomorrow` or `yesterday` when close by, `Oct 20` within about
/// five months of `today`, and `Oct 20 2027` further out.
pub fn natural_date(timestamp: i64, today: NaiveDate) -> String {
    let Some(date) = date_of(timestamp) else {
        return timestamp.to_string();
    };

    let days = (date - today).num_days();
    if days.abs() * 12 >= 5 * 365 {
        return date.format("%b %d %Y").to_string();
    }
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        _ => date.format("%b %d").to_string(),
    }
}

/// Length of a span in words: `a moment`, `5 minutes`, `an hour`, `3 months`...
pub fn natural_delta(seconds: i64) -> String {
    let seconds = seconds.saturating_abs();
    let total_days = seconds / DAY;
    let years = total_days / 365;
    let days = total_days % 365;
    // A month is 30.5 days.
    let months = days * 2 / 61;

    if years == 0 && total_days == 0 {
        return match seconds {
            0 => "a moment".to_string(),
            1 => "a second".to_string(),
            s if s < MINUTE => format!("{s} seconds"),
            s if s < 2 * MINUTE => "a minute".to_string(),
            s if s < HOUR => format!("{} minutes", s / MINUTE),
            s if s < 2 * HOUR => "an hour".to_string(),
            s => format!("{} hours", s / HOUR),
        };
    }

    match (years, months, days) {
        (0, _, 1) => "a day".to_string(),
        (0, 0, days) => format!("{days} days"),
        (0, 1, _) => "a month".to_string(),
        (0, months, _) => format!("{months} months"),
        (1, 0, 0) => "a year".to_string(),
        (1, 0, 1) => "1 year, 1 day".to_string(),
        (1, 0, days) => format!("1 year, {days} days"),
        (1, 1, _) => "1 year, 1 month".to_string(),
        (1, months, _) => format!("1 year, {months} months"),
        (years, _, _) => format!("{years} years"),
    }
}

/// Countdown to (or time since) `timestamp`: `3 days from now`, `an hour ago`.
pub fn natural_time(timestamp: i64, now: DateTime<Utc>) -> String {
    let delta = now.timestamp().saturating_sub(timestamp);
    let words = natural_delta(delta);
    match delta {
        0 => "now".to_string(),
        d if d < 0 => format!("{words} from now"),
        _ => format!("{words} ago"),
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn nearby_dates_are_named() {
        let today = noon().date_naive();
        let ts = noon().timestamp();
        assert_eq!(natural_date(ts, today), "today");
        assert_eq!(natural_date(ts + DAY, today), "tomorrow");
        assert_eq!(natural_date(ts - DAY, today), "yesterday");
        assert_eq!(natural_date(ts + 3 * DAY, today), "Oct 20");
    }

    #[test]
    fn distant_dates_carry_the_year() {
        let today = noon().date_naive();
        assert_eq!(natural_date(noon().timestamp() + 200 * DAY, today), "May 05 2027");
        assert_eq!(natural_date(noon().timestamp() - 400 * DAY, today), "Sep 12 2025");
    }

    #[test]
    fn deltas_in_words() {
        assert_eq!(natural_delta(0), "a moment");
        assert_eq!(natural_delta(45), "45 seconds");
        assert_eq!(natural_delta(90), "a minute");
        assert_eq!(natural_delta(25 * MINUTE), "25 minutes");
        assert_eq!(natural_delta(HOUR + 5), "an hour");
        assert_eq!(natural_delta(-5 * HOUR), "5 hours");
        assert_eq!(natural_delta(DAY + HOUR), "a day");
        assert_eq!(natural_delta(6 * DAY), "6 days");
        assert_eq!(natural_delta(40 * DAY), "a month");
        assert_eq!(natural_delta(100 * DAY), "3 months");
        assert_eq!(natural_delta(365 * DAY), "a year");
        assert_eq!(natural_delta(366 * DAY), "1 year, 1 day");
        assert_eq!(natural_delta(370 * DAY), "1 year, 5 days");
        assert_eq!(natural_delta(3 * 365 * DAY), "3 years");
    }

    #[test]
    fn countdown_direction() {
        let now = noon();
        assert_eq!(natural_time(now.timestamp() + 2 * DAY, now), "2 days from now");
        assert_eq!(natural_time(now.timestamp() - 3 * HOUR, now), "3 hours ago");
        assert_eq!(natural_time(now.timestamp(), now), "now");
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        let now = noon();
        assert!(natural_time(i64::MIN, now).ends_with(" ago"));
        assert!(natural_time(i64::MAX, now).ends_with(" from now"));
        assert_eq!(natural_delta(i64::MIN), natural_delta(i64::MAX));
    }

    #[test]
    fn ordinals() {
        let got: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 101, 112]
            .into_iter()
            .map(ordinal)
            .collect();
        assert_eq!(
            got,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "101st", "112th"]
        );
    }
}
