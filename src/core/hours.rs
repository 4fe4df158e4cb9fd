//! Opening-hours evaluation.
//!
//! Every function here is total: malformed times never produce an error. A time that
//! cannot be read makes the shop count as closed, and [`format_time`] hands the input
//! back unchanged.
//!
//! Windows are compared as minutes within a single calendar day, so an entry that
//! closes after midnight (`10pm` to `2am`) is never open.

use crate::domain::model::{Day, WeeklySchedule};
use chrono::{Datelike, Local, Timelike};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Text returned by [`today_hours`] for a day without hours.
pub const CLOSED_TODAY: &str = "Closed today";

static TWELVE_HOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})(?::([0-9]{2}))?\s*(am|pm)$").expect("twelve-hour pattern")
});

fn normalize(time: &str) -> String {
    time.trim().to_lowercase()
}

/// Reads the integer at the start of `s`, ignoring anything after it.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn twelve_hour(normalized: &str) -> Option<Captures<'_>> {
    TWELVE_HOUR.captures(normalized)
}

/// Minutes since midnight for `"7am"`, `"7:30 pm"`, `"17:00"` and the like.
///
/// Returns `None` when the hour or minute is not a number. Values are not clamped,
/// `"25:00"` reads as 1500.
pub fn parse_time_to_minutes(time: &str) -> Option<i64> {
    let normalized = normalize(time);

    if let Some(caps) = twelve_hour(&normalized) {
        let mut hour = leading_int(&caps[1])?;
        let minutes = caps.get(2).map_or(Some(0), |m| leading_int(m.as_str()))?;
        let pm = &caps[3] == "pm";

        if pm && hour != 12 {
            hour += 12;
        }
        if !pm && hour == 12 {
            hour = 0;
        }
        return to_minutes(hour, minutes);
    }

    let mut parts = normalized.split(':');
    let hour = leading_int(parts.next().unwrap_or_default())?;
    let minutes = match parts.next() {
        None | Some("") => 0,
        Some(part) => leading_int(part)?,
    };
    to_minutes(hour, minutes)
}

/// `None` when the total does not fit, so huge inputs read as closed.
fn to_minutes(hour: i64, minutes: i64) -> Option<i64> {
    hour.checked_mul(60)?.checked_add(minutes)
}

/// Whether `schedule` has the shop open at the wall-clock time `now`.
///
/// The window is half-open: the closing minute itself counts as closed.
pub fn is_open_at<T: Datelike + Timelike>(schedule: &WeeklySchedule, now: &T) -> bool {
    let Some(hours) = schedule.get(Day::of(now)) else {
        return false;
    };

    let current = i64::from(now.hour() * 60 + now.minute());
    match (
        parse_time_to_minutes(&hours.open),
        parse_time_to_minutes(&hours.close),
    ) {
        (Some(open), Some(close)) => open <= current && current < close,
        _ => false,
    }
}

/// [`is_open_at`] against the host's local clock.
pub fn is_currently_open(schedule: &WeeklySchedule) -> bool {
    is_open_at(schedule, &Local::now())
}

/// Today's hours as `"9:00 AM - 5:00 PM"`, or `closed_label` when there are none.
pub fn today_hours_at<D: Datelike>(schedule: &WeeklySchedule, now: &D, closed_label: &str) -> String {
    match schedule.get(Day::of(now)) {
        Some(hours) => format!("{} - {}", format_time(&hours.open), format_time(&hours.close)),
        None => closed_label.to_string(),
    }
}

pub fn today_hours(schedule: &WeeklySchedule) -> String {
    today_hours_at(schedule, &Local::now(), CLOSED_TODAY)
}

/// Renders a time as `"H:MM AM"`. Input whose hour is not a number comes back as is.
pub fn format_time(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }

    let normalized = normalize(time);

    if let Some(caps) = twelve_hour(&normalized) {
        if let Some(hour) = leading_int(&caps[1]) {
            let minutes = caps.get(2).map_or("00", |m| m.as_str());
            let period = caps[3].to_uppercase();
            return format!("{}:{} {}", hour, minutes, period);
        }
    }

    let mut parts = normalized.split(':');
    let Some(hour) = parts.next().and_then(leading_int) else {
        return time.to_string();
    };

    let minutes = parts
        .next()
        .map_or_else(|| "00".to_string(), |part| format!("{:0>2}", part));
    let period = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{} {}", hour12, minutes, period)
}
