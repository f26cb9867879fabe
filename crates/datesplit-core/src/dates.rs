//! Permissive date parsing for free-text date columns.
//!
//! Source files are hand-curated, so the same column can mix
//! `01/15/2023`, `2023-01-15T08:00:00Z` and `January 15th, 2023`.
//! Every recognized form is reduced to a calendar date; time of day and
//! timezone are discarded.
//!
//! # Supported forms
//!
//! - ISO 8601 / RFC 3339: `2023-01-15`, `2023/01/15`, `2023-01-15T08:30:00+02:00`
//! - RFC 2822: `Sun, 15 Jan 2023 08:30:00 +0000`
//! - US numeric: `01/15/2023`, `1-15-2023`, `01.15.23` (day-first is tried
//!   when the month-first reading is impossible, e.g. `25/12/2023`)
//! - Compact: `20230115`
//! - Month names: `January 15, 2023`, `Jan 15 2023`, `15 Jan 2023`,
//!   `15-Jan-2023`, `Monday, January 16th, 2023`, `15th of January 2023`
//! - Month and year only: `January 2023` takes the reference day of month,
//!   clamped to the length of that month
//! - Month and day only: `March 7` takes the reference year
//! - Trailing clock and zone: `2023-01-15 08:30:00 UTC`, `Jan 15, 2023 at 3pm`
//! - Relative: `today`, `yesterday`, `tomorrow`, `3 days ago`, `a week ago`,
//!   `in 2 months`

use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate};

/// Turns raw column text into a calendar date.
pub trait DateParser {
    /// Returns `None` when no date can be recognized.
    fn parse(&self, text: &str) -> Option<NaiveDate>;
}

/// Default parser accepting common numeric, ISO and month-name formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexibleDateParser {
    today: NaiveDate,
}

impl Default for FlexibleDateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FlexibleDateParser {
    /// Parser that resolves relative forms against the local current date.
    pub fn new() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Parser with a fixed reference date for relative and partial dates.
    pub fn with_reference_date(today: NaiveDate) -> Self {
        Self { today }
    }

    fn parse_relative(&self, value: &str) -> Option<NaiveDate> {
        let lower = value.to_ascii_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();
        match words.as_slice() {
            ["today" | "now"] => Some(self.today),
            ["yesterday"] => self.today.pred_opt(),
            ["tomorrow"] => self.today.succ_opt(),
            [count, unit, "ago"] => self.shift(count, unit, false),
            ["in", count, unit] => self.shift(count, unit, true),
            _ => None,
        }
    }

    /// Move the reference date by `count` days, weeks, months or years.
    fn shift(&self, count: &str, unit: &str, forward: bool) -> Option<NaiveDate> {
        let count: u32 = match count {
            "a" | "an" | "one" => 1,
            digits => digits.parse().ok()?,
        };
        let (days, months) = match unit.strip_suffix('s').unwrap_or(unit) {
            "day" => (count, 0),
            "week" => (count.checked_mul(7)?, 0),
            "month" => (0, count),
            "year" => (0, count.checked_mul(12)?),
            _ => return None,
        };
        let days = Days::new(u64::from(days));
        let months = Months::new(months);
        if forward {
            self.today
                .checked_add_days(days)?
                .checked_add_months(months)
        } else {
            self.today
                .checked_sub_days(days)?
                .checked_sub_months(months)
        }
    }
}

impl DateParser for FlexibleDateParser {
    fn parse(&self, text: &str) -> Option<NaiveDate> {
        let trimmed = text.trim().trim_start_matches('\u{feff}');
        if trimmed.is_empty() {
            return None;
        }

        if let Some(date) = self.parse_relative(trimmed) {
            return Some(date);
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(datetime.date_naive());
        }
        if let Ok(datetime) = DateTime::parse_from_rfc2822(trimmed) {
            return Some(datetime.date_naive());
        }

        let date_part = strip_time(trimmed);
        parse_numeric(date_part).or_else(|| parse_textual(date_part, self.today))
    }
}

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Words that may sit between the date and the rest of the text.
const FILLER_WORDS: [&str; 4] = ["at", "of", "on", "the"];

/// Drop a trailing time of day and zone (`T08:30:00Z`, ` 14:05 UTC`, ` at 3pm`).
fn strip_time(value: &str) -> &str {
    // ISO date-time: the date is the ten characters before 'T'.
    if let Some((date, _)) = value.split_once(['T', 't'])
        && date.len() == 10
        && date.bytes().all(|b| b.is_ascii_digit() || b == b'-' || b == b'/')
    {
        return date;
    }

    let mut end = value.len();
    for token in value.rsplit(|c: char| c.is_ascii_whitespace()) {
        let droppable = token.is_empty()
            || is_clock(token)
            || is_meridiem(token)
            || is_zone(token)
            || is_filler(token);
        if droppable {
            end = end.saturating_sub(token.len() + 1);
        } else {
            break;
        }
    }
    value[..end.min(value.len())].trim_end()
}

/// `14:05`, `08:30:00.250`, `08:30:00Z`, `08:30:00-05:00`, `3pm`, `2:30am`.
fn is_clock(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    if let Some(hour) = lower
        .strip_suffix("am")
        .or_else(|| lower.strip_suffix("pm"))
    {
        return !hour.is_empty()
            && hour.bytes().all(|b| b.is_ascii_digit() || b == b':');
    }
    let (clock, offset) = match token.find(['+', '-']) {
        Some(idx) => token.split_at(idx),
        None => (token, ""),
    };
    let clock = clock.trim_end_matches(['Z', 'z']);
    clock.contains(':')
        && clock
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b':' | b'.'))
        && (offset.is_empty() || is_offset(offset))
}

fn is_meridiem(token: &str) -> bool {
    token.eq_ignore_ascii_case("am") || token.eq_ignore_ascii_case("pm")
}

/// `UTC`, `GMT`, `Z` or a numeric offset.
fn is_zone(token: &str) -> bool {
    ["utc", "gmt", "z"]
        .iter()
        .any(|zone| token.eq_ignore_ascii_case(zone))
        || is_offset(token)
}

/// `+0000`, `-05:00`, `+02`.
fn is_offset(token: &str) -> bool {
    let Some(rest) = token.strip_prefix(['+', '-']) else {
        return false;
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    matches!(digits.len(), 2 | 4) && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_filler(token: &str) -> bool {
    FILLER_WORDS
        .iter()
        .any(|word| token.eq_ignore_ascii_case(word))
}

/// `YYYY-MM-DD`, `MM/DD/YYYY`, `MM/DD/YY`, `YYYYMMDD` and friends.
fn parse_numeric(value: &str) -> Option<NaiveDate> {
    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        let year = value[..4].parse().ok()?;
        let month = value[4..6].parse().ok()?;
        let day = value[6..].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let parts: Vec<&str> = value.split(['-', '/', '.']).collect();
    if parts.len() != 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    if parts[0].len() == 4 {
        let year = parts[0].parse().ok()?;
        let month = parts[1].parse().ok()?;
        let day = parts[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if parts[0].len() > 2 || parts[1].len() > 2 {
        return None;
    }
    let year = match parts[2].len() {
        4 => parts[2].parse().ok()?,
        2 => expand_two_digit_year(parts[2].parse().ok()?),
        _ => return None,
    };
    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;
    NaiveDate::from_ymd_opt(year, first, second)
        .or_else(|| NaiveDate::from_ymd_opt(year, second, first))
}

/// POSIX `%y` pivot: 69-99 are 1900s, 00-68 are 2000s.
fn expand_two_digit_year(year: i32) -> i32 {
    if year >= 69 { 1900 + year } else { 2000 + year }
}

/// Dates written with a month name, in either order around the day.
///
/// A missing day or year is taken from `today`.
fn parse_textual(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    let normalized = value.replace([',', '-', '/', '.'], " ");
    let mut month = None;
    let mut numbers: Vec<&str> = Vec::new();

    for token in normalized.split_whitespace() {
        if token.bytes().all(|b| b.is_ascii_alphabetic()) {
            let lower = token.to_ascii_lowercase();
            if is_filler(&lower)
                || (lower.len() >= 3 && WEEKDAYS.iter().any(|w| w.starts_with(&lower)))
            {
                continue;
            }
            if month.is_some() {
                return None;
            }
            month = Some(month_number(&lower)?);
        } else {
            numbers.push(strip_ordinal(token)?);
        }
    }

    let month = month?;
    let (day, year) = match numbers.as_slice() {
        [first, second] if first.len() == 4 => (Some(*second), *first),
        [first, second] if second.len() == 4 => (Some(*first), *second),
        [first, second] if second.len() == 2 => (Some(*first), *second),
        [year] if year.len() == 4 => (None, *year),
        [day] if day.len() <= 2 => {
            return NaiveDate::from_ymd_opt(today.year(), month, day.parse().ok()?);
        }
        _ => return None,
    };
    let year = match year.len() {
        4 => year.parse().ok()?,
        _ => expand_two_digit_year(year.parse().ok()?),
    };
    let day = match day {
        Some(day) if day.len() <= 2 => day.parse().ok()?,
        Some(_) => return None,
        None => today.day().min(days_in_month(year, month)?),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some(last.day())
}

/// `jan`, `sept`, `September` all map to their month number.
fn month_number(token: &str) -> Option<u32> {
    if token.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|name| name.starts_with(token))
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

/// `3rd` becomes `3`; plain digits pass through; anything else is rejected.
fn strip_ordinal(token: &str) -> Option<&str> {
    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    if digits_end == 0 {
        return None;
    }
    match token[digits_end..].to_ascii_lowercase().as_str() {
        "" | "st" | "nd" | "rd" | "th" => Some(&token[..digits_end]),
        _ => None,
    }
}
