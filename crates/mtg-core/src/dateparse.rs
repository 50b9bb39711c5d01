//! Free-text date resolution.
//!
//! [`DateParser`] is the seam used by [`crate::agenda::add`]. Any
//! `Fn(&str, NaiveDateTime) -> Option<NaiveDateTime>` closure is a parser;
//! [`CasualDateParser`] is the built-in one used by the CLI.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Resolve the first date expression in `text` to a local wall-clock time.
/// `reference` is the current local time that relative phrases anchor to.
pub trait DateParser {
    fn parse(&self, text: &str, reference: NaiveDateTime) -> Option<NaiveDateTime>;
}

impl<F> DateParser for F
where
    F: Fn(&str, NaiveDateTime) -> Option<NaiveDateTime>,
{
    fn parse(&self, text: &str, reference: NaiveDateTime) -> Option<NaiveDateTime> {
        self(text, reference)
    }
}

/// Recognises everyday phrasing: `in 20 minutes`, `tomorrow at 3pm`,
/// `next friday 10:30`, `2024-01-10 09:00`, `noon`.
///
/// A date without a time resolves to 12:00, a time without a date to the
/// reference day.
#[derive(Debug, Clone, Copy, Default)]
pub struct CasualDateParser;

fn default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn evening_time() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN)
}

impl DateParser for CasualDateParser {
    fn parse(&self, text: &str, reference: NaiveDateTime) -> Option<NaiveDateTime> {
        let text = text.to_lowercase();

        if let Some(offset) = relative_offset(&text) {
            return reference.checked_add_signed(offset);
        }
        if let Some(explicit) = iso_datetime(&text) {
            return Some(explicit);
        }

        let today = reference.date();
        let day = iso_date(&text)
            .map(|d| (d, default_time()))
            .or_else(|| day_word(&text, today))
            .or_else(|| weekday(&text, today).map(|d| (d, default_time())));

        match (day, clock_time(&text)) {
            (Some((date, _)), Some(time)) => Some(date.and_time(time)),
            (Some((date, fallback)), None) => Some(date.and_time(fallback)),
            (None, Some(time)) => Some(today.and_time(time)),
            (None, None) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($re).unwrap())
        }
    };
}

pattern!(
    relative_re,
    r"\bin\s+(an?|\d+)\s*(minutes?|mins?|m|hours?|hrs?|h|days?|d)\b"
);
pattern!(
    iso_re,
    r"\b(\d{4})-(\d{2})-(\d{2})(?:[t ](\d{1,2}):(\d{2})(?::(\d{2}))?)?"
);
pattern!(day_word_re, r"\b(today|tonight|tomorrow|tmrw|yesterday)\b");
// no "mon", "wed", "sat" or "sun": they collide with ordinary words
pattern!(
    weekday_re,
    r"\b(next\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday|tues|tue|thurs|thur|thu|fri)\b"
);
pattern!(twelve_hour_re, r"\b(\d{1,2})(?::([0-5]\d))?\s*(am|pm)\b");
pattern!(twenty_four_hour_re, r"\b([01]?\d|2[0-3]):([0-5]\d)\b");
pattern!(at_hour_re, r"\bat\s+(\d{1,2})\b");
pattern!(named_time_re, r"\b(noon|midday|midnight)\b");

fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

fn relative_offset(text: &str) -> Option<TimeDelta> {
    let caps = relative_re().captures(text)?;
    let amount: i64 = match &caps[1] {
        "a" | "an" => 1,
        n => n.parse().ok()?,
    };
    match caps[2].chars().next()? {
        'm' => TimeDelta::try_minutes(amount),
        'h' => TimeDelta::try_hours(amount),
        'd' => TimeDelta::try_days(amount),
        _ => None,
    }
}

fn iso_date_from(caps: &Captures<'_>) -> Option<NaiveDate> {
    let year = caps[1].parse().ok()?;
    NaiveDate::from_ymd_opt(year, number(caps, 2)?, number(caps, 3)?)
}

fn iso_datetime(text: &str) -> Option<NaiveDateTime> {
    let caps = iso_re().captures(text)?;
    caps.get(4)?;
    let time = NaiveTime::from_hms_opt(
        number(&caps, 4)?,
        number(&caps, 5)?,
        number(&caps, 6).unwrap_or(0),
    )?;
    Some(iso_date_from(&caps)?.and_time(time))
}

fn iso_date(text: &str) -> Option<NaiveDate> {
    iso_date_from(&iso_re().captures(text)?)
}

fn day_word(text: &str, today: NaiveDate) -> Option<(NaiveDate, NaiveTime)> {
    let caps = day_word_re().captures(text)?;
    match &caps[1] {
        "today" => Some((today, default_time())),
        "tonight" => Some((today, evening_time())),
        "tomorrow" | "tmrw" => Some((today.succ_opt()?, default_time())),
        "yesterday" => Some((today.pred_opt()?, default_time())),
        _ => None,
    }
}

/// Next occurrence on or after `today`; with `next`, strictly after.
fn weekday(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = weekday_re().captures(text)?;
    let target: Weekday = caps[2].get(..3)?.parse().ok()?;
    let mut ahead =
        (7 + target.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    if ahead == 0 && caps.get(1).is_some() {
        ahead = 7;
    }
    today.checked_add_signed(TimeDelta::days(i64::from(ahead)))
}

fn clock_time(text: &str) -> Option<NaiveTime> {
    if let Some(caps) = twelve_hour_re().captures(text) {
        let hour = number(&caps, 1)?;
        if (1..=12).contains(&hour) {
            let minute = number(&caps, 2).unwrap_or(0);
            let hour = match (&caps[3], hour) {
                ("am", 12) => 0,
                ("am", h) => h,
                ("pm", 12) => 12,
                (_, h) => h + 12,
            };
            return NaiveTime::from_hms_opt(hour, minute, 0);
        }
    }
    if let Some(caps) = twenty_four_hour_re().captures(text) {
        return NaiveTime::from_hms_opt(number(&caps, 1)?, number(&caps, 2)?, 0);
    }
    if let Some(caps) = at_hour_re().captures(text) {
        if let Some(time) = NaiveTime::from_hms_opt(number(&caps, 1)?, 0, 0) {
            return Some(time);
        }
    }
    let caps = named_time_re().captures(text)?;
    match &caps[1] {
        "midnight" => Some(NaiveTime::MIN),
        _ => Some(default_time()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
