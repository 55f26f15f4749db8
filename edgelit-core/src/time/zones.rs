//! Built-in timezones

use chrono::{Month, Weekday};

use super::timezone::{TimeChangeRule, Timezone, Week};

/// Central European Summer Time, from the last Sunday of March at 02:00
pub const CEST: TimeChangeRule =
    TimeChangeRule::new("CEST", Week::Last, Weekday::Sun, Month::March, 2, 120);

/// Central European Time, from the last Sunday of October at 03:00
pub const CET: TimeChangeRule =
    TimeChangeRule::new("CET", Week::Last, Weekday::Sun, Month::October, 3, 60);

/// Central European Time (Amsterdam, Berlin, Paris)
pub const CENTRAL_EUROPE: Timezone = Timezone::new(CEST, CET);

/// Coordinated Universal Time, no daylight saving
pub const UTC: Timezone =
    Timezone::fixed(TimeChangeRule::new("UTC", Week::First, Weekday::Sun, Month::January, 0, 0));
