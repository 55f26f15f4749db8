//! Daylight-saving aware timezone conversion
//!
//! A timezone is a pair of rules, one for daylight time and one for
//! standard time. Each rule says when it takes effect ("last Sunday in
//! March at 02:00") and which UTC offset applies from then on. The rule
//! hour is local wall-clock time under the offset that was in effect just
//! before the change, which is how transitions are published.

use chrono::{Datelike, Month, NaiveDate, Weekday};

use super::instant::{LocalInstant, LocalTime, UtcInstant, SECS_PER_DAY, SECS_PER_MINUTE};

/// Largest UTC offset in use anywhere, in minutes
pub const MAX_OFFSET_MINUTES: i16 = 14 * 60;

/// `NaiveDate::num_days_from_ce` of 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

const SECS_PER_HOUR: i64 = 3_600;

/// Week of the month a transition falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Week {
    First,
    Second,
    Third,
    Fourth,
    /// Last occurrence of the weekday in the month
    Last,
}

impl Week {
    /// Whole weeks after the first occurrence of the weekday
    const fn weeks_after_first(self) -> i64 {
        match self {
            Week::First | Week::Last => 0,
            Week::Second => 1,
            Week::Third => 2,
            Week::Fourth => 3,
        }
    }
}

/// When an offset takes effect, and what that offset is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeChangeRule {
    abbreviation: &'static str,
    week: Week,
    weekday: Weekday,
    month: Month,
    hour: u8,
    offset_minutes: i16,
}

impl TimeChangeRule {
    /// Create a rule
    ///
    /// Rules are build-time constants. A rule with an hour past 23 or an
    /// offset beyond ±14 h is rejected during const evaluation, so a typo
    /// in a zone definition fails the build instead of the clock.
    pub const fn new(
        abbreviation: &'static str,
        week: Week,
        weekday: Weekday,
        month: Month,
        hour: u8,
        offset_minutes: i16,
    ) -> Self {
        assert!(hour < 24, "transition hour must be 0-23");
        assert!(
            offset_minutes >= -MAX_OFFSET_MINUTES && offset_minutes <= MAX_OFFSET_MINUTES,
            "UTC offset out of range"
        );
        Self {
            abbreviation,
            week,
            weekday,
            month,
            hour,
            offset_minutes,
        }
    }

    pub const fn abbreviation(&self) -> &'static str {
        self.abbreviation
    }

    pub const fn offset_minutes(&self) -> i16 {
        self.offset_minutes
    }

    pub const fn week(&self) -> Week {
        self.week
    }

    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    const fn offset_seconds(&self) -> i64 {
        self.offset_minutes as i64 * SECS_PER_MINUTE
    }

    /// Wall-clock second (epoch based) at which the rule fires in `year`
    ///
    /// `None` only for years outside chrono's calendar.
    fn local_start(&self, year: i32) -> Option<i64> {
        let month = self.month.number_from_month();

        // "Last" counts back one week from the first such weekday of the
        // following month
        let (year, month) = match self.week {
            Week::Last if month == 12 => (year.checked_add(1)?, 1),
            Week::Last => (year, month + 1),
            _ => (year, month),
        };

        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let first_weekday = first.weekday().num_days_from_sunday() as i64;
        let target_weekday = self.weekday.num_days_from_sunday() as i64;

        let mut day_offset =
            (target_weekday - first_weekday + 7) % 7 + self.week.weeks_after_first() * 7;
        if self.week == Week::Last {
            day_offset -= 7;
        }

        let days = first.num_days_from_ce() as i64 - UNIX_EPOCH_DAYS_FROM_CE + day_offset;
        Some(days * SECS_PER_DAY + self.hour as i64 * SECS_PER_HOUR)
    }
}

/// Which of a timezone's two rules is in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Period {
    Daylight,
    Standard,
}

/// UTC seconds at which each period begins in a given year
///
/// Signed, because the neighbouring years of the first and last
/// representable instants fall outside [`UtcInstant`]'s range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transitions {
    pub daylight_start: i64,
    pub standard_start: i64,
}

/// A daylight/standard rule pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone {
    daylight: TimeChangeRule,
    standard: TimeChangeRule,
}

impl Timezone {
    /// Create a timezone from its daylight and standard rules
    pub const fn new(daylight: TimeChangeRule, standard: TimeChangeRule) -> Self {
        Self { daylight, standard }
    }

    /// Create a timezone that never changes offset
    pub const fn fixed(rule: TimeChangeRule) -> Self {
        Self {
            daylight: rule,
            standard: rule,
        }
    }

    pub const fn daylight(&self) -> &TimeChangeRule {
        &self.daylight
    }

    pub const fn standard(&self) -> &TimeChangeRule {
        &self.standard
    }

    /// Whether the two rules have different offsets
    pub const fn observes_daylight(&self) -> bool {
        self.daylight.offset_minutes != self.standard.offset_minutes
    }

    /// Rule for `period`
    pub const fn rule(&self, period: Period) -> &TimeChangeRule {
        match period {
            Period::Daylight => &self.daylight,
            Period::Standard => &self.standard,
        }
    }

    /// UTC instants at which daylight and standard time begin in `year`
    ///
    /// Each transition is converted with the offset that applies just
    /// before it: daylight start with the standard offset, standard start
    /// with the daylight offset.
    pub fn transitions(&self, year: i32) -> Option<Transitions> {
        let daylight_start = self.daylight.local_start(year)? - self.standard.offset_seconds();
        let standard_start = self.standard.local_start(year)? - self.daylight.offset_seconds();
        Some(Transitions {
            daylight_start,
            standard_start,
        })
    }

    /// Period in effect at `utc`
    ///
    /// The latest transition at or before `utc` wins, so an instant
    /// exactly on a transition already belongs to the new period.
    pub fn period_at(&self, utc: UtcInstant) -> Period {
        if !self.observes_daylight() {
            return Period::Standard;
        }

        let at = utc.unix_seconds() as i64;
        self.latest_transition(utc.year(), |t| (t.daylight_start, t.standard_start), at)
    }

    /// Rule in effect at `utc`
    pub fn rule_at(&self, utc: UtcInstant) -> &TimeChangeRule {
        self.rule(self.period_at(utc))
    }

    /// UTC offset in effect at `utc`, in minutes
    pub fn offset_minutes_at(&self, utc: UtcInstant) -> i16 {
        self.rule_at(utc).offset_minutes
    }

    /// Whether daylight time is in effect at `utc`
    pub fn is_daylight(&self, utc: UtcInstant) -> bool {
        self.period_at(utc) == Period::Daylight
    }

    /// Convert a UTC instant to local wall-clock time
    pub fn to_local(&self, utc: UtcInstant) -> LocalInstant {
        LocalInstant::from_utc(utc, self.offset_minutes_at(utc))
    }

    /// Convert a UTC instant to a calendar breakdown of local time
    pub fn local_time(&self, utc: UtcInstant) -> LocalTime {
        let rule = self.rule_at(utc);
        LocalInstant::from_utc(utc, rule.offset_minutes).to_local_time(rule.abbreviation)
    }

    /// Convert local wall-clock time back to UTC
    ///
    /// The repeated hour after the switch to standard time is read as
    /// standard time. The skipped hour after the switch to daylight time
    /// is read with the standard offset.
    pub fn to_utc(&self, local: LocalInstant) -> UtcInstant {
        let period = if self.observes_daylight() {
            // Transitions on the local timeline, each expressed under the
            // offset that applies after it
            let daylight_offset = self.daylight.offset_seconds();
            let standard_offset = self.standard.offset_seconds();
            self.latest_transition(
                local.year(),
                |t| {
                    (
                        t.daylight_start + daylight_offset,
                        t.standard_start + standard_offset,
                    )
                },
                local.seconds(),
            )
        } else {
            Period::Standard
        };

        UtcInstant::EPOCH.offset_by(local.seconds() - self.rule(period).offset_seconds())
    }

    /// Period whose start is the latest one at or before `at`
    ///
    /// Looks at the years either side of `year` as well, so that instants
    /// near New Year see the transitions that straddle it.
    fn latest_transition(
        &self,
        year: i32,
        starts: impl Fn(&Transitions) -> (i64, i64),
        at: i64,
    ) -> Period {
        let mut latest: Option<(i64, Period)> = None;

        for y in year.saturating_sub(1)..=year.saturating_add(1) {
            let Some(transitions) = self.transitions(y) else {
                continue;
            };
            let (daylight_start, standard_start) = starts(&transitions);

            for (start, period) in [
                (daylight_start, Period::Daylight),
                (standard_start, Period::Standard),
            ] {
                if start <= at && latest.map_or(true, |(best, _)| start > best) {
                    latest = Some((start, period));
                }
            }
        }

        latest.map_or(Period::Standard, |(_, period)| period)
    }
}
