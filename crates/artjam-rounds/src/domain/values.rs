//! Value types shared by the round aggregate and its outcomes.

use std::fmt;
use std::num::NonZeroU32;

use artjam_core::error::DomainError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// A validated, strictly positive round length in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeLimit(NonZeroU32);

impl TimeLimit {
    /// Validates a minute count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if `minutes` is zero, negative, or
    /// too large to represent.
    pub fn from_minutes(minutes: i64) -> Result<Self, DomainError> {
        if minutes <= 0 {
            return Err(DomainError::InvalidInput(format!(
                "time limit must be a positive number of minutes, got {minutes}"
            )));
        }
        u32::try_from(minutes)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| {
                DomainError::InvalidInput(format!("time limit of {minutes} minutes is too large"))
            })
    }

    /// The limit in minutes.
    #[must_use]
    pub fn minutes(self) -> u32 {
        self.0.get()
    }

    /// The limit as a calendar duration.
    #[must_use]
    pub fn as_time_delta(self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.minutes()))
    }

    /// The limit as a timer duration.
    #[must_use]
    pub fn as_duration(self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.minutes()) * 60)
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&plural(u64::from(self.minutes()), "minute"))
    }
}

/// Parses user-typed minutes into a signed count without range checks.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if `raw` is not a whole number.
pub fn parse_minutes(raw: &str) -> Result<i64, DomainError> {
    let trimmed = raw.trim();
    trimmed.parse().map_err(|_| {
        DomainError::InvalidInput(format!(
            "time limit must be a whole number of minutes, got \"{trimmed}\""
        ))
    })
}

/// A participant's current entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// Name shown when the entry is republished.
    pub display_name: String,
    /// Opaque reference to the submitted artifact (usually a URL).
    pub artifact_reference: String,
    /// When the entry was (last) submitted.
    pub submitted_at: DateTime<Utc>,
}

/// Remaining time in an active round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimeLeft {
    /// Time remains on the clock.
    Remaining {
        /// Whole minutes left.
        minutes: i64,
        /// Seconds left beyond the whole minutes.
        seconds: i64,
    },
    /// The deadline has passed but the deadline task has not ended the round yet.
    TimesUp,
}

impl TimeLeft {
    /// Computes the time left until `ends_at`.
    #[must_use]
    pub fn until(ends_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = ends_at - now;
        if remaining <= TimeDelta::zero() {
            return Self::TimesUp;
        }
        let total_seconds = remaining.num_seconds();
        Self::Remaining {
            minutes: total_seconds / 60,
            seconds: total_seconds % 60,
        }
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remaining { minutes, seconds } => {
                write!(f, "{minutes} min {seconds} sec left")
            }
            Self::TimesUp => f.write_str("time's up"),
        }
    }
}

/// Formats `count` with `noun`, pluralised with a trailing "s".
pub(crate) fn plural(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_minutes_accepts_padded_integer() {
        let limit = TimeLimit::from_minutes(parse_minutes(" 15 ").unwrap()).unwrap();
        assert_eq!(limit.minutes(), 15);
        assert_eq!(limit.as_time_delta(), TimeDelta::minutes(15));
        assert_eq!(limit.as_duration(), std::time::Duration::from_secs(900));
    }

    #[test]
    fn test_parse_minutes_rejects_non_numeric_and_fractional() {
        for raw in ["abc", "2.5", ""] {
            match parse_minutes(raw) {
                Err(DomainError::InvalidInput(_)) => {}
                other => panic!("expected InvalidInput for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_from_minutes_rejects_negative_and_zero() {
        for minutes in [-5, 0] {
            assert!(matches!(
                TimeLimit::from_minutes(minutes),
                Err(DomainError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_from_minutes_rejects_values_beyond_u32() {
        let result = TimeLimit::from_minutes(i64::from(u32::MAX) + 1);
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_time_left_splits_minutes_and_seconds() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let ends_at = now + TimeDelta::seconds(125);
        assert_eq!(
            TimeLeft::until(ends_at, now),
            TimeLeft::Remaining {
                minutes: 2,
                seconds: 5
            }
        );
    }

    #[test]
    fn test_time_left_is_times_up_at_and_after_deadline() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(TimeLeft::until(now, now), TimeLeft::TimesUp);
        assert_eq!(
            TimeLeft::until(now - TimeDelta::seconds(3), now),
            TimeLeft::TimesUp
        );
    }

    #[test]
    fn test_display_pluralises_minutes() {
        assert_eq!(TimeLimit::from_minutes(1).unwrap().to_string(), "1 minute");
        assert_eq!(TimeLimit::from_minutes(2).unwrap().to_string(), "2 minutes");
    }
}
