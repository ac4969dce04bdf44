use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── CLOCK TIME ────────────────────────────────────────────────────────────────
//

/// A wall-clock time of day with minute precision.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Returns `None` unless `hour <= 23` and `minute <= 59`.
    #[must_use]
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour <= 23 && minute <= 59).then_some(Self { hour, minute })
    }

    /// Time at `minutes` past midnight, wrapping after a full day.
    #[must_use]
    pub fn from_day_minutes(minutes: u32) -> Self {
        let minutes = minutes % (24 * 60);
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }

    #[must_use]
    pub fn hour(self) -> u8 {
        self.hour
    }

    #[must_use]
    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Half of the day this time falls in.
    #[must_use]
    pub fn period(self) -> Period {
        if self.hour < 12 {
            Period::Morning
        } else {
            Period::Afternoon
        }
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}

/// Zero-padded `HH:MM`.
impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// AM/PM hint shown next to an analog clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Morning,
    Afternoon,
}

impl Period {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Period::Morning => "Matin (AM)",
            Period::Afternoon => "Après-midi / Soir (PM)",
        }
    }
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// Canonical answer value, comparable for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    Integer(i64),
    Percent(i64),
    Time(ClockTime),
    Cents(u64),
}

/// Canonical text form; feeding it back through the matching normalizer yields the
/// same value.
impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Integer(value) | Answer::Percent(value) => write!(f, "{value}"),
            Answer::Time(time) => write!(f, "{time}"),
            Answer::Cents(cents) => f.write_str(&format_cents(*cents)),
        }
    }
}

/// Formats an amount of cents as euros with a decimal comma, e.g. `16,55`.
#[must_use]
pub fn format_cents(cents: u64) -> String {
    format!("{},{:02}", cents / 100, cents % 100)
}

//
// ─── ANSWER RECORD ─────────────────────────────────────────────────────────────
//

/// Log entry for one answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub prompt: String,
    pub user_answer: Answer,
    pub correct_answer: Answer,
    pub is_correct: bool,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(prompt: impl Into<String>, user_answer: Answer, correct_answer: Answer) -> Self {
        Self {
            prompt: prompt.into(),
            user_answer,
            correct_answer,
            is_correct: user_answer == correct_answer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_rejects_out_of_range() {
        assert!(ClockTime::new(24, 0).is_none());
        assert!(ClockTime::new(12, 60).is_none());
        assert!(ClockTime::new(23, 59).is_some());
    }

    #[test]
    fn clock_time_is_zero_padded() {
        let time = ClockTime::new(8, 5).unwrap();
        assert_eq!(time.to_string(), "08:05");
    }

    #[test]
    fn day_minutes_wrap_at_midnight() {
        assert_eq!(ClockTime::from_day_minutes(8 * 60 + 30), ClockTime::new(8, 30).unwrap());
        assert_eq!(ClockTime::from_day_minutes(24 * 60 + 5), ClockTime::new(0, 5).unwrap());
    }

    #[test]
    fn period_splits_at_noon() {
        assert_eq!(ClockTime::new(11, 59).unwrap().period(), Period::Morning);
        assert_eq!(ClockTime::new(12, 0).unwrap().period(), Period::Afternoon);
    }

    #[test]
    fn cents_use_decimal_comma() {
        assert_eq!(format_cents(1655), "16,55");
        assert_eq!(format_cents(5), "0,05");
        assert_eq!(Answer::Cents(2000).to_string(), "20,00");
    }

    #[test]
    fn record_flags_correctness() {
        let right = AnswerRecord::new("3 + ? = 10", Answer::Integer(7), Answer::Integer(7));
        let wrong = AnswerRecord::new("3 + ? = 10", Answer::Integer(5), Answer::Integer(7));
        assert!(right.is_correct);
        assert!(!wrong.is_correct);
        assert_eq!(wrong.correct_answer, Answer::Integer(7));
    }

    #[test]
    fn percent_never_equals_integer() {
        assert_ne!(Answer::Percent(40), Answer::Integer(40));
    }
}
