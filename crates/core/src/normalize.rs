//! Conversion of raw typed/keypad text into canonical answers.

use thiserror::Error;

use crate::model::{Answer, ClockTime, GameKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NormalizeError {
    #[error("answer is empty")]
    Empty,

    #[error("not a whole number: {0}")]
    NotAnInteger(String),

    #[error("expected a time like 08:30, got {0}")]
    TimePattern(String),

    #[error("hour must be between 0 and 23, got {0}")]
    HourOutOfRange(u32),

    #[error("minute must be between 0 and 59, got {0}")]
    MinuteOutOfRange(u32),

    #[error("expected an amount like 2,50, got {0}")]
    MoneyPattern(String),
}

/// Canonicalizes and validates raw answer text for one answer shape.
pub trait AnswerNormalizer: Send + Sync {
    /// # Errors
    ///
    /// Returns `NormalizeError` when `raw` is not a well-formed answer.
    fn normalize(&self, raw: &str) -> Result<Answer, NormalizeError>;
}

/// Returns the normalizer that matches a game's answers.
#[must_use]
pub fn normalizer_for(kind: GameKind) -> &'static dyn AnswerNormalizer {
    match kind {
        GameKind::Complement => &IntegerNormalizer,
        GameKind::Probability => &PercentNormalizer,
        GameKind::Clock => &TimeNormalizer,
        GameKind::Money => &MoneyNormalizer,
    }
}

fn non_empty(raw: &str) -> Result<&str, NormalizeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(NormalizeError::Empty)
    } else {
        Ok(trimmed)
    }
}

fn parse_integer(token: &str) -> Result<i64, NormalizeError> {
    token
        .parse::<i64>()
        .map_err(|_| NormalizeError::NotAnInteger(token.to_string()))
}

/// Base-10 integer answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerNormalizer;

impl AnswerNormalizer for IntegerNormalizer {
    fn normalize(&self, raw: &str) -> Result<Answer, NormalizeError> {
        parse_integer(non_empty(raw)?).map(Answer::Integer)
    }
}

/// Integer percentages; a trailing `%` is tolerated.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentNormalizer;

impl AnswerNormalizer for PercentNormalizer {
    fn normalize(&self, raw: &str) -> Result<Answer, NormalizeError> {
        let trimmed = non_empty(raw)?;
        let token = trimmed.strip_suffix('%').map_or(trimmed, str::trim_end);
        parse_integer(token).map(Answer::Percent)
    }
}

/// `H:MM` or `HH:MM` times of day.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeNormalizer;

impl AnswerNormalizer for TimeNormalizer {
    fn normalize(&self, raw: &str) -> Result<Answer, NormalizeError> {
        let trimmed = non_empty(raw)?;
        let pattern = || NormalizeError::TimePattern(trimmed.to_string());

        let (hours, minutes) = trimmed.split_once(':').ok_or_else(pattern)?;
        let well_formed = (1..=2).contains(&hours.len())
            && minutes.len() == 2
            && hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(pattern());
        }

        let hour: u32 = hours.parse().map_err(|_| pattern())?;
        let minute: u32 = minutes.parse().map_err(|_| pattern())?;
        if hour > 23 {
            return Err(NormalizeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(NormalizeError::MinuteOutOfRange(minute));
        }

        let time = u8::try_from(hour)
            .ok()
            .zip(u8::try_from(minute).ok())
            .and_then(|(h, m)| ClockTime::new(h, m))
            .ok_or_else(pattern)?;
        Ok(Answer::Time(time))
    }
}

/// Euro amounts with `,` or `.` as decimal separator and an optional trailing `€`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoneyNormalizer;

impl AnswerNormalizer for MoneyNormalizer {
    fn normalize(&self, raw: &str) -> Result<Answer, NormalizeError> {
        let trimmed = non_empty(raw)?;
        let pattern = || NormalizeError::MoneyPattern(trimmed.to_string());

        let amount = trimmed
            .strip_suffix('€')
            .map_or(trimmed, str::trim_end);
        let (units, fraction) = match amount.split_once([',', '.']) {
            Some((units, fraction)) => (units, Some(fraction)),
            None => (amount, None),
        };

        let digits_only = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !digits_only(units) {
            return Err(pattern());
        }
        let fraction_cents = match fraction {
            None => 0,
            Some(f) if digits_only(f) && f.len() <= 2 => {
                let value: u64 = f.parse().map_err(|_| pattern())?;
                if f.len() == 1 { value * 10 } else { value }
            }
            Some(_) => return Err(pattern()),
        };

        let cents = units
            .parse::<u64>()
            .ok()
            .and_then(|units| units.checked_mul(100))
            .and_then(|cents| cents.checked_add(fraction_cents))
            .ok_or_else(pattern)?;
        Ok(Answer::Cents(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u8, m: u8) -> Answer {
        Answer::Time(ClockTime::new(h, m).unwrap())
    }

    #[test]
    fn integer_accepts_trimmed_tokens() {
        assert_eq!(IntegerNormalizer.normalize(" 7 ").unwrap(), Answer::Integer(7));
        assert_eq!(IntegerNormalizer.normalize("0").unwrap(), Answer::Integer(0));
    }

    #[test]
    fn integer_rejects_garbage() {
        assert_eq!(IntegerNormalizer.normalize("").unwrap_err(), NormalizeError::Empty);
        assert_eq!(IntegerNormalizer.normalize("   ").unwrap_err(), NormalizeError::Empty);
        assert!(matches!(
            IntegerNormalizer.normalize("7a"),
            Err(NormalizeError::NotAnInteger(_))
        ));
        assert!(IntegerNormalizer.normalize("3.5").is_err());
    }

    #[test]
    fn percent_tolerates_sign() {
        assert_eq!(PercentNormalizer.normalize("40").unwrap(), Answer::Percent(40));
        assert_eq!(PercentNormalizer.normalize("40 %").unwrap(), Answer::Percent(40));
        assert!(PercentNormalizer.normalize("%").is_err());
    }

    #[test]
    fn time_pads_single_digit_hour() {
        assert_eq!(TimeNormalizer.normalize("8:30").unwrap(), time(8, 30));
        assert_eq!(TimeNormalizer.normalize("08:30").unwrap(), time(8, 30));
        assert_eq!(TimeNormalizer.normalize("23:59").unwrap().to_string(), "23:59");
    }

    #[test]
    fn time_rejects_bad_shapes_and_ranges() {
        for raw in ["830", "8:3", "008:30", "8h30", ":30", "8:30:00", "a8:30", "+8:30"] {
            assert!(
                matches!(TimeNormalizer.normalize(raw), Err(NormalizeError::TimePattern(_))),
                "{raw} should fail"
            );
        }
        assert_eq!(
            TimeNormalizer.normalize("24:00").unwrap_err(),
            NormalizeError::HourOutOfRange(24)
        );
        assert_eq!(
            TimeNormalizer.normalize("12:60").unwrap_err(),
            NormalizeError::MinuteOutOfRange(60)
        );
    }

    #[test]
    fn money_accepts_both_separators_and_euro_sign() {
        assert_eq!(MoneyNormalizer.normalize("16,55").unwrap(), Answer::Cents(1655));
        assert_eq!(MoneyNormalizer.normalize("16.55").unwrap(), Answer::Cents(1655));
        assert_eq!(MoneyNormalizer.normalize("16,55 €").unwrap(), Answer::Cents(1655));
        assert_eq!(MoneyNormalizer.normalize("2,5€").unwrap(), Answer::Cents(250));
        assert_eq!(MoneyNormalizer.normalize("7").unwrap(), Answer::Cents(700));
    }

    #[test]
    fn money_rejects_malformed_amounts() {
        for raw in ["2,505", "-2,50", "2,", ",50", "2,50,1", "€2", "deux", "2 50"] {
            assert!(
                matches!(MoneyNormalizer.normalize(raw), Err(NormalizeError::MoneyPattern(_))),
                "{raw} should fail"
            );
        }
        assert_eq!(MoneyNormalizer.normalize("").unwrap_err(), NormalizeError::Empty);
    }

    #[test]
    fn canonical_text_normalizes_back() {
        let cases = [
            (GameKind::Complement, Answer::Integer(13)),
            (GameKind::Probability, Answer::Percent(67)),
            (GameKind::Clock, time(7, 5)),
            (GameKind::Money, Answer::Cents(1605)),
            (GameKind::Money, Answer::Cents(9)),
        ];
        for (kind, answer) in cases {
            let text = answer.to_string();
            assert_eq!(normalizer_for(kind).normalize(&text).unwrap(), answer);
        }
    }
}
