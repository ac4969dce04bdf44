use serde::{Deserialize, Serialize};

use crate::model::answer::{Answer, ClockTime, Period, format_cents};

/// Game-specific data a presentation layer needs to render a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionPayload {
    Complement { num1: u32, target: u32 },
    Clock { time: ClockTime },
    Money { price_cents: u64, payment_cents: u64 },
    Probability { favorable: u32, total: u32 },
}

/// A generated question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    payload: QuestionPayload,
    answer: Answer,
    prompt: String,
    summary: String,
}

impl Question {
    /// `num1 + ? = target`.
    #[must_use]
    pub fn complement(num1: u32, target: u32) -> Self {
        let text = format!("{num1} + ? = {target}");
        Self {
            payload: QuestionPayload::Complement { num1, target },
            answer: Answer::Integer(i64::from(target) - i64::from(num1)),
            prompt: text.clone(),
            summary: text,
        }
    }

    #[must_use]
    pub fn clock(time: ClockTime) -> Self {
        Self {
            payload: QuestionPayload::Clock { time },
            answer: Answer::Time(time),
            prompt: "Quelle heure indique l'horloge ?".to_string(),
            summary: format!("Horloge {time}"),
        }
    }

    /// Caller guarantees `price_cents < payment_cents`.
    #[must_use]
    pub fn money(price_cents: u64, payment_cents: u64) -> Self {
        let price = format_cents(price_cents);
        let paid = format_cents(payment_cents);
        Self {
            payload: QuestionPayload::Money {
                price_cents,
                payment_cents,
            },
            answer: Answer::Cents(payment_cents.saturating_sub(price_cents)),
            prompt: format!(
                "Un article coûte {price} €. Tu donnes {paid} €. Quelle monnaie doit-on te rendre ?"
            ),
            summary: format!("{price} € payés avec {paid} €"),
        }
    }

    /// `prompt` is one of the phrasings describing `favorable` out of `total`.
    #[must_use]
    pub fn probability(favorable: u32, total: u32, prompt: String) -> Self {
        Self {
            payload: QuestionPayload::Probability { favorable, total },
            answer: Answer::Percent(rounded_percent(favorable, total)),
            summary: prompt.clone(),
            prompt,
        }
    }

    #[must_use]
    pub fn payload(&self) -> &QuestionPayload {
        &self.payload
    }

    #[must_use]
    pub fn answer(&self) -> Answer {
        self.answer
    }

    /// Full question text for display.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Short label used in the end-of-session breakdown.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// AM/PM hint for clock questions.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        match self.payload {
            QuestionPayload::Clock { time } => Some(time.period()),
            _ => None,
        }
    }
}

/// `round(favorable / total * 100)` with halves rounded up, in integer arithmetic.
fn rounded_percent(favorable: u32, total: u32) -> i64 {
    if total == 0 {
        return 0;
    }
    let favorable = i64::from(favorable);
    let total = i64::from(total);
    (favorable * 200 + total) / (total * 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_answer_is_difference() {
        let question = Question::complement(3, 10);
        assert_eq!(question.answer(), Answer::Integer(7));
        assert_eq!(question.prompt(), "3 + ? = 10");
    }

    #[test]
    fn money_answer_in_cents() {
        let question = Question::money(345, 2000);
        assert_eq!(question.answer(), Answer::Cents(1655));
        assert_eq!(question.summary(), "3,45 € payés avec 20,00 €");
        assert!(question.prompt().contains("3,45 €"));
    }

    #[test]
    fn clock_summary_and_period() {
        let question = Question::clock(ClockTime::new(20, 30).unwrap());
        assert_eq!(question.summary(), "Horloge 20:30");
        assert_eq!(question.period(), Some(Period::Afternoon));
        assert_eq!(Question::complement(1, 10).period(), None);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(5, 5), 100);
        assert_eq!(rounded_percent(0, 4), 0);
    }
}
