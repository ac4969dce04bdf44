//! Player-facing French messages for validation results and the final breakdown.

use serde::Serialize;

use quiz_core::model::{Answer, AnswerRecord, GameKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTone {
    Success,
    Failure,
    /// The answer could not be read; the player may type it again.
    InvalidFormat,
}

/// Validation result shown under the answer field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub tone: FeedbackTone,
    pub message: String,
    pub record: Option<AnswerRecord>,
}

impl Feedback {
    #[must_use]
    pub fn for_record(kind: GameKind, record: AnswerRecord) -> Self {
        let (tone, message) = if record.is_correct {
            (FeedbackTone::Success, success_message(kind).to_string())
        } else {
            (
                FeedbackTone::Failure,
                failure_message(kind, record.correct_answer),
            )
        };
        Self {
            tone,
            message,
            record: Some(record),
        }
    }

    #[must_use]
    pub fn invalid_format(kind: GameKind) -> Self {
        Self {
            tone: FeedbackTone::InvalidFormat,
            message: format_error_message(kind).to_string(),
            record: None,
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.record.is_some()
    }
}

/// Answer text with the unit the game displays next to it.
#[must_use]
pub fn display_answer(answer: Answer) -> String {
    match answer {
        Answer::Percent(value) => format!("{value}%"),
        Answer::Cents(_) => format!("{answer} €"),
        Answer::Integer(_) | Answer::Time(_) => answer.to_string(),
    }
}

fn success_message(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Complement | GameKind::Probability => "Bravo ! C'est correct !",
        GameKind::Clock => "Bravo ! Bonne lecture de l'heure.",
        GameKind::Money => "Bravo ! Le rendu de monnaie est correct.",
    }
}

fn failure_message(kind: GameKind, correct: Answer) -> String {
    let expected = display_answer(correct);
    match kind {
        GameKind::Complement | GameKind::Probability => {
            format!("Dommage ! La réponse était {expected}")
        }
        GameKind::Clock => format!("Ce n'est pas exact. Il fallait répondre {expected}."),
        GameKind::Money => format!("Ce n'est pas exact. Il fallait {expected}."),
    }
}

fn format_error_message(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Complement => "Format invalide. Écris un nombre entier.",
        GameKind::Probability => "Format invalide. Écris un pourcentage, par exemple 40",
        GameKind::Clock => "Format invalide. Exemple attendu : 08:30",
        GameKind::Money => "Format invalide. Exemple : 2,50",
    }
}

/// One line of the end-of-session breakdown, numbered from 1.
#[must_use]
pub fn breakdown_line(kind: GameKind, position: usize, record: &AnswerRecord) -> String {
    let given = display_answer(record.user_answer);
    let expected = display_answer(record.correct_answer);
    let head = match kind {
        GameKind::Probability => format!("{position}. {} = {given}", record.prompt),
        _ => format!("{position}. {} → {given}", record.prompt),
    };
    if record.is_correct {
        return head;
    }
    match kind {
        GameKind::Probability => format!("{head} (La bonne réponse était {expected})"),
        _ => format!("{head} (Réponse attendue : {expected})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::ClockTime;

    #[test]
    fn complement_failure_names_expected_value() {
        let record = AnswerRecord::new("3 + ? = 10", Answer::Integer(5), Answer::Integer(7));
        let feedback = Feedback::for_record(GameKind::Complement, record);
        assert_eq!(feedback.tone, FeedbackTone::Failure);
        assert_eq!(feedback.message, "Dommage ! La réponse était 7");
        assert!(feedback.is_accepted());
    }

    #[test]
    fn money_messages_use_euros() {
        let record = AnswerRecord::new("x", Answer::Cents(1600), Answer::Cents(1655));
        let feedback = Feedback::for_record(GameKind::Money, record.clone());
        assert_eq!(feedback.message, "Ce n'est pas exact. Il fallait 16,55 €.");
        assert_eq!(
            breakdown_line(GameKind::Money, 2, &record),
            "2. x → 16,00 € (Réponse attendue : 16,55 €)"
        );
    }

    #[test]
    fn clock_success_and_breakdown() {
        let time = Answer::Time(ClockTime::new(8, 30).unwrap());
        let record = AnswerRecord::new("Horloge 08:30", time, time);
        let feedback = Feedback::for_record(GameKind::Clock, record.clone());
        assert_eq!(feedback.tone, FeedbackTone::Success);
        assert_eq!(feedback.message, "Bravo ! Bonne lecture de l'heure.");
        assert_eq!(
            breakdown_line(GameKind::Clock, 1, &record),
            "1. Horloge 08:30 → 08:30"
        );
    }

    #[test]
    fn probability_breakdown_uses_percent() {
        let record = AnswerRecord::new("Roue", Answer::Percent(20), Answer::Percent(25));
        assert_eq!(
            breakdown_line(GameKind::Probability, 3, &record),
            "3. Roue = 20% (La bonne réponse était 25%)"
        );
    }

    #[test]
    fn invalid_format_carries_no_record() {
        let feedback = Feedback::invalid_format(GameKind::Money);
        assert_eq!(feedback.tone, FeedbackTone::InvalidFormat);
        assert_eq!(feedback.message, "Format invalide. Exemple : 2,50");
        assert!(!feedback.is_accepted());
    }
}
