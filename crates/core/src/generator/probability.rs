use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use super::QuestionGenerator;
use crate::model::{Difficulty, Question};

fn marbles(favorable: u32, total: u32) -> String {
    format!(
        "Dans un sac il y a {favorable} billes rouges sur {total} billes. Probabilité de tirer une rouge"
    )
}

fn wheel(favorable: u32, total: u32) -> String {
    format!(
        "Une roue est divisée en {total} parts égales dont {favorable} gagnantes. Probabilité de tomber sur une part gagnante"
    )
}

fn cards(favorable: u32, total: u32) -> String {
    format!(
        "Dans une boîte, {favorable} cartes sont marquées \"A\" sur {total} cartes. Probabilité de tirer \"A\""
    )
}

/// Ways of phrasing "`favorable` out of `total`".
pub const PROBABILITY_PHRASINGS: [fn(u32, u32) -> String; 3] = [marbles, wheel, cards];

fn denominators(level: Difficulty) -> &'static [u32] {
    match level {
        Difficulty::Easy => &[2, 4, 5, 10],
        Difficulty::Medium => &[4, 5, 10, 20, 25],
        Difficulty::Hard => &[4, 5, 10, 20, 25, 50, 100],
    }
}

/// Fractions to express as a rounded percentage.
#[derive(Debug, Clone, Copy)]
pub struct ProbabilityGenerator {
    pool: &'static [u32],
}

impl ProbabilityGenerator {
    #[must_use]
    pub fn new(level: Difficulty) -> Self {
        Self {
            pool: denominators(level),
        }
    }
}

impl QuestionGenerator for ProbabilityGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        // the pools are fixed and never empty
        let total = self.pool.choose(rng).copied().unwrap_or(10);
        let favorable = rng.random_range(0..=total);
        let phrase = PROBABILITY_PHRASINGS.choose(rng).copied().unwrap_or(marbles);
        Question::probability(favorable, total, phrase(favorable, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, QuestionPayload};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn fraction_stays_in_pool() {
        let mut rng = StdRng::seed_from_u64(99);
        for level in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let generator = ProbabilityGenerator::new(level);
            for _ in 0..100 {
                let question = generator.generate(&mut rng);
                let QuestionPayload::Probability { favorable, total } = *question.payload()
                else {
                    panic!("unexpected payload");
                };
                assert!(denominators(level).contains(&total));
                assert!(favorable <= total);
                let expected = (f64::from(favorable) / f64::from(total) * 100.0).round() as i64;
                assert_eq!(question.answer(), Answer::Percent(expected));
            }
        }
    }

    #[test]
    fn prompt_mentions_both_counts() {
        let mut rng = StdRng::seed_from_u64(4);
        let question = ProbabilityGenerator::new(Difficulty::Medium).generate(&mut rng);
        let QuestionPayload::Probability { favorable, total } = *question.payload() else {
            panic!("unexpected payload");
        };
        assert!(question.prompt().contains(&format!("{favorable} ")));
        assert!(question.prompt().contains(&format!("{total} ")));
    }

    #[test]
    fn every_denominator_and_phrasing_is_drawn() {
        let mut rng = StdRng::seed_from_u64(31);
        let generator = ProbabilityGenerator::new(Difficulty::Hard);
        let mut totals = std::collections::HashSet::new();
        let mut openings = std::collections::HashSet::new();
        for _ in 0..1000 {
            let question = generator.generate(&mut rng);
            if let QuestionPayload::Probability { total, .. } = *question.payload() {
                totals.insert(total);
            }
            openings.insert(question.prompt().chars().take(8).collect::<String>());
        }
        assert_eq!(totals.len(), denominators(Difficulty::Hard).len());
        assert_eq!(openings.len(), PROBABILITY_PHRASINGS.len());
    }

    #[test]
    fn phrasings_differ() {
        let texts: Vec<String> = PROBABILITY_PHRASINGS.iter().map(|p| p(1, 4)).collect();
        assert_ne!(texts[0], texts[1]);
        assert_ne!(texts[1], texts[2]);
    }
}
