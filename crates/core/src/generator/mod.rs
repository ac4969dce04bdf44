//! Random question generation, one strategy per game.

mod clock;
mod complement;
mod money;
mod probability;

use rand::RngCore;

use crate::model::{GameConfig, QUESTIONS_PER_SESSION, Question};

pub use clock::ClockGenerator;
pub use complement::ComplementGenerator;
pub use money::{MoneyGenerator, MoneyTier};
pub use probability::{PROBABILITY_PHRASINGS, ProbabilityGenerator};

/// Produces independent questions of one game's shape.
///
/// Implementations hold only their configuration; all randomness comes from the
/// caller's generator so consecutive batches never share state.
pub trait QuestionGenerator: Send + Sync {
    fn generate(&self, rng: &mut dyn RngCore) -> Question;

    /// A fresh batch for one session.
    fn generate_batch(&self, rng: &mut dyn RngCore) -> Vec<Question> {
        (0..QUESTIONS_PER_SESSION).map(|_| self.generate(&mut *rng)).collect()
    }
}

/// Selects the strategy for a configuration.
#[must_use]
pub fn generator_for(config: GameConfig) -> Box<dyn QuestionGenerator> {
    match config {
        GameConfig::Complement(target) => Box::new(ComplementGenerator::new(target)),
        GameConfig::Clock(level) => Box::new(ClockGenerator::new(level)),
        GameConfig::Money(level) => Box::new(MoneyGenerator::new(level)),
        GameConfig::Probability(level) => Box::new(ProbabilityGenerator::new(level)),
    }
}
