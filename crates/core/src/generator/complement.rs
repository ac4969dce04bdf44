use rand::{Rng, RngCore};

use super::QuestionGenerator;
use crate::model::{ComplementTarget, Question};

/// `num1 + ? = target` with `num1` uniform in `[0, target]`.
#[derive(Debug, Clone, Copy)]
pub struct ComplementGenerator {
    target: u32,
}

impl ComplementGenerator {
    #[must_use]
    pub fn new(target: ComplementTarget) -> Self {
        Self {
            target: target.value(),
        }
    }
}

impl QuestionGenerator for ComplementGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let num1 = rng.random_range(0..=self.target);
        Question::complement(num1, self.target)
    }
}
