use rand::{Rng, RngCore};

use super::QuestionGenerator;
use crate::model::{ClockTime, Difficulty, Question};

/// Times of day whose minutes are a multiple of the difficulty's step.
#[derive(Debug, Clone, Copy)]
pub struct ClockGenerator {
    step: u8,
}

impl ClockGenerator {
    #[must_use]
    pub fn new(level: Difficulty) -> Self {
        Self {
            step: level.minute_step(),
        }
    }

    #[must_use]
    pub fn step(&self) -> u8 {
        self.step
    }

    fn time_for(&self, hour: u8, slot: u8) -> ClockTime {
        ClockTime::from_day_minutes(u32::from(hour) * 60 + u32::from(slot) * u32::from(self.step))
    }
}

impl QuestionGenerator for ClockGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let hour = rng.random_range(0..24_u8);
        let slot = rng.random_range(0..60 / self.step);
        Question::clock(self.time_for(hour, slot))
    }
}
