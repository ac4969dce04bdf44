use rand::RngCore;
use rand::seq::IndexedRandom;

use super::QuestionGenerator;
use crate::model::{Difficulty, Question};

/// Candidate prices and banknotes for one difficulty, in cents.
///
/// Only the three built-in tiers exist; each has at least one price below one of
/// its payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyTier {
    prices: &'static [u64],
    payments: &'static [u64],
}

const EASY: MoneyTier = MoneyTier {
    prices: &[100, 200, 300, 400, 500, 600, 700, 800, 900, 1000],
    payments: &[500, 1000, 2000],
};

const MEDIUM: MoneyTier = MoneyTier {
    prices: &[120, 150, 230, 275, 360, 420, 540, 680, 725, 850],
    payments: &[500, 1000, 2000],
};

const HARD: MoneyTier = MoneyTier {
    prices: &[345, 560, 785, 990, 1240, 1475, 1620, 1895, 2130, 2480],
    payments: &[2000, 5000],
};

impl MoneyTier {
    #[must_use]
    pub fn for_level(level: Difficulty) -> &'static MoneyTier {
        match level {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
        }
    }

    #[must_use]
    pub fn prices(&self) -> &'static [u64] {
        self.prices
    }

    #[must_use]
    pub fn payments(&self) -> &'static [u64] {
        self.payments
    }
}

/// Change-making scenarios: an item price paid with a larger banknote.
#[derive(Debug, Clone, Copy)]
pub struct MoneyGenerator {
    tier: &'static MoneyTier,
}

impl MoneyGenerator {
    #[must_use]
    pub fn new(level: Difficulty) -> Self {
        Self {
            tier: MoneyTier::for_level(level),
        }
    }
}

impl QuestionGenerator for MoneyGenerator {
    /// Both amounts are redrawn together until the price is strictly below the payment.
    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        loop {
            let price = self.tier.prices.choose(rng).copied();
            let payment = self.tier.payments.choose(rng).copied();
            match (price, payment) {
                (Some(price), Some(payment)) if price < payment => {
                    return Question::money(price, payment);
                }
                _ => {}
            }
        }
    }
}
