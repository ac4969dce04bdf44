use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

use quiz_core::generator::generator_for;
use quiz_core::model::{
    AnswerRecord, GameConfig, GameKind, Question, Session, SessionReport, SessionState,
    SessionStateError,
};
use quiz_core::normalize::normalizer_for;
use quiz_core::time::whole_seconds_between;

use super::progress::SessionProgress;
use crate::Clock;
use crate::error::SessionError;

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Drives one game's sessions: configuration, generation, answering, timing.
///
/// An engine is bound to a single `GameKind` for its whole life. It holds at most one
/// session; starting again or restarting replaces it.
pub struct SessionEngine {
    kind: GameKind,
    config: GameConfig,
    clock: Clock,
    rng: StdRng,
    session: Option<Session>,
}

impl SessionEngine {
    /// Engine on the real clock with an OS-seeded random source.
    #[must_use]
    pub fn new(kind: GameKind) -> Self {
        Self {
            kind,
            config: GameConfig::default_for(kind),
            clock: Clock::default_clock(),
            rng: StdRng::from_os_rng(),
            session: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Makes question batches reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// Configuration used by the next `start_selected`.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Mutable access for fixed clocks that tests or replays step forward.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Select the configuration for the next session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Configuration` if `config` belongs to another game.
    pub fn select(&mut self, config: GameConfig) -> Result<GameConfig, SessionError> {
        self.config = config.ensure_kind(self.kind)?;
        Ok(self.config)
    }

    /// Select the configuration from a raw selector value (`"hard"`, `"20"`, ...).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Configuration` for values this game does not offer.
    pub fn select_raw(&mut self, raw: &str) -> Result<GameConfig, SessionError> {
        let config = GameConfig::parse(self.kind, raw)?;
        self.select(config)
    }

    /// Start a fresh session of ten questions under `config`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Configuration` if `config` belongs to another game.
    pub fn start(&mut self, config: GameConfig) -> Result<&Session, SessionError> {
        let config = self.select(config)?;
        let questions = generator_for(config).generate_batch(&mut self.rng);
        let session = Session::new(config, questions, self.clock.now())?;

        tracing::info!(game = %self.kind, config = %config, "Quiz session started");
        Ok(self.session.insert(session))
    }

    /// Start with the currently selected configuration.
    ///
    /// # Errors
    ///
    /// See `start`.
    pub fn start_selected(&mut self) -> Result<&Session, SessionError> {
        self.start(self.config)
    }

    fn active(&self) -> Result<&Session, SessionError> {
        self.session
            .as_ref()
            .ok_or(SessionError::State(SessionStateError::OutOfRange))
    }

    fn active_mut(&mut self) -> Result<&mut Session, SessionError> {
        self.session
            .as_mut()
            .ok_or(SessionError::State(SessionStateError::OutOfRange))
    }

    /// # Errors
    ///
    /// Returns `OutOfRange` before `start` or after completion.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        Ok(self.active()?.current_question()?)
    }

    /// Normalize and record an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidFormat` for malformed input, leaving the session
    /// untouched. Returns `SessionError::State` outside an active question or on a
    /// second submission for the same question.
    pub fn submit_answer(&mut self, raw: &str) -> Result<&AnswerRecord, SessionError> {
        let kind = self.kind;
        let session = self.active_mut()?;
        session.current_question()?;
        if session.is_current_answered() {
            return Err(SessionStateError::AlreadyAnswered {
                index: session.current_index(),
            }
            .into());
        }

        let answer = match normalizer_for(kind).normalize(raw) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::debug!(game = %kind, error = %err, "Rejected malformed answer");
                return Err(err.into());
            }
        };

        let index = session.current_index();
        let record = session.record_answer(answer)?;
        tracing::debug!(
            game = %kind,
            index,
            correct = record.is_correct,
            "Answer recorded"
        );
        Ok(record)
    }

    /// Move past the current question; completes the session after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::State` before `start` or if the current question has
    /// not been answered.
    pub fn advance(&mut self) -> Result<SessionState, SessionError> {
        let now = self.clock.now();
        let kind = self.kind;
        let session = self.active_mut()?;
        let was_complete = session.is_complete();
        let state = session.advance(now)?;

        if state == SessionState::Completed && !was_complete {
            let elapsed = session
                .completed_at()
                .map_or(0, |done| whole_seconds_between(session.started_at(), done));
            tracing::info!(
                game = %kind,
                score = session.score(),
                total = session.total(),
                elapsed_secs = elapsed,
                "Quiz session completed"
            );
        }
        Ok(state)
    }

    /// Drop the session and return to the game's default configuration.
    pub fn restart(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!(game = %self.kind, "Quiz session discarded");
        }
        self.config = GameConfig::default_for(self.kind);
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.session.as_ref().map(|session| SessionProgress {
            current: session.current_index(),
            total: session.total(),
            answered: session.records().len(),
            score: session.score(),
            is_complete: session.is_complete(),
        })
    }

    /// # Errors
    ///
    /// Returns `SessionError::State` before `start` or while questions remain.
    pub fn report(&self) -> Result<SessionReport, SessionError> {
        Ok(self.active()?.report()?)
    }
}

impl fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEngine")
            .field("kind", &self.kind)
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
