use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::{Answer, AnswerRecord, GameConfig, Question};
use crate::time::whole_seconds_between;

/// Number of questions in every session.
pub const QUESTIONS_PER_SESSION: usize = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("no question is active")]
    OutOfRange,

    #[error("question {index} has already been answered")]
    AlreadyAnswered { index: usize },

    #[error("question {index} has not been answered yet")]
    Unanswered { index: usize },

    #[error("session is not completed")]
    NotCompleted,

    #[error("a session needs exactly 10 questions, got {len}")]
    WrongQuestionCount { len: usize },

    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Result of moving past the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    InProgress,
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run of ten questions under a fixed configuration.
///
/// The session is a pure state machine: timestamps come from the caller so that the
/// owning engine decides which clock to trust.
pub struct Session {
    config: GameConfig,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    records: Vec<AnswerRecord>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Session {
    /// # Errors
    ///
    /// Returns `SessionStateError::WrongQuestionCount` unless exactly
    /// `QUESTIONS_PER_SESSION` questions are provided.
    pub fn new(
        config: GameConfig,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionStateError> {
        if questions.len() != QUESTIONS_PER_SESSION {
            return Err(SessionStateError::WrongQuestionCount {
                len: questions.len(),
            });
        }

        Ok(Self {
            config,
            questions,
            current_index: 1,
            score: 0,
            records: Vec::with_capacity(QUESTIONS_PER_SESSION),
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// 1-based position of the question on screen.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Whether an answer was already recorded for the current index.
    #[must_use]
    pub fn is_current_answered(&self) -> bool {
        self.records.len() == self.current_index
    }

    /// # Errors
    ///
    /// Returns `SessionStateError::OutOfRange` once the session is completed.
    pub fn current_question(&self) -> Result<&Question, SessionStateError> {
        if self.is_complete() {
            return Err(SessionStateError::OutOfRange);
        }
        self.questions
            .get(self.current_index - 1)
            .ok_or(SessionStateError::OutOfRange)
    }

    /// Record a canonical answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::OutOfRange` after completion and
    /// `SessionStateError::AlreadyAnswered` on a second submission for the same index.
    pub fn record_answer(&mut self, answer: Answer) -> Result<&AnswerRecord, SessionStateError> {
        let question = self.current_question()?;
        if self.is_current_answered() {
            return Err(SessionStateError::AlreadyAnswered {
                index: self.current_index,
            });
        }

        let record = AnswerRecord::new(question.summary(), answer, question.answer());
        if record.is_correct {
            self.score += 1;
        }
        self.records.push(record);

        self.records.last().ok_or(SessionStateError::OutOfRange)
    }

    /// Move to the next question, or complete the session after the last one.
    ///
    /// Calling again after completion returns `Completed` and keeps the first
    /// completion time.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::Unanswered` if the current question has no record.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<SessionState, SessionStateError> {
        if self.is_complete() {
            return Ok(SessionState::Completed);
        }
        if !self.is_current_answered() {
            return Err(SessionStateError::Unanswered {
                index: self.current_index,
            });
        }

        if self.current_index < self.total() {
            self.current_index += 1;
            Ok(SessionState::InProgress)
        } else {
            self.completed_at = Some(now.max(self.started_at));
            Ok(SessionState::Completed)
        }
    }

    /// # Errors
    ///
    /// Returns `SessionStateError::NotCompleted` while questions remain.
    pub fn report(&self) -> Result<SessionReport, SessionStateError> {
        let completed_at = self.completed_at.ok_or(SessionStateError::NotCompleted)?;
        SessionReport::from_records(self.config, self.started_at, completed_at, &self.records)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("current_index", &self.current_index)
            .field("score", &self.score)
            .field("records_len", &self.records.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Elapsed wall time, floored to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElapsedTime {
    total_seconds: u64,
}

impl ElapsedTime {
    #[must_use]
    pub fn from_seconds(total_seconds: u64) -> Self {
        Self { total_seconds }
    }

    #[must_use]
    pub fn total_seconds(self) -> u64 {
        self.total_seconds
    }

    #[must_use]
    pub fn minutes(self) -> u64 {
        self.total_seconds / 60
    }

    #[must_use]
    pub fn seconds(self) -> u64 {
        self.total_seconds % 60
    }
}

/// `3 min 7`
impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min {}", self.minutes(), self.seconds())
    }
}

/// End-of-session report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    config: GameConfig,
    score: u32,
    total: usize,
    elapsed: ElapsedTime,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    records: Vec<AnswerRecord>,
}

impl SessionReport {
    /// Build a report from the answer log.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn from_records(
        config: GameConfig,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        records: &[AnswerRecord],
    ) -> Result<Self, SessionStateError> {
        if completed_at < started_at {
            return Err(SessionStateError::InvalidTimeRange);
        }
        let score = records.iter().filter(|record| record.is_correct).count();

        Ok(Self {
            config,
            score: u32::try_from(score).unwrap_or(u32::MAX),
            total: records.len(),
            elapsed: ElapsedTime::from_seconds(whole_seconds_between(started_at, completed_at)),
            started_at,
            completed_at,
            records: records.to_vec(),
        })
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    /// Elapsed time as `(minutes, seconds)`.
    #[must_use]
    pub fn elapsed_parts(&self) -> (u64, u64) {
        (self.elapsed.minutes(), self.elapsed.seconds())
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }
}
