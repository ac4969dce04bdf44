use serde::Serialize;

use quiz_core::model::{
    GameConfig, QuestionPayload, SessionReport, SessionState, SessionStateError,
};

use super::engine::SessionEngine;
use super::feedback::{Feedback, breakdown_line};
use crate::error::SessionError;

/// What the presentation layer needs to draw the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub prompt: String,
    pub payload: QuestionPayload,
    pub period_label: Option<&'static str>,
    pub progress_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownLine {
    pub text: String,
    pub is_correct: bool,
}

/// End-of-session screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportView {
    pub score: u32,
    pub total: usize,
    pub minutes: u64,
    pub seconds: u64,
    pub elapsed_label: String,
    pub lines: Vec<BreakdownLine>,
    #[serde(skip)]
    pub report: SessionReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NextOutcome {
    Question(QuestionView),
    Finished(ReportView),
}

/// Event-driven facade over `SessionEngine`.
///
/// Each method maps one presentation-layer event to engine calls and returns the
/// data to render next.
#[derive(Debug)]
pub struct QuizController {
    engine: SessionEngine,
}

impl QuizController {
    #[must_use]
    pub fn new(engine: SessionEngine) -> Self {
        Self { engine }
    }

    #[must_use]
    pub fn engine(&self) -> &SessionEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SessionEngine {
        &mut self.engine
    }

    /// # Errors
    ///
    /// Returns `SessionError::Configuration` for values this game does not offer; the
    /// previous selection is kept.
    pub fn on_configuration_changed(&mut self, value: &str) -> Result<GameConfig, SessionError> {
        self.engine.select_raw(value)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Configuration` if the selected configuration is invalid.
    pub fn on_start(&mut self) -> Result<QuestionView, SessionError> {
        self.engine.start_selected()?;
        self.question_view()
    }

    /// Validate a raw answer.
    ///
    /// Malformed input comes back as an `InvalidFormat` feedback so the player can try
    /// again; nothing is recorded in that case.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::State` outside an active question or on resubmission.
    pub fn on_answer_submitted(&mut self, raw: &str) -> Result<Feedback, SessionError> {
        let kind = self.engine.kind();
        match self.engine.submit_answer(raw) {
            Ok(record) => Ok(Feedback::for_record(kind, record.clone())),
            Err(err) if err.is_invalid_format() => Ok(Feedback::invalid_format(kind)),
            Err(err) => Err(err),
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError::State` if no session is active or the current question
    /// is unanswered.
    pub fn on_next(&mut self) -> Result<NextOutcome, SessionError> {
        match self.engine.advance()? {
            SessionState::InProgress => Ok(NextOutcome::Question(self.question_view()?)),
            SessionState::Completed => Ok(NextOutcome::Finished(self.report_view()?)),
        }
    }

    pub fn on_restart(&mut self) {
        self.engine.restart();
    }

    /// # Errors
    ///
    /// Returns `OutOfRange` before start or after completion.
    pub fn question_view(&self) -> Result<QuestionView, SessionError> {
        let question = self.engine.current_question()?;
        let progress = self
            .engine
            .progress()
            .ok_or(SessionStateError::OutOfRange)?;
        Ok(QuestionView {
            index: progress.current,
            total: progress.total,
            prompt: question.prompt().to_string(),
            payload: *question.payload(),
            period_label: question.period().map(|period| period.label()),
            progress_percent: progress.percent(),
        })
    }

    /// # Errors
    ///
    /// Returns `SessionError::State` while the session is still running.
    pub fn report_view(&self) -> Result<ReportView, SessionError> {
        let report = self.engine.report()?;
        let kind = self.engine.kind();
        let lines = report
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| BreakdownLine {
                text: breakdown_line(kind, i + 1, record),
                is_correct: record.is_correct,
            })
            .collect();

        Ok(ReportView {
            score: report.score(),
            total: report.total(),
            minutes: report.elapsed().minutes(),
            seconds: report.elapsed().seconds(),
            elapsed_label: report.elapsed().to_string(),
            lines,
            report,
        })
    }
}
