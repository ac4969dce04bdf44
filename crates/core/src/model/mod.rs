mod answer;
mod config;
mod question;
mod session;

pub use answer::{Answer, AnswerRecord, ClockTime, Period, format_cents};
pub use config::{ComplementTarget, ConfigurationError, Difficulty, GameConfig, GameKind};
pub use question::{Question, QuestionPayload};
pub use session::{
    ElapsedTime, QUESTIONS_PER_SESSION, Session, SessionReport, SessionState, SessionStateError,
};
