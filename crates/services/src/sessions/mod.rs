mod engine;
mod feedback;
mod progress;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use engine::SessionEngine;
pub use feedback::{Feedback, FeedbackTone, breakdown_line, display_answer};
pub use progress::SessionProgress;
pub use workflow::{BreakdownLine, NextOutcome, QuestionView, QuizController, ReportView};
