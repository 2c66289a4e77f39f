//! Error types for the study flow

use thiserror::Error;

use super::section::SectionKind;

/// Errors raised by study flow operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudyError {
    /// The study plan lacks content a section needs to be presented
    #[error("Malformed study plan at {location}: {reason}")]
    MalformedDocument {
        /// Where in the document, e.g. "quiz question 2"
        location: String,
        /// What is missing or wrong
        reason: String,
    },

    /// An action was attempted outside the state it belongs to
    #[error("Cannot {action}: {reason}")]
    InvalidNavigation {
        /// The attempted action
        action: &'static str,
        /// Why it is not available
        reason: String,
    },

    /// Forward navigation while the current section has not been completed
    #[error("Finish the {section} section before moving on")]
    NavigationLocked {
        /// Kind of the locked section
        section: SectionKind,
    },

    /// A second submission for a question that already has feedback
    #[error("Question {question} has already been answered")]
    AlreadyAnswered {
        /// 1-based question number
        question: usize,
    },

    /// Moving past a question that has not been answered yet
    #[error("Answer question {question} before moving on")]
    QuestionPending {
        /// 1-based question number
        question: usize,
    },

    /// Quiz operations after the final results were produced
    #[error("The quiz is already finished")]
    QuizFinished,

    /// Any operation while a section transition is in flight
    #[error("A section transition is in progress")]
    TransitionInProgress,
}

impl StudyError {
    /// Whether the session cannot continue after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, StudyError::MalformedDocument { .. })
    }

    pub(crate) fn not_in_quiz(action: &'static str, section: SectionKind) -> Self {
        StudyError::InvalidNavigation {
            action,
            reason: format!("the current section is {}, not a quiz", section),
        }
    }
}
