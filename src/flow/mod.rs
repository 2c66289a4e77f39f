//! Study flow core
//!
//! A pure state machine over the sections of a study plan. Nothing here
//! renders or sleeps; see [`crate::view`] and [`crate::transition`] for that.

pub mod controller;
pub mod error;
pub mod quiz;
pub mod section;

pub use controller::{
    Direction, NavSignal, NavStart, PendingTransition, StudyFlow, TransitionState,
};
pub use error::StudyError;
pub use quiz::{
    AnswerFeedback, QuizPhase, QuizState, QuizStep, QuizSummary, RecordedAnswer, grade,
};
pub use section::{
    Explanation, MAX_QUIZ_QUESTIONS, Section, SectionContent, SectionKind, build_sections,
};
