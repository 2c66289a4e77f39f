//! Study plan documents: model, loading and validation

pub mod model;

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

use crate::flow::{MAX_QUIZ_QUESTIONS, grade};

pub use model::{
    ConceptEntry, ConceptMap, ExampleStep, QuestionKind, QuizQuestion, StudyPlan, WorkedExample,
};

/// Load a study plan from a JSON file
pub fn load(path: &Path) -> Result<StudyPlan> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read study plan from {:?}", path))?;
    StudyPlan::from_json(&contents)
        .with_context(|| format!("Failed to parse study plan {:?}", path))
}

impl StudyPlan {
    /// Parse a study plan from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check the document for content that cannot be presented
    ///
    /// The flow itself only reports malformed content when the offending
    /// section is rendered; this walks the whole document up front.
    pub fn validate(&self) -> Vec<PlanIssue> {
        let mut issues = Vec::new();

        for (i, question) in self.quiz_questions.iter().enumerate() {
            let location = format!("quiz question {}", i + 1);

            if question.text.trim().is_empty() {
                issues.push(PlanIssue::error(&location, "question text is blank"));
            }

            if let Some(rating) = question.difficulty_rating {
                if !(1..=5).contains(&rating) {
                    issues.push(PlanIssue::error(
                        &location,
                        format!("difficulty rating {} is outside 1..=5", rating),
                    ));
                }
            }

            if question.kind == QuestionKind::MultipleChoice {
                match question.options.as_deref() {
                    None => issues.push(PlanIssue::error(
                        &location,
                        "multiple-choice question has no options",
                    )),
                    Some([]) => issues.push(PlanIssue::error(
                        &location,
                        "multiple-choice question has an empty option list",
                    )),
                    Some(options) => {
                        let reachable = options
                            .iter()
                            .any(|o| grade(question.kind, o, &question.correct_answer));
                        if !reachable {
                            issues.push(PlanIssue::warning(
                                &location,
                                "no option matches the correct answer",
                            ));
                        }
                    }
                }
            }

            if i == MAX_QUIZ_QUESTIONS {
                issues.push(PlanIssue::warning(
                    &location,
                    format!(
                        "only the first {} questions are used; {} will be dropped",
                        MAX_QUIZ_QUESTIONS,
                        self.quiz_questions.len() - MAX_QUIZ_QUESTIONS
                    ),
                ));
            }
        }

        issues
    }
}

/// How serious a validation finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The study flow will refuse to render this content
    Error,
    /// Presentable, but probably not what the author meant
    Warning,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanIssue {
    pub severity: Severity,
    /// Where in the document, e.g. "quiz question 2"
    pub location: String,
    pub message: String,
}

impl PlanIssue {
    fn error(location: &str, message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, location: location.to_string(), message: message.into() }
    }

    fn warning(location: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location: location.to_string(),
            message: message.into(),
        }
    }

    /// Whether this issue makes the plan unusable
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for PlanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}: {}", label, self.location, self.message)
    }
}
