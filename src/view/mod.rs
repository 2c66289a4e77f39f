//! Presentation model
//!
//! A [`SectionView`] is plain data describing what the current section looks
//! like and which actions are available. Renderers (HTML, terminal) consume
//! it; user input comes back as [`UserAction`]s.

pub mod html;
pub mod markdown;

use crate::flow::{
    QuizPhase, QuizState, QuizSummary, SectionContent, SectionKind, StudyError, StudyFlow,
};
use crate::plan::{QuestionKind, WorkedExample};

/// A discrete user action reported by a surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Next / Finish button
    Forward,
    /// Back button
    Back,
    /// Click on a multiple-choice option
    ChooseOption(usize),
    /// Free-text answer submission
    SubmitText(String),
    /// "Next question" / "See results" button
    NextQuestion,
}

/// Everything needed to draw the current section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub title: String,
    pub kind: SectionKind,
    /// 0-based section index
    pub position: usize,
    /// Number of sections
    pub total: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    /// "Next", or "Finish" on the last section
    pub forward_label: &'static str,
    pub body: ViewBody,
}

/// Section body
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    Explanation {
        /// Markdown summary
        summary: String,
        concepts: Option<ConceptView>,
        objectives: Vec<String>,
    },
    Examples(Vec<ExampleView>),
    Question(QuestionView),
    Results(QuizSummary),
}

/// Concept map as a heading and list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptView {
    pub heading: Option<String>,
    pub items: Vec<String>,
}

/// One worked example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleView {
    pub title: String,
    pub problem: String,
    pub steps: Vec<String>,
    pub solution: Option<String>,
    pub final_result: Option<String>,
}

/// How a question is answered on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    Choices(Vec<String>),
    FreeText,
}

/// Feedback shown after answering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub correct: bool,
    pub given: String,
    pub correct_answer: String,
}

/// The question currently asked in a quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// 1-based question number
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub difficulty: Option<u8>,
    pub input: AnswerInput,
    pub score: usize,
    pub feedback: Option<FeedbackView>,
    /// Whether the next action finishes the quiz
    pub is_last: bool,
}

impl QuestionView {
    /// Label of the button shown with feedback
    pub fn next_label(&self) -> &'static str {
        if self.is_last { "See results" } else { "Next question" }
    }
}

impl SectionView {
    /// Build the view of the flow's current section
    ///
    /// Fails with [`StudyError::MalformedDocument`] if the section's content
    /// cannot be presented.
    pub fn build(flow: &StudyFlow) -> Result<Self, StudyError> {
        let section = flow.current_section();

        let body = match &section.content {
            SectionContent::Explanation(explanation) => ViewBody::Explanation {
                summary: explanation.summary.clone(),
                concepts: explanation.concept_map.as_ref().map(|map| ConceptView {
                    heading: map.heading().map(str::to_string),
                    items: map.items(),
                }),
                objectives: explanation.objectives.clone(),
            },
            SectionContent::Examples(examples) => {
                ViewBody::Examples(examples.iter().enumerate().map(example_view).collect())
            }
            SectionContent::Quiz(quiz) => quiz_body(quiz)?,
        };

        Ok(Self {
            title: section.title.clone(),
            kind: section.kind(),
            position: flow.current_index(),
            total: flow.len(),
            can_go_back: !flow.is_first(),
            can_go_forward: section.nav_enabled(),
            forward_label: if flow.is_last() { "Finish" } else { "Next" },
            body,
        })
    }

    /// Options of the question on screen, if it is multiple choice
    pub fn choices(&self) -> Option<&[String]> {
        match &self.body {
            ViewBody::Question(QuestionView { input: AnswerInput::Choices(options), .. }) => {
                Some(options)
            }
            _ => None,
        }
    }

    /// Whether the view is waiting for an answer
    pub fn awaiting_answer(&self) -> bool {
        matches!(&self.body, ViewBody::Question(q) if q.feedback.is_none())
    }
}

fn example_view((index, example): (usize, &WorkedExample)) -> ExampleView {
    ExampleView {
        title: example.title.clone().unwrap_or_else(|| format!("Example {}", index + 1)),
        problem: example.problem_text.clone(),
        steps: example.steps.iter().map(|s| s.step_text.clone()).collect(),
        solution: example.solution_text.clone(),
        final_result: example.final_result.clone(),
    }
}

fn quiz_body(quiz: &QuizState) -> Result<ViewBody, StudyError> {
    let index = match quiz.phase() {
        QuizPhase::Finished => return Ok(ViewBody::Results(quiz.summary())),
        QuizPhase::Answering(index) | QuizPhase::Feedback(index) => index,
    };

    let question = &quiz.questions()[index];
    let input = match question.kind {
        QuestionKind::MultipleChoice => match &question.options {
            Some(options) if !options.is_empty() => AnswerInput::Choices(options.clone()),
            _ => {
                return Err(StudyError::MalformedDocument {
                    location: format!("quiz question {}", index + 1),
                    reason: "multiple-choice question has no options".to_string(),
                });
            }
        },
        QuestionKind::ShortAnswer => AnswerInput::FreeText,
    };

    let feedback = quiz.answer(index).map(|answer| FeedbackView {
        correct: answer.correct,
        given: answer.given.clone(),
        correct_answer: question.correct_answer.clone(),
    });

    Ok(ViewBody::Question(QuestionView {
        number: index + 1,
        total: quiz.len(),
        text: question.text.clone(),
        difficulty: question.difficulty_rating,
        input,
        score: quiz.score(),
        feedback,
        is_last: index + 1 == quiz.len(),
    }))
}
