//! Sections of a study flow and how they are derived from a plan

use std::fmt;

use crate::plan::{ConceptMap, StudyPlan, WorkedExample};

use super::quiz::QuizState;

/// Maximum number of quiz questions presented; later ones are dropped
pub const MAX_QUIZ_QUESTIONS: usize = 3;

/// Kind of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Explanation,
    Example,
    Quiz,
}

impl SectionKind {
    /// Lowercase name, used in messages and CSS classes
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Explanation => "explanation",
            SectionKind::Example => "example",
            SectionKind::Quiz => "quiz",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of the explanation section
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub summary: String,
    pub concept_map: Option<ConceptMap>,
    pub objectives: Vec<String>,
}

/// Content carried by a section
#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    Explanation(Explanation),
    Examples(Vec<WorkedExample>),
    Quiz(QuizState),
}

/// One stage of the study flow
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub content: SectionContent,
    nav_enabled: bool,
}

impl Section {
    fn new(title: &str, content: SectionContent) -> Self {
        let nav_enabled = !matches!(content, SectionContent::Quiz(_));
        Self { title: title.to_string(), content, nav_enabled }
    }

    pub fn kind(&self) -> SectionKind {
        match self.content {
            SectionContent::Explanation(_) => SectionKind::Explanation,
            SectionContent::Examples(_) => SectionKind::Example,
            SectionContent::Quiz(_) => SectionKind::Quiz,
        }
    }

    /// Whether moving forward from this section is permitted
    pub fn nav_enabled(&self) -> bool {
        self.nav_enabled
    }

    pub fn quiz(&self) -> Option<&QuizState> {
        match &self.content {
            SectionContent::Quiz(quiz) => Some(quiz),
            _ => None,
        }
    }

    pub(crate) fn quiz_mut(&mut self) -> Option<&mut QuizState> {
        match &mut self.content {
            SectionContent::Quiz(quiz) => Some(quiz),
            _ => None,
        }
    }

    /// Permanently allow forward navigation
    pub(crate) fn unlock(&mut self) {
        self.nav_enabled = true;
    }
}

/// Derive the ordered sections for a plan
///
/// Always `Explanation`, then `Example` if the plan has worked examples, then
/// `Quiz` with at most [`MAX_QUIZ_QUESTIONS`] questions if it has any.
pub fn build_sections(plan: &StudyPlan) -> Vec<Section> {
    let mut sections = vec![Section::new(
        "Key Concepts",
        SectionContent::Explanation(Explanation {
            summary: plan.summary.clone(),
            concept_map: plan.concept_map.clone(),
            objectives: plan.learning_objectives.clone(),
        }),
    )];

    if !plan.worked_examples.is_empty() {
        sections.push(Section::new(
            "Worked Examples",
            SectionContent::Examples(plan.worked_examples.clone()),
        ));
    }

    if !plan.quiz_questions.is_empty() {
        let questions =
            plan.quiz_questions.iter().take(MAX_QUIZ_QUESTIONS).cloned().collect::<Vec<_>>();
        sections.push(Section::new("Quick Quiz", SectionContent::Quiz(QuizState::new(questions))));
    }

    sections
}
