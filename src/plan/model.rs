//! Study plan document model
//!
//! The document is produced elsewhere (usually by a generator service) and is
//! read-only for the lifetime of a study session. Keys are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// A complete study plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    /// Overview of the topic (markdown)
    pub summary: String,
    /// Optional map of the concepts covered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_map: Option<ConceptMap>,
    /// What the learner should be able to do afterwards
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    /// Worked examples, in presentation order
    #[serde(default)]
    pub worked_examples: Vec<WorkedExample>,
    /// Quiz questions, in presentation order
    #[serde(default)]
    pub quiz_questions: Vec<QuizQuestion>,
}

impl StudyPlan {
    /// Create a plan with only a summary
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            concept_map: None,
            learning_objectives: Vec::new(),
            worked_examples: Vec::new(),
            quiz_questions: Vec::new(),
        }
    }
}

/// Concept map in one of the two shapes generators emit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConceptMap {
    /// A main topic broken into subtopics
    Topic {
        #[serde(rename = "mainTopic")]
        main_topic: String,
        #[serde(default)]
        subtopics: Vec<String>,
    },
    /// Flat list of concepts
    Concepts(Vec<ConceptEntry>),
}

impl ConceptMap {
    /// Heading to show above the concept list, if the map has one
    pub fn heading(&self) -> Option<&str> {
        match self {
            ConceptMap::Topic { main_topic, .. } => Some(main_topic),
            ConceptMap::Concepts(_) => None,
        }
    }

    /// The concept names in order
    pub fn items(&self) -> Vec<String> {
        match self {
            ConceptMap::Topic { subtopics, .. } => subtopics.clone(),
            ConceptMap::Concepts(entries) => entries.iter().map(|e| e.concept.clone()).collect(),
        }
    }
}

/// One entry of a flat concept list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptEntry {
    pub concept: String,
}

/// A worked example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkedExample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub problem_text: String,
    #[serde(default)]
    pub steps: Vec<ExampleStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_result: Option<String>,
}

impl WorkedExample {
    /// Create an example with just a problem statement
    pub fn new(problem_text: impl Into<String>) -> Self {
        Self {
            title: None,
            problem_text: problem_text.into(),
            steps: Vec::new(),
            solution_text: None,
            final_result: None,
        }
    }
}

/// A single step of a worked example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleStep {
    pub step_text: String,
}

/// How a quiz question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick one of the listed options
    MultipleChoice,
    /// Type a free-text answer
    ShortAnswer,
}

/// A quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question prompt
    pub text: String,
    /// Answer style
    #[serde(alias = "type")]
    pub kind: QuestionKind,
    /// Options, required for multiple choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Expected answer
    pub correct_answer: String,
    /// Difficulty from 1 (easy) to 5 (hard)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_rating: Option<u8>,
}

impl QuizQuestion {
    /// Create a multiple-choice question
    pub fn multiple_choice(
        text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            kind: QuestionKind::MultipleChoice,
            options: Some(options.into_iter().map(Into::into).collect()),
            correct_answer: correct_answer.into(),
            difficulty_rating: None,
        }
    }

    /// Create a short-answer question
    pub fn short_answer(text: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: QuestionKind::ShortAnswer,
            options: None,
            correct_answer: correct_answer.into(),
            difficulty_rating: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_document() {
        let json = r#"{
            "summary": "Cells are the unit of life.",
            "conceptMap": {"mainTopic": "Cells", "subtopics": ["Nucleus", "Mitochondria"]},
            "learningObjectives": ["Name the organelles"],
            "workedExamples": [{
                "title": "Counting",
                "problemText": "How many?",
                "steps": [{"stepText": "Count them"}],
                "finalResult": "Two"
            }],
            "quizQuestions": [{
                "text": "Capital of France?",
                "kind": "multiple_choice",
                "options": ["Paris", "Rome"],
                "correctAnswer": "Paris",
                "difficultyRating": 2
            }]
        }"#;

        let plan: StudyPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.learning_objectives, vec!["Name the organelles"]);
        assert_eq!(plan.worked_examples[0].steps[0].step_text, "Count them");
        assert_eq!(plan.worked_examples[0].solution_text, None);
        assert_eq!(plan.quiz_questions[0].kind, QuestionKind::MultipleChoice);
        assert_eq!(plan.quiz_questions[0].difficulty_rating, Some(2));

        let map = plan.concept_map.unwrap();
        assert_eq!(map.heading(), Some("Cells"));
        assert_eq!(map.items(), vec!["Nucleus", "Mitochondria"]);
    }

    #[test]
    fn concept_list_fallback_shape() {
        let json = r#"{"summary": "s", "conceptMap": [{"concept": "A"}, {"concept": "B"}]}"#;
        let plan: StudyPlan = serde_json::from_str(json).unwrap();
        let map = plan.concept_map.unwrap();
        assert_eq!(map.heading(), None);
        assert_eq!(map.items(), vec!["A", "B"]);
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let plan: StudyPlan = serde_json::from_str(r#"{"summary": "only"}"#).unwrap();
        assert_eq!(plan, StudyPlan::new("only"));
    }

    #[test]
    fn question_kind_accepts_type_key() {
        let json = r#"{"text": "Why?", "type": "short_answer", "correctAnswer": "because"}"#;
        let question: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(question, QuizQuestion::short_answer("Why?", "because"));
    }
}
