//! Quiz runtime state and grading

use crate::plan::{QuestionKind, QuizQuestion};

use super::error::StudyError;

/// Check a candidate answer against the expected one
///
/// Both sides are trimmed and compared case-insensitively. Multiple choice
/// requires an exact match. Short answers accept containment in either
/// direction, so a blank or single-letter answer is usually accepted.
pub fn grade(kind: QuestionKind, candidate: &str, correct_answer: &str) -> bool {
    let candidate = candidate.trim().to_lowercase();
    let expected = correct_answer.trim().to_lowercase();

    match kind {
        QuestionKind::MultipleChoice => candidate == expected,
        QuestionKind::ShortAnswer => {
            expected.contains(candidate.as_str()) || candidate.contains(expected.as_str())
        }
    }
}

/// An answer recorded for a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAnswer {
    /// What the learner submitted
    pub given: String,
    /// Whether it was graded correct
    pub correct: bool,
}

/// Result of submitting an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    /// Score after this submission
    pub score: usize,
    /// The expected answer, for display
    pub correct_answer: String,
}

/// Final quiz result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    /// `round(100 * score / total)`
    pub percentage: u8,
}

impl QuizSummary {
    /// Compute the summary for a score out of a total
    pub fn new(score: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (100.0 * score as f64 / total as f64).round() as u8
        };
        Self { score, total, percentage }
    }
}

/// Outcome of the "next question" action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved on to the question at this index
    NextQuestion(usize),
    /// No questions left
    Finished(QuizSummary),
}

/// Where the quiz is in its question cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for an answer to the question at this index
    Answering(usize),
    /// Showing feedback for the question at this index
    Feedback(usize),
    /// All questions done
    Finished,
}

/// Progress through the questions of a quiz section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    questions: Vec<QuizQuestion>,
    current: usize,
    score: usize,
    answers: Vec<Option<RecordedAnswer>>,
    finished: bool,
}

impl QuizState {
    /// Start a quiz at the first question
    ///
    /// A quiz without questions starts out finished.
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let answers = vec![None; questions.len()];
        let finished = questions.is_empty();
        Self { questions, current: 0, score: 0, answers, finished }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Index of the question being asked
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question being asked
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    /// Answer recorded for the question at `index`
    pub fn answer(&self, index: usize) -> Option<&RecordedAnswer> {
        self.answers.get(index).and_then(Option::as_ref)
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn phase(&self) -> QuizPhase {
        if self.finished {
            QuizPhase::Finished
        } else if self.answer(self.current).is_some() {
            QuizPhase::Feedback(self.current)
        } else {
            QuizPhase::Answering(self.current)
        }
    }

    /// Summary of the current score
    pub fn summary(&self) -> QuizSummary {
        QuizSummary::new(self.score, self.questions.len())
    }

    /// Grade an answer to the current question
    pub fn submit(&mut self, candidate: &str) -> Result<AnswerFeedback, StudyError> {
        let index = match self.phase() {
            QuizPhase::Answering(index) => index,
            QuizPhase::Feedback(index) => {
                return Err(StudyError::AlreadyAnswered { question: index + 1 });
            }
            QuizPhase::Finished => return Err(StudyError::QuizFinished),
        };

        let question = &self.questions[index];
        let correct = grade(question.kind, candidate, &question.correct_answer);
        if correct {
            self.score += 1;
        }
        self.answers[index] = Some(RecordedAnswer { given: candidate.to_string(), correct });

        tracing::debug!(question = index + 1, correct, score = self.score, "Graded quiz answer");

        Ok(AnswerFeedback {
            correct,
            score: self.score,
            correct_answer: question.correct_answer.clone(),
        })
    }

    /// Move past the answered question, finishing the quiz after the last one
    pub fn next(&mut self) -> Result<QuizStep, StudyError> {
        match self.phase() {
            QuizPhase::Answering(index) => Err(StudyError::QuestionPending { question: index + 1 }),
            QuizPhase::Finished => Err(StudyError::QuizFinished),
            QuizPhase::Feedback(index) if index + 1 < self.questions.len() => {
                self.current = index + 1;
                Ok(QuizStep::NextQuestion(self.current))
            }
            QuizPhase::Feedback(_) => {
                self.finished = true;
                Ok(QuizStep::Finished(self.summary()))
            }
        }
    }
}
