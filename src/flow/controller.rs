//! The study flow controller
//!
//! Owns the sections built from a plan, the current position, and the quiz
//! sub-state. Navigation is split into three steps so a presentation layer
//! can run its exit and entry animations in between:
//!
//! 1. [`StudyFlow::begin_navigation`] enters the exit phase; the index is unchanged.
//! 2. [`StudyFlow::commit_navigation`] moves the index and enters the entry phase.
//! 3. [`StudyFlow::finish_navigation`] returns to idle.
//!
//! Every operation is rejected while a transition is in flight.

use std::fmt;

use crate::plan::StudyPlan;

use super::error::StudyError;
use super::quiz::{AnswerFeedback, QuizState, QuizStep};
use super::section::{Section, build_sections};

/// Direction of a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A navigation between two adjacent sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub direction: Direction,
    pub from: usize,
    pub to: usize,
}

/// Which half of a transition is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    /// Old section fading out; the index still points at `from`
    Exiting(PendingTransition),
    /// New section fading in; the index already points at `to`
    Entering(PendingTransition),
}

/// How a navigation request was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStart {
    /// A transition is now in its exit phase
    Transition(PendingTransition),
    /// Forward from the last section: the flow is complete
    Completed,
    /// Backward from the first section: nothing to do
    NoOp,
}

/// Result of a completed navigation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSignal {
    Advanced { from: usize, to: usize },
    Completed,
    Retreated { from: usize, to: usize },
    NoOp,
}

impl From<PendingTransition> for NavSignal {
    fn from(t: PendingTransition) -> Self {
        match t.direction {
            Direction::Forward => NavSignal::Advanced { from: t.from, to: t.to },
            Direction::Backward => NavSignal::Retreated { from: t.from, to: t.to },
        }
    }
}

/// Sequential study flow over the sections of one plan
pub struct StudyFlow {
    sections: Vec<Section>,
    current: usize,
    transition: Option<TransitionState>,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for StudyFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudyFlow")
            .field("sections", &self.sections)
            .field("current", &self.current)
            .field("transition", &self.transition)
            .finish_non_exhaustive()
    }
}

impl StudyFlow {
    /// Build the flow for a plan, positioned on the first section
    pub fn new(plan: &StudyPlan) -> Self {
        let sections = build_sections(plan);
        tracing::debug!(sections = sections.len(), "Built study flow");
        Self { sections, current: 0, transition: None, on_complete: None }
    }

    /// Register the handler fired by every forward navigation from the last section
    pub fn on_complete(&mut self, handler: impl FnMut() + 'static) {
        self.on_complete = Some(Box::new(handler));
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_section(&self) -> &Section {
        &self.sections[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.sections.len()
    }

    /// The in-flight transition, if any
    pub fn transition(&self) -> Option<TransitionState> {
        self.transition
    }

    /// Quiz state of the current section, if it is a quiz
    pub fn quiz(&self) -> Option<&QuizState> {
        self.current_section().quiz()
    }

    /// Move forward one section without pausing between phases
    pub fn advance(&mut self) -> Result<NavSignal, StudyError> {
        self.navigate(Direction::Forward)
    }

    /// Move back one section without pausing between phases
    pub fn retreat(&mut self) -> Result<NavSignal, StudyError> {
        self.navigate(Direction::Backward)
    }

    fn navigate(&mut self, direction: Direction) -> Result<NavSignal, StudyError> {
        match self.begin_navigation(direction)? {
            NavStart::Transition(pending) => {
                self.commit_navigation()?;
                self.finish_navigation()?;
                Ok(pending.into())
            }
            NavStart::Completed => Ok(NavSignal::Completed),
            NavStart::NoOp => Ok(NavSignal::NoOp),
        }
    }

    /// Start a navigation, entering the exit phase
    ///
    /// Forward from the last section fires the completion handler and starts
    /// no transition. Forward from a section whose navigation is locked is
    /// rejected.
    pub fn begin_navigation(&mut self, direction: Direction) -> Result<NavStart, StudyError> {
        self.ensure_idle()?;

        let from = self.current;
        let to = match direction {
            Direction::Forward => {
                let section = self.current_section();
                if !section.nav_enabled() {
                    tracing::warn!(section = %section.kind(), "Forward navigation is locked");
                    return Err(StudyError::NavigationLocked { section: section.kind() });
                }
                if self.is_last() {
                    tracing::info!("Study flow completed");
                    if let Some(handler) = self.on_complete.as_mut() {
                        handler();
                    }
                    return Ok(NavStart::Completed);
                }
                from + 1
            }
            Direction::Backward => {
                if self.is_first() {
                    return Ok(NavStart::NoOp);
                }
                from - 1
            }
        };

        let pending = PendingTransition { direction, from, to };
        self.transition = Some(TransitionState::Exiting(pending));
        tracing::debug!(from, to, ?direction, "Leaving section");
        Ok(NavStart::Transition(pending))
    }

    /// Finish the exit phase: move to the target section and start entering it
    pub fn commit_navigation(&mut self) -> Result<PendingTransition, StudyError> {
        match self.transition {
            Some(TransitionState::Exiting(pending)) => {
                self.current = pending.to;
                self.transition = Some(TransitionState::Entering(pending));
                Ok(pending)
            }
            _ => Err(StudyError::InvalidNavigation {
                action: "commit navigation",
                reason: "no section is being left".to_string(),
            }),
        }
    }

    /// Finish the entry phase
    pub fn finish_navigation(&mut self) -> Result<(), StudyError> {
        match self.transition {
            Some(TransitionState::Entering(pending)) => {
                self.transition = None;
                tracing::debug!(section = pending.to, "Entered section");
                Ok(())
            }
            _ => Err(StudyError::InvalidNavigation {
                action: "finish navigation",
                reason: "no section is being entered".to_string(),
            }),
        }
    }

    /// Grade an answer to the current quiz question
    pub fn submit_answer(&mut self, candidate: &str) -> Result<AnswerFeedback, StudyError> {
        self.ensure_idle()?;
        self.quiz_mut("submit an answer")?.submit(candidate)
    }

    /// Move to the next quiz question, or finish the quiz after the last one
    ///
    /// Finishing unlocks forward navigation from the quiz section for good.
    pub fn next_question(&mut self) -> Result<QuizStep, StudyError> {
        self.ensure_idle()?;
        let step = self.quiz_mut("move to the next question")?.next()?;

        if let QuizStep::Finished(summary) = step {
            tracing::info!(
                score = summary.score,
                total = summary.total,
                percentage = summary.percentage,
                "Quiz finished"
            );
            self.sections[self.current].unlock();
        }

        Ok(step)
    }

    fn quiz_mut(&mut self, action: &'static str) -> Result<&mut QuizState, StudyError> {
        let section = &mut self.sections[self.current];
        let kind = section.kind();
        section.quiz_mut().ok_or_else(|| StudyError::not_in_quiz(action, kind))
    }

    fn ensure_idle(&self) -> Result<(), StudyError> {
        match self.transition {
            Some(_) => Err(StudyError::TransitionInProgress),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::flow::{QuizSummary, SectionKind};
    use crate::plan::{QuizQuestion, WorkedExample};

    fn full_plan() -> StudyPlan {
        StudyPlan {
            worked_examples: vec![WorkedExample::new("Problem")],
            quiz_questions: vec![
                QuizQuestion::multiple_choice("Capital?", ["Paris", "Rome"], "paris"),
                QuizQuestion::short_answer("Powerhouse?", "mitochondria"),
            ],
            ..StudyPlan::new("summary")
        }
    }

    fn counting_flow(plan: &StudyPlan) -> (StudyFlow, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let mut flow = StudyFlow::new(plan);
        let handler_count = Rc::clone(&count);
        flow.on_complete(move || handler_count.set(handler_count.get() + 1));
        (flow, count)
    }

    fn finish_quiz(flow: &mut StudyFlow, answers: &[&str]) -> QuizStep {
        let mut step = None;
        for answer in answers {
            flow.submit_answer(answer).unwrap();
            step = Some(flow.next_question().unwrap());
        }
        step.unwrap()
    }

    #[test]
    fn starts_on_first_section() {
        let flow = StudyFlow::new(&full_plan());
        assert_eq!(flow.current_index(), 0);
        assert_eq!(flow.current_section().kind(), SectionKind::Explanation);
        assert_eq!(flow.transition(), None);
    }

    #[test]
    fn advancing_visits_every_section_then_completes() {
        let (mut flow, completed) = counting_flow(&StudyPlan::new("summary"));
        assert_eq!(flow.advance(), Ok(NavSignal::Completed));
        assert_eq!(completed.get(), 1);

        let plan = StudyPlan { worked_examples: vec![WorkedExample::new("P")], ..full_plan() };
        let plan = StudyPlan { quiz_questions: vec![], ..plan };
        let (mut flow, completed) = counting_flow(&plan);
        let mut visited = vec![flow.current_index()];
        while let Ok(NavSignal::Advanced { to, .. }) = flow.advance() {
            visited.push(to);
        }
        assert_eq!(visited, vec![0, 1]);
        assert_eq!(completed.get(), 1);
    }

    #[test]
    fn completion_handler_fires_on_every_terminal_advance() {
        let (mut flow, completed) = counting_flow(&StudyPlan::new("summary"));
        flow.advance().unwrap();
        flow.advance().unwrap();
        assert_eq!(completed.get(), 2);
        assert_eq!(flow.current_index(), 0);
    }

    #[test]
    fn retreat_at_start_is_noop() {
        let mut flow = StudyFlow::new(&full_plan());
        assert_eq!(flow.retreat(), Ok(NavSignal::NoOp));
        assert_eq!(flow.current_index(), 0);
    }

    #[test]
    fn retreat_moves_back_one() {
        let mut flow = StudyFlow::new(&full_plan());
        flow.advance().unwrap();
        assert_eq!(flow.retreat(), Ok(NavSignal::Retreated { from: 1, to: 0 }));
    }

    #[test]
    fn quiz_locks_forward_navigation_until_finished() {
        let (mut flow, completed) = counting_flow(&full_plan());
        flow.advance().unwrap();
        flow.advance().unwrap();
        assert_eq!(flow.current_section().kind(), SectionKind::Quiz);
        assert!(!flow.current_section().nav_enabled());

        assert_eq!(
            flow.advance(),
            Err(StudyError::NavigationLocked { section: SectionKind::Quiz })
        );
        assert_eq!(completed.get(), 0);

        let step = finish_quiz(&mut flow, &["Paris", "nucleus"]);
        assert_eq!(step, QuizStep::Finished(QuizSummary { score: 1, total: 2, percentage: 50 }));
        assert!(flow.current_section().nav_enabled());

        assert_eq!(flow.advance(), Ok(NavSignal::Completed));
        assert_eq!(completed.get(), 1);
    }

    #[test]
    fn quiz_progress_survives_leaving_the_section() {
        let mut flow = StudyFlow::new(&full_plan());
        flow.advance().unwrap();
        flow.advance().unwrap();
        flow.submit_answer("paris").unwrap();
        flow.retreat().unwrap();
        flow.advance().unwrap();

        let quiz = flow.quiz().unwrap();
        assert_eq!(quiz.score(), 1);
        assert_eq!(flow.submit_answer("paris"), Err(StudyError::AlreadyAnswered { question: 1 }));
    }

    #[test]
    fn answering_outside_quiz_is_rejected() {
        let mut flow = StudyFlow::new(&full_plan());
        let err = flow.submit_answer("anything").unwrap_err();
        assert!(matches!(err, StudyError::InvalidNavigation { .. }));
        assert!(matches!(flow.next_question(), Err(StudyError::InvalidNavigation { .. })));
    }

    #[test]
    fn split_navigation_changes_index_only_on_commit() {
        let mut flow = StudyFlow::new(&full_plan());
        let start = flow.begin_navigation(Direction::Forward).unwrap();
        let pending = PendingTransition { direction: Direction::Forward, from: 0, to: 1 };
        assert_eq!(start, NavStart::Transition(pending));
        assert_eq!(flow.current_index(), 0);
        assert_eq!(flow.transition(), Some(TransitionState::Exiting(pending)));

        flow.commit_navigation().unwrap();
        assert_eq!(flow.current_index(), 1);
        assert_eq!(flow.transition(), Some(TransitionState::Entering(pending)));

        flow.finish_navigation().unwrap();
        assert_eq!(flow.transition(), None);
    }

    #[test]
    fn operations_during_transition_are_rejected() {
        let mut flow = StudyFlow::new(&full_plan());
        flow.advance().unwrap();
        flow.begin_navigation(Direction::Forward).unwrap();

        assert_eq!(flow.advance(), Err(StudyError::TransitionInProgress));
        assert_eq!(flow.retreat(), Err(StudyError::TransitionInProgress));
        assert_eq!(flow.submit_answer("x"), Err(StudyError::TransitionInProgress));

        flow.commit_navigation().unwrap();
        assert_eq!(flow.submit_answer("x"), Err(StudyError::TransitionInProgress));
        flow.finish_navigation().unwrap();
        assert!(flow.submit_answer("paris").unwrap().correct);
    }

    #[test]
    fn commit_without_begin_is_rejected() {
        let mut flow = StudyFlow::new(&full_plan());
        assert!(matches!(flow.commit_navigation(), Err(StudyError::InvalidNavigation { .. })));
        assert!(matches!(flow.finish_navigation(), Err(StudyError::InvalidNavigation { .. })));
    }

    #[test]
    fn explanation_then_quiz_scenario() {
        let plan = StudyPlan { worked_examples: vec![], ..full_plan() };
        let (mut flow, completed) = counting_flow(&plan);
        let kinds: Vec<_> = flow.sections().iter().map(Section::kind).collect();
        assert_eq!(kinds, vec![SectionKind::Explanation, SectionKind::Quiz]);

        assert_eq!(flow.advance(), Ok(NavSignal::Advanced { from: 0, to: 1 }));
        finish_quiz(&mut flow, &["rome", "the mitochondria"]);
        assert!(flow.current_section().nav_enabled());

        assert_eq!(flow.advance(), Ok(NavSignal::Completed));
        assert_eq!(completed.get(), 1);
        assert!(flow.current_section().nav_enabled());
    }
}
