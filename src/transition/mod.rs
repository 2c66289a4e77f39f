//! Fade transitions between sections
//!
//! [`FlowDriver`] wraps a [`StudyFlow`] and a rendering [`Surface`]. Each
//! navigation presents the old section fading out, waits the exit duration,
//! moves the flow, presents the new section fading in, waits the entry
//! duration, and presents it at rest. Transitions cannot be cancelled.

use std::time::Duration;

use anyhow::Result;

use crate::flow::{
    AnswerFeedback, Direction, NavSignal, NavStart, QuizStep, StudyError, StudyFlow,
};
use crate::view::{SectionView, UserAction};

/// Visual phase a section is presented in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Exiting,
    Entering,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Exiting => "exiting",
            Phase::Entering => "entering",
        }
    }

    /// Whether the surface is mid-transition
    pub fn is_fading(self) -> bool {
        !matches!(self, Phase::Idle)
    }
}

/// Durations of the two halves of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    pub exit: Duration,
    pub entry: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self { exit: Duration::from_millis(400), entry: Duration::from_millis(500) }
    }
}

impl TransitionTimings {
    /// No pauses at all
    pub const INSTANT: Self = Self { exit: Duration::ZERO, entry: Duration::ZERO };

    /// Scale both durations (1.0 = unchanged, 0.0 = instant)
    pub fn scaled(self, speed: f32) -> Self {
        if !speed.is_finite() || speed <= 0.0 {
            return Self::INSTANT;
        }
        let scale = |d: Duration| {
            Duration::from_millis((d.as_millis() as f64 * f64::from(speed)).round() as u64)
        };
        Self { exit: scale(self.exit), entry: scale(self.entry) }
    }

    /// Total time a navigation takes
    pub fn total(&self) -> Duration {
        self.exit + self.entry
    }
}

/// A rendering target for section views
pub trait Surface {
    /// Show the view in the given phase, replacing whatever was shown
    fn present(&mut self, view: &SectionView, phase: Phase) -> Result<()>;
}

/// What a dispatched user action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Navigated(NavSignal),
    Answered(AnswerFeedback),
    Quiz(QuizStep),
}

/// Drives a study flow against a surface, running the fade transitions
#[derive(Debug)]
pub struct FlowDriver<S> {
    flow: StudyFlow,
    surface: S,
    timings: TransitionTimings,
}

impl<S: Surface> FlowDriver<S> {
    pub fn new(flow: StudyFlow, surface: S, timings: TransitionTimings) -> Self {
        Self { flow, surface, timings }
    }

    pub fn flow(&self) -> &StudyFlow {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut StudyFlow {
        &mut self.flow
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn timings(&self) -> TransitionTimings {
        self.timings
    }

    /// Build the view of the current section
    pub fn view(&self) -> Result<SectionView, StudyError> {
        SectionView::build(&self.flow)
    }

    /// Present the current section at rest
    pub fn refresh(&mut self) -> Result<()> {
        self.present(Phase::Idle)
    }

    fn present(&mut self, phase: Phase) -> Result<()> {
        let view = self.view()?;
        self.surface.present(&view, phase)
    }

    /// Move forward, animating the transition
    pub async fn advance(&mut self) -> Result<NavSignal> {
        self.navigate(Direction::Forward).await
    }

    /// Move back, animating the transition
    pub async fn retreat(&mut self) -> Result<NavSignal> {
        self.navigate(Direction::Backward).await
    }

    async fn navigate(&mut self, direction: Direction) -> Result<NavSignal> {
        let pending = match self.flow.begin_navigation(direction)? {
            NavStart::Transition(pending) => pending,
            NavStart::Completed => return Ok(NavSignal::Completed),
            NavStart::NoOp => return Ok(NavSignal::NoOp),
        };

        // Once started, a transition always runs to idle; the first
        // presentation error is reported after that.
        let exiting = self.present(Phase::Exiting);
        tokio::time::sleep(self.timings.exit).await;

        self.flow.commit_navigation()?;
        let entering = self.present(Phase::Entering);
        tokio::time::sleep(self.timings.entry).await;

        self.flow.finish_navigation()?;
        exiting.and(entering).and_then(|()| self.refresh())?;

        Ok(pending.into())
    }

    /// Grade an answer and show the feedback
    pub fn submit_answer(&mut self, candidate: &str) -> Result<AnswerFeedback> {
        let feedback = self.flow.submit_answer(candidate)?;
        self.refresh()?;
        Ok(feedback)
    }

    /// Move to the next question or the results
    pub fn next_question(&mut self) -> Result<QuizStep> {
        let step = self.flow.next_question()?;
        self.refresh()?;
        Ok(step)
    }

    /// Handle an action reported by the surface
    pub async fn dispatch(&mut self, action: UserAction) -> Result<Outcome> {
        tracing::debug!(?action, "Dispatching user action");

        match action {
            UserAction::Forward => self.advance().await.map(Outcome::Navigated),
            UserAction::Back => self.retreat().await.map(Outcome::Navigated),
            UserAction::ChooseOption(index) => {
                let view = self.view()?;
                let option = view.choices().and_then(|options| options.get(index)).cloned();
                let Some(option) = option else {
                    return Err(StudyError::InvalidNavigation {
                        action: "choose an option",
                        reason: format!("there is no option {}", index + 1),
                    }
                    .into());
                };
                self.submit_answer(&option).map(Outcome::Answered)
            }
            UserAction::SubmitText(text) => self.submit_answer(&text).map(Outcome::Answered),
            UserAction::NextQuestion => self.next_question().map(Outcome::Quiz),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    use super::*;
    use crate::flow::QuizSummary;
    use crate::plan::{QuizQuestion, StudyPlan, WorkedExample};
    use crate::view::html::HtmlSurface;

    fn driver(timings: TransitionTimings) -> FlowDriver<HtmlSurface> {
        let plan = StudyPlan {
            worked_examples: vec![WorkedExample::new("Problem")],
            quiz_questions: vec![
                QuizQuestion::multiple_choice("Capital?", ["Paris", "Rome"], "paris"),
                QuizQuestion::short_answer("Powerhouse?", "mitochondria"),
            ],
            ..StudyPlan::new("summary")
        };
        FlowDriver::new(StudyFlow::new(&plan), HtmlSurface::new(), timings)
    }

    fn phases(driver: &FlowDriver<HtmlSurface>) -> Vec<(Phase, usize)> {
        driver.surface().frames().iter().map(|f| (f.phase, f.section)).collect()
    }

    #[test]
    fn timings_default_and_scale() {
        let timings = TransitionTimings::default();
        assert_eq!(timings.total(), Duration::from_millis(900));
        assert_eq!(timings.scaled(0.5).exit, Duration::from_millis(200));
        assert_eq!(timings.scaled(0.0), TransitionTimings::INSTANT);
        assert_eq!(timings.scaled(f32::NAN), TransitionTimings::INSTANT);
    }

    #[tokio::test(start_paused = true)]
    async fn advance_waits_exit_then_entry() {
        let mut driver = driver(TransitionTimings::default());
        let start = Instant::now();

        let signal = driver.advance().await.unwrap();

        assert_eq!(signal, NavSignal::Advanced { from: 0, to: 1 });
        assert_eq!(start.elapsed(), Duration::from_millis(900));
        assert_eq!(
            phases(&driver),
            vec![(Phase::Exiting, 0), (Phase::Entering, 1), (Phase::Idle, 1)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn retreat_at_start_presents_nothing() {
        let mut driver = driver(TransitionTimings::default());
        let start = Instant::now();

        assert_eq!(driver.retreat().await.unwrap(), NavSignal::NoOp);
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(driver.surface().frames().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_presentation_still_finishes_the_transition() {
        let plan = StudyPlan {
            quiz_questions: vec![QuizQuestion {
                options: None,
                ..QuizQuestion::multiple_choice("Capital?", ["Paris"], "Paris")
            }],
            ..StudyPlan::new("summary")
        };
        let mut driver = FlowDriver::new(
            StudyFlow::new(&plan),
            HtmlSurface::new(),
            TransitionTimings::default(),
        );
        let start = Instant::now();

        let err = driver.advance().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudyError>(),
            Some(StudyError::MalformedDocument { .. })
        ));
        assert_eq!(start.elapsed(), Duration::from_millis(900));
        assert_eq!(driver.flow().transition(), None);
        assert_eq!(driver.flow().current_index(), 1);

        // Leaving the broken section fails to draw it again, but still moves back
        assert!(driver.retreat().await.is_err());
        assert_eq!(driver.flow().transition(), None);
        assert_eq!(driver.flow().current_index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn locked_quiz_rejects_forward() {
        let mut driver = driver(TransitionTimings::INSTANT);
        driver.advance().await.unwrap();
        driver.advance().await.unwrap();

        let err = driver.advance().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudyError>(),
            Some(StudyError::NavigationLocked { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn dispatch_runs_the_whole_flow() {
        let mut driver = driver(TransitionTimings::INSTANT);
        driver.dispatch(UserAction::Forward).await.unwrap();
        driver.dispatch(UserAction::Forward).await.unwrap();

        let outcome = driver.dispatch(UserAction::ChooseOption(0)).await.unwrap();
        assert!(matches!(outcome, Outcome::Answered(AnswerFeedback { correct: true, .. })));
        driver.dispatch(UserAction::NextQuestion).await.unwrap();

        driver.dispatch(UserAction::SubmitText("the mitochondria".into())).await.unwrap();
        let outcome = driver.dispatch(UserAction::NextQuestion).await.unwrap();
        assert_eq!(outcome, Outcome::Quiz(QuizStep::Finished(QuizSummary::new(2, 2))));

        let outcome = driver.dispatch(UserAction::Forward).await.unwrap();
        assert_eq!(outcome, Outcome::Navigated(NavSignal::Completed));
    }

    #[tokio::test(start_paused = true)]
    async fn choosing_missing_option_is_rejected() {
        let mut driver = driver(TransitionTimings::INSTANT);
        driver.advance().await.unwrap();
        driver.advance().await.unwrap();

        let err = driver.dispatch(UserAction::ChooseOption(7)).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudyError>(),
            Some(StudyError::InvalidNavigation { .. })
        ));
        assert_eq!(driver.flow().quiz().unwrap().score(), 0);
    }

    #[test]
    fn answers_refresh_the_surface() {
        let plan = StudyPlan {
            quiz_questions: vec![QuizQuestion::short_answer("Q", "a")],
            ..StudyPlan::new("s")
        };
        let mut flow = StudyFlow::new(&plan);
        flow.advance().unwrap();
        let mut driver = FlowDriver::new(flow, HtmlSurface::new(), TransitionTimings::INSTANT);

        driver.submit_answer("a").unwrap();
        let frame = driver.surface().latest().unwrap();
        assert!(frame.html.contains("feedback--correct"));
    }
}
