//! Terminal study session: event loop and key handling

pub mod input;
pub mod state;
pub mod surface;

use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Config;
use crate::flow::{NavSignal, QuizStep, QuizSummary, StudyError, StudyFlow};
use crate::plan::StudyPlan;
use crate::transition::{FlowDriver, Outcome};
use crate::view::{SectionView, UserAction, ViewBody};
use input::Action;
use state::InputMode;
use surface::TuiSurface;

type CrosstermSurface = TuiSurface<CrosstermBackend<Stdout>>;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    /// Whether the learner finished the last section
    pub completed: bool,
    /// Quiz result, if the plan had a quiz and it was finished
    pub quiz: Option<QuizSummary>,
}

/// The terminal study application
pub struct App {
    /// Application configuration
    config: Config,

    /// Flow and terminal surface
    driver: FlowDriver<CrosstermSurface>,

    /// Set by the flow's completion handler
    completed: Rc<Cell<bool>>,
}

impl App {
    /// Create a new application instance for a plan
    pub fn new(config: Config, plan: &StudyPlan) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let surface = TuiSurface::new(terminal, config.active_theme());

        let completed = Rc::new(Cell::new(false));
        let mut flow = StudyFlow::new(plan);
        let flag = Rc::clone(&completed);
        flow.on_complete(move || flag.set(true));

        let driver = FlowDriver::new(flow, surface, config.timings());
        Ok(Self { config, driver, completed })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        let terminal = self.driver.surface_mut().terminal_mut();
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<SessionReport> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let result = self.event_loop().await;
        self.restore_terminal()?;
        result?;

        Ok(SessionReport {
            completed: self.completed.get(),
            quiz: self
                .driver
                .flow()
                .sections()
                .iter()
                .find_map(|s| s.quiz())
                .filter(|q| q.is_finished())
                .map(|q| q.summary()),
        })
    }

    async fn event_loop(&mut self) -> Result<()> {
        loop {
            self.driver.refresh()?;

            if self.completed.get() {
                return Ok(());
            }

            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && self.handle_key(key.code, key.modifiers).await?
                    {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Handle a key press, returns true if should exit
    async fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
        let view = self.driver.view()?;
        let mode = InputMode::for_view(&view);

        let Some(action) = input::key_to_action(key, modifiers, mode, self.config.vim_mode) else {
            return Ok(false);
        };

        let interaction = &mut self.driver.surface_mut().interaction;
        match action {
            Action::Quit => return Ok(true),
            Action::Char(c) => interaction.draft.insert_char(c),
            Action::Backspace => interaction.draft.delete_char(),
            Action::Delete => interaction.draft.delete_char_forward(),
            Action::CursorLeft => interaction.draft.move_left(),
            Action::CursorRight => interaction.draft.move_right(),
            Action::CursorStart => interaction.draft.move_start(),
            Action::CursorEnd => interaction.draft.move_end(),
            Action::Up => interaction.select_previous(),
            Action::Down => interaction.select_next(view.choices().map_or(0, <[String]>::len)),
            Action::Back => self.perform(UserAction::Back).await?,
            Action::Forward => self.perform(UserAction::Forward).await?,
            Action::Confirm => {
                if let Some(user_action) = self.confirm_action(&view) {
                    self.perform(user_action).await?;
                }
            }
        }

        Ok(false)
    }

    /// What Enter means for the current view
    fn confirm_action(&mut self, view: &SectionView) -> Option<UserAction> {
        let interaction = &mut self.driver.surface_mut().interaction;

        match &view.body {
            ViewBody::Question(question) if question.feedback.is_some() => {
                Some(UserAction::NextQuestion)
            }
            ViewBody::Question(_) if view.choices().is_some() => {
                Some(UserAction::ChooseOption(interaction.selected_option))
            }
            ViewBody::Question(_) => {
                if interaction.draft.is_blank() {
                    interaction.set_error("Type an answer first");
                    None
                } else {
                    Some(UserAction::SubmitText(interaction.draft.take()))
                }
            }
            _ => Some(UserAction::Forward),
        }
    }

    /// Dispatch an action, showing recoverable errors in the status line
    async fn perform(&mut self, action: UserAction) -> Result<()> {
        match self.driver.dispatch(action).await {
            Ok(outcome) => {
                self.on_outcome(outcome);
                Ok(())
            }
            Err(e) => match e.downcast_ref::<StudyError>() {
                Some(err) if !err.is_fatal() => {
                    tracing::warn!("Rejected action: {}", err);
                    self.driver.surface_mut().interaction.set_error(err.to_string());
                    Ok(())
                }
                _ => Err(e),
            },
        }
    }

    fn on_outcome(&mut self, outcome: Outcome) {
        let interaction = &mut self.driver.surface_mut().interaction;

        match outcome {
            Outcome::Navigated(NavSignal::Advanced { .. } | NavSignal::Retreated { .. }) => {
                interaction.reset_question();
                interaction.clear_message();
            }
            Outcome::Navigated(NavSignal::Completed | NavSignal::NoOp) => {}
            Outcome::Answered(feedback) => {
                if feedback.correct {
                    interaction.set_message("Correct!");
                } else {
                    interaction.set_message(format!(
                        "Not quite. The answer is: {}",
                        feedback.correct_answer
                    ));
                }
            }
            Outcome::Quiz(QuizStep::NextQuestion(_)) => {
                interaction.reset_question();
                interaction.clear_message();
            }
            Outcome::Quiz(QuizStep::Finished(summary)) => {
                interaction.set_message(format!(
                    "Quiz complete: {}/{} ({}%)",
                    summary.score, summary.total, summary.percentage
                ));
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
