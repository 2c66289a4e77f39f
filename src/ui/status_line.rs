//! Status line UI component

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{InputMode, InteractionState};
use crate::theme::Theme;
use crate::view::SectionView;

/// Draw the status line at the bottom of the screen
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    view: &SectionView,
    interaction: &InteractionState,
    theme: &Theme,
) {
    let line = if let Some(ref msg) = interaction.message {
        let style = if interaction.is_error {
            Style::default().fg(theme.error)
        } else {
            Style::default().fg(theme.success)
        };
        Line::from(Span::styled(format!(" {}", msg), style))
    } else {
        // Show hint when empty
        Line::from(Span::styled(
            format!(" {}", key_hint(InputMode::for_view(view))),
            Style::default().fg(theme.fg_muted),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Key summary for the current input mode
fn key_hint(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Navigate => "\u{2190}/\u{2192} move between sections, q to quit",
        InputMode::TextEntry => "Type your answer, Enter to submit, Esc to quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::StudyFlow;
    use crate::plan::{QuizQuestion, StudyPlan};
    use crate::transition::Phase;
    use crate::ui::test_support::render_to_text;

    fn short_answer_view() -> SectionView {
        let plan = StudyPlan {
            quiz_questions: vec![QuizQuestion::short_answer("Q", "a")],
            ..StudyPlan::new("s")
        };
        let mut flow = StudyFlow::new(&plan);
        flow.advance().unwrap();
        SectionView::build(&flow).unwrap()
    }

    #[test]
    fn hint_follows_input_mode() {
        let text = render_to_text(&short_answer_view(), Phase::Idle, &InteractionState::default());
        assert!(text.contains("Enter to submit"));
    }

    #[test]
    fn message_replaces_hint() {
        let mut interaction = InteractionState::default();
        interaction.set_error("Type an answer first");

        let text = render_to_text(&short_answer_view(), Phase::Idle, &interaction);
        assert!(text.contains("Type an answer first"));
        assert!(!text.contains("Enter to submit"));
    }
}
