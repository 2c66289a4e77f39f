//! Section footer component with Back and Next buttons

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::theme::Theme;
use crate::transition::Phase;
use crate::view::SectionView;

/// Height of the section footer in lines
pub const FOOTER_HEIGHT: u16 = 3;

/// Draw the section footer with two buttons
pub fn draw(frame: &mut Frame, area: Rect, view: &SectionView, phase: Phase, theme: &Theme) {
    if area.height < FOOTER_HEIGHT || area.width < 30 {
        return;
    }

    // Buttons stay inert while a section is fading
    let idle = !phase.is_fading();

    let back_text = " \u{2190} Back "; // ←
    let next_text = format!(" {} \u{2192} ", view.forward_label); // →
    let back_button = create_button(back_text.to_string(), idle && view.can_go_back, theme);
    let next_button = create_button(next_text.clone(), idle && view.can_go_forward, theme);

    let back_width = back_text.chars().count() as u16;
    let next_width = next_text.chars().count() as u16;
    let gap = 4;
    let total_width = back_width + gap + next_width;

    let start_x = if area.width > total_width {
        area.x + (area.width - total_width) / 2
    } else {
        area.x
    };

    // Draw separator line above buttons
    let separator = Line::from(vec![Span::styled(
        "\u{2500}".repeat(area.width as usize), // ─ horizontal line
        Style::default().fg(theme.border),
    )]);
    frame.render_widget(Paragraph::new(separator), Rect::new(area.x, area.y, area.width, 1));

    let button_y = area.y + 1;
    frame.render_widget(Paragraph::new(back_button), Rect::new(start_x, button_y, back_width, 1));
    frame.render_widget(
        Paragraph::new(next_button),
        Rect::new(start_x + back_width + gap, button_y, next_width, 1),
    );

    let hint = Paragraph::new(hint_line(view, theme));
    frame.render_widget(hint, Rect::new(area.x, area.y + 2, area.width, 1));
}

/// Explain why the forward button is unavailable, or how to use it
fn hint_line(view: &SectionView, theme: &Theme) -> Line<'static> {
    if !view.can_go_forward {
        return Line::from(Span::styled(
            format!("Finish the {} to continue", view.kind),
            Style::default().fg(theme.fg_muted),
        ));
    }

    let mut spans = vec![];
    if view.can_go_back {
        spans.push(Span::styled("[h]", Style::default().fg(theme.fg_muted)));
        spans.push(Span::styled(" back  ", Style::default().fg(theme.fg_secondary)));
    }
    spans.push(Span::styled("[l]", Style::default().fg(theme.fg_muted)));
    spans.push(Span::styled(
        format!(" {}", view.forward_label.to_lowercase()),
        Style::default().fg(theme.fg_secondary),
    ));
    Line::from(spans)
}

/// Create a styled button
fn create_button(text: String, enabled: bool, theme: &Theme) -> Line<'static> {
    let style = if enabled {
        Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_muted).bg(theme.bg_tertiary)
    };

    Line::from(vec![Span::styled(text, style)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::InteractionState;
    use crate::flow::StudyFlow;
    use crate::plan::{QuizQuestion, StudyPlan};
    use crate::ui::test_support::render_to_text;

    fn plan() -> StudyPlan {
        StudyPlan {
            quiz_questions: vec![QuizQuestion::short_answer("Q", "a")],
            ..StudyPlan::new("s")
        }
    }

    #[test]
    fn first_section_offers_next() {
        let view = SectionView::build(&StudyFlow::new(&plan())).unwrap();
        let text = render_to_text(&view, Phase::Idle, &InteractionState::default());

        assert!(text.contains("Back"));
        assert!(text.contains("Next"));
        assert!(text.contains("[l] next"));
    }

    #[test]
    fn locked_quiz_explains_why() {
        let mut flow = StudyFlow::new(&plan());
        flow.advance().unwrap();
        let view = SectionView::build(&flow).unwrap();
        let text = render_to_text(&view, Phase::Idle, &InteractionState::default());

        assert!(text.contains("Finish"));
        assert!(text.contains("Finish the quiz to continue"));
    }

    #[test]
    fn disabled_button_uses_muted_style() {
        let theme = Theme::default();
        let line = create_button(" Next ".into(), false, &theme);
        assert_eq!(line.spans[0].style.fg, Some(theme.fg_muted));

        let line = create_button(" Next ".into(), true, &theme);
        assert_eq!(line.spans[0].style.bg, Some(theme.accent_primary));
    }
}
