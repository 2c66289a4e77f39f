//! Quiz panel component

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::centered_rect;
use crate::app::state::{AnswerDraft, InteractionState};
use crate::flow::QuizSummary;
use crate::theme::Theme;
use crate::transition::Phase;
use crate::view::{AnswerInput, QuestionView, SectionView, ViewBody};

/// Draw the quiz panel for the current question or the results
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    view: &SectionView,
    phase: Phase,
    interaction: &InteractionState,
    theme: &Theme,
) {
    let title = match view.body {
        ViewBody::Results(_) => " Quiz Results ",
        _ => " Quiz ",
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &view.body {
        ViewBody::Question(question) => {
            draw_question(frame, inner, question, phase, interaction, theme);
        }
        ViewBody::Results(summary) => draw_results(frame, inner, summary, theme),
        _ => {}
    }
}

/// Draw results screen
fn draw_results(frame: &mut Frame, area: Rect, summary: &QuizSummary, theme: &Theme) {
    let style = if summary.score == summary.total {
        Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.warning).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(Span::styled("Quiz complete", Style::default().fg(theme.fg_primary))),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}/{} correct ({}%)", summary.score, summary.total, summary.percentage),
            style,
        )),
        Line::from(""),
        Line::from(Span::styled("[Enter] Continue", Style::default().fg(theme.fg_muted))),
    ];

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, centered_rect(80, 60, area));
}

/// Draw current question
fn draw_question(
    frame: &mut Frame,
    area: Rect,
    question: &QuestionView,
    phase: Phase,
    interaction: &InteractionState,
    theme: &Theme,
) {
    let mut lines = vec![];

    // Question number, difficulty and running score
    let mut header = vec![Span::styled(
        format!("Question {} of {}", question.number, question.total),
        Style::default().fg(theme.fg_muted),
    )];
    if let Some(rating) = question.difficulty {
        let rating = rating.min(5) as usize;
        header.push(Span::styled(
            format!("   {}{}", "\u{2605}".repeat(rating), "\u{2606}".repeat(5 - rating)), // ★ ☆
            Style::default().fg(theme.warning),
        ));
    }
    header.push(Span::styled(
        format!("   Score: {}", question.score),
        Style::default().fg(theme.fg_muted),
    ));
    lines.push(Line::from(header));
    lines.push(Line::from(""));

    // Question text
    lines.push(Line::from(Span::styled(
        question.text.clone(),
        Style::default().fg(theme.body_fg(phase)).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    match &question.input {
        AnswerInput::Choices(options) => {
            let answered = question.feedback.as_ref().map(|f| f.given.as_str());
            for (i, option) in options.iter().enumerate() {
                lines.push(option_line(i, option, interaction.selected_option, answered, theme));
            }
        }
        AnswerInput::FreeText => {
            lines.push(Line::from(Span::styled(
                "Your answer:",
                Style::default().fg(theme.fg_muted),
            )));
            match &question.feedback {
                Some(feedback) => lines.push(Line::from(Span::styled(
                    format!("  {}", feedback.given),
                    Style::default().fg(theme.fg_secondary),
                ))),
                None => lines.push(draft_line(&interaction.draft, theme)),
            }
        }
    }

    lines.push(Line::from(""));

    // Feedback and hint
    if let Some(feedback) = &question.feedback {
        if feedback.correct {
            lines.push(Line::from(Span::styled(
                "\u{2713} Correct!", // ✓
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(vec![
                Span::styled(
                    "\u{2717} Not quite. ", // ✗
                    Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("Answer: {}", feedback.correct_answer),
                    Style::default().fg(theme.fg_secondary),
                ),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[Enter] {}", question.next_label()),
            Style::default().fg(theme.fg_muted),
        )));
    } else {
        let hint = match question.input {
            AnswerInput::Choices(_) => "[j/k] Select    [Enter] Confirm",
            AnswerInput::FreeText => "[Enter] Submit    [Esc] Quit",
        };
        lines.push(Line::from(Span::styled(hint, Style::default().fg(theme.fg_muted))));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

/// One multiple-choice option, marked with selection or the graded answer
fn option_line(
    index: usize,
    option: &str,
    selected: usize,
    answered: Option<&str>,
    theme: &Theme,
) -> Line<'static> {
    let letter = (b'A' + (index % 26) as u8) as char;

    let (prefix, style) = match answered {
        Some(given) if given == option => {
            ("\u{25CF}", Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD))
        }
        Some(_) => ("\u{25CB}", Style::default().fg(theme.fg_muted)),
        None if index == selected => {
            ("\u{25CF}", Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD))
        }
        None => ("\u{25CB}", Style::default().fg(theme.fg_secondary)), // ○
    };

    Line::from(Span::styled(format!("  {} {}) {}", prefix, letter, option), style))
}

/// The typed answer with a visible cursor
fn draft_line(draft: &AnswerDraft, theme: &Theme) -> Line<'static> {
    let base = Style::default().fg(theme.fg_primary);
    let cursor_style = Style::default().fg(theme.bg_primary).bg(theme.cursor);

    let chars: Vec<char> = draft.input.chars().collect();
    let before: String = chars.iter().take(draft.cursor).collect();
    let at = chars.get(draft.cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
    let after: String = chars.iter().skip(draft.cursor + 1).collect();

    Line::from(vec![
        Span::styled("  > ", Style::default().fg(theme.accent_primary)),
        Span::styled(before, base),
        Span::styled(at, cursor_style),
        Span::styled(after, base),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::StudyFlow;
    use crate::plan::{QuizQuestion, StudyPlan};
    use crate::ui::test_support::render_to_text;

    fn quiz_flow() -> StudyFlow {
        let mut rated =
            QuizQuestion::multiple_choice("Capital of France?", ["Paris", "Rome"], "Paris");
        rated.difficulty_rating = Some(2);
        let plan = StudyPlan {
            quiz_questions: vec![rated, QuizQuestion::short_answer("Powerhouse?", "mitochondria")],
            ..StudyPlan::new("s")
        };
        let mut flow = StudyFlow::new(&plan);
        flow.advance().unwrap();
        flow
    }

    #[test]
    fn question_shows_options_and_difficulty() {
        let view = SectionView::build(&quiz_flow()).unwrap();
        let text = render_to_text(&view, Phase::Idle, &InteractionState::default());

        assert!(text.contains("Question 1 of 2"));
        assert!(text.contains("\u{2605}\u{2605}\u{2606}\u{2606}\u{2606}"));
        assert!(text.contains("A) Paris"));
        assert!(text.contains("B) Rome"));
    }

    #[test]
    fn feedback_shows_expected_answer() {
        let mut flow = quiz_flow();
        flow.submit_answer("Rome").unwrap();
        let view = SectionView::build(&flow).unwrap();
        let text = render_to_text(&view, Phase::Idle, &InteractionState::default());

        assert!(text.contains("Not quite."));
        assert!(text.contains("Answer: Paris"));
        assert!(text.contains("[Enter] Next question"));
    }

    #[test]
    fn short_answer_shows_draft() {
        let mut flow = quiz_flow();
        flow.submit_answer("Paris").unwrap();
        flow.next_question().unwrap();

        let mut interaction = InteractionState::default();
        for c in "mito".chars() {
            interaction.draft.insert_char(c);
        }
        let view = SectionView::build(&flow).unwrap();
        let text = render_to_text(&view, Phase::Idle, &interaction);

        assert!(text.contains("> mito"));
        assert!(text.contains("Score: 1"));
    }

    #[test]
    fn results_show_percentage() {
        let mut flow = quiz_flow();
        flow.submit_answer("Paris").unwrap();
        flow.next_question().unwrap();
        flow.submit_answer("nucleus").unwrap();
        flow.next_question().unwrap();

        let view = SectionView::build(&flow).unwrap();
        let text = render_to_text(&view, Phase::Idle, &InteractionState::default());
        assert!(text.contains("1/2 correct (50%)"));
    }
}
