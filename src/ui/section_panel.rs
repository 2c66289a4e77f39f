//! Explanation and worked-example renderer

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::theme::Theme;
use crate::transition::Phase;
use crate::view::markdown::markdown_to_plain;
use crate::view::{ConceptView, ExampleView, SectionView, ViewBody};

/// Draw the body of an explanation or examples section
pub fn draw(frame: &mut Frame, area: Rect, view: &SectionView, phase: Phase, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(1) as usize;
    let lines = match &view.body {
        ViewBody::Explanation { summary, concepts, objectives } => {
            explanation_lines(summary, concepts.as_ref(), objectives, phase, theme)
        }
        ViewBody::Examples(examples) => example_lines(examples, width, phase, theme),
        _ => Vec::new(),
    };

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

fn heading(text: &str, phase: Phase, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(theme.accent_fg(phase)).add_modifier(Modifier::BOLD),
    ))
}

fn bullet(text: &str, phase: Phase, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("  \u{2022} ", Style::default().fg(theme.fg_muted)), // •
        Span::styled(text.to_string(), Style::default().fg(theme.body_fg(phase))),
    ])
}

fn explanation_lines(
    summary: &str,
    concepts: Option<&ConceptView>,
    objectives: &[String],
    phase: Phase,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let body = Style::default().fg(theme.body_fg(phase));
    let mut lines: Vec<Line> = markdown_to_plain(summary)
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), body)))
        .collect();

    if let Some(concepts) = concepts {
        lines.push(Line::from(""));
        lines.push(heading(concepts.heading.as_deref().unwrap_or("Concepts"), phase, theme));
        lines.extend(concepts.items.iter().map(|item| bullet(item, phase, theme)));
    }

    if !objectives.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Learning objectives", phase, theme));
        lines.extend(objectives.iter().map(|o| bullet(o, phase, theme)));
    }

    lines
}

fn example_lines(
    examples: &[ExampleView],
    width: usize,
    phase: Phase,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let body = Style::default().fg(theme.body_fg(phase));
    let mut lines = Vec::new();

    for (i, example) in examples.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(heading(&example.title, phase, theme));
        lines.push(Line::from(Span::styled(example.problem.clone(), body)));

        for (n, step) in example.steps.iter().enumerate() {
            lines.extend(
                numbered_step(n + 1, step, width)
                    .into_iter()
                    .map(|text| Line::from(Span::styled(text, body))),
            );
        }

        if let Some(solution) = &example.solution {
            lines.push(Line::from(vec![
                Span::styled("Solution: ", Style::default().fg(theme.fg_muted)),
                Span::styled(solution.clone(), body),
            ]));
        }
        if let Some(result) = &example.final_result {
            lines.push(Line::from(vec![
                Span::styled("Result: ", Style::default().fg(theme.fg_muted)),
                Span::styled(
                    result.clone(),
                    Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
                ),
            ]));
        }
    }

    lines
}

/// Wrap a step with its number, continuation lines aligned under the text
fn numbered_step(number: usize, text: &str, width: usize) -> Vec<String> {
    let prefix = format!("  {}. ", number);
    let indent = " ".repeat(prefix.len());
    let options = textwrap::Options::new(width.max(prefix.len() + 10))
        .initial_indent(&prefix)
        .subsequent_indent(&indent);
    textwrap::wrap(text, options).into_iter().map(|line| line.into_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::InteractionState;
    use crate::flow::StudyFlow;
    use crate::plan::{ConceptEntry, ConceptMap, ExampleStep, StudyPlan, WorkedExample};
    use crate::ui::test_support::render_to_text;

    #[test]
    fn steps_wrap_with_hanging_indent() {
        let lines = numbered_step(2, "one two three four five six", 16);
        assert_eq!(lines, vec!["  2. one two", "     three four", "     five six"]);
    }

    #[test]
    fn explanation_shows_summary_concepts_and_objectives() {
        let plan = StudyPlan {
            concept_map: Some(ConceptMap::Concepts(vec![ConceptEntry {
                concept: "Osmosis".into(),
            }])),
            learning_objectives: vec!["Explain diffusion".into()],
            ..StudyPlan::new("Water **moves**")
        };
        let view = crate::view::SectionView::build(&StudyFlow::new(&plan)).unwrap();
        let text = render_to_text(&view, Phase::Idle, &InteractionState::default());

        assert!(text.contains("Water moves"));
        assert!(text.contains("Osmosis"));
        assert!(text.contains("Learning objectives"));
        assert!(text.contains("Explain diffusion"));
    }

    #[test]
    fn examples_show_steps_and_result() {
        let mut example = WorkedExample::new("Add 2 and 3");
        example.steps = vec![ExampleStep { step_text: "Start at 2".into() }];
        example.final_result = Some("5".into());
        let plan = StudyPlan { worked_examples: vec![example], ..StudyPlan::new("s") };
        let mut flow = StudyFlow::new(&plan);
        flow.advance().unwrap();

        let view = crate::view::SectionView::build(&flow).unwrap();
        let text = render_to_text(&view, Phase::Idle, &InteractionState::default());

        assert!(text.contains("Example 1"));
        assert!(text.contains("1. Start at 2"));
        assert!(text.contains("Result: 5"));
    }
}
