//! HTML rendering of section views
//!
//! Interactive elements carry a `data-action` attribute (`back`, `forward`,
//! `choose`, `submit`, `next-question`) that a page script maps back to
//! [`UserAction`](super::UserAction)s. Fade phases are expressed as CSS classes.

use anyhow::Result;

use super::markdown::{escape, markdown_to_html};
use super::{AnswerInput, ExampleView, QuestionView, SectionView, ViewBody};
use crate::flow::QuizSummary;
use crate::transition::{Phase, Surface, TransitionTimings};

/// Append one formatted line of markup
macro_rules! push_line {
    ($out:expr, $($arg:tt)*) => {{
        $out.push_str(&format!($($arg)*));
        $out.push('\n');
    }};
}

/// Render a section as an HTML fragment
pub fn render_section(view: &SectionView, phase: Phase) -> String {
    let mut out = String::new();

    push_line!(
        out,
        r#"<section class="study-section study-section--{} fade-{}" data-section="{}">"#,
        view.kind.as_str(),
        phase.as_str(),
        view.position
    );
    push_line!(out, "<header>");
    push_line!(out, "<h2>{}</h2>", escape(&view.title));
    push_line!(
        out,
        r#"<p class="progress">Section {} of {}</p>"#,
        view.position + 1,
        view.total
    );
    push_line!(out, "</header>");

    match &view.body {
        ViewBody::Explanation { summary, concepts, objectives } => {
            push_line!(out, r#"<div class="summary">{}</div>"#, markdown_to_html(summary));
            if let Some(concepts) = concepts {
                push_line!(out, r#"<div class="concept-map">"#);
                if let Some(heading) = &concepts.heading {
                    push_line!(out, "<h3>{}</h3>", escape(heading));
                }
                push_list(&mut out, "ul", &concepts.items);
                push_line!(out, "</div>");
            }
            if !objectives.is_empty() {
                push_line!(out, r#"<div class="objectives"><h3>Learning objectives</h3>"#);
                push_list(&mut out, "ul", objectives);
                push_line!(out, "</div>");
            }
        }
        ViewBody::Examples(examples) => {
            for example in examples {
                push_example(&mut out, example);
            }
        }
        ViewBody::Question(question) => push_question(&mut out, question),
        ViewBody::Results(summary) => push_results(&mut out, summary),
    }

    push_line!(out, r#"<nav class="study-nav">"#);
    push_button(&mut out, "back", "Back", view.can_go_back, "");
    push_button(&mut out, "forward", view.forward_label, view.can_go_forward, "");
    push_line!(out, "</nav>");
    push_line!(out, "</section>");

    out
}

/// Render a complete page for a section, with fade styles from the timings
pub fn render_page(view: &SectionView, phase: Phase, timings: &TransitionTimings) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
.study-section {{ transition: opacity {exit}ms ease-in; }}
.study-section.fade-exiting {{ opacity: 0; }}
.study-section.fade-entering {{ opacity: 1; transition: opacity {entry}ms ease-out; }}
.feedback--correct {{ color: #2e7d32; }}
.feedback--incorrect {{ color: #c62828; }}
button[disabled] {{ opacity: 0.5; cursor: not-allowed; }}
</style>
</head>
<body>
{section}</body>
</html>
"#,
        title = escape(&view.title),
        exit = timings.exit.as_millis(),
        entry = timings.entry.as_millis(),
        section = render_section(view, phase)
    )
}

fn push_list(out: &mut String, tag: &str, items: &[String]) {
    push_line!(out, "<{}>", tag);
    for item in items {
        push_line!(out, "<li>{}</li>", escape(item));
    }
    push_line!(out, "</{}>", tag);
}

fn push_button(out: &mut String, action: &str, label: &str, enabled: bool, extra: &str) {
    let disabled = if enabled { "" } else { " disabled" };
    push_line!(
        out,
        r#"<button type="button" data-action="{}"{}{}>{}</button>"#,
        action,
        extra,
        disabled,
        escape(label)
    );
}

fn push_example(out: &mut String, example: &ExampleView) {
    push_line!(out, r#"<article class="example">"#);
    push_line!(out, "<h3>{}</h3>", escape(&example.title));
    push_line!(out, r#"<p class="problem">{}</p>"#, escape(&example.problem));
    if !example.steps.is_empty() {
        push_list(out, "ol", &example.steps);
    }
    if let Some(solution) = &example.solution {
        push_line!(out, r#"<p class="solution">{}</p>"#, escape(solution));
    }
    if let Some(result) = &example.final_result {
        push_line!(out, r#"<p class="final-result">{}</p>"#, escape(result));
    }
    push_line!(out, "</article>");
}

fn push_question(out: &mut String, question: &QuestionView) {
    let answered = question.feedback.is_some();

    push_line!(out, r#"<div class="question">"#);
    push_line!(
        out,
        r#"<p class="question-number">Question {} of {}</p>"#,
        question.number, question.total
    );
    if let Some(rating) = question.difficulty {
        let stars = "\u{2605}".repeat(rating.min(5) as usize);
        push_line!(out, r#"<p class="difficulty" data-rating="{}">{}</p>"#, rating, stars);
    }
    push_line!(out, r#"<p class="question-text">{}</p>"#, escape(&question.text));

    match &question.input {
        AnswerInput::Choices(options) => {
            push_line!(out, r#"<div class="options">"#);
            for (i, option) in options.iter().enumerate() {
                let extra = format!(r#" data-option="{}""#, i);
                push_button(out, "choose", option, !answered, &extra);
            }
            push_line!(out, "</div>");
        }
        AnswerInput::FreeText => {
            let disabled = if answered { " disabled" } else { "" };
            push_line!(out, r#"<input type="text" name="answer"{}>"#, disabled);
            push_button(out, "submit", "Submit", !answered, "");
        }
    }

    if let Some(feedback) = &question.feedback {
        let (class, verdict) = if feedback.correct {
            ("feedback--correct", "Correct!")
        } else {
            ("feedback--incorrect", "Not quite.")
        };
        push_line!(out, r#"<div class="feedback {}">"#, class);
        push_line!(out, "<p>{}</p>", verdict);
        if !feedback.correct {
            push_line!(
                out,
                r#"<p class="correct-answer">{}</p>"#,
                escape(&feedback.correct_answer)
            );
        }
        push_line!(out, "</div>");
        push_button(out, "next-question", question.next_label(), true, "");
    }

    push_line!(out, r#"<p class="score">Score: {}</p>"#, question.score);
    push_line!(out, "</div>");
}

fn push_results(out: &mut String, summary: &QuizSummary) {
    push_line!(out, r#"<div class="results">"#);
    push_line!(
        out,
        r#"<p class="final-score">{} / {} ({}%)</p>"#,
        summary.score, summary.total, summary.percentage
    );
    push_line!(out, "</div>");
}

/// A rendered frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlFrame {
    pub phase: Phase,
    pub section: usize,
    pub html: String,
}

/// Surface that renders every presented view to an HTML fragment
#[derive(Debug, Default)]
pub struct HtmlSurface {
    frames: Vec<HtmlFrame>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames presented so far
    pub fn frames(&self) -> &[HtmlFrame] {
        &self.frames
    }

    /// The most recent frame
    pub fn latest(&self) -> Option<&HtmlFrame> {
        self.frames.last()
    }
}

impl Surface for HtmlSurface {
    fn present(&mut self, view: &SectionView, phase: Phase) -> Result<()> {
        self.frames.push(HtmlFrame {
            phase,
            section: view.position,
            html: render_section(view, phase),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::flow::StudyFlow;
    use crate::plan::{QuizQuestion, StudyPlan};

    fn quiz_view(answer: Option<&str>) -> SectionView {
        let plan = StudyPlan {
            quiz_questions: vec![QuizQuestion::multiple_choice(
                "Capital?",
                ["Paris", "<Rome>"],
                "Paris",
            )],
            ..StudyPlan::new("s")
        };
        let mut flow = StudyFlow::new(&plan);
        flow.advance().unwrap();
        if let Some(answer) = answer {
            flow.submit_answer(answer).unwrap();
        }
        SectionView::build(&flow).unwrap()
    }

    #[test]
    fn explanation_renders_markdown_summary() {
        let flow = StudyFlow::new(&StudyPlan::new("Cells are **small**"));
        let html = render_section(&SectionView::build(&flow).unwrap(), Phase::Idle);

        assert!(html.contains("<strong>small</strong>"));
        assert!(html.contains("study-section--explanation"));
        assert!(html.contains("fade-idle"));
    }

    #[test]
    fn each_element_ends_its_own_line() {
        let flow = StudyFlow::new(&StudyPlan::new("s"));
        let html = render_section(&SectionView::build(&flow).unwrap(), Phase::Idle);

        assert!(html.contains("<header>\n"));
        assert!(html.contains("</header>\n"));
        assert!(html.ends_with("</section>\n"));
    }

    #[test]
    fn first_section_disables_back() {
        let flow = StudyFlow::new(&StudyPlan::new("s"));
        let html = render_section(&SectionView::build(&flow).unwrap(), Phase::Idle);
        assert!(html.contains(r#"data-action="back" disabled>"#));
        assert!(html.contains(r#"data-action="forward">"#));
    }

    #[test]
    fn unanswered_quiz_locks_forward_and_escapes_options() {
        let html = render_section(&quiz_view(None), Phase::Entering);

        assert!(html.contains(r#"data-action="forward" disabled>"#));
        assert!(html.contains(r#"data-action="choose" data-option="1">"#));
        assert!(html.contains("&lt;Rome&gt;"));
        assert!(!html.contains("<Rome>"));
        assert!(!html.contains("next-question"));
        assert!(html.contains("fade-entering"));
    }

    #[test]
    fn answered_quiz_shows_feedback_and_next_button() {
        let html = render_section(&quiz_view(Some("Paris")), Phase::Idle);

        assert!(html.contains("feedback--correct"));
        assert!(html.contains(r#"data-action="choose" data-option="0" disabled>"#));
        assert!(html.contains(r#"data-action="next-question">"#));
    }

    #[test]
    fn page_uses_configured_durations() {
        let timings = TransitionTimings {
            exit: Duration::from_millis(120),
            entry: Duration::from_millis(80),
        };
        let page = render_page(&quiz_view(None), Phase::Idle, &timings);

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("opacity 120ms"));
        assert!(page.contains("opacity 80ms"));
    }

    #[test]
    fn surface_records_frames() {
        let mut surface = HtmlSurface::new();
        surface.present(&quiz_view(None), Phase::Idle).unwrap();

        let frame = surface.latest().unwrap();
        assert_eq!(frame.section, 1);
        assert_eq!(frame.phase, Phase::Idle);
        assert_eq!(surface.frames().len(), 1);
    }
}
