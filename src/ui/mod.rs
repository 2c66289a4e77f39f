//! UI rendering components

pub mod layout;
pub mod quiz_panel;
pub mod section_footer;
pub mod section_panel;
pub mod status_line;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
};

use crate::app::state::InteractionState;
use crate::theme::Theme;
use crate::transition::Phase;
use crate::view::{SectionView, ViewBody};

/// Main draw function
pub fn draw(
    frame: &mut Frame,
    view: &SectionView,
    phase: Phase,
    interaction: &InteractionState,
    theme: &Theme,
) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [header, body, footer, status] = Layout::vertical([
        Constraint::Length(layout::HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(section_footer::FOOTER_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(area);

    layout::draw_header(frame, header, view, phase, theme);

    match &view.body {
        ViewBody::Question(_) | ViewBody::Results(_) => {
            quiz_panel::draw(frame, body, view, phase, interaction, theme);
        }
        ViewBody::Explanation { .. } | ViewBody::Examples(_) => {
            section_panel::draw(frame, body, view, phase, theme);
        }
    }

    section_footer::draw(frame, footer, view, phase, theme);
    status_line::draw(frame, status, view, interaction, theme);
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    /// Draw a view into an in-memory terminal and return the screen text
    pub fn render_to_text(
        view: &SectionView,
        phase: Phase,
        interaction: &InteractionState,
    ) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let theme = Theme::default();
        terminal.draw(|frame| draw(frame, view, phase, interaction, &theme)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
