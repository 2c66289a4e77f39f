//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::theme::Theme;
use crate::transition::Phase;
use crate::view::SectionView;

/// Height of the header in lines
pub const HEADER_HEIGHT: u16 = 3;

/// Draw the header: section title and progress dots
pub fn draw_header(frame: &mut Frame, area: Rect, view: &SectionView, phase: Phase, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [title_area, progress_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(24)]).areas(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {}", view.title),
        Style::default().fg(theme.accent_fg(phase)).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, title_area);

    let mut spans = vec![Span::styled(
        format!("Section {} of {}  ", view.position + 1, view.total),
        Style::default().fg(theme.fg_muted),
    )];
    spans.extend(progress_dots(view.position, view.total, theme));

    let progress = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
    frame.render_widget(progress, progress_area);
}

/// One dot per section: filled up to and including the current one
fn progress_dots(position: usize, total: usize, theme: &Theme) -> Vec<Span<'static>> {
    (0..total)
        .map(|i| {
            if i <= position {
                Span::styled("\u{25CF} ", Style::default().fg(theme.accent_primary)) // ●
            } else {
                Span::styled("\u{25CB} ", Style::default().fg(theme.fg_muted)) // ○
            }
        })
        .collect()
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
