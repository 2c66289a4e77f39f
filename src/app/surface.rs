//! Terminal rendering surface

use anyhow::Result;
use ratatui::{Terminal, backend::Backend};

use super::state::InteractionState;
use crate::theme::Theme;
use crate::transition::{Phase, Surface};
use crate::ui;
use crate::view::SectionView;

/// Draws section views into a ratatui terminal
pub struct TuiSurface<B: Backend> {
    terminal: Terminal<B>,
    theme: Theme,
    /// Input state drawn alongside the view
    pub interaction: InteractionState,
}

impl<B: Backend> TuiSurface<B> {
    pub fn new(terminal: Terminal<B>, theme: Theme) -> Self {
        Self { terminal, theme, interaction: InteractionState::default() }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Surface for TuiSurface<B> {
    fn present(&mut self, view: &SectionView, phase: Phase) -> Result<()> {
        let Self { terminal, theme, interaction } = self;
        terminal.draw(|frame| ui::draw(frame, view, phase, interaction, theme))?;
        Ok(())
    }
}
