//! # Header Component
//!
//! Top band showing the active layer's title, centered on a solid bar
//! that spans the full terminal width.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::tui::component::Component;

pub struct Header {
    pub title: String,
}

impl Header {
    pub fn new(title: String) -> Self {
        Self { title }
    }

    fn style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    }
}

impl Component for Header {
    /// The bar is a single row at the top of `area`; the rows below it
    /// are left empty as spacing above the viewport.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let bar = Rect::new(area.x, area.y, area.width, 1);
        let paragraph = Paragraph::new(self.title.as_str())
            .style(Self::style())
            .alignment(Alignment::Center)
            .block(Block::default().padding(Padding::horizontal(1)));
        frame.render_widget(paragraph, bar);
    }
}
