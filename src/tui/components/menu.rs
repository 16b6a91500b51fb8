//! # Menu Component
//!
//! Footer strip of key → label blocks. Block widths come from
//! [`layout::block_widths`], so the strip always fills the terminal width
//! exactly; each block is a right-aligned key column followed by a label
//! that is cut with `…` when it does not fit.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::layout::{self, MenuBlock};
use crate::core::state::LANGUAGE_KEY;
use crate::tui::component::Component;

pub struct Menu {
    pub blocks: Vec<MenuBlock>,
}

impl Menu {
    pub fn new(blocks: Vec<MenuBlock>) -> Self {
        Self { blocks }
    }

    /// Build the strip for a given width.
    pub fn line(&self, width: u16) -> Line<'static> {
        let key_style = Style::default().fg(Color::White);
        let label_style = Style::default().fg(Color::Black).bg(Color::Blue);
        let language_style = Style::default().fg(Color::White).bg(Color::Magenta);

        let widths = layout::block_widths(width, self.blocks.len());
        let mut spans = Vec::with_capacity(self.blocks.len() * 2);

        for (block, &block_width) in self.blocks.iter().zip(&widths) {
            if block_width == 0 {
                continue;
            }
            let (key_width, label_width) = layout::split_block(block_width);

            let key = if block.key.is_empty() { " " } else { block.key.as_str() };
            let key = layout::truncate_with_ellipsis(key, key_width);
            spans.push(Span::styled(layout::pad_left(&key, key_width), key_style));
            if label_width == 0 {
                continue;
            }

            let label = layout::block_label(&block.label, label_width);
            let style = if block.key == LANGUAGE_KEY {
                language_style
            } else {
                label_style
            };
            spans.push(Span::styled(layout::pad_right(&label, label_width), style));
        }

        Line::from(spans)
    }
}

impl Component for Menu {
    /// The strip sits on the second row of `area`, under a spacer row.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let row = area.y + 1u16.min(area.height - 1);
        let strip = Rect::new(area.x, row, area.width, 1);
        frame.render_widget(Paragraph::new(self.line(area.width)), strip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_line_fills_width_exactly() {
        let menu = Menu::new(vec![
            MenuBlock::new("a", "Profil"),
            MenuBlock::new("q", "Quitter"),
            MenuBlock::new("L", "English"),
        ]);
        for width in [3u16, 10, 31, 80] {
            assert_eq!(menu.line(width).width(), usize::from(width));
        }
    }

    #[test]
    fn test_block_contents() {
        let menu = Menu::new(vec![MenuBlock::new("a", "Profil"), MenuBlock::new("q", "Quitter")]);
        // 24 columns: two 12-column blocks, key in 2, label in 10.
        assert_eq!(text_of(&menu.line(24)), " a Profil    q Quitter  ");
    }

    #[test]
    fn test_long_label_is_truncated() {
        let menu = Menu::new(vec![MenuBlock::new("x", "Expérience professionnelle")]);
        assert_eq!(text_of(&menu.line(10)), " x Expéri…");
    }

    #[test]
    fn test_zero_width_blocks_are_skipped() {
        let menu = Menu::new(vec![
            MenuBlock::new("a", "A"),
            MenuBlock::new("b", "B"),
            MenuBlock::new("c", "C"),
        ]);
        // 2 columns across 3 blocks: [1, 1, 0]
        assert_eq!(text_of(&menu.line(2)), "ab");
    }

    #[test]
    fn test_language_block_style() {
        let menu = Menu::new(vec![MenuBlock::new("q", "Quitter"), MenuBlock::new("L", "fr")]);
        let line = menu.line(20);
        assert_eq!(line.spans[3].style.bg, Some(Color::Magenta));
        assert_eq!(line.spans[1].style.bg, Some(Color::Blue));
    }

    #[test]
    fn test_render_on_second_row() {
        let backend = TestBackend::new(20, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut menu = Menu::new(vec![MenuBlock::new("q", "Quitter")]);

        terminal.draw(|f| menu.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..20).map(|x| buffer[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("q Quitter"));
    }
}
