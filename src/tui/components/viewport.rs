//! # Viewport Component
//!
//! Scrollable view of the active layer's output.
//!
//! ## Architecture
//!
//! `Viewport` is a transient component (created each frame) that wraps
//! `&'a mut ViewportState` (persistent scroll position) and the content
//! string (props). Output is never wrapped: the scroll canvas is as wide as
//! the widest line, and the user scrolls sideways to read the rest.
//!
//! ANSI colours in the output are drawn as styles, not as escape bytes.

use log::warn;
use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::ansi::{self, Colour, Sgr};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Columns moved per horizontal scroll step.
const HORIZONTAL_STEP: u16 = 2;

/// Scroll state for the viewport. Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct ViewportState {
    pub scroll_state: ScrollViewState,
    /// Canvas size from the last render.
    pub content_size: Size,
    /// Visible area size from the last render.
    pub area_size: Size,
    /// Layer whose output is on screen; switching layers scrolls to the top.
    shown_layer: Option<usize>,
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note which layer is displayed, resetting the scroll position if it changed.
    pub fn follow_layer(&mut self, layer: usize) {
        if self.shown_layer != Some(layer) {
            self.shown_layer = Some(layer);
            self.scroll_state.scroll_to_top();
        }
    }

    /// Clamp the scroll offset so it never runs past the content.
    pub fn clamp_scroll(&mut self) {
        let max_x = self.content_size.width.saturating_sub(self.area_size.width);
        let max_y = self.content_size.height.saturating_sub(self.area_size.height);
        let current = self.scroll_state.offset();
        if current.x > max_x || current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x.min(max_x),
                y: current.y.min(max_y),
            });
        }
    }
}

pub struct Viewport<'a> {
    pub state: &'a mut ViewportState,
    pub content: &'a str,
}

impl<'a> Viewport<'a> {
    pub fn new(state: &'a mut ViewportState, content: &'a str) -> Self {
        Self { state, content }
    }

    /// Canvas big enough for `text`, capped at what a `u16` buffer holds.
    /// The second value is true when the text had to be cut.
    fn canvas_size(text: &Text, area: Rect) -> (Size, bool) {
        let widest = u16::try_from(text.width());
        let lines = u16::try_from(text.height());
        let clamped = widest.is_err() || lines.is_err();
        let size = Size::new(
            widest.unwrap_or(u16::MAX).max(area.width),
            lines.unwrap_or(u16::MAX).max(1),
        );
        (size, clamped)
    }
}

impl<'a> Component for Viewport<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = styled_text(self.content);
        let (canvas, clamped) = Self::canvas_size(&text, area);
        if clamped && self.state.content_size != canvas {
            warn!(
                "Output is {}x{}, only the first {}x{} can be shown",
                text.width(),
                text.height(),
                canvas.width,
                canvas.height
            );
        }
        self.state.content_size = canvas;
        self.state.area_size = area.as_size();
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(canvas)
            .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(text),
            Rect::new(0, 0, canvas.width, canvas.height),
        );

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Turn command output into ratatui text, one span per styled run.
pub fn styled_text(content: &str) -> Text<'static> {
    ansi::parse(content)
        .into_iter()
        .map(|runs| {
            Line::from(
                runs.into_iter()
                    .map(|run| Span::styled(run.text, style_for(run.sgr)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect::<Vec<_>>()
        .into()
}

fn style_for(sgr: Sgr) -> Style {
    let mut style = Style::default();
    if let Some(fg) = sgr.fg {
        style = style.fg(color(fg));
    }
    if let Some(bg) = sgr.bg {
        style = style.bg(color(bg));
    }
    for (on, modifier) in [
        (sgr.bold, Modifier::BOLD),
        (sgr.dim, Modifier::DIM),
        (sgr.italic, Modifier::ITALIC),
        (sgr.underline, Modifier::UNDERLINED),
        (sgr.reversed, Modifier::REVERSED),
    ] {
        if on {
            style = style.add_modifier(modifier);
        }
    }
    style
}

fn color(colour: Colour) -> Color {
    match colour {
        Colour::Indexed(n) => Color::Indexed(n),
        Colour::Rgb(r, g, b) => Color::Rgb(r, g, b),
    }
}

/// Scrolling is the only thing the viewport reacts to; it emits nothing.
impl EventHandler for ViewportState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollLeft => {
                for _ in 0..HORIZONTAL_STEP {
                    self.scroll_state.scroll_left();
                }
            }
            TuiEvent::ScrollRight => {
                for _ in 0..HORIZONTAL_STEP {
                    self.scroll_state.scroll_right();
                }
            }
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::ScrollToTop => self.scroll_state.scroll_to_top(),
            TuiEvent::ScrollToBottom => self.scroll_state.scroll_to_bottom(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn numbered_lines(count: usize) -> String {
        (0..count).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
    }

    fn draw(terminal: &mut Terminal<TestBackend>, state: &mut ViewportState, content: &str) {
        terminal
            .draw(|f| Viewport::new(state, content).render(f, f.area()))
            .unwrap();
    }

    fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, row)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_from_top() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let mut state = ViewportState::new();
        draw(&mut terminal, &mut state, &numbered_lines(10));

        assert!(row_text(&terminal, 0).starts_with("line 0"));
        assert_eq!(state.content_size, Size::new(20, 10));
    }

    #[test]
    fn test_scroll_down_then_clamp_at_end() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let mut state = ViewportState::new();
        let content = numbered_lines(5);
        draw(&mut terminal, &mut state, &content);

        for _ in 0..10 {
            state.handle_event(&TuiEvent::ScrollDown);
        }
        // 5 lines in a 3-row area: at most 2 rows of scroll.
        assert_eq!(state.scroll_state.offset().y, 2);

        draw(&mut terminal, &mut state, &content);
        assert!(row_text(&terminal, 0).starts_with("line 2"));
    }

    #[test]
    fn test_horizontal_scroll_steps_two_columns() {
        let mut terminal = Terminal::new(TestBackend::new(5, 2)).unwrap();
        let mut state = ViewportState::new();
        draw(&mut terminal, &mut state, "abcdefghij");

        state.handle_event(&TuiEvent::ScrollRight);
        assert_eq!(state.scroll_state.offset().x, 2);

        draw(&mut terminal, &mut state, "abcdefghij");
        assert_eq!(row_text(&terminal, 0), "cdefg");
    }

    #[test]
    fn test_colours_render_as_styles() {
        let mut terminal = Terminal::new(TestBackend::new(10, 2)).unwrap();
        let mut state = ViewportState::new();
        draw(&mut terminal, &mut state, "\x1b[1;31mred\x1b[0m ok");

        assert_eq!(row_text(&terminal, 0), "red ok    ");
        // No escape bytes widen the canvas past the area.
        assert_eq!(state.content_size, Size::new(10, 1));

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].fg, Color::Indexed(1));
        assert!(buffer[(0, 0)].modifier.contains(Modifier::BOLD));
        assert_eq!(buffer[(4, 0)].fg, Color::Reset);
    }

    #[test]
    fn test_canvas_is_capped_for_huge_output() {
        let text = Text::from("x".repeat(70_000));
        let (size, clamped) = Viewport::canvas_size(&text, Rect::new(0, 0, 20, 5));
        assert!(clamped);
        assert_eq!(size, Size::new(u16::MAX, 1));

        let (size, clamped) = Viewport::canvas_size(&Text::from("short"), Rect::new(0, 0, 20, 5));
        assert!(!clamped);
        assert_eq!(size, Size::new(20, 1));
    }

    #[test]
    fn test_switching_layer_resets_scroll() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let mut state = ViewportState::new();
        state.follow_layer(0);
        draw(&mut terminal, &mut state, &numbered_lines(10));
        state.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(state.scroll_state.offset().y, 1);

        state.follow_layer(0);
        assert_eq!(state.scroll_state.offset().y, 1);
        state.follow_layer(1);
        assert_eq!(state.scroll_state.offset().y, 0);
    }
}
