use crate::core::layout::{FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::core::state::{App, LOADING_TEXT};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Header, Menu, Viewport};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Paragraph;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    if !app.is_ready() {
        frame.render_widget(Paragraph::new(format!("\n  {LOADING_TEXT}")), frame.area());
        return;
    }

    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(HEADER_HEIGHT), Min(0), Length(FOOTER_HEIGHT)]);
    let [header_area, main_area, menu_area] = layout.areas(frame.area());

    Header::new(app.title()).render(frame, header_area);

    tui.viewport.follow_layer(app.active_layer);
    Viewport::new(&mut tui.viewport, &app.content).render(frame, main_area);

    Menu::new(app.menu_blocks()).render(frame, menu_area);
}
