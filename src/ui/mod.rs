//! UI module for rendering forms in the terminal

mod components;
mod field_renderer;
mod form_renderer;

pub use components::{alert_line, render_alert, render_notice, ALERT_HEIGHT};
pub use field_renderer::{draw_field, widget_lines};
pub use form_renderer::draw_form;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    draw_form(frame, area, &app.form, &app.config);

    if let Some(notice) = app.notice() {
        render_notice(frame, &notice.title, notice.accent, &notice.message);
    }
}
