//! Alert region shown under a field that has a validation error

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Alert region height in rows
pub const ALERT_HEIGHT: u16 = 1;

/// Marker pointing up at the field the message belongs to
const ALERT_MARKER: &str = "▲ ";

/// The alert line for `message`
pub fn alert_line(message: &str) -> Line<'_> {
    Line::from(vec![
        Span::styled(
            ALERT_MARKER,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(message, Style::default().fg(Color::Red)),
    ])
}

/// Render the alert region for `message`
pub fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(Paragraph::new(alert_line(message)), area);
}
