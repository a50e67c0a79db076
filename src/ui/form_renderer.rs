//! Form rendering: outer block, children in declaration order, help line

use super::field_renderer::draw_field;
use crate::config::FormConfig;
use crate::form::{ChildView, FormContainer};
use crate::platform::{QUIT_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HELP_HEIGHT: u16 = 1;

/// Rows a child occupies
fn child_height(child: &ChildView<'_>) -> u16 {
    match child {
        ChildView::Field { view, .. } => view.height(),
        ChildView::Static(content) => {
            u16::try_from(content.lines.len()).unwrap_or(u16::MAX)
        }
    }
}

/// First child to draw so the focused field fits in `available` rows
fn first_visible(children: &[ChildView<'_>], available: u16) -> usize {
    let Some(focused) = children
        .iter()
        .position(|c| matches!(c, ChildView::Field { focused: true, .. }))
    else {
        return 0;
    };

    let mut first = 0;
    let mut used = children[..=focused]
        .iter()
        .map(child_height)
        .fold(0u16, u16::saturating_add);
    while used > available && first < focused {
        used = used.saturating_sub(child_height(&children[first]));
        first += 1;
    }
    first
}

/// Draw a whole form into `area`
pub fn draw_form(frame: &mut Frame, area: Rect, form: &FormContainer, config: &FormConfig) {
    let block = Block::default()
        .title(format!(" {} ", form.form_title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let help_rows = if config.show_help() { HELP_HEIGHT } else { 0 };
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(help_rows)])
        .split(inner);
    let body = outer[0];

    let children = form.view();
    let first = first_visible(&children, body.height);
    let visible = &children[first..];

    let mut constraints: Vec<Constraint> = visible
        .iter()
        .map(|child| Constraint::Length(child_height(child)))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(body);

    for (child, chunk) in visible.iter().zip(chunks.iter()) {
        match child {
            ChildView::Field { view, focused } => {
                draw_field(frame, *chunk, view, *focused, config)
            }
            ChildView::Static(content) => {
                let lines: Vec<Line> = content
                    .lines
                    .iter()
                    .map(|l| Line::from(l.as_str()))
                    .collect();
                frame.render_widget(Paragraph::new(lines), *chunk);
            }
        }
    }

    if help_rows > 0 {
        frame.render_widget(help_line(), outer[1]);
    }
}

fn help_line() -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next field  "),
        Span::styled(SUBMIT_SHORTCUT, Style::default().fg(Color::Cyan)),
        Span::raw(": submit  "),
        Span::styled(QUIT_SHORTCUT, Style::default().fg(Color::Cyan)),
        Span::raw(": quit"),
    ]))
    .style(Style::default().fg(Color::DarkGray))
}
