//! Field rendering: one bound field, its hints and its alert region

use super::components::{render_alert, ALERT_HEIGHT};
use crate::config::FormConfig;
use crate::fields::{ChoiceView, FieldView, OptionView, WidgetView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// Draw a bound field: hint lines, bordered widget, then the alert region
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    view: &FieldView,
    is_active: bool,
    config: &FormConfig,
) {
    let hint_rows = view.hints.len() as u16;
    let alert_rows = if view.error.is_some() { ALERT_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(hint_rows),
            Constraint::Min(3),
            Constraint::Length(alert_rows),
        ])
        .split(area);

    if hint_rows > 0 {
        let hints: Vec<Line> = view
            .hints
            .iter()
            .map(|h| Line::from(Span::styled(h.as_str(), Style::default().fg(Color::DarkGray))))
            .collect();
        frame.render_widget(Paragraph::new(hints), chunks[0]);
    }

    let border_color = match (is_active, view.error.is_some()) {
        (true, _) => Color::Cyan,
        (false, true) => Color::Red,
        (false, false) => Color::DarkGray,
    };
    let block = Block::default()
        .title(format!(" {} ", view.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let lines = widget_lines(view, is_active, config);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        chunks[1],
    );

    if let Some(message) = &view.error {
        render_alert(frame, chunks[2], message);
    }
}

/// Widget content lines for `view`
pub fn widget_lines(view: &FieldView, is_active: bool, config: &FormConfig) -> Vec<Line<'static>> {
    let value_style = if view.disabled {
        Style::default().fg(Color::DarkGray)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let placeholder_style = Style::default().fg(Color::DarkGray);
    let cursor = || Span::styled(CURSOR, Style::default().fg(Color::Cyan));

    match &view.widget {
        WidgetView::Input {
            text,
            placeholder,
            masked,
        } => {
            let mut spans = Vec::new();
            if text.is_empty() && !is_active {
                let shown = placeholder.as_deref().unwrap_or(config.empty_placeholder());
                spans.push(Span::styled(shown.to_string(), placeholder_style));
            } else if *masked {
                spans.push(Span::styled("•".repeat(text.chars().count()), value_style));
            } else {
                spans.push(Span::styled(text.clone(), value_style));
            }
            if is_active {
                spans.push(cursor());
            }
            vec![Line::from(spans)]
        }
        WidgetView::TextArea { text, .. } => text_block(text, value_style, is_active, config),
        WidgetView::Editor { content, color, .. } => {
            let style = if view.disabled {
                value_style
            } else {
                Style::default().fg(*color)
            };
            text_block(content, style, is_active, config)
        }
        WidgetView::Select {
            options,
            placeholder,
        } => {
            let selected = options.iter().find(|o| o.selected);
            let span = match selected {
                Some(OptionView { text, .. }) => Span::styled(text.clone(), value_style),
                None => Span::styled(
                    placeholder.clone().unwrap_or_else(|| "(choose)".to_string()),
                    placeholder_style,
                ),
            };
            let mut spans = vec![span];
            if is_active {
                spans.push(Span::styled("  ↑/↓", placeholder_style));
            }
            vec![Line::from(spans)]
        }
        WidgetView::Checkbox { checked } => {
            let mark = if *checked { "[x]" } else { "[ ]" };
            vec![Line::from(Span::styled(mark, value_style))]
        }
        WidgetView::RadioGroup { choices, inline } => {
            let spans = choices
                .iter()
                .map(|choice| radio_span(choice, value_style));
            if *inline {
                let mut row = Vec::new();
                for (i, span) in spans.enumerate() {
                    if i > 0 {
                        row.push(Span::raw("  "));
                    }
                    row.push(span);
                }
                vec![Line::from(row)]
            } else {
                spans.map(Line::from).collect()
            }
        }
        WidgetView::DateTime {
            value,
            display_format,
        } => {
            let span = match value {
                Some(dt) => {
                    let format = display_format.as_deref().unwrap_or(config.date_format());
                    Span::styled(dt.format(format).to_string(), value_style)
                }
                None => Span::styled(config.empty_placeholder().to_string(), placeholder_style),
            };
            let mut spans = vec![span];
            if is_active {
                spans.push(Span::styled("  ↑/↓ day  PgUp/PgDn month", placeholder_style));
            }
            vec![Line::from(spans)]
        }
    }
}

fn radio_span(choice: &ChoiceView, style: Style) -> Span<'static> {
    let mark = if choice.checked { "(•)" } else { "( )" };
    let style = if choice.checked {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    };
    Span::styled(format!("{mark} {}", choice.label), style)
}

fn text_block(
    text: &str,
    style: Style,
    is_active: bool,
    config: &FormConfig,
) -> Vec<Line<'static>> {
    if text.is_empty() && !is_active {
        return vec![Line::from(Span::styled(
            config.empty_placeholder().to_string(),
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines: Vec<Line> = text
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect();
    if is_active {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
        }
    }
    lines
}
