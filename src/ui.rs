//! Rendering helpers shared by the screen drawers

use ratatui::{prelude::*, widgets::*};

use crate::messages::render::{FieldView, FormView};
use crate::models::HttpMethod;

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut chars = line.char_indices();

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if plain.is_empty() {
            return;
        }
        let text = std::mem::take(plain);
        let trimmed = text.trim();
        let style = if matches!(trimmed, "true" | "false" | "null") {
            Style::default().fg(Color::Magenta)
        } else if !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '-' | '.' | 'e' | 'E' | '+'))
        {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        spans.push(Span::styled(text, style));
    };

    while let Some((start, c)) = chars.next() {
        match c {
            '"' => {
                flush(&mut plain, &mut spans);
                let mut end = line.len();
                let mut escaped = false;
                for (i, ch) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == '"' {
                        end = i + 1;
                        break;
                    }
                }
                let is_key = line[end..].trim_start().starts_with(':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                spans.push(Span::styled(
                    line[start..end].to_string(),
                    Style::default().fg(color),
                ));
            }
            '{' | '}' | '[' | ']' | ':' | ',' => {
                flush(&mut plain, &mut spans);
                let color = if c == ':' || c == ',' {
                    Color::White
                } else {
                    Color::Yellow
                };
                spans.push(Span::styled(c.to_string(), Style::default().fg(color)));
            }
            _ => plain.push(c),
        }
    }
    flush(&mut plain, &mut spans);

    Line::from(spans)
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: HttpMethod) -> Color {
    match method {
        HttpMethod::GET => Color::Green,
        HttpMethod::POST => Color::Yellow,
        HttpMethod::PUT => Color::Blue,
        HttpMethod::PATCH => Color::Cyan,
        HttpMethod::DELETE => Color::Red,
        HttpMethod::HEAD | HttpMethod::OPTIONS => Color::White,
    }
}

/// URL parameter token, shown exactly as stored
pub fn parameter_span(parameter: &str) -> Span<'static> {
    Span::styled(parameter.to_string(), Style::default().fg(Color::Cyan))
}

/// Lines of one form field; the focused field shows a block cursor
pub fn field_lines(field: &FieldView, focused: bool) -> Vec<Line<'static>> {
    let (shown, cursor) = if field.secret {
        let before = field.value[..field.cursor].chars().count();
        ("*".repeat(field.value.chars().count()), before)
    } else {
        (field.value.clone(), field.cursor)
    };

    let mut lines = Vec::new();
    let mut offset = 0;
    for part in shown.split('\n') {
        let end = offset + part.len();
        if focused && (offset..=end).contains(&cursor) {
            let at = cursor - offset;
            let (before, rest) = part.split_at(at);
            let mut rest_chars = rest.chars();
            let under = rest_chars.next().map_or(" ".to_string(), String::from);
            lines.push(Line::from(vec![
                Span::raw(format!("  {}", before)),
                Span::styled(under, Style::default().add_modifier(Modifier::REVERSED)),
                Span::raw(rest_chars.as_str().to_string()),
            ]));
        } else {
            lines.push(Line::from(format!("  {}", part)));
        }
        // skip the '\n'
        offset = end + 1;
    }
    lines
}

/// Full form body: labelled fields, then the inline error or the saving marker
pub fn form_lines(form: &FormView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(field.label, label_style)));
        lines.extend(field_lines(field, focused && !form.submitting));
        lines.push(Line::default());
    }

    if form.submitting {
        lines.push(Line::from(Span::styled(
            "Saving...",
            Style::default().fg(Color::Cyan),
        )));
    } else if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red).bold(),
        )));
    }
    lines
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
