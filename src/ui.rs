use ratatui::{prelude::*, widgets::*};

use crate::app::NoticeLevel;
use crate::models::{CreditState, HttpMethod};

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
    let mut lines = Vec::new();

    for line in text.lines() {
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut in_string = false;
        let mut escaped = false;

        for (i, c) in line.char_indices() {
            if in_string {
                current.push(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    // Keys are strings followed by a colon
                    let is_key = line[i + 1..].trim_start().starts_with(':');
                    let color = if is_key { Color::Cyan } else { Color::Green };
                    spans.push(Span::styled(current.clone(), Style::default().fg(color)));
                    current.clear();
                    in_string = false;
                }
                continue;
            }

            match c {
                '"' => {
                    flush_plain(&mut spans, &mut current);
                    in_string = true;
                    current.push(c);
                }
                ':' | ',' => {
                    flush_plain(&mut spans, &mut current);
                    spans.push(Span::styled(c.to_string(), Style::default().fg(Color::White)));
                }
                '{' | '}' | '[' | ']' => {
                    flush_plain(&mut spans, &mut current);
                    spans.push(Span::styled(
                        c.to_string(),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                _ => current.push(c),
            }
        }

        // Unterminated string
        if in_string {
            spans.push(Span::styled(current.clone(), Style::default().fg(Color::Green)));
            current.clear();
        }
        flush_plain(&mut spans, &mut current);

        lines.push(Line::from(spans));
    }

    lines
}

/// Push a run of non-string text, colouring literals
fn flush_plain(spans: &mut Vec<Span<'static>>, current: &mut String) {
    if current.is_empty() {
        return;
    }
    let word = current.trim();
    let style = if matches!(word, "true" | "false" | "null") {
        Style::default().fg(Color::Magenta)
    } else if !word.is_empty() && word.parse::<f64>().is_ok() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    spans.push(Span::styled(std::mem::take(current), style));
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
    }
}

pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    }
}

/// Short credit summary for the header bar
pub fn credits_label(credits: Option<&CreditState>) -> String {
    let credits = match credits {
        Some(c) => c,
        None => return String::from("credits: -"),
    };

    let amount = |v: Option<f64>| match v {
        Some(n) if n.fract() == 0.0 => format!("{}", n as i64),
        Some(n) => format!("{:.2}", n),
        None => String::from("?"),
    };

    let mut label = format!(
        "credits: {}/{}",
        amount(credits.remaining_credits),
        amount(credits.total_credits)
    );
    if credits.remaining_calls.is_some() || credits.total_calls.is_some() {
        label.push_str(&format!(
            "  calls: {}/{}",
            amount(credits.remaining_calls),
            amount(credits.total_calls)
        ));
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(line: &Line) -> Vec<(String, Option<Color>)> {
        line.spans
            .iter()
            .map(|s| (s.content.to_string(), s.style.fg))
            .collect()
    }

    #[test]
    fn test_highlight_keys_and_values() {
        let lines = highlight_json(r#"  "name": "a:b", "n": 3"#);
        let spans = colors(&lines[0]);

        assert!(spans.contains(&("\"name\"".to_string(), Some(Color::Cyan))));
        assert!(spans.contains(&("\"a:b\"".to_string(), Some(Color::Green))));
        assert!(spans.contains(&(" 3".to_string(), Some(Color::Yellow))));
    }

    #[test]
    fn test_highlight_literals() {
        let lines = highlight_json(r#"[true, null]"#);
        let spans = colors(&lines[0]);
        assert!(spans.contains(&("true".to_string(), Some(Color::Magenta))));
        assert!(spans.contains(&(" null".to_string(), Some(Color::Magenta))));
    }

    #[test]
    fn test_credits_label() {
        assert_eq!(credits_label(None), "credits: -");
        let credits = CreditState {
            remaining_credits: Some(12.0),
            total_credits: Some(100.0),
            remaining_calls: None,
            total_calls: None,
        };
        assert_eq!(credits_label(Some(&credits)), "credits: 12/100");
    }
}
