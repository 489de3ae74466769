use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;
use crate::widget::{format_size, Card, InputState, Mode, ERROR_GLYPH};

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Mode tabs
            Constraint::Length(5), // Input
            Constraint::Length(1), // Verify line
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    render_input(frame, chunks[2], app);
    render_verify_line(frame, chunks[3], app);
    render_results(frame, chunks[4], app);
    render_status_bar(frame, chunks[5], app);
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;
    let header_text = vec![Line::from(vec![
        Span::styled(
            "Checkmate",
            Style::default()
                .fg(colors.header.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Content Verification | Engine: "),
        Span::styled(
            app.verifier_name.as_str(),
            Style::default().fg(colors.info.to_color()),
        ),
    ])];

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors.border.to_color())),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// Render the mode tabs
fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;
    let active = app.mode();

    let mut spans = Vec::new();
    for (idx, mode) in Mode::ALL.iter().enumerate() {
        let label = format!(" F{} {} ", idx + 1, mode.display_name());
        let style = if *mode == active {
            Style::default()
                .fg(colors.border_focused.to_color())
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(colors.text_secondary.to_color())
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let tabs = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border.to_color()))
            .title(" Mode (Tab / Shift+Tab) "),
    );

    frame.render_widget(tabs, area);
}

/// Render the input area of the active mode
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;
    let mode = app.mode();
    let input = app.widget.input();

    let (content, title) = match input {
        InputState::Text(text) | InputState::Url(text) => {
            (text.as_str(), format!(" {} ", mode.display_name()))
        }
        InputState::Image(_) | InputState::Audio(_) => (
            app.path_buffer.as_str(),
            format!(" {} file path (Enter or Ctrl+O to load) ", mode.display_name()),
        ),
    };

    let mut lines = Vec::new();
    if content.is_empty() {
        lines.push(Line::from(Span::styled(
            mode.placeholder(),
            Style::default().fg(colors.text_disabled.to_color()),
        )));
    } else {
        for line in content.split('\n') {
            lines.push(Line::from(line.to_string()));
        }
    }

    if let Some(preview) = input.preview() {
        lines.push(Line::from(vec![
            Span::styled("▣ ", Style::default().fg(colors.info.to_color())),
            Span::styled(
                preview.caption(),
                Style::default().fg(colors.text_secondary.to_color()),
            ),
        ]));
    } else if let InputState::Audio(Some(file)) = input {
        lines.push(Line::from(vec![
            Span::styled("♪ ", Style::default().fg(colors.info.to_color())),
            Span::styled(
                format!("{} · {} · {}", file.name, file.mime, format_size(file.size())),
                Style::default().fg(colors.text_secondary.to_color()),
            ),
        ]));
    }

    let border_color = if app.widget.prompt().is_some() {
        colors.warning.to_color()
    } else {
        colors.border_focused.to_color()
    };

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(colors.text_primary.to_color()))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );

    frame.render_widget(paragraph, area);

    // Cursor at the end of the last line
    let last_line = content.rsplit('\n').next().unwrap_or_default();
    let columns = u16::try_from(last_line.chars().count()).unwrap_or(u16::MAX);
    let rows = u16::try_from(content.split('\n').count().max(1)).unwrap_or(u16::MAX);
    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(columns)
        .min(area.x + area.width.saturating_sub(2));
    let cursor_y = area
        .y
        .saturating_add(rows)
        .min(area.y + area.height.saturating_sub(2));
    frame.set_cursor_position((cursor_x, cursor_y));
}

/// Render the verify action line: spinner, prompt or hint
fn render_verify_line(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;

    let line = if app.widget.is_loading() {
        Line::from(vec![
            Span::styled(
                format!(" {} ", app.spinner_frame()),
                Style::default().fg(colors.info.to_color()),
            ),
            Span::styled(
                format!("Verifying {}...", app.mode().display_name()),
                Style::default()
                    .fg(colors.info.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else if let Some(prompt) = app.widget.prompt() {
        Line::from(vec![
            Span::styled(" ! ", Style::default().fg(colors.warning.to_color())),
            Span::styled(
                prompt.to_string(),
                Style::default()
                    .fg(colors.warning.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  (Esc to dismiss)",
                Style::default().fg(colors.text_disabled.to_color()),
            ),
        ])
    } else {
        Line::from(Span::styled(
            format!(" Enter: Verify {}", app.mode().display_name()),
            Style::default().fg(colors.text_secondary.to_color()),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Styled lines of every result card, in display order
pub fn result_lines(app: &App) -> Vec<Line<'static>> {
    let colors = &app.theme.colors;
    let title_style = Style::default()
        .fg(colors.header.to_color())
        .add_modifier(Modifier::BOLD);
    let body_style = Style::default().fg(colors.text_primary.to_color());
    let muted_style = Style::default().fg(colors.text_secondary.to_color());

    let mut lines = Vec::new();
    for card in app.widget.cards() {
        match &card {
            Card::Transcription { text } => {
                lines.push(Line::from(Span::styled(card.title(), title_style)));
                lines.push(Line::from(Span::styled(
                    format!("\"{}\"", text),
                    body_style.add_modifier(Modifier::ITALIC),
                )));
            }
            Card::Verdict(verdict) => {
                let accent = app.theme.verdict_color(verdict.style);
                lines.push(Line::from(Span::styled(card.title(), title_style)));
                lines.push(Line::from(Span::styled(
                    format!(" {} {} ", verdict.glyph, verdict.label),
                    Style::default()
                        .fg(accent)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                )));
                if let Some(reasoning) = &verdict.reasoning {
                    lines.push(Line::from(vec![
                        Span::styled("Reasoning: ", body_style.add_modifier(Modifier::BOLD)),
                        Span::styled(reasoning.clone(), body_style),
                    ]));
                }
            }
            Card::Evidence { articles } => {
                lines.push(Line::from(vec![
                    Span::styled(card.title(), title_style),
                    Span::styled(format!("  {} found", articles.len()), muted_style),
                ]));
                for article in articles {
                    lines.push(Line::from(Span::styled(
                        format!("• {}", article.title),
                        body_style.add_modifier(Modifier::BOLD),
                    )));
                    if !article.snippet.is_empty() {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", article.snippet),
                            body_style,
                        )));
                    }
                    if !article.link.is_empty() {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", article.link),
                            Style::default()
                                .fg(colors.info.to_color())
                                .add_modifier(Modifier::UNDERLINED),
                        )));
                    }
                }
            }
            Card::Error { message } => {
                let error_style = Style::default().fg(colors.error.to_color());
                lines.push(Line::from(Span::styled(
                    card.title(),
                    error_style.add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    format!("{} {}", ERROR_GLYPH, message),
                    error_style,
                )));
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Render the result cards
fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;
    let lines = result_lines(app);

    let title = if lines.is_empty() {
        " Results "
    } else {
        " Results (PgUp/PgDn to scroll) "
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border.to_color()))
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));

    frame.render_widget(paragraph, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;

    let (state_label, state_color) = if app.widget.is_loading() {
        ("VERIFYING", colors.info.to_color())
    } else if app.widget.prompt().is_some() {
        ("INPUT", colors.warning.to_color())
    } else {
        ("READY", colors.verdict_real.to_color())
    };

    let status_text = app
        .status_message
        .clone()
        .unwrap_or_else(|| format!("Mode: {}", app.mode().display_name()));

    let hint_style = Style::default().fg(colors.text_disabled.to_color());
    let spans = vec![
        Span::styled(
            format!(" {} ", state_label),
            Style::default()
                .bg(state_color)
                .fg(colors.status_bar.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::raw(status_text),
        Span::raw(" | "),
        Span::styled("F1-F4: mode", hint_style),
        Span::raw(" | "),
        Span::styled("Ctrl+C: quit", hint_style),
    ];

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(Block::default());

    frame.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Config;
    use crate::verifier::Verdict;
    use crate::widget::{Event, Outcome};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn settled_app(body: serde_json::Value) -> App {
        let mut app = App::new("demo", &Config::default());
        app.insert_char('x');
        let generation = app.widget.generation() + 1;
        app.submit();
        app.dispatch(Event::Settled {
            generation,
            outcome: Outcome::Verdict(Verdict::from_response(&body)),
        });
        app
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_result_lines_follow_card_order() {
        let app = settled_app(json!({
            "final_verdict": "UNCERTAIN",
            "explanation": "mixed sources",
            "transcribed_text": "hello",
            "text_articles": [{"title": "A", "snippet": "B", "link": "#"}]
        }));
        let lines: Vec<String> = result_lines(&app).iter().map(|l| l.to_string()).collect();

        let position = |needle: &str| lines.iter().position(|l| l.contains(needle)).unwrap();
        assert!(position("Transcribed Text") < position("Final Content Verdict"));
        assert!(position("Final Content Verdict") < position("Related Fact-Checks & Articles"));
        assert!(lines.iter().any(|l| l.contains("• UNCERTAIN")));
        assert!(lines.iter().any(|l| l == "Reasoning: mixed sources"));
    }

    #[test]
    fn test_screen_shows_tabs_and_verdict() {
        let app = settled_app(json!({"final_verdict": "FAKE", "explanation": "x"}));
        let text = screen_text(&app);
        assert!(text.contains("F3 URL"));
        assert!(text.contains("✕ FAKE"));
        assert!(text.contains("Reasoning: x"));
    }

    #[test]
    fn test_screen_shows_spinner_while_loading() {
        let mut app = App::new("demo", &Config::default());
        app.set_mode(Mode::Url);
        for c in "example.com".chars() {
            app.insert_char(c);
        }
        app.submit();
        let text = screen_text(&app);
        assert!(text.contains("Verifying URL..."));
        assert!(result_lines(&app).is_empty());
    }

    #[test]
    fn test_screen_shows_prompt() {
        let mut app = App::new("demo", &Config::default());
        app.set_mode(Mode::Image);
        app.submit();
        let text = screen_text(&app);
        assert!(text.contains("Please provide input for Image!"));
    }

    #[test]
    fn test_screen_with_oversized_input() {
        let mut app = App::new("demo", &Config::default());
        app.dispatch(Event::EditText("a".repeat(70_000)));
        let text = screen_text(&app);
        assert!(text.contains("F1 Text"));

        let mut app = App::new("demo", &Config::default());
        app.dispatch(Event::EditText("\n".repeat(70_000)));
        screen_text(&app);
    }
}
