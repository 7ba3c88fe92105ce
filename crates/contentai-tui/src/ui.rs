use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{
        block::{Position, Title},
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
};
use contentai_core::{Accent, ContentType};
use crate::app::{App, Focus, InputMode, TILE_COLUMNS};

const PLACEHOLDER: &str = "Describe what you want to create... (e.g., 'Write a blog post about sustainable living' or 'Create a tweet about morning productivity tips')";

const TILE_HEIGHT: u16 = 5;

fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Blue => Color::Blue,
        Accent::Green => Color::Green,
        Accent::Purple => Color::Magenta,
        Accent::Orange => Color::LightRed,
        Accent::Yellow => Color::Yellow,
    }
}

/// Parse a line of text and convert **bold** markdown to styled spans
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after_open = &rest[start + 2..];
        let Some(len) = after_open.find("**") else {
            break;
        };
        if len == 0 {
            // "****" has nothing to embolden
            spans.push(Span::raw(rest[..start + 4].to_string()));
            rest = &rest[start + 4..];
            continue;
        }

        if start > 0 {
            spans.push(Span::raw(rest[..start].to_string()));
        }
        spans.push(Span::styled(
            after_open[..len].to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        rest = &after_open[len + 2..];
    }

    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }

    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

/// Markdown lines of the generated text, wrapped the way the output panel draws them
fn output_paragraph(generated: &str) -> Paragraph<'static> {
    let lines: Vec<Line> = generated.lines().map(parse_markdown_line).collect();
    Paragraph::new(Text::from(lines))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false })
}

/// Rows the paragraph occupies at `width`, counted by the same word wrapper that renders it
fn wrapped_line_count(paragraph: &Paragraph, width: u16) -> u16 {
    paragraph.line_count(width).min(u16::MAX as usize) as u16
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let prompt_lines = app.session.prompt_text.lines().count().clamp(1, 6) as u16;
    let prompt_height = (prompt_lines + 2).max(4);
    let tile_rows = ContentType::ALL.len().div_ceil(TILE_COLUMNS) as u16;
    let error_height = if app.session.error_message().is_some() { 3 } else { 0 };

    let [header_area, prompt_area, label_area, tiles_area, error_area, output_area, footer_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(prompt_height),
            Constraint::Length(1),
            Constraint::Length(tile_rows * TILE_HEIGHT),
            Constraint::Length(error_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

    render_header(app, frame, header_area);
    render_prompt(app, frame, prompt_area);

    let label = Paragraph::new("Or choose a content type")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    frame.render_widget(label, label_area);

    render_tiles(app, frame, tiles_area);

    if let Some(error) = app.session.error_message() {
        let banner = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(banner, error_area);
    }

    render_output(app, frame, output_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" ContentAI ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            "Generate beautiful content with the power of AI ",
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Black),
        ),
        Span::styled(format!("→ {}", app.api_base_url), Style::default().fg(Color::Black)),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_prompt(app: &mut App, frame: &mut Frame, area: Rect) {
    app.prompt_area = Some(area);

    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing {
        Color::Yellow
    } else if app.focus == Focus::Prompt {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let title = if app.is_loading() {
        format!(" Prompt {} Generating... ", app.spinner())
    } else {
        " Prompt ".to_string()
    };

    // Submit affordance is disabled while loading or with nothing to send
    let can_submit = !app.is_loading() && !app.session.prompt_text.trim().is_empty();
    let submit_style = if can_submit {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title)
        .title(
            Title::from(Span::styled(" Enter ➤ generate ", submit_style))
                .alignment(Alignment::Right)
                .position(Position::Bottom),
        );

    let inner = block.inner(area);

    if app.session.prompt_text.is_empty() {
        let placeholder = Paragraph::new(PLACEHOLDER)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(placeholder, area);

        if editing {
            frame.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    // Keep the cursor visible by scrolling both ways
    let (line, column) = app.prompt_cursor_position();
    let v_scroll = line.saturating_sub(inner.height.saturating_sub(1) as usize);
    let h_scroll = column.saturating_sub(inner.width.saturating_sub(1) as usize);

    let prompt = Paragraph::new(app.session.prompt_text.as_str())
        .style(Style::default().fg(Color::Cyan))
        .scroll((
            v_scroll.min(u16::MAX as usize) as u16,
            h_scroll.min(u16::MAX as usize) as u16,
        ))
        .block(block);
    frame.render_widget(prompt, area);

    if editing {
        frame.set_cursor_position((
            inner.x + (column - h_scroll) as u16,
            inner.y + (line - v_scroll).min(inner.height.saturating_sub(1) as usize) as u16,
        ));
    }
}

fn render_tiles(app: &mut App, frame: &mut Frame, area: Rect) {
    let rows = Layout::vertical(
        (0..ContentType::ALL.len().div_ceil(TILE_COLUMNS)).map(|_| Constraint::Length(TILE_HEIGHT)),
    )
    .split(area);

    app.tile_areas.clear();

    for (row_idx, row_area) in rows.iter().enumerate() {
        let cells = Layout::horizontal(
            (0..TILE_COLUMNS).map(|_| Constraint::Ratio(1, TILE_COLUMNS as u32)),
        )
        .split(*row_area);

        for (col_idx, cell) in cells.iter().enumerate() {
            let idx = row_idx * TILE_COLUMNS + col_idx;
            if let Some(content_type) = ContentType::ALL.get(idx) {
                app.tile_areas.push(*cell);
                render_tile(app, frame, *cell, *content_type);
            }
        }
    }
}

fn render_tile(app: &App, frame: &mut Frame, area: Rect, content_type: ContentType) {
    let color = accent_color(content_type.accent());
    let number = content_type.index() + 1;
    let highlighted = app.focus == Focus::Tiles && app.tile_cursor == content_type.index();
    let generating = app.is_loading() && app.session.selected_type() == Some(content_type);

    let border_style = if highlighted {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let footer = if generating {
        Span::styled(
            format!("{} Generating...", app.spinner()),
            Style::default().fg(color).add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled("● Click to generate", Style::default().fg(Color::DarkGray))
    };

    let mut text = Text::from(vec![
        Line::from(vec![
            Span::styled(format!("{} ", number), Style::default().fg(Color::DarkGray)),
            Span::styled(content_type.title(), Style::default().fg(color).bold()),
        ]),
        Line::from(Span::styled(content_type.description(), Style::default().fg(Color::Gray))),
        Line::from(footer),
    ]);

    // Triggers are disabled while a request is in flight
    if app.is_loading() && !generating {
        text = text.patch_style(Style::default().add_modifier(Modifier::DIM));
    }

    let tile = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );

    frame.render_widget(tile, area);
}

fn render_output(app: &mut App, frame: &mut Frame, area: Rect) {
    app.output_area = Some(area);

    // Empty content hides the panel like no content at all
    let Some(generated) = app.session.generated_text().filter(|text| !text.is_empty()) else {
        app.output_lines = 0;
        app.output_height = 0;
        return;
    };
    if area.height < 3 {
        return;
    }

    let focused = app.focus == Focus::Output;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(" Generated Content ", Style::default().bold()))
        .title(
            Title::from(Span::styled(
                format!(" {} ", app.session.badge_title()),
                Style::default().fg(Color::Black).bg(Color::Gray),
            ))
            .alignment(Alignment::Right),
        )
        .title(
            Title::from(Span::styled(" c: Copy to Clipboard ", Style::default().fg(Color::Cyan)))
                .position(Position::Bottom),
        );

    let inner = block.inner(area);
    let paragraph = output_paragraph(generated);
    app.output_height = inner.height;
    app.output_lines = wrapped_line_count(&paragraph, inner.width);
    app.output_scroll = app.output_scroll.min(app.max_output_scroll());

    let output = paragraph.scroll((app.output_scroll, 0)).block(block);

    frame.render_widget(output, area);

    if app.output_lines > app.output_height {
        let mut scrollbar_state = ScrollbarState::new(app.output_lines as usize)
            .position(app.output_scroll as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };
    let mode_text = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Editing => " EDIT ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut spans = vec![Span::styled(mode_text, mode_style)];

    let hints: &[(&str, &str)] = match (app.input_mode, app.focus) {
        (InputMode::Editing, _) => &[
            (" Enter ", " generate "),
            (" Alt+Enter ", " newline "),
            (" Ctrl+U ", " clear "),
            (" Tab ", " tiles "),
            (" Esc ", " done "),
        ],
        (InputMode::Normal, Focus::Tiles) => &[
            (" h/j/k/l ", " move "),
            (" Enter ", " generate "),
            (" 1-6 ", " type "),
            (" Tab ", " focus "),
            (" q ", " quit "),
        ],
        (InputMode::Normal, Focus::Output) => &[
            (" j/k ", " scroll "),
            (" c ", " copy "),
            (" 1-6 ", " type "),
            (" Tab ", " focus "),
            (" q ", " quit "),
        ],
        (InputMode::Normal, Focus::Prompt) => &[
            (" i ", " edit "),
            (" 1-6 ", " type "),
            (" Tab ", " focus "),
            (" q ", " quit "),
        ],
    };

    for (key, label) in hints {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(*label, label_style));
    }

    if let Some(status) = &app.status_message {
        spans.push(Span::styled(format!(" {} ", status), Style::default().fg(Color::Green)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
