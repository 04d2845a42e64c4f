//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module is responsible
//! for drawing the UI based on AppState, but never modifies state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use super::state::{AppState, InteractionMode, TONE_PRESETS, Toast};
use crate::compose::describe_creativity;
use crate::form::FieldId;

/// UI colors (k9s-inspired)
mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const LABEL: Color = Color::Rgb(100, 149, 237); // Cornflower blue
    pub const FILLED: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const SLIDER: Color = Color::Rgb(255, 215, 0); // Gold
    pub const PILL: Color = Color::Rgb(255, 215, 0); // Gold
    pub const TOAST: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const FAILED: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const DIM: Color = Color::DarkGray;
}

/// Main render function
pub fn render(state: &mut AppState, frame: &mut Frame) {
    trace!(?state.interaction_mode, "render: called");
    // Create main layout: header, content, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    // Render header (title + form metrics)
    render_header(state, frame, chunks[0]);

    // Form on the left, live preview on the right
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(chunks[1]);

    render_form_panel(state, frame, content[0]);
    render_preview_panel(state, frame, content[1]);

    // Render footer (edit line or context-sensitive keybinds)
    render_footer(state, frame, chunks[2]);

    // Render overlays
    match &state.interaction_mode {
        InteractionMode::TemplatePicker => render_template_picker(state, frame, frame.area()),
        InteractionMode::Help => render_help_overlay(frame, frame.area()),
        _ => {}
    }

    if let Some(toast) = &state.toast {
        render_toast(toast, frame, frame.area());
    }
}

/// Render header with title and form metrics
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let left_spans = vec![
        Span::raw(" "),
        Span::styled("●", Style::default().fg(colors::FILLED)),
        Span::styled(
            " Prompt Builder",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
    ];

    // Right side: fill progress and word count
    let text_fields = FieldId::ALL.len() - 1;
    let right_text = format!(
        "{}/{} fields │ {} words ",
        state.form.filled_count(),
        text_fields,
        state.composed.word_count
    );

    // Calculate padding for right-justification
    // Inner width = area width - 2 (borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let padding = inner_width.saturating_sub(left_width + right_text.chars().count());

    let mut spans = left_spans;
    if padding > 0 {
        spans.push(Span::raw(" ".repeat(padding)));
    }
    spans.push(Span::styled(right_text, Style::default().fg(colors::DIM)));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Render the field list with the creativity slider and tone presets
fn render_form_panel(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_form_panel: called");
    let selected_idx = state.field_selection.selected_index;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Fields ")
        .border_style(Style::default().fg(colors::HEADER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Label column is 13 wide, leave a margin for the ellipsis
    let value_width = inner.width.saturating_sub(16) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in FieldId::ALL.iter().enumerate() {
        let row_style = if i == selected_idx {
            Style::default().bg(colors::SELECTED_BG)
        } else {
            Style::default()
        };
        let label_style = if i == selected_idx {
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::LABEL)
        };

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(format!("{:<12}", field.label()), label_style),
        ];

        let value = state.form.get(*field);
        if field.is_slider() {
            spans.push(slider_span(value));
        } else if value.trim().is_empty() {
            spans.push(Span::styled("·", Style::default().fg(colors::DIM)));
        } else {
            spans.push(Span::raw(field_preview(value, value_width)));
        }

        lines.push(Line::from(spans).style(row_style));

        // The qualitative description sits under the slider
        if field.is_slider() {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(13)),
                Span::styled(
                    describe_creativity(value).to_string(),
                    Style::default().fg(colors::SLIDER),
                ),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(tone_pills_line(state));

    let form = Paragraph::new(lines);
    frame.render_widget(form, inner);
}

/// Single-line preview of a field value
fn field_preview(value: &str, max_len: usize) -> String {
    trace!(value_len = value.len(), max_len, "field_preview: called");
    let first = value.lines().next().unwrap_or("");
    let mut preview = truncate_str(first, max_len).to_string();
    if preview.len() < value.len() {
        preview.push('…');
    }
    preview
}

/// Render the creativity slider as a bar
fn slider_span(value: &str) -> Span<'static> {
    trace!(%value, "slider_span: called");
    let level = value.trim().parse::<f64>().unwrap_or(0.0).round().clamp(0.0, 10.0) as usize;
    let bar: String = "█".repeat(level) + &"░".repeat(10 - level);
    Span::styled(
        format!("{} {:>2}/10", bar, level),
        Style::default().fg(colors::SLIDER),
    )
}

/// Tone preset pills, numbered for quick selection
fn tone_pills_line(state: &AppState) -> Line<'static> {
    trace!("tone_pills_line: called");
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(format!("{:<12}", "Tone preset"), Style::default().fg(colors::DIM)),
    ];
    for (i, (name, _)) in TONE_PRESETS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if state.active_tone == Some(i) {
            Style::default()
                .fg(Color::Black)
                .bg(colors::PILL)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::KEYBIND)
        };
        spans.push(Span::styled(format!("[{}]{}", i + 1, name), style));
    }
    Line::from(spans)
}

/// Render the composed prompt and its rationale
fn render_preview_panel(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_preview_panel: called");
    let rationale_height = state.composed.rationale.len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(rationale_height)])
        .split(area);

    let title = format!(" Prompt · {} words ", state.composed.word_count);
    let prompt = Paragraph::new(state.composed.text.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(colors::HEADER)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(prompt, chunks[0]);

    let bullets: Vec<Line> = state
        .composed
        .rationale
        .iter()
        .map(|reason| {
            Line::from(vec![
                Span::styled(" • ", Style::default().fg(colors::FILLED)),
                Span::raw(reason.as_str()),
            ])
        })
        .collect();

    let why = Paragraph::new(bullets)
        .block(Block::default().borders(Borders::ALL).title(" Why this helps "))
        .wrap(Wrap { trim: true });
    frame.render_widget(why, chunks[1]);
}

/// Render footer with the edit line, an error, or keybinds
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!(?state.interaction_mode, "render_footer: called");
    if state.interaction_mode.is_editing() {
        let field = state.focused_field();
        let hint = if field.is_slider() {
            "  (←/→ or 0-9 to adjust, Enter to finish)"
        } else {
            "  (Enter to finish, Alt+Enter for newline)"
        };
        let tail_width = area.width.saturating_sub(20) as usize;
        let content = Line::from(vec![
            Span::styled(
                format!(" {}: ", field.label()),
                Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
            ),
            Span::raw(edit_tail(state.form.get(field), tail_width).to_string()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::styled(hint, Style::default().fg(colors::DIM)),
        ]);
        let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
        return;
    }

    if let Some(ref error) = state.error_message {
        let footer = Paragraph::new(Line::from(Span::styled(
            format!(" Error: {}", error),
            Style::default().fg(colors::FAILED),
        )))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
        return;
    }

    // Left side: field-specific keybinds
    let keybinds = if state.focused_field().is_slider() {
        vec![("[←/→]", "Adjust"), ("[t]", "Templates"), ("[c]", "Copy"), ("[r]", "Reset")]
    } else {
        vec![
            ("[Enter]", "Edit"),
            ("[t]", "Templates"),
            ("[c]", "Copy"),
            ("[r]", "Reset"),
            ("[1-4]", "Tone"),
        ]
    };

    let mut left_spans = vec![Span::raw(" ")];
    for (key, action) in keybinds {
        left_spans.push(Span::styled(
            key,
            Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
        ));
        left_spans.push(Span::raw(format!(" {} ", action)));
    }

    // Right side: Help, Quit
    let right_line = Line::from(vec![
        Span::styled("[?]", Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)),
        Span::raw(" Help "),
        Span::styled("[q]", Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)),
        Span::raw(" Quit "),
    ]);

    let footer_block = Block::default().borders(Borders::ALL);
    let inner = footer_block.inner(area);
    frame.render_widget(footer_block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_line.width() as u16)])
        .split(inner);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);
    frame.render_widget(Paragraph::new(right_line), chunks[1]);
}

/// Last line of the value, truncated from the left so the cursor stays visible
fn edit_tail(value: &str, max_len: usize) -> &str {
    trace!(value_len = value.len(), max_len, "edit_tail: called");
    let line = value.rsplit('\n').next().unwrap_or(value);
    if line.len() <= max_len {
        return line;
    }
    let mut start = line.len() - max_len;
    while start < line.len() && !line.is_char_boundary(start) {
        start += 1;
    }
    &line[start..]
}

/// Render the template picker overlay
fn render_template_picker(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_template_picker: called");
    let popup_area = centered_rect(40, 50, area);
    frame.render_widget(Clear, popup_area);

    let selected_idx = state.template_selection.selected_index;
    let lines: Vec<Line> = state
        .template_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let style = if i == selected_idx {
                Style::default().bg(colors::SELECTED_BG).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(format!(" {} ", name)).style(style)
        })
        .collect();

    let picker = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Templates (Enter to apply, Esc to cancel) ")
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(picker, popup_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(colors::HEADER),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Global",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key_line("?", "Toggle help"),
        key_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Fields",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key_line("j/↓", "Next field"),
        key_line("k/↑", "Previous field"),
        key_line("g / G", "First / last field"),
        key_line("Enter", "Edit the focused field"),
        key_line("Alt+Enter", "Insert a newline while editing"),
        key_line("←/→", "Adjust creativity (when focused)"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Prompt",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key_line("1-4", "Apply a tone preset"),
        key_line("t", "Pick a template"),
        key_line("c", "Copy the prompt to the clipboard"),
        key_line("r", "Reset the form"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (? to close) ")
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

/// Helper to create a key binding line
fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<12}", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

/// Render the transient toast above the footer
fn render_toast(toast: &Toast, frame: &mut Frame, area: Rect) {
    trace!("render_toast: called");
    if area.height < 6 || area.width < 12 {
        return;
    }

    let width = (toast.message.chars().count() as u16 + 4).min(area.width.saturating_sub(2));
    let toast_area = Rect {
        x: area.width.saturating_sub(width + 1),
        y: area.height.saturating_sub(5),
        width,
        height: 3,
    };
    frame.render_widget(Clear, toast_area);

    let widget = Paragraph::new(toast.message.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::TOAST)),
        );

    frame.render_widget(widget, toast_area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    trace!(percent_x, percent_y, "centered_rect: called");
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Truncate a string for display, respecting char boundaries
fn truncate_str(s: &str, max_len: usize) -> &str {
    trace!(s_len = s.len(), max_len, "truncate_str: called");
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
