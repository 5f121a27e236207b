//! Rendering logic for each widget

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::app::{FlashPhase, Focus};
use crate::ui::results::ResultsList;
use crate::ui::theme::DEFAULT_THEME;

/// Border style for a form field: the error flash overrides focus.
fn field_border_style(phase: FlashPhase, is_focused: bool) -> Style {
    match phase {
        FlashPhase::Attack => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        FlashPhase::Hold => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
        FlashPhase::Sustain => Style::default().fg(DEFAULT_THEME.error),
        FlashPhase::Idle => {
            if is_focused {
                Style::default()
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.border_normal)
            }
        }
    }
}

fn pane_border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Render the pack selector field
pub fn render_pack_selector(
    frame: &mut Frame,
    area: Rect,
    selected_title: Option<&str>,
    pack_count: usize,
    selected_index: usize,
    is_focused: bool,
    phase: FlashPhase,
) {
    let block = Block::default()
        .title(" Pack ")
        .borders(Borders::ALL)
        .border_style(field_border_style(phase, is_focused));

    let line = match selected_title {
        Some(title) => Line::from(vec![
            Span::styled(title.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            Span::styled(
                format!("  ({}/{})", selected_index, pack_count),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ]),
        None => Line::from(Span::styled(
            if pack_count == 0 {
                "(no packs loaded)".to_string()
            } else {
                format!("(choose a pack, {} available)", pack_count)
            },
            Style::default().fg(DEFAULT_THEME.comment),
        )),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the expression input field
pub fn render_expression_field(
    frame: &mut Frame,
    area: Rect,
    input: &str,
    cursor: usize,
    is_focused: bool,
    phase: FlashPhase,
) {
    let block = Block::default()
        .title(" Expression ")
        .borders(Borders::ALL)
        .border_style(field_border_style(phase, is_focused));

    // Horizontal scroll keeps the cursor visible in a single-line field.
    let width = area.width.saturating_sub(2).max(1) as usize;
    let start = if cursor >= width { cursor - width + 1 } else { 0 };
    let visible: String = input.chars().skip(start).take(width).collect();

    let line = if visible.is_empty() && !is_focused {
        Line::from(Span::styled(
            "(type an expression)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))
    } else {
        Line::from(Span::styled(
            visible,
            Style::default().fg(DEFAULT_THEME.fg),
        ))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);

    if is_focused {
        frame.set_cursor(area.x + 1 + (cursor - start) as u16, area.y + 1);
    }
}

/// Render the results pane: a fixed header line plus one collapsible entry
/// per outcome, newest first.
pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    results: &ResultsList,
    selected_row: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Results ")
        .borders(Borders::ALL)
        .border_style(pane_border_style(is_focused));

    // Flatten the list into lines; remember where the selected row starts
    // so scrolling can keep it visible.
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        results.header().to_string(),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    )));

    let mut selected_line = 0usize;
    for (i, row) in results.rows().iter().enumerate() {
        if i == selected_row {
            selected_line = lines.len();
        }
        let highlight = is_focused && i == selected_row;
        let base = if highlight {
            Style::default().bg(DEFAULT_THEME.selection_bg)
        } else {
            Style::default()
        };

        let marker = if row.expanded { "▾ " } else { "▸ " };
        let header_fg = if row.badge {
            DEFAULT_THEME.error
        } else {
            DEFAULT_THEME.fg
        };
        let mut spans = vec![
            Span::styled(marker, base.fg(DEFAULT_THEME.comment)),
            Span::styled(row.header.clone(), base.fg(header_fg)),
        ];
        if row.badge {
            spans.push(Span::styled(" ", base));
            spans.push(Span::styled(
                " Error ",
                Style::default()
                    .bg(DEFAULT_THEME.badge_bg)
                    .fg(DEFAULT_THEME.badge_fg)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));

        if row.expanded {
            lines.push(Line::from(Span::styled(
                format!("    {}", row.expression),
                base.fg(DEFAULT_THEME.comment),
            )));
        }
    }

    if results.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no results yet)",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    }

    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the selected row in view, then clamp like any scrolled pane.
    if selected_line < *scroll_offset {
        *scroll_offset = selected_line;
    } else if selected_line >= *scroll_offset + visible_height {
        *scroll_offset = selected_line + 1 - visible_height;
    }
    if total_lines > visible_height {
        let max_scroll = total_lines - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}

/// Render the status bar at the bottom
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    in_flight: usize,
    focus: Focus,
) {
    let layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            ratatui::layout::Constraint::Percentage(45),
            ratatui::layout::Constraint::Percentage(55),
        ])
        .split(area);

    // Left side: pending count and status message
    let pending_style = if in_flight > 0 {
        Style::default()
            .bg(DEFAULT_THEME.secondary)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(DEFAULT_THEME.primary)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    };
    let left_spans = vec![
        Span::styled(format!(" {} pending ", in_flight), pending_style),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];
    let left = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left, layout[0]);

    // Right side: keybinds for the focused widget
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.fg);

    let mut right_spans = vec![
        Span::styled(" ⇥ ", key_style),
        Span::styled(" focus ", desc_style),
    ];
    match focus {
        Focus::Selector => {
            right_spans.extend([
                Span::styled(" ↑/↓ ", key_style),
                Span::styled(" pick ", desc_style),
                Span::styled(" ↵ ", key_style),
                Span::styled(" submit ", desc_style),
            ]);
        }
        Focus::Expression => {
            right_spans.extend([
                Span::styled(" ↵ ", key_style),
                Span::styled(" submit ", desc_style),
            ]);
        }
        Focus::Results => {
            right_spans.extend([
                Span::styled(" ↵ ", key_style),
                Span::styled(" expand ", desc_style),
                Span::styled(" c ", key_style),
                Span::styled(" clear ", desc_style),
            ]);
        }
    }
    right_spans.extend([
        Span::styled(" r ", key_style),
        Span::styled(" reload ", desc_style),
        Span::styled(" q ", key_style),
        Span::styled(" quit ", desc_style),
    ]);

    let right = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right, layout[1]);
}

/// Render a transient toast over the bottom-right corner of `area`.
pub fn render_toast(frame: &mut Frame, area: Rect, message: &str) {
    let width = (message.chars().count() as u16 + 4)
        .min(area.width.saturating_sub(2))
        .max(8);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + area.height.saturating_sub(4),
        width,
        height: 3,
    };

    let toast = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(DEFAULT_THEME.toast_fg),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DEFAULT_THEME.secondary))
            .style(Style::default().bg(DEFAULT_THEME.toast_bg)),
    );

    frame.render_widget(Clear, rect);
    frame.render_widget(toast, rect);
}
