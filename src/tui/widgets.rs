//! Dashboard widget rendering: context, protocols, episodes, metrics, input.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::api::{HealthResponse, MemoryResponse};

use super::InputMode;

/// Render the full dashboard frame.
pub fn render(
    frame: &mut Frame,
    health: Option<&HealthResponse>,
    memory: Option<&MemoryResponse>,
    status_line: &str,
    input_mode: InputMode,
    input_buffer: &str,
) {
    let [main, bottom] =
        Layout::vertical([Constraint::Min(10), Constraint::Length(3)]).areas(frame.area());
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(main);
    let [context_area, metrics_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Min(4)]).areas(left);
    let [protocols_area, episodes_area] =
        Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(right);

    render_context(frame, context_area, health);
    render_metrics(frame, metrics_area, health);
    render_protocols(frame, protocols_area, health);
    render_episodes(frame, episodes_area, memory);
    render_status(frame, bottom, status_line, input_mode, input_buffer);
}

fn render_context(frame: &mut Frame, area: Rect, health: Option<&HealthResponse>) {
    let lines = match health {
        Some(h) => {
            let mut lines = vec![
                field_line("emotion", &h.context.emotion, Color::Cyan),
                field_line("intent", &h.context.intent, Color::Magenta),
            ];
            if h.context.environment.is_empty() {
                lines.push(field_line("environment", "(empty)", Color::DarkGray));
            } else {
                for (key, value) in &h.context.environment {
                    lines.push(field_line(key, value, Color::Yellow));
                }
            }
            lines.push(field_line(
                "cognition",
                if h.remote_cognition { "remote" } else { "rules" },
                Color::Green,
            ));
            lines
        }
        None => vec![Line::from("waiting for server...")],
    };

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Context "));
    frame.render_widget(widget, area);
}

fn render_metrics(frame: &mut Frame, area: Rect, health: Option<&HealthResponse>) {
    let lines = match health {
        Some(h) => vec![
            field_line("goals completed", &h.metrics.goals_completed.to_string(), Color::White),
            field_line("learning cycles", &h.metrics.learning_cycles.to_string(), Color::White),
            field_line("mutations", &h.metrics.protocol_mutations.to_string(), Color::White),
            field_line("episodes", &h.memory_items.to_string(), Color::White),
            field_line("version", &h.version, Color::DarkGray),
        ],
        None => vec![Line::from("-")],
    };

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Metrics "));
    frame.render_widget(widget, area);
}

fn render_protocols(frame: &mut Frame, area: Rect, health: Option<&HealthResponse>) {
    let rows: Vec<Row> = match health {
        Some(h) => {
            let mut protocols = h.protocols.clone();
            protocols.sort_by(|a, b| {
                b.reward
                    .partial_cmp(&a.reward)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            protocols
                .iter()
                .map(|p| {
                    let tag = if p.reward > 4.0 {
                        Span::styled("hot", Style::default().fg(Color::Red))
                    } else if p.reward >= 2.0 {
                        Span::styled("good", Style::default().fg(Color::Green))
                    } else {
                        Span::styled("low", Style::default().fg(Color::Yellow))
                    };
                    Row::new(vec![
                        Cell::from(p.name.clone()),
                        Cell::from(format!("{:.2}", p.reward)),
                        Cell::from(p.executions.to_string()),
                        Cell::from(tag),
                    ])
                })
                .collect()
        }
        None => Vec::new(),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["name", "reward", "execs", ""])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(" Protocols "));
    frame.render_widget(table, area);
}

fn render_episodes(frame: &mut Frame, area: Rect, memory: Option<&MemoryResponse>) {
    let lines: Vec<Line> = match memory {
        Some(m) => m
            .memory
            .episodic
            .iter()
            .rev()
            .take(area.height.saturating_sub(2) as usize)
            .map(|ep| {
                Line::from(vec![
                    Span::styled(
                        ep.timestamp.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("[{}] ", ep.context.emotion),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(ep.action.clone()),
                ])
            })
            .collect(),
        None => vec![Line::from("no episodes yet")],
    };

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Episodes "));
    frame.render_widget(widget, area);
}

fn render_status(
    frame: &mut Frame,
    area: Rect,
    status_line: &str,
    input_mode: InputMode,
    input_buffer: &str,
) {
    let (title, content) = match input_mode {
        InputMode::Normal => (" Status ", Line::from(status_line.to_string())),
        InputMode::Emotion => (
            " New emotion (Enter to apply, Esc to cancel) ",
            input_line(input_buffer),
        ),
        InputMode::Intent => (
            " New intent (Enter to apply, Esc to cancel) ",
            input_line(input_buffer),
        ),
        InputMode::Goal => (
            " Goal (Enter to execute, Esc to cancel) ",
            input_line(input_buffer),
        ),
    };

    let widget =
        Paragraph::new(content).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(widget, area);
}

fn input_line(buffer: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("> "),
        Span::styled(buffer.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled("█", Style::default().fg(Color::DarkGray)),
    ])
}

fn field_line(key: &str, value: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{key}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), Style::default().fg(color)),
    ])
}
