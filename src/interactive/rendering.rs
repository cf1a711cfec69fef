//! TUI rendering with ratatui
//!
//! Board on the left, puzzle details and the solver line on the right.

use super::app::{App, MessageStyle};
use crate::core::{Bonus, Cell};
use crate::output::formatters::cell_text;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Board
            Constraint::Percentage(50), // Details
        ])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_status(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!("🧩 WORDTILE INSPECTOR - {}", app.current_seed()))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn cell_style(cell: &Cell) -> Style {
    if cell.letter.is_some() {
        return Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
    }
    match cell.bonus {
        Bonus::TripleWord => Style::default().fg(Color::White).bg(Color::Red),
        Bonus::DoubleWord => Style::default().fg(Color::Black).bg(Color::LightMagenta),
        Bonus::TripleLetter => Style::default().fg(Color::White).bg(Color::Blue),
        Bonus::DoubleLetter => Style::default().fg(Color::Black).bg(Color::LightCyan),
        Bonus::Start => Style::default()
            .fg(Color::Black)
            .bg(Color::LightMagenta)
            .add_modifier(Modifier::BOLD),
        Bonus::None if cell.playable => Style::default().fg(Color::DarkGray).bg(Color::Gray),
        Bonus::None => Style::default(),
    }
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let board = app.board_at_step();
    let lines: Vec<Line> = board
        .rows()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .flat_map(|cell| [Span::styled(cell_text(cell), cell_style(cell)), Span::raw(" ")])
                .collect();
            Line::from(spans)
        })
        .collect();

    let title = format!(
        " Board ({}, step {}/{}) ",
        app.puzzle.archetype(),
        app.step,
        app.puzzle.best_line().len()
    );
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Puzzle details
            Constraint::Length(3), // Score gauge
            Constraint::Min(5),    // Solver line
            Constraint::Length(7), // Messages
        ])
        .split(area);

    render_details(f, app, chunks[0]);
    render_score_gauge(f, app, chunks[1]);
    render_line(f, app, chunks[2]);
    render_messages(f, app, chunks[3]);
}

fn render_details(f: &mut Frame, app: &App, area: Rect) {
    let puzzle = &app.puzzle;
    let thresholds = puzzle
        .thresholds()
        .iter()
        .map(|t| format!("{} {}", t.label, t.score))
        .collect::<Vec<_>>()
        .join(" · ");

    let content = vec![
        Line::from(vec![
            Span::raw("Letters:   "),
            Span::styled(
                puzzle.pool().to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Remaining: {}", app.rack_at_step())),
        Line::from(vec![
            Span::raw("Estimate:  "),
            Span::styled(
                puzzle.estimate().to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Tiers:     {thresholds}")),
        Line::from(format!("Origin:    {}", puzzle.origin())),
        Line::from(format!(
            "Cells:     {} playable of {}",
            puzzle.board().playable_count(),
            puzzle.board().size() * puzzle.board().size()
        )),
    ];

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Puzzle ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_score_gauge(f: &mut Frame, app: &App, area: Rect) {
    let score = app.score_at_step();
    let estimate = app.puzzle.estimate();
    let percent = if estimate == 0 {
        0
    } else {
        ((u64::from(score) * 100) / u64::from(estimate)).min(100) as u16
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Score ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(percent)
        .label(format!("{score}/{estimate}"));
    f.render_widget(gauge, area);
}

fn render_line(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .puzzle
        .best_line()
        .iter()
        .enumerate()
        .map(|(i, play)| {
            let style = if i < app.step {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let content = format!(
                "{}: {} {} {:?} +{}",
                play.turn,
                play.word.to_uppercase(),
                play.start,
                play.direction,
                play.score
            );
            ListItem::new(content).style(style)
        })
        .collect();

    let list =
        List::new(items).block(Block::default().title(" Solver Line ").borders(Borders::ALL));
    f.render_widget(list, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let beam = &app.config.beam;
    let beam_text = format!("Beam T={} W={} K={}", beam.turns, beam.width, beam.fan_out);
    let beam_status = Paragraph::new(beam_text).alignment(Alignment::Center);
    f.render_widget(beam_status, chunks[0]);

    let help = Paragraph::new("q: Quit | n/p: Next/Prev seed | →/←: Step line | r: Reset")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);
}
