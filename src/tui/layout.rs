use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::config::{ColorConfig, Config, KeybindingConfig};
use crate::domain::InputField;
use crate::tui::app::TuiApp;
use crate::viewer::{ScreenState, ViewState};

pub fn render(frame: &mut Frame, app: &TuiApp, config: &Config, now: Instant) {
    let state = app.viewer.state();
    let colors = &config.colors;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(8),    // Verse card
            Constraint::Length(3), // Reciter + audio
            Constraint::Length(3), // Inputs
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title(frame, chunks[0], colors);
    render_verse_card(frame, &state, chunks[1], colors, &config.keybindings);
    render_reciter(frame, app, &state, chunks[2], colors);
    render_inputs(frame, app, &state, chunks[3], colors);
    render_status_bar(frame, app, &state, chunks[4], colors, now);
}

fn render_title(frame: &mut Frame, area: Rect, colors: &ColorConfig) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Hifz",
        Style::default()
            .fg(colors.focused_border)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_verse_card(
    frame: &mut Frame,
    state: &ViewState,
    area: Rect,
    colors: &ColorConfig,
    keybindings: &KeybindingConfig,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let (title, content, alignment) = match &state.screen {
        ScreenState::Idle | ScreenState::Loading => (
            " Ayah ".to_string(),
            Text::from("Loading..."),
            Alignment::Center,
        ),
        ScreenState::Error(message) => (
            " Error ".to_string(),
            Text::from(vec![
                Line::from(Span::styled(
                    message.clone(),
                    Style::default()
                        .fg(colors.error_text)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(retry_hint(keybindings)),
            ]),
            Alignment::Center,
        ),
        ScreenState::Loaded(verse) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    verse.text_uthmani.clone(),
                    Style::default().fg(colors.arabic_text),
                ))
                .alignment(Alignment::Right),
                Line::from(""),
            ];
            for line in verse.clean_translation().lines() {
                lines.push(Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(colors.translation_text),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Verse: {}", verse.verse_key),
                Style::default().fg(colors.verse_key),
            )));

            (
                format!(" Quran {} ", verse.verse_key),
                Text::from(lines),
                Alignment::Left,
            )
        }
    };

    let paragraph = Paragraph::new(content)
        .block(block.title(title))
        .alignment(alignment)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Names the first configured new-ayah key.
fn retry_hint(keybindings: &KeybindingConfig) -> String {
    match keybindings.new_verse.first() {
        Some(key) => format!("Press {} for another ayah", key),
        None => "Choose another ayah".to_string(),
    }
}

fn render_reciter(
    frame: &mut Frame,
    app: &TuiApp,
    state: &ViewState,
    area: Rect,
    colors: &ColorConfig,
) {
    let reciter = app.selected_reciter();
    let mut spans = vec![
        Span::raw("< "),
        Span::styled(
            reciter.display_name(),
            Style::default()
                .fg(colors.reciter)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" >"),
    ];

    // Audio control only when a URL was resolved for this verse and reciter
    if state.audio_url().is_some() {
        spans.push(Span::styled(
            "   ▶ p: play",
            Style::default().fg(colors.reciter),
        ));
    }

    let block = Block::default()
        .title(" Reciter ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_inputs(
    frame: &mut Frame,
    app: &TuiApp,
    state: &ViewState,
    area: Rect,
    colors: &ColorConfig,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let fields = [
        (InputField::Chapter, " Chapter رقم السورة (1-114) "),
        (InputField::Verse, " Ayah رقم الآية "),
    ];

    for ((field, title), chunk) in fields.into_iter().zip(chunks.iter()) {
        let focused = app.focus == field;
        let border_style = if focused {
            Style::default().fg(colors.focused_border)
        } else {
            Style::default().fg(colors.border)
        };

        let value = state.selection.field(field);
        let text = if focused {
            format!("{}_", value)
        } else {
            value.to_string()
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        frame.render_widget(Paragraph::new(text).block(block), *chunk);
    }
}

fn render_status_bar(
    frame: &mut Frame,
    app: &TuiApp,
    state: &ViewState,
    area: Rect,
    colors: &ColorConfig,
    now: Instant,
) {
    let mut style = Style::default().fg(colors.status_fg).bg(colors.status_bg);

    let status = if app.copy_indicator.is_visible(now) {
        style = style.fg(colors.copied).add_modifier(Modifier::BOLD);
        "Copied!".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if state.is_loading() {
        "Fetching ayah...".to_string()
    } else {
        "0-9:Input  Tab:Field  Enter:Go  n:New Ayah  r/R:Reciter  p:Play  c:Copy  w:WhatsApp  x:X  q:Quit"
            .to_string()
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}
