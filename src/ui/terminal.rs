//! Terminal front end for the layering screen
//!
//! Draws with ratatui and reads keys with crossterm. Popups are drawn over
//! the last screen frame so the lists stay visible behind them.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::layering::{render_layering, LayeringUi, LayeringView, PaneSizes};
use super::input::{Action, KeyBindings};
use super::layout::centered_rect;

pub struct TerminalUi<B: Backend> {
    terminal: Terminal<B>,
    keys: KeyBindings,
    /// Last full frame, repainted under popups
    background: Option<Buffer>,
}

impl<B: Backend> TerminalUi<B> {
    pub fn new(terminal: Terminal<B>, keys: KeyBindings) -> Self {
        Self {
            terminal,
            keys,
            background: None,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Next key press, ignoring releases and non-key events
    fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }

    fn draw_overlay(&mut self, overlay: impl FnOnce(&mut Frame)) -> Result<()> {
        let background = self.background.as_ref();
        self.terminal.draw(|frame| {
            if let Some(bg) = background.filter(|bg| bg.area == frame.area()) {
                frame.buffer_mut().merge(bg);
            }
            overlay(frame);
        })?;
        Ok(())
    }
}

impl<B: Backend> LayeringUi for TerminalUi<B> {
    fn keybindings(&self) -> &KeyBindings {
        &self.keys
    }

    fn draw(&mut self, view: &LayeringView) -> Result<PaneSizes> {
        let mut sizes = PaneSizes::default();
        let keys = &self.keys;
        let completed = self.terminal.draw(|frame| {
            sizes = render_layering(frame, view, keys);
        })?;
        self.background = Some(completed.buffer.clone());
        Ok(sizes)
    }

    fn next_action(&mut self) -> Result<Action> {
        loop {
            let key = self.read_key()?;
            match self.keys.action_for(&key) {
                Some(action) => return Ok(action),
                None => log::trace!("Unbound key {:?}", key.code),
            }
        }
    }

    fn query_yn(&mut self, message: &str) -> Result<bool> {
        self.draw_overlay(|frame| render_message(frame, " Confirm ", message, "[y] Yes  [n] No"))?;
        loop {
            match self.read_key()?.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }

    fn popup(&mut self, message: &str) -> Result<()> {
        self.draw_overlay(|frame| render_message(frame, "", message, "Press any key"))?;
        self.read_key()?;
        Ok(())
    }

    fn choose_item(&mut self, title: &str, names: &[String]) -> Result<Option<usize>> {
        if names.is_empty() {
            return Ok(None);
        }
        let mut cursor = 0;
        loop {
            self.draw_overlay(|frame| render_choice(frame, title, names, cursor))?;
            let key = self.read_key()?;
            match (key.code, self.keys.action_for(&key)) {
                (KeyCode::Enter, _) => return Ok(Some(cursor)),
                (KeyCode::Esc, _) | (_, Some(Action::Quit)) => return Ok(None),
                (_, Some(Action::Up)) => cursor = (cursor + names.len() - 1) % names.len(),
                (_, Some(Action::Down)) => cursor = (cursor + 1) % names.len(),
                _ => {}
            }
        }
    }
}

/// Message box with a key hint along the bottom
pub fn render_message(frame: &mut Frame, title: &str, message: &str, hint: &str) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = message
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::White))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(hint.to_string(), Style::default().fg(Color::DarkGray))));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Scrolling item picker with `cursor` highlighted
pub fn render_choice(frame: &mut Frame, title: &str, names: &[String], cursor: usize) {
    let area = centered_rect(50, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = (inner.height as usize).saturating_sub(2).max(1);
    let offset = cursor.saturating_sub(rows - 1);

    let mut lines: Vec<Line> = names
        .iter()
        .enumerate()
        .skip(offset)
        .take(rows)
        .map(|(i, name)| {
            if i == cursor {
                Line::from(vec![
                    Span::styled("► ", Style::default().fg(Color::Yellow)),
                    Span::styled(name.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                ])
            } else {
                Line::from(Span::styled(format!("  {name}"), Style::default().fg(Color::Gray)))
            }
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[↑↓] Select  [Enter] Wear  [Esc] Cancel",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}
