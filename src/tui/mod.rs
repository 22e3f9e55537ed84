//! Terminal dashboard over a running aeon server.
//!
//! Polls the REST API and renders context, protocol learning state, recent
//! episodes, and activity metrics. Key commands trigger agent runs, goal
//! execution, learning passes, and context edits.

pub mod widgets;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use miette::IntoDiagnostic;

use crate::api::{HealthResponse, MemoryResponse};
use crate::client::ApiClient;
use crate::context::ContextUpdate;

/// How often the dashboard refreshes server state.
const REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// What the input line is currently capturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// No capture; keys are commands.
    Normal,
    /// Typing a new emotion value.
    Emotion,
    /// Typing a new intent value.
    Intent,
    /// Typing a goal to execute.
    Goal,
}

/// Dashboard application state.
pub struct Dashboard {
    client: ApiClient,
    health: Option<HealthResponse>,
    memory: Option<MemoryResponse>,
    status_line: String,
    input_mode: InputMode,
    input_buffer: String,
    last_refresh: Option<Instant>,
    should_quit: bool,
}

impl Dashboard {
    /// Create a dashboard talking to the given API base URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: ApiClient::new(api_url),
            health: None,
            memory: None,
            status_line: "r: run  g: goal  l: learn  e: emotion  i: intent  q: quit".to_string(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            last_refresh: None,
            should_quit: false,
        }
    }

    /// Run the dashboard event loop until quit.
    pub fn run(&mut self) -> miette::Result<()> {
        let mut terminal = ratatui::init();
        self.refresh();

        let result = loop {
            if let Err(e) = terminal.draw(|frame| {
                widgets::render(
                    frame,
                    self.health.as_ref(),
                    self.memory.as_ref(),
                    &self.status_line,
                    self.input_mode,
                    &self.input_buffer,
                )
            }) {
                break Err(e).into_diagnostic();
            }

            if self.should_quit {
                break Ok(());
            }

            match event::poll(Duration::from_millis(200)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e).into_diagnostic(),
                },
                Ok(false) => {}
                Err(e) => break Err(e).into_diagnostic(),
            }

            if self
                .last_refresh
                .is_none_or(|t| t.elapsed() >= REFRESH_INTERVAL)
            {
                self.refresh();
            }
        };

        ratatui::restore();
        result
    }

    fn handle_key(&mut self, code: KeyCode) {
        match self.input_mode {
            InputMode::Normal => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('r') => self.run_agent(),
                KeyCode::Char('l') => self.run_learning(),
                KeyCode::Char('e') => self.enter_input(InputMode::Emotion),
                KeyCode::Char('i') => self.enter_input(InputMode::Intent),
                KeyCode::Char('g') => self.enter_input(InputMode::Goal),
                _ => {}
            },
            _ => match code {
                KeyCode::Esc => {
                    self.input_mode = InputMode::Normal;
                    self.input_buffer.clear();
                }
                KeyCode::Enter => self.submit_input(),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Char(c) => self.input_buffer.push(c),
                _ => {}
            },
        }
    }

    fn enter_input(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input_buffer.clear();
    }

    fn submit_input(&mut self) {
        let value = self.input_buffer.trim().to_string();
        let mode = self.input_mode;
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        if value.is_empty() {
            return;
        }

        let result = match mode {
            InputMode::Emotion => self
                .client
                .update_context(&ContextUpdate::emotion(&value))
                .map(|_| format!("emotion set to \"{value}\"")),
            InputMode::Intent => self
                .client
                .update_context(&ContextUpdate::intent(&value))
                .map(|_| format!("intent set to \"{value}\"")),
            InputMode::Goal => self.client.goal(&value).map(|resp| {
                format!(
                    "goal \"{}\" ran {} steps",
                    resp.result.goal,
                    resp.result.steps.len()
                )
            }),
            InputMode::Normal => return,
        };

        self.finish_action(result);
    }

    fn run_agent(&mut self) {
        let result = self.client.run().map(|resp| {
            let protocol = resp.result.protocol.as_deref().unwrap_or("baseline");
            format!("ran {protocol}: {}", resp.result.action)
        });
        self.finish_action(result);
    }

    fn run_learning(&mut self) {
        let result = self.client.improve().map(|resp| {
            format!(
                "learning pass: {} protocols, {} mutants",
                resp.report.improvements.len(),
                resp.report.mutants_spawned
            )
        });
        self.finish_action(result);
    }

    fn finish_action(&mut self, result: Result<String, crate::error::ClientError>) {
        match result {
            Ok(message) => self.status_line = message,
            Err(e) => self.status_line = format!("error: {e}"),
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        match self.client.health() {
            Ok(health) => self.health = Some(health),
            Err(e) => self.status_line = format!("error: {e}"),
        }
        if let Ok(memory) = self.client.memory() {
            self.memory = Some(memory);
        }
        self.last_refresh = Some(Instant::now());
    }
}
