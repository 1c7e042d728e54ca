//! Main TUI application logic.

use super::events::{self, Event, EventHandler};
use super::theme::Theme;
use btc_oracle::{CommandOutput, Dispatcher, LogKind, LogLine, MarketFeed};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tracing::debug;

/// Lines kept in the scrollback.
const MAX_LOG_LINES: usize = 500;

const PROMPT: &str = "> ";

/// Main TUI application.
pub struct App {
    theme: Theme,
    log: Vec<LogLine>,
    input: String,
    /// Submitted lines, oldest first.
    history: Vec<String>,
    /// Position while browsing history with the arrow keys.
    history_index: Option<usize>,
    busy: bool,
    should_quit: bool,
}

impl App {
    /// Create a new TUI application.
    pub fn new() -> Self {
        let mut app = Self {
            theme: Theme::default(),
            log: Vec::new(),
            input: String::new(),
            history: Vec::new(),
            history_index: None,
            busy: false,
            should_quit: false,
        };
        app.push(LogLine::new(LogKind::System, "BTC ORACLE TERMINAL ONLINE."));
        app.push(LogLine::new(
            LogKind::Info,
            "TYPE 'HELP' FOR AVAILABLE COMMANDS. ESC OR CTRL+C TO EXIT.",
        ));
        app
    }

    fn push(&mut self, line: LogLine) {
        self.log.push(line);
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }

    /// Append a command's output, honouring `clear_screen`.
    pub fn apply_output(&mut self, output: CommandOutput) {
        if output.clear_screen {
            self.log.clear();
        }
        for line in output.lines {
            self.push(line);
        }
    }

    /// Handle a key press. Returns the submitted line on Enter.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<String> {
        if events::is_quit(&key) {
            self.should_quit = true;
            return None;
        }

        match key.code {
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                self.history_index = None;
                if line.trim().is_empty() {
                    return None;
                }
                self.history.push(line.clone());
                self.push(LogLine::new(LogKind::User, format!("{}{}", PROMPT, line)));
                Some(line)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Up => {
                if self.history.is_empty() {
                    return None;
                }
                let index = match self.history_index {
                    Some(i) => i.saturating_sub(1),
                    None => self.history.len() - 1,
                };
                self.history_index = Some(index);
                self.input = self.history[index].clone();
                None
            }
            KeyCode::Down => {
                match self.history_index {
                    Some(i) if i + 1 < self.history.len() => {
                        self.history_index = Some(i + 1);
                        self.input = self.history[i + 1].clone();
                    }
                    Some(_) => {
                        self.history_index = None;
                        self.input.clear();
                    }
                    None => {}
                }
                None
            }
            _ => None,
        }
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Render the TUI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Log
                Constraint::Length(3), // Input
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_log(frame, chunks[1]);
        self.render_input(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let text = Line::from(vec![
            Span::styled("BTC ORACLE", self.theme.title()),
            Span::raw(" | "),
            Span::styled("help", self.theme.muted()),
            Span::raw(" for commands | "),
            Span::styled("Esc", self.theme.muted()),
            Span::raw(" to quit"),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border());
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.log.len().saturating_sub(visible);

        let lines: Vec<Line> = self.log[start..]
            .iter()
            .map(|l| Line::from(Span::styled(l.text.clone(), self.theme.log_line(l.kind))))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Terminal")
            .border_style(self.theme.border());
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let line = if self.busy {
            Line::from(Span::styled("PROCESSING...", self.theme.busy()))
        } else {
            Line::from(vec![
                Span::styled(PROMPT, self.theme.title()),
                Span::raw(self.input.as_str()),
            ])
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border());
        frame.render_widget(Paragraph::new(line).block(block), area);

        if !self.busy {
            let offset = (PROMPT.len() + self.input.chars().count()) as u16;
            let x = (area.x + 1 + offset).min(area.right().saturating_sub(2));
            frame.set_cursor(x, area.y + 1);
        }
    }
}

async fn event_loop<B: Backend, F: MarketFeed>(
    terminal: &mut Terminal<B>,
    dispatcher: &mut Dispatcher<F>,
) -> io::Result<()> {
    let mut app = App::new();
    let mut event_handler = EventHandler::new(Duration::from_millis(250));

    loop {
        terminal.draw(|f| app.render(f))?;

        let Some(event) = event_handler.next().await else {
            break;
        };

        if let Event::Key(key) = event {
            if let Some(line) = app.handle_key(key) {
                debug!("Submitted: {}", line);
                app.busy = true;
                terminal.draw(|f| app.render(f))?;

                let output = dispatcher.run_line(&line).await;
                app.apply_output(output);
                app.busy = false;
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Run the TUI application.
pub async fn run_tui<F: MarketFeed>(mut dispatcher: Dispatcher<F>) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut dispatcher).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
