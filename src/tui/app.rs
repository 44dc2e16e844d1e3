//! Application state and event loop

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    DefaultTerminal, Frame,
};
use tracing::{debug, warn};

use crate::services::{DataLoaderService, LoadResult};

use super::theme::Theme;
use super::widgets::{
    chrome::{render_separator, KeyHints},
    countries::CountryList,
    help::HelpPopup,
    overview::{format_number, render_panel, Overview, Panel, PanelVisibility},
    spinner::Spinner,
    tabs::{Tab, TabBar},
};

/// Rows taken by tabs, separators, title and key hints
const CHROME_ROWS: u16 = 5;

/// Outcome of a background load, errors already rendered to text
type LoadOutcome = Result<LoadResult, String>;

/// Application state
pub enum AppState {
    /// Fetching a batch with spinner animation
    Loading { spinner_frame: usize },
    /// Ready with aggregated data
    Ready { data: Box<LoadResult> },
    /// Fetch or parse failed
    Error { message: String },
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    reload_requested: bool,
    current_tab: Tab,
    country_scroll: usize,
    panels: PanelVisibility,
    show_help: bool,
    theme: Theme,
    source_name: String,
    terminal_height: u16,
}

impl App {
    /// Create a new app in loading state
    pub fn new(source_name: impl Into<String>, theme: Theme) -> Self {
        Self {
            state: AppState::Loading { spinner_frame: 0 },
            should_quit: false,
            reload_requested: false,
            current_tab: Tab::default(),
            country_scroll: 0,
            panels: PanelVisibility::default(),
            show_help: false,
            theme,
            source_name: source_name.into(),
            terminal_height: 0,
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.current_tab = self.current_tab.next();
            }
            KeyCode::BackTab => {
                self.current_tab = self.current_tab.prev();
            }
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                    self.current_tab = tab;
                }
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if !self.is_loading() {
                    self.reload_requested = true;
                    self.state = AppState::Loading { spinner_frame: 0 };
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_down();
            }
            KeyCode::Char(c) if self.current_tab == Tab::Overview => {
                if let Some(panel) = Panel::from_key(c) {
                    self.panels.toggle(panel);
                }
            }
            _ => {}
        }
    }

    /// Apply a finished load to app state
    pub fn apply_result(&mut self, result: LoadOutcome) {
        match result {
            Ok(data) => {
                self.country_scroll = 0;
                self.state = AppState::Ready {
                    data: Box::new(data),
                };
            }
            Err(message) => self.state = AppState::Error { message },
        }
    }

    /// Returns true once per `r` press; the loop then starts a new fetch
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    fn is_loading(&self) -> bool {
        matches!(self.state, AppState::Loading { .. })
    }

    fn scroll_up(&mut self) {
        if self.current_tab == Tab::Countries {
            self.country_scroll = self.country_scroll.saturating_sub(1);
        }
    }

    fn scroll_down(&mut self) {
        if self.current_tab == Tab::Countries {
            self.country_scroll = (self.country_scroll + 1).min(self.max_country_scroll());
        }
    }

    /// Country rows visible when the Countries tab fills the content area
    fn country_rows(&self) -> usize {
        CountryList::visible_rows(self.terminal_height.saturating_sub(CHROME_ROWS))
    }

    fn max_country_scroll(&self) -> usize {
        match &self.state {
            AppState::Ready { data } => {
                CountryList::max_scroll_offset(&data.summaries.countries, self.country_rows())
            }
            _ => 0,
        }
    }

    /// Record the terminal height; the stored scroll stays on the last page
    pub fn set_terminal_height(&mut self, height: u16) {
        self.terminal_height = height;
        self.country_scroll = self.country_scroll.min(self.max_country_scroll());
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading { spinner_frame } = &self.state {
            self.state = AppState::Loading {
                spinner_frame: Spinner::next_frame(*spinner_frame),
            };
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn key_hints(&self) -> &'static [(&'static str, &'static str)] {
        match (&self.state, self.current_tab) {
            (AppState::Error { .. }, _) => &[("r", "retry"), ("q", "quit")],
            (_, Tab::Overview) => &[
                ("g/a/c/y", "toggle panels"),
                ("r", "reload"),
                ("?", "help"),
                ("q", "quit"),
            ],
            (_, Tab::Countries) => &[
                ("j/k", "scroll"),
                ("r", "reload"),
                ("?", "help"),
                ("q", "quit"),
            ],
            _ => &[("Tab", "switch"), ("r", "reload"), ("?", "help"), ("q", "quit")],
        }
    }

    fn render_title(&self, data: &LoadResult, area: Rect, buf: &mut Buffer) {
        let count = data.summaries.record_count as u64;
        let unit = if count == 1 { "user" } else { "users" };
        let line = Line::from(vec![
            Span::styled(
                format!("{} {}", format_number(count), unit),
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" from {}", data.source),
                Style::default().fg(self.theme.muted()),
            ),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_content(&self, data: &LoadResult, area: Rect, buf: &mut Buffer) {
        let panel = match self.current_tab {
            Tab::Overview => {
                Overview::new(&data.summaries, self.panels, self.theme).render(area, buf);
                return;
            }
            Tab::Gender => Panel::Gender,
            Tab::Ages => Panel::Ages,
            Tab::Countries => Panel::Countries,
            Tab::Years => Panel::Years,
        };
        render_panel(
            panel,
            &data.summaries,
            self.country_scroll,
            self.theme,
            area,
            buf,
        );
    }

    fn render_error(&self, message: &str, area: Rect, buf: &mut Buffer) {
        let y = area.y + area.height / 2;
        Paragraph::new(vec![
            Line::styled(
                format!("Error: {}", message),
                Style::default().fg(self.theme.error()),
            ),
            Line::styled(
                "Press r to retry",
                Style::default().fg(self.theme.muted()),
            ),
        ])
        .alignment(Alignment::Center)
        .render(
            Rect {
                y,
                height: area.height.saturating_sub(y - area.y),
                ..area
            },
            buf,
        );
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let AppState::Loading { spinner_frame } = &self.state {
            Spinner::new(*spinner_frame, &self.source_name, self.theme).render(area, buf);
            return;
        }

        let [tabs_area, sep_top, title_area, content_area, sep_bottom, hints_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        TabBar::new(self.current_tab, self.theme).render(tabs_area, buf);
        render_separator(sep_top, buf, self.theme);

        match &self.state {
            AppState::Ready { data } => {
                self.render_title(data, title_area, buf);
                self.render_content(data, content_area, buf);
            }
            AppState::Error { message } => self.render_error(message, content_area, buf),
            AppState::Loading { .. } => {}
        }

        render_separator(sep_bottom, buf, self.theme);
        KeyHints::new(self.key_hints(), self.theme).render(hints_area, buf);

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application
pub fn run(loader: DataLoaderService) -> anyhow::Result<()> {
    // Theme detection queries the terminal, so it must happen before raw mode
    let theme = Theme::detect();
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, loader, theme);
    ratatui::restore();
    result
}

/// Fetch and aggregate on a worker thread, reporting back over `tx`
fn spawn_load(loader: &DataLoaderService, tx: &mpsc::Sender<LoadOutcome>) {
    let loader = loader.clone();
    let tx = tx.clone();
    thread::spawn(move || {
        let result = loader.load().map_err(|e| {
            warn!(error = %e, "load failed");
            e.to_string()
        });
        let _ = tx.send(result);
    });
}

fn run_app(
    terminal: &mut DefaultTerminal,
    loader: DataLoaderService,
    theme: Theme,
) -> anyhow::Result<()> {
    let mut app = App::new(loader.source_name(), theme);

    let (data_tx, data_rx) = mpsc::channel();
    spawn_load(&loader, &data_tx);

    loop {
        app.set_terminal_height(terminal.size()?.height);
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        if app.take_reload_request() {
            debug!("reload requested");
            spawn_load(&loader, &data_tx);
        }

        // Check for load completion (non-blocking)
        if app.is_loading() {
            if let Ok(result) = data_rx.try_recv() {
                app.apply_result(result);
            }
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}
