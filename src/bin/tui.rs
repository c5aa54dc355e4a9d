use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal, widgets::{Block, Borders, List, ListItem, Paragraph, ListState, Wrap}, layout::{Layout, Constraint, Direction}, style::{Style, Modifier, Color}};

use todo_summary::client::{ApiClient, DEFAULT_TIMEOUT};
use todo_summary::domain::todo::{Todo, UpdateTodo};

const STATUS_TTL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let base = std::env::var("API_BASE").unwrap_or_else(|_| "http://localhost:5000".to_string());
    let client = ApiClient::new(base.clone(), DEFAULT_TIMEOUT)?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, client, base).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode { View, Create, Edit }

#[derive(Clone, Copy, PartialEq, Eq)]
enum Filter { All, Pending, Done }

impl Filter {
    fn label(self) -> &'static str { match self { Filter::All => "All", Filter::Pending => "Pending", Filter::Done => "Done" } }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tone { Info, Success, Error }

struct Status { message: String, tone: Tone, at: Instant }

struct App {
    client: ApiClient,
    base: String,
    items: Vec<Todo>,
    selected: usize,
    mode: Mode,
    list_state: ListState,
    filter: Filter,
    filtered_indices: Vec<usize>,
    draft: String,
    connected: bool,
    status: Option<Status>,
    last_summary: Option<String>,
}

impl App {
    async fn load(&mut self) {
        match self.client.list().await {
            Ok(todos) => { self.items = todos; self.connected = true; }
            Err(e) => {
                self.connected = false;
                self.set_status(format!("❌ Failed to fetch todos. Is the server running? ({e})"), Tone::Error);
            }
        }
        self.recompute_filtered();
    }

    async fn check_connection(&mut self) {
        self.connected = self.client.health().await.is_ok();
        if !self.connected {
            self.set_status("❌ Cannot connect to server. Please ensure the backend is running.".into(), Tone::Error);
        }
    }

    fn set_status(&mut self, message: String, tone: Tone) {
        self.status = Some(Status { message, tone, at: Instant::now() });
    }

    fn selected_todo(&self) -> Option<&Todo> {
        self.filtered_indices.get(self.selected).and_then(|&idx| self.items.get(idx))
    }

    fn recompute_filtered(&mut self) {
        self.filtered_indices.clear();
        for (i, t) in self.items.iter().enumerate() {
            let include = match self.filter {
                Filter::All => true,
                Filter::Pending => !t.completed,
                Filter::Done => t.completed,
            };
            if include { self.filtered_indices.push(i); }
        }
        // Clamp selection within filtered bounds
        let len = self.filtered_indices.len();
        if len == 0 { self.selected = 0; self.list_state.select(None); }
        else { if self.selected >= len { self.selected = len - 1; } self.list_state.select(Some(self.selected)); }
    }

    async fn toggle_selected(&mut self) {
        let Some(todo) = self.selected_todo() else { return };
        let (id, completed) = (todo.id, todo.completed);
        let patch = UpdateTodo { text: None, completed: Some(!completed) };
        if let Err(e) = self.client.update(id, &patch).await {
            self.set_status(format!("❌ Failed to update todo: {e}"), Tone::Error);
        }
        self.load().await;
    }

    async fn delete_selected(&mut self) {
        let Some(id) = self.selected_todo().map(|t| t.id) else { return };
        match self.client.delete(id).await {
            Ok(_) => self.set_status("✅ Todo deleted successfully!".into(), Tone::Success),
            Err(e) => self.set_status(format!("❌ Failed to delete todo: {e}"), Tone::Error),
        }
        if self.selected > 0 { self.selected -= 1; }
        self.load().await;
    }

    async fn save_draft(&mut self) {
        let text = self.draft.trim().to_string();
        if !text.is_empty() {
            let result = match self.mode {
                Mode::Create => self.client.create(&text).await.map(|_| "✅ Todo added successfully!"),
                Mode::Edit => match self.selected_todo().map(|t| t.id) {
                    Some(id) => self.client.update(id, &UpdateTodo { text: Some(text), completed: None }).await.map(|_| "✅ Todo updated successfully!"),
                    None => Ok(""),
                },
                Mode::View => Ok(""),
            };
            match result {
                Ok(msg) if !msg.is_empty() => self.set_status(msg.into(), Tone::Success),
                Ok(_) => {}
                Err(e) => self.set_status(format!("❌ {e}"), Tone::Error),
            }
        }
        self.mode = Mode::View;
        self.draft.clear();
        self.load().await;
    }

    async fn summarize(&mut self) {
        if self.items.is_empty() {
            self.set_status("❌ No todos to summarize".into(), Tone::Error);
            return;
        }
        match self.client.summarize().await {
            Ok(report) => {
                self.set_status(report.message, Tone::Success);
                self.last_summary = Some(report.summary);
            }
            Err(e) => self.set_status(e.to_string(), Tone::Error),
        }
    }
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, client: ApiClient, base: String) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();
    let mut app = App { client, base, items: vec![], selected: 0, mode: Mode::View, list_state: ListState::default(), filter: Filter::All, filtered_indices: Vec::new(), draft: String::new(), connected: false, status: None, last_summary: None };
    app.check_connection().await;
    app.load().await;

    loop {
        if app.status.as_ref().is_some_and(|s| s.at.elapsed() >= STATUS_TTL) { app.status = None; }

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let header = Paragraph::new("Enter: toggle, n: new, e: edit, d: delete, s: summarize to Slack, r: refresh, f: filter, q: quit")
                .block(Block::default().borders(Borders::ALL).title(format!("📝 Todo Summary Assistant  [{}]", if app.connected { "Connected" } else { "Disconnected" })))
                .style(Style::default().fg(if app.connected { Color::Reset } else { Color::Red }));
            f.render_widget(header, chunks[0]);

            let completed = app.items.iter().filter(|t| t.completed).count();
            let stats = Paragraph::new(format!("Total Tasks: {}   Pending: {}   Completed: {}", app.items.len(), app.items.len() - completed, completed))
                .block(Block::default().borders(Borders::ALL).title("stats"));
            f.render_widget(stats, chunks[1]);

            let middle = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(chunks[2]);

            let list_items: Vec<ListItem> = app.filtered_indices.iter().filter_map(|&idx| app.items.get(idx)).map(|t| {
                let mark = if t.completed { "[x]" } else { "[ ]" };
                ListItem::new(format!("{} {}", mark, t.text))
            }).collect();
            if app.filtered_indices.is_empty() { app.list_state.select(None); } else { app.list_state.select(Some(app.selected)); }
            let list = List::new(list_items)
                .block(Block::default().borders(Borders::ALL).title(format!("todos [{}]", app.filter.label())))
                .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, middle[0], &mut app.list_state);

            let detail = match (&app.last_summary, app.selected_todo()) {
                (Some(summary), _) => summary.clone(),
                (None, Some(t)) => format!(
                    "#{}  {}\n\nStatus: {}\nCreated: {}\nUpdated: {}",
                    t.id, t.text,
                    if t.completed { "Completed" } else { "Pending" },
                    t.created_at.format("%Y-%m-%d %H:%M"),
                    t.updated_at.map(|u| u.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_else(|| "-".into()),
                ),
                (None, None) => "No todos yet. Press n to add one.".into(),
            };
            let details = Paragraph::new(detail)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(if app.last_summary.is_some() { "last summary" } else { "details" }));
            f.render_widget(details, middle[1]);

            let (footer_text, color) = match (app.mode, &app.status) {
                (Mode::Create, _) => (format!("New todo: {}_  |  Enter to save, Esc to cancel", app.draft), Color::Reset),
                (Mode::Edit, _) => (format!("Edit todo: {}_  |  Enter to save, Esc to cancel", app.draft), Color::Reset),
                (Mode::View, Some(s)) => (s.message.clone(), match s.tone { Tone::Info => Color::Yellow, Tone::Success => Color::Green, Tone::Error => Color::Red }),
                (Mode::View, None) => (format!("API_BASE={}  |  Filter=[{}]", app.base, app.filter.label()), Color::Reset),
            };
            let footer = Paragraph::new(footer_text)
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).title(match app.mode { Mode::View => "info", Mode::Create => "create", Mode::Edit => "edit" }));
            f.render_widget(footer, chunks[3]);
        })?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                match app.mode {
                    Mode::View => match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Up => { if app.selected > 0 { app.selected -= 1; } }
                        KeyCode::Down => { let len = app.filtered_indices.len(); if app.selected + 1 < len { app.selected += 1; } }
                        KeyCode::Enter => app.toggle_selected().await,
                        KeyCode::Char('n') => { app.mode = Mode::Create; app.draft.clear(); app.last_summary = None; }
                        KeyCode::Char('e') => {
                            if let Some(text) = app.selected_todo().map(|t| t.text.clone()) {
                                app.mode = Mode::Edit;
                                app.draft = text;
                            }
                        }
                        KeyCode::Char('d') => app.delete_selected().await,
                        KeyCode::Char('s') => {
                            app.set_status("🤖 Generating AI summary and sending to Slack...".into(), Tone::Info);
                            terminal.draw(|f| {
                                let area = f.size();
                                let notice = Paragraph::new("🤖 Generating AI summary and sending to Slack...")
                                    .block(Block::default().borders(Borders::ALL).title("working"));
                                f.render_widget(notice, area);
                            })?;
                            app.summarize().await;
                        }
                        KeyCode::Char('r') => { app.check_connection().await; app.load().await; }
                        KeyCode::Char('f') => {
                            app.filter = match app.filter { Filter::All => Filter::Pending, Filter::Pending => Filter::Done, Filter::Done => Filter::All };
                            app.recompute_filtered();
                        }
                        KeyCode::Esc => { app.last_summary = None; }
                        _ => {}
                    },
                    Mode::Create | Mode::Edit => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; app.draft.clear(); }
                        KeyCode::Enter => app.save_draft().await,
                        KeyCode::Backspace => { app.draft.pop(); }
                        KeyCode::Char(c) => app.draft.push(c),
                        _ => {}
                    },
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
    Ok(())
}
