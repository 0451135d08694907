// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal front end.
//!
//! Two screens share one [`Session`]: the start page (search box plus a read-only folder grid)
//! and the editor (folder/tab list with inline prompts and mouse drag-and-drop). Every edit goes
//! through [`Session::apply`]; notices from the session become toasts.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::model::{Document, FolderDirection, TabField, TabPosition};
use crate::notify::{Notice, Severity, NOTICE_TTL};
use crate::ops::Op;
use crate::render::{EditorView, FolderCard, TabLink};
use crate::session::Session;

/// Runs the terminal UI until the user quits and hands the session back for shutdown.
pub fn run(
    session: Session,
    notices: mpsc::UnboundedReceiver<Notice>,
    export_dir: PathBuf,
) -> (Session, io::Result<()>) {
    let mut app = App::new(session, notices, export_dir);
    let result = run_app(&mut app);
    (app.into_session(), result)
}

fn run_app(app: &mut App) -> io::Result<()> {
    let mut terminal = TerminalSession::new()?;

    while !app.should_quit {
        app.drain_notices();
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
            if let Some(url) = app.take_open_request() {
                if let Err(err) = open_in_browser(&url) {
                    warn!(%url, %err, "cannot open browser");
                    app.session.notifier().error(format!("Cannot open {url}: {err}"));
                }
            }
        }
    }

    Ok(())
}

include!("chrome.rs");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Start,
    Editor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptKind {
    AddFolder,
    AddTabName { folder: usize },
    AddTabUrl { folder: usize, name: String },
    RenameFolder { index: usize },
    EditTab { position: TabPosition, field: TabField },
    ImportPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Prompt {
    kind: PromptKind,
    buffer: String,
}

impl Prompt {
    fn empty(kind: PromptKind) -> Self {
        Self::prefilled(kind, String::new())
    }

    fn prefilled(kind: PromptKind, buffer: impl Into<String>) -> Self {
        Self {
            kind,
            buffer: buffer.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Confirm {
    DeleteFolder(usize),
    DeleteTab(TabPosition),
    Import { path: PathBuf, contents: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Normal,
    Search(String),
    Prompt(Prompt),
    Confirm(Confirm),
}

/// Selectable line of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorItem {
    Folder(usize),
    Tab(TabPosition),
}

#[derive(Debug, Clone)]
struct Toast {
    severity: Severity,
    message: String,
    expires_at: Instant,
}

struct App {
    session: Session,
    notices: mpsc::UnboundedReceiver<Notice>,
    export_dir: PathBuf,
    screen: Screen,
    input: Input,
    start_cursor: usize,
    editor_cursor: usize,
    editor_scroll: u16,
    editor_area: Rect,
    toast: Option<Toast>,
    open_request: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(
        session: Session,
        notices: mpsc::UnboundedReceiver<Notice>,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            session,
            notices,
            export_dir,
            screen: Screen::Start,
            input: Input::Normal,
            start_cursor: 0,
            editor_cursor: 0,
            editor_scroll: 0,
            editor_area: Rect::default(),
            toast: None,
            open_request: None,
            should_quit: false,
        }
    }

    fn into_session(self) -> Session {
        self.session
    }

    fn drain_notices(&mut self) {
        while let Ok(notice) = self.notices.try_recv() {
            self.toast = Some(Toast {
                severity: notice.severity(),
                message: notice.message().to_owned(),
                expires_at: Instant::now() + NOTICE_TTL,
            });
        }
    }

    fn active_toast(&self) -> Option<&Toast> {
        self.toast
            .as_ref()
            .filter(|toast| toast.expires_at > Instant::now())
    }

    fn take_open_request(&mut self) -> Option<String> {
        self.open_request.take()
    }

    fn start_links(&self) -> Vec<&TabLink> {
        self.session
            .cards()
            .iter()
            .flat_map(|card| card.tabs.iter())
            .collect()
    }

    fn selected_link(&self) -> Option<&TabLink> {
        self.start_links().get(self.start_cursor).copied()
    }

    fn editor_items(&self) -> Vec<EditorItem> {
        editor_items(&self.session.document())
    }

    fn selected_item(&self) -> Option<EditorItem> {
        self.editor_items().get(self.editor_cursor).copied()
    }

    fn select_item(&mut self, item: EditorItem) {
        if let Some(index) = self.editor_items().iter().position(|it| *it == item) {
            self.editor_cursor = index;
        }
    }

    /// Folder that "add tab" targets: the selected folder, or the folder of the selected tab.
    fn selected_folder(&self) -> Option<usize> {
        match self.selected_item()? {
            EditorItem::Folder(index) => Some(index),
            EditorItem::Tab(position) => Some(position.folder),
        }
    }

    fn clamp_cursors(&mut self) {
        let links = self.start_links().len();
        self.start_cursor = self.start_cursor.min(links.saturating_sub(1));
        let items = self.editor_items().len();
        self.editor_cursor = self.editor_cursor.min(items.saturating_sub(1));
    }

    fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.screen {
            Screen::Start => (&mut self.start_cursor, self.session.document().tab_count()),
            Screen::Editor => {
                let len = editor_items(&self.session.document()).len();
                (&mut self.editor_cursor, len)
            }
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn handle_key(&mut self, code: KeyCode) {
        if self.handle_key_code(code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the app should quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        match std::mem::replace(&mut self.input, Input::Normal) {
            Input::Normal => match self.screen {
                Screen::Start => return self.handle_start_key(code),
                Screen::Editor => return self.handle_editor_key(code),
            },
            Input::Search(query) => self.handle_search_key(query, code),
            Input::Prompt(prompt) => self.handle_prompt_key(prompt, code),
            Input::Confirm(confirm) => self.handle_confirm_key(confirm, code),
        }
        false
    }

    fn handle_start_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('e') => {
                self.screen = Screen::Editor;
                self.clamp_cursors();
            }
            KeyCode::Char('/') => self.input = Input::Search(String::new()),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Enter => {
                if let Some(link) = self.selected_link() {
                    self.open_request = Some(link.url.clone());
                }
            }
            _ => return self.handle_shared_key(code),
        }
        false
    }

    fn handle_editor_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Char('e') => {
                self.session.drag_end();
                self.screen = Screen::Start;
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Char('a') => self.input = Input::Prompt(Prompt::empty(PromptKind::AddFolder)),
            KeyCode::Char('t') => match self.selected_folder() {
                Some(folder) => {
                    self.input = Input::Prompt(Prompt::empty(PromptKind::AddTabName { folder }));
                }
                None => self.session.notifier().info("Add a folder first"),
            },
            KeyCode::Char('r') => self.begin_rename(),
            KeyCode::Char('u') => {
                if let Some(EditorItem::Tab(position)) = self.selected_item() {
                    self.begin_tab_edit(position, TabField::Url);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => match self.selected_item() {
                Some(EditorItem::Folder(index)) => {
                    self.input = Input::Confirm(Confirm::DeleteFolder(index));
                }
                Some(EditorItem::Tab(position)) => {
                    self.input = Input::Confirm(Confirm::DeleteTab(position));
                }
                None => {}
            },
            KeyCode::Char('K') => self.move_selected(FolderDirection::Up),
            KeyCode::Char('J') => self.move_selected(FolderDirection::Down),
            _ => return self.handle_shared_key(code),
        }
        false
    }

    fn handle_shared_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('g') => {
                let engine = self.session.document().search_engine().next();
                self.apply(Op::SetSearchEngine { engine });
            }
            KeyCode::Char('x') => self.export(),
            KeyCode::Char('i') => self.input = Input::Prompt(Prompt::empty(PromptKind::ImportPath)),
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, mut query: String, code: KeyCode) {
        match code {
            KeyCode::Esc => {}
            KeyCode::Enter => match self.session.search_url(&query) {
                Some(url) => self.open_request = Some(url.to_string()),
                None => self.input = Input::Search(query),
            },
            KeyCode::Backspace => {
                query.pop();
                self.input = Input::Search(query);
            }
            KeyCode::Char(ch) => {
                query.push(ch);
                self.input = Input::Search(query);
            }
            _ => self.input = Input::Search(query),
        }
    }

    fn handle_prompt_key(&mut self, mut prompt: Prompt, code: KeyCode) {
        match code {
            KeyCode::Esc => {}
            KeyCode::Enter => self.submit_prompt(prompt),
            KeyCode::Backspace => {
                prompt.buffer.pop();
                self.input = Input::Prompt(prompt);
            }
            KeyCode::Char(ch) => {
                prompt.buffer.push(ch);
                self.input = Input::Prompt(prompt);
            }
            _ => self.input = Input::Prompt(prompt),
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt) {
        let Prompt { kind, buffer } = prompt;
        match kind {
            PromptKind::AddFolder => {
                if self.apply(Op::AddFolder { name: buffer }) {
                    let last = self.session.document().folders().len().saturating_sub(1);
                    self.select_item(EditorItem::Folder(last));
                }
            }
            PromptKind::AddTabName { folder } => {
                if buffer.trim().is_empty() {
                    return;
                }
                self.input = Input::Prompt(Prompt::empty(PromptKind::AddTabUrl {
                    folder,
                    name: buffer,
                }));
            }
            PromptKind::AddTabUrl { folder, name } => {
                if self.apply(Op::AddTab {
                    folder,
                    name,
                    url: buffer,
                }) {
                    let tab = self
                        .session
                        .document()
                        .folder(folder)
                        .map_or(0, |f| f.tabs().len().saturating_sub(1));
                    self.select_item(EditorItem::Tab(TabPosition::new(folder, tab)));
                }
            }
            PromptKind::RenameFolder { index } => {
                self.apply(Op::RenameFolder {
                    index,
                    name: buffer,
                });
            }
            PromptKind::EditTab { position, field } => {
                self.apply(Op::SetTabField {
                    position,
                    field,
                    value: buffer,
                });
            }
            PromptKind::ImportPath => {
                let path = PathBuf::from(buffer.trim());
                match std::fs::read_to_string(&path) {
                    Ok(contents) => {
                        self.input = Input::Confirm(Confirm::Import { path, contents });
                    }
                    Err(err) => {
                        warn!(path = %path.display(), %err, "cannot read import file");
                        self.session
                            .notifier()
                            .error(format!("Cannot read {}: {err}", path.display()));
                    }
                }
            }
        }
    }

    fn handle_confirm_key(&mut self, confirm: Confirm, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => match confirm {
                Confirm::DeleteFolder(index) => {
                    self.apply(Op::DeleteFolder { index });
                }
                Confirm::DeleteTab(position) => {
                    self.apply(Op::DeleteTab { position });
                }
                Confirm::Import { contents, .. } => {
                    if let Err(err) = self.session.import_folders(&contents) {
                        debug!(%err, "import rejected");
                    }
                    self.clamp_cursors();
                }
            },
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
            _ => self.input = Input::Confirm(confirm),
        }
    }

    fn begin_rename(&mut self) {
        match self.selected_item() {
            Some(EditorItem::Folder(index)) => {
                let name = self
                    .session
                    .document()
                    .folder(index)
                    .map(|folder| folder.name().to_owned())
                    .unwrap_or_default();
                self.input = Input::Prompt(Prompt::prefilled(
                    PromptKind::RenameFolder { index },
                    name,
                ));
            }
            Some(EditorItem::Tab(position)) => self.begin_tab_edit(position, TabField::Name),
            None => {}
        }
    }

    fn begin_tab_edit(&mut self, position: TabPosition, field: TabField) {
        let value = self
            .session
            .document()
            .tab(position)
            .map(|tab| tab.field(field).to_owned())
            .unwrap_or_default();
        self.input = Input::Prompt(Prompt::prefilled(
            PromptKind::EditTab { position, field },
            value,
        ));
    }

    /// Moves the selected folder, or the selected tab within its folder, one step.
    fn move_selected(&mut self, direction: FolderDirection) {
        match self.selected_item() {
            Some(EditorItem::Folder(index)) => {
                if self.apply(Op::MoveFolder { index, direction }) {
                    let moved = match direction {
                        FolderDirection::Up => index - 1,
                        FolderDirection::Down => index + 1,
                    };
                    self.select_item(EditorItem::Folder(moved));
                }
            }
            Some(EditorItem::Tab(from)) => {
                let len = self
                    .session
                    .document()
                    .folder(from.folder)
                    .map_or(0, |folder| folder.tabs().len());
                let to = match direction {
                    FolderDirection::Up if from.tab > 0 => from.tab - 1,
                    FolderDirection::Down if from.tab + 1 < len => from.tab + 1,
                    _ => return,
                };
                let to = TabPosition::new(from.folder, to);
                if self.apply(Op::MoveTab { from, to }) {
                    self.select_item(EditorItem::Tab(to));
                }
            }
            None => {}
        }
    }

    fn export(&mut self) {
        let today = Local::now().date_naive();
        match self.session.export_to_dir(&self.export_dir, today) {
            Ok(path) => self
                .session
                .notifier()
                .success(format!("Exported to {}", path.display())),
            Err(err) => self.session.notifier().error(err.to_string()),
        }
    }

    /// Applies `op` and reports whether the document changed. Rejections are already notified.
    fn apply(&mut self, op: Op) -> bool {
        let changed = match self.session.apply(op) {
            Ok(outcome) => outcome.is_changed(),
            Err(err) => {
                debug!(%err, "edit rejected");
                false
            }
        };
        self.clamp_cursors();
        changed
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Editor || self.input != Input::Normal {
            return;
        }
        let y = self.editor_y(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(y) = y else {
                    return;
                };
                let row = self.session.editor().row_at(y).map(|row| row.position);
                match row {
                    Some(position) => {
                        self.select_item(EditorItem::Tab(position));
                        self.session.drag_start(position);
                    }
                    None => {
                        if let Some(folder) = self.session.editor().folder_at(y) {
                            self.select_item(EditorItem::Folder(folder));
                        }
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(y) = y {
                    self.session.drag_over(y);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.finish_drag(y),
            MouseEventKind::ScrollDown => {
                self.editor_scroll = self.editor_scroll.saturating_add(1);
            }
            MouseEventKind::ScrollUp => {
                self.editor_scroll = self.editor_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn finish_drag(&mut self, y: Option<u16>) {
        if !self.session.drag().is_dragging() {
            return;
        }
        let target = self.session.drag().preview().map(|preview| preview.target);
        let folder = y.and_then(|y| self.session.editor().folder_at(y));
        if let Some(folder) = folder {
            match self.session.drop_on(folder) {
                Ok(outcome) => {
                    if let (true, Some(target)) = (outcome.is_changed(), target) {
                        self.select_item(EditorItem::Tab(target));
                    }
                }
                Err(err) => debug!(%err, "drop ignored"),
            }
        }
        self.session.drag_end();
    }

    /// Maps a terminal cell to an editor row, or `None` outside the editor viewport.
    fn editor_y(&self, column: u16, row: u16) -> Option<u16> {
        let area = self.editor_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        inside.then(|| row - area.y + self.editor_scroll)
    }

    fn scroll_editor_to_cursor(&mut self, viewport: u16) {
        let editor = self.session.editor();
        let max_scroll = editor.height.saturating_sub(viewport);
        let line = self
            .selected_item()
            .and_then(|item| item_line(editor, item));
        if let Some(line) = line {
            if line < self.editor_scroll {
                self.editor_scroll = line;
            } else if viewport > 0 && line >= self.editor_scroll.saturating_add(viewport) {
                self.editor_scroll = line + 1 - viewport;
            }
        }
        self.editor_scroll = self.editor_scroll.min(max_scroll);
    }
}

/// Selection order follows the document, so a drag preview never reshuffles the cursor.
fn editor_items(doc: &Document) -> Vec<EditorItem> {
    let mut items = Vec::with_capacity(doc.folders().len() + doc.tab_count());
    for (index, folder) in doc.folders().iter().enumerate() {
        items.push(EditorItem::Folder(index));
        items.extend(
            (0..folder.tabs().len()).map(|tab| EditorItem::Tab(TabPosition::new(index, tab))),
        );
    }
    items
}

fn item_line(editor: &EditorView, item: EditorItem) -> Option<u16> {
    match item {
        EditorItem::Folder(index) => editor.folders.get(index).map(|folder| folder.header.top),
        EditorItem::Tab(position) => editor
            .folders
            .iter()
            .flat_map(|folder| folder.rows.iter())
            .find(|row| row.position == position)
            .map(|row| row.bounds.top),
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_search_box(frame, app, chunks[0]);
    match app.screen {
        Screen::Start => render_grid(frame, app, chunks[1]),
        Screen::Editor => render_editor(frame, app, chunks[1]),
    }
    frame.render_widget(Paragraph::new(footer_line(app)), chunks[2]);

    match &app.input {
        Input::Prompt(prompt) => render_prompt(frame, prompt, area),
        Input::Confirm(confirm) => render_confirm(frame, app, confirm, area),
        Input::Normal | Input::Search(_) => {}
    }
}

fn render_search_box(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let engine = app.session.document().search_engine();
    let title = format!(" {} ", engine.label());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border_style(matches!(app.input, Input::Search(_))))
        .title(title);

    let line = match &app.input {
        Input::Search(query) => Line::from(vec![
            Span::raw(query.clone()),
            Span::styled("_".to_owned(), cursor_style()),
        ]),
        _ => Line::from(Span::styled(
            search_placeholder(engine),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_grid(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let cards = app.session.cards();
    if cards.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No folders yet. Press e to open the editor.".to_owned(),
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(hint, area);
        return;
    }

    let selected = app.selected_link().map(|link| link.position);
    let per_row = usize::from(area.width / CARD_MIN_WIDTH).clamp(1, cards.len());
    let mut y = area.y;
    for chunk in cards.chunks(per_row) {
        if y >= area.bottom() {
            break;
        }
        let tallest = chunk
            .iter()
            .map(|card| card.tabs.len().max(1))
            .max()
            .unwrap_or(1);
        let wanted = u16::try_from(tallest).unwrap_or(u16::MAX).saturating_add(2);
        let height = wanted.min(area.bottom() - y);
        let row_area = Rect::new(area.x, y, area.width, height);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, per_row as u32); per_row])
            .split(row_area);
        for (card, column) in chunk.iter().zip(columns.iter()) {
            frame.render_widget(card_widget(card, selected), *column);
        }
        y = y.saturating_add(height);
    }
}

fn render_editor(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border_style(true))
        .title(" Editor ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.editor_area = inner;
    app.scroll_editor_to_cursor(inner.height);
    let lines = editor_lines(app.session.editor(), app.selected_item());
    frame.render_widget(Paragraph::new(lines).scroll((app.editor_scroll, 0)), inner);
}

fn render_prompt(frame: &mut Frame<'_>, prompt: &Prompt, area: Rect) {
    let popup = centered_rect(60, 20, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border_style(true))
        .title(format!(" {} ", prompt_title(&prompt.kind)));
    let lines = vec![
        Line::from(vec![
            Span::raw(prompt.buffer.clone()),
            Span::styled("_".to_owned(), cursor_style()),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "Enter: confirm | Esc: cancel".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

fn render_confirm(frame: &mut Frame<'_>, app: &App, confirm: &Confirm, area: Rect) {
    let popup = centered_rect(60, 20, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightRed))
        .title(" Confirm ");
    let lines = vec![
        Line::from(confirm_message(app, confirm)),
        Line::default(),
        Line::from(Span::styled(
            "y: yes | n: no".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

fn confirm_message(app: &App, confirm: &Confirm) -> String {
    let doc = app.session.document();
    match confirm {
        Confirm::DeleteFolder(index) => {
            let name = doc.folder(*index).map_or("", |folder| folder.name());
            format!("Delete folder \"{name}\" and all of its tabs?")
        }
        Confirm::DeleteTab(position) => {
            let name = doc.tab(*position).map_or("", |tab| tab.name());
            format!("Delete tab \"{name}\"?")
        }
        Confirm::Import { path, .. } => format!(
            "Replace all folders with the contents of {}?",
            path.display()
        ),
    }
}

/// Opens `url` with the platform's default handler without waiting for it.
fn open_in_browser(url: &str) -> io::Result<()> {
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    };
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut command = Command::new("open");
        command.arg(url);
        command
    };
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let mut command = {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
