// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tokio::time::sleep;

use super::{editor_lines, footer_line, App, Confirm, EditorItem, Input, PromptKind, Screen};
use crate::model::fixtures::{three_folders, user};
use crate::model::{Document, Folder, SearchEngine, TabPosition};
use crate::notify::{Notifier, Severity};
use crate::remote::memory::MemoryRemote;
use crate::render::{project_editor, EditorMetrics, ViewRevision};
use crate::session::{Session, SessionConfig};
use crate::store::LocalMirror;
use crate::test_utils::TempDir;

fn line_to_string(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect::<String>()
}

struct TuiTestCtx {
    tmp: TempDir,
    app: App,
}

impl TuiTestCtx {
    async fn with_document(doc: Document) -> Self {
        let tmp = TempDir::new("tui");
        let remote = Arc::new(MemoryRemote::new().with_document(&user("alice"), doc));
        let (notifier, notices) = Notifier::channel();
        let session = Session::load(
            user("alice"),
            remote,
            LocalMirror::new(tmp.path().join("mirror")),
            notifier,
            SessionConfig::default(),
        )
        .await;
        let app = App::new(session, notices, tmp.path().join("exports"));
        Self { tmp, app }
    }

    async fn loaded() -> Self {
        Self::with_document(three_folders()).await
    }

    async fn in_editor() -> Self {
        let mut ctx = Self::loaded().await;
        ctx.key(KeyCode::Char('e'));
        assert_eq!(ctx.app.screen, Screen::Editor);
        ctx
    }

    fn key(&mut self, code: KeyCode) {
        self.app.handle_key(code);
    }

    fn keys(&mut self, code: KeyCode, times: usize) {
        for _ in 0..times {
            self.key(code);
        }
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.key(KeyCode::Char(ch));
        }
    }

    fn mouse(&mut self, kind: MouseEventKind, row: u16) {
        self.app.handle_mouse(MouseEvent {
            kind,
            column: 4,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn folder_names(&self) -> Vec<String> {
        self.app
            .session
            .document()
            .folders()
            .iter()
            .map(|folder| folder.name().to_owned())
            .collect()
    }

    fn tab_names(&self, folder: usize) -> Vec<String> {
        self.app.session.document().folders()[folder]
            .tabs()
            .iter()
            .map(|tab| tab.name().to_owned())
            .collect()
    }

    fn toast(&mut self) -> Option<(Severity, String)> {
        self.app.drain_notices();
        self.app
            .active_toast()
            .map(|toast| (toast.severity, toast.message.clone()))
    }
}

#[tokio::test(start_paused = true)]
async fn q_quits_from_both_screens() {
    let mut ctx = TuiTestCtx::loaded().await;
    assert!(ctx.app.handle_key_code(KeyCode::Char('q')));

    ctx.key(KeyCode::Char('e'));
    assert!(ctx.app.handle_key_code(KeyCode::Char('q')));
}

#[tokio::test(start_paused = true)]
async fn q_is_typed_inside_prompts() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.key(KeyCode::Char('a'));
    assert!(!ctx.app.handle_key_code(KeyCode::Char('q')));

    match &ctx.app.input {
        Input::Prompt(prompt) => assert_eq!(prompt.buffer, "q"),
        other => panic!("expected prompt, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn enter_on_start_page_opens_selected_tab() {
    let mut ctx = TuiTestCtx::loaded().await;
    ctx.key(KeyCode::Char('j'));
    ctx.key(KeyCode::Enter);

    assert_eq!(
        ctx.app.take_open_request().as_deref(),
        Some("http://calendar.test")
    );
    assert_eq!(ctx.app.take_open_request(), None);
}

#[tokio::test(start_paused = true)]
async fn start_cursor_stops_at_last_tab() {
    let mut ctx = TuiTestCtx::loaded().await;
    ctx.keys(KeyCode::Down, 20);
    ctx.key(KeyCode::Enter);

    assert_eq!(
        ctx.app.take_open_request().as_deref(),
        Some("https://git.test/repo")
    );
}

#[tokio::test(start_paused = true)]
async fn search_opens_engine_url() {
    let mut ctx = TuiTestCtx::loaded().await;
    ctx.key(KeyCode::Char('/'));
    ctx.type_text("cats");
    ctx.key(KeyCode::Enter);

    assert_eq!(ctx.app.input, Input::Normal);
    assert_eq!(
        ctx.app.take_open_request().as_deref(),
        Some("https://yandex.ru/search/?text=cats")
    );
}

#[tokio::test(start_paused = true)]
async fn blank_search_stays_open() {
    let mut ctx = TuiTestCtx::loaded().await;
    ctx.key(KeyCode::Char('/'));
    ctx.type_text("  ");
    ctx.key(KeyCode::Enter);

    assert!(matches!(ctx.app.input, Input::Search(_)));
    assert_eq!(ctx.app.take_open_request(), None);

    ctx.key(KeyCode::Esc);
    assert_eq!(ctx.app.input, Input::Normal);
}

#[tokio::test(start_paused = true)]
async fn g_cycles_search_engine_and_schedules_save() {
    let mut ctx = TuiTestCtx::loaded().await;
    ctx.key(KeyCode::Char('g'));
    sleep(Duration::from_millis(10)).await;

    assert_eq!(ctx.app.session.document().search_engine(), SearchEngine::Google);
    assert!(!ctx.app.session.pipeline_state().is_idle());
    let footer = line_to_string(&footer_line(&ctx.app));
    assert!(footer.contains("Save:timer-pending"), "{footer}");
}

#[tokio::test(start_paused = true)]
async fn footer_shows_user_and_idle_pipeline() {
    let ctx = TuiTestCtx::loaded().await;
    let footer = line_to_string(&footer_line(&ctx.app));

    assert!(footer.starts_with("User:alice"), "{footer}");
    assert!(footer.contains("Save:idle"), "{footer}");
}

#[tokio::test(start_paused = true)]
async fn add_folder_appends_and_selects_it() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.key(KeyCode::Char('a'));
    ctx.type_text("Inbox");
    ctx.key(KeyCode::Enter);

    assert_eq!(ctx.folder_names(), ["Work", "News", "Dev", "Inbox"]);
    assert_eq!(ctx.app.selected_item(), Some(EditorItem::Folder(3)));
}

#[tokio::test(start_paused = true)]
async fn blank_folder_name_is_rejected_with_a_toast() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.key(KeyCode::Char('a'));
    ctx.type_text("   ");
    ctx.key(KeyCode::Enter);

    assert_eq!(ctx.folder_names(), ["Work", "News", "Dev"]);
    let (severity, _) = ctx.toast().expect("toast");
    assert_eq!(severity, Severity::Error);
}

#[tokio::test(start_paused = true)]
async fn add_tab_asks_for_name_then_url() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.keys(KeyCode::Char('j'), 3);
    assert_eq!(ctx.app.selected_item(), Some(EditorItem::Folder(1)));

    ctx.key(KeyCode::Char('t'));
    ctx.type_text("Blog");
    ctx.key(KeyCode::Enter);
    match &ctx.app.input {
        Input::Prompt(prompt) => assert_eq!(
            prompt.kind,
            PromptKind::AddTabUrl {
                folder: 1,
                name: "Blog".to_owned()
            }
        ),
        other => panic!("expected url prompt, got {other:?}"),
    }

    ctx.type_text("https://blog.test");
    ctx.key(KeyCode::Enter);

    assert_eq!(ctx.tab_names(1), ["Daily", "Blog"]);
    assert_eq!(
        ctx.app.selected_item(),
        Some(EditorItem::Tab(TabPosition::new(1, 1)))
    );
}

#[tokio::test(start_paused = true)]
async fn blank_tab_name_cancels_quietly() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.key(KeyCode::Char('t'));
    ctx.key(KeyCode::Enter);

    assert_eq!(ctx.app.input, Input::Normal);
    assert_eq!(ctx.tab_names(0), ["Mail", "Calendar"]);
    assert!(ctx.toast().is_none());
}

#[tokio::test(start_paused = true)]
async fn rename_prefills_current_name() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.key(KeyCode::Char('r'));
    match &ctx.app.input {
        Input::Prompt(prompt) => assert_eq!(prompt.buffer, "Work"),
        other => panic!("expected prompt, got {other:?}"),
    }

    ctx.keys(KeyCode::Backspace, 4);
    ctx.type_text("Jobs");
    ctx.key(KeyCode::Enter);

    assert_eq!(ctx.folder_names(), ["Jobs", "News", "Dev"]);
}

#[tokio::test(start_paused = true)]
async fn u_edits_the_selected_tab_url() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.key(KeyCode::Char('j'));
    ctx.key(KeyCode::Char('u'));
    match &ctx.app.input {
        Input::Prompt(prompt) => assert_eq!(prompt.buffer, "http://mail.test"),
        other => panic!("expected prompt, got {other:?}"),
    }

    ctx.type_text("/inbox");
    ctx.key(KeyCode::Enter);

    let doc = ctx.app.session.document();
    let tab = doc.tab(TabPosition::new(0, 0)).expect("tab");
    assert_eq!(tab.url(), "http://mail.test/inbox");
}

#[tokio::test(start_paused = true)]
async fn delete_waits_for_confirmation() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.key(KeyCode::Char('j'));
    ctx.key(KeyCode::Char('d'));
    assert_eq!(
        ctx.app.input,
        Input::Confirm(Confirm::DeleteTab(TabPosition::new(0, 0)))
    );

    ctx.key(KeyCode::Char('x'));
    assert!(matches!(ctx.app.input, Input::Confirm(_)));
    ctx.key(KeyCode::Char('n'));
    assert_eq!(ctx.tab_names(0), ["Mail", "Calendar"]);

    ctx.key(KeyCode::Char('d'));
    ctx.key(KeyCode::Char('y'));
    assert_eq!(ctx.tab_names(0), ["Calendar"]);
}

#[tokio::test(start_paused = true)]
async fn deleting_last_folder_clamps_cursor() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.keys(KeyCode::Char('j'), 5);
    assert_eq!(ctx.app.selected_item(), Some(EditorItem::Folder(2)));

    ctx.key(KeyCode::Char('d'));
    ctx.key(KeyCode::Enter);

    assert_eq!(ctx.folder_names(), ["Work", "News"]);
    assert_eq!(
        ctx.app.selected_item(),
        Some(EditorItem::Tab(TabPosition::new(1, 0)))
    );
}

#[tokio::test(start_paused = true)]
async fn shift_k_moves_folder_up_and_follows_it() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.keys(KeyCode::Char('j'), 3);
    ctx.key(KeyCode::Char('K'));

    assert_eq!(ctx.folder_names(), ["News", "Work", "Dev"]);
    assert_eq!(ctx.app.selected_item(), Some(EditorItem::Folder(0)));

    ctx.key(KeyCode::Char('K'));
    assert_eq!(ctx.folder_names(), ["News", "Work", "Dev"]);
}

#[tokio::test(start_paused = true)]
async fn shift_j_moves_tab_down_within_its_folder() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.key(KeyCode::Char('j'));
    ctx.key(KeyCode::Char('J'));

    assert_eq!(ctx.tab_names(0), ["Calendar", "Mail"]);
    assert_eq!(
        ctx.app.selected_item(),
        Some(EditorItem::Tab(TabPosition::new(0, 1)))
    );

    ctx.key(KeyCode::Char('J'));
    assert_eq!(ctx.tab_names(0), ["Calendar", "Mail"]);
}

#[tokio::test(start_paused = true)]
async fn mouse_drag_moves_tab_into_another_folder() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.app.editor_area = Rect::new(0, 3, 80, 20);

    // Editor rows: Work header 0, Mail 1, Calendar 2, News header 4, Daily 5.
    ctx.mouse(MouseEventKind::Down(MouseButton::Left), 3 + 1);
    assert!(ctx.app.session.drag().is_dragging());

    ctx.mouse(MouseEventKind::Drag(MouseButton::Left), 3 + 5);
    ctx.mouse(MouseEventKind::Up(MouseButton::Left), 3 + 5);

    assert!(!ctx.app.session.drag().is_dragging());
    assert_eq!(ctx.tab_names(0), ["Calendar"]);
    assert_eq!(ctx.tab_names(1), ["Mail", "Daily"]);
    assert_eq!(
        ctx.app.selected_item(),
        Some(EditorItem::Tab(TabPosition::new(1, 0)))
    );
}

#[tokio::test(start_paused = true)]
async fn click_without_moving_changes_nothing() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.app.editor_area = Rect::new(0, 3, 80, 20);

    ctx.mouse(MouseEventKind::Down(MouseButton::Left), 3 + 2);
    ctx.mouse(MouseEventKind::Up(MouseButton::Left), 3 + 2);

    assert_eq!(ctx.tab_names(0), ["Mail", "Calendar"]);
    assert!(ctx.app.session.pipeline_state().is_idle());
    assert_eq!(
        ctx.app.selected_item(),
        Some(EditorItem::Tab(TabPosition::new(0, 1)))
    );
}

#[tokio::test(start_paused = true)]
async fn release_outside_the_editor_cancels_the_drag() {
    let mut ctx = TuiTestCtx::in_editor().await;
    ctx.app.editor_area = Rect::new(0, 3, 80, 20);

    ctx.mouse(MouseEventKind::Down(MouseButton::Left), 3 + 1);
    ctx.mouse(MouseEventKind::Up(MouseButton::Left), 1);

    assert!(!ctx.app.session.drag().is_dragging());
    assert_eq!(ctx.tab_names(0), ["Mail", "Calendar"]);
}

#[tokio::test(start_paused = true)]
async fn mouse_is_ignored_on_the_start_page() {
    let mut ctx = TuiTestCtx::loaded().await;
    ctx.app.editor_area = Rect::new(0, 3, 80, 20);
    ctx.mouse(MouseEventKind::Down(MouseButton::Left), 3 + 1);

    assert!(!ctx.app.session.drag().is_dragging());
}

#[tokio::test(start_paused = true)]
async fn export_writes_dated_file_and_toasts() {
    let mut ctx = TuiTestCtx::loaded().await;
    ctx.key(KeyCode::Char('x'));

    let (severity, message) = ctx.toast().expect("toast");
    assert_eq!(severity, Severity::Success);
    assert!(message.starts_with("Exported to "), "{message}");

    let files = std::fs::read_dir(ctx.tmp.path().join("exports"))
        .expect("exports dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("bookmarks-") && files[0].ends_with(".json"), "{files:?}");
}

#[tokio::test(start_paused = true)]
async fn import_reads_file_then_replaces_after_confirmation() {
    let mut ctx = TuiTestCtx::loaded().await;
    let path = ctx.tmp.path().join("import.json");
    std::fs::write(&path, r#"[{"name":"Imported","tabs":[]}]"#).expect("write import");

    ctx.key(KeyCode::Char('i'));
    ctx.type_text(&path.to_string_lossy());
    ctx.key(KeyCode::Enter);
    assert!(matches!(ctx.app.input, Input::Confirm(Confirm::Import { .. })));
    assert_eq!(ctx.folder_names(), ["Work", "News", "Dev"]);

    ctx.key(KeyCode::Char('y'));
    assert_eq!(ctx.folder_names(), ["Imported"]);
    let (severity, message) = ctx.toast().expect("toast");
    assert_eq!(severity, Severity::Success);
    assert_eq!(message, "Import complete");
}

#[tokio::test(start_paused = true)]
async fn import_of_missing_file_reports_error() {
    let mut ctx = TuiTestCtx::loaded().await;
    let path = ctx.tmp.path().join("missing.json");

    ctx.key(KeyCode::Char('i'));
    ctx.type_text(&path.to_string_lossy());
    ctx.key(KeyCode::Enter);

    assert_eq!(ctx.app.input, Input::Normal);
    let (severity, _) = ctx.toast().expect("toast");
    assert_eq!(severity, Severity::Error);
}

#[test]
fn editor_lines_mark_empty_folders_and_arrows() {
    let doc = Document::new(
        vec![Folder::new("Empty"), Folder::new("Other")],
        SearchEngine::Yandex,
    );
    let view = project_editor(&doc, None, EditorMetrics::default(), ViewRevision::default());
    let lines = editor_lines(&view, Some(EditorItem::Folder(0)))
        .iter()
        .map(line_to_string)
        .collect::<Vec<_>>();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "▸ Empty  ↑↓");
    assert_eq!(lines[1], "    (empty, drop tabs here)");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "▸ Other  ↑↓");
}
