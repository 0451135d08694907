// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::mpsc;
use tokio::time::sleep;

use super::{LoadFallback, LoadSource, Session, SessionConfig, SessionError};
use crate::drag::DropError;
use crate::format::ImportError;
use crate::model::fixtures::{folder_names, tab_names, three_folders, user};
use crate::model::{
    Document, Folder, FolderDirection, SearchEngine, Tab, TabField, TabPosition,
};
use crate::notify::{Notice, Notifier, Severity};
use crate::ops::{ApplyError, ApplyOutcome, Op};
use crate::remote::memory::MemoryRemote;
use crate::store::LocalMirror;
use crate::test_utils::TempDir;

struct SessionTestCtx {
    _tmp: TempDir,
    remote: Arc<MemoryRemote>,
    mirror: LocalMirror,
    notices: mpsc::UnboundedReceiver<Notice>,
    session: Session,
}

impl SessionTestCtx {
    async fn with_remote(remote: MemoryRemote, config: SessionConfig) -> Self {
        let tmp = TempDir::new("session");
        let mirror = LocalMirror::new(tmp.path());
        let remote = Arc::new(remote);
        let (notifier, notices) = Notifier::channel();
        let session = Session::load(
            user("alice"),
            Arc::clone(&remote),
            mirror.clone(),
            notifier,
            config,
        )
        .await;
        Self {
            _tmp: tmp,
            remote,
            mirror,
            notices,
            session,
        }
    }

    async fn loaded() -> Self {
        let remote = MemoryRemote::new().with_document(&user("alice"), three_folders());
        Self::with_remote(remote, SessionConfig::default()).await
    }

    fn mirrored(&self) -> Option<Document> {
        self.mirror.read(&user("alice")).unwrap()
    }

    fn severities(&mut self) -> Vec<Severity> {
        let mut out = Vec::new();
        while let Ok(notice) = self.notices.try_recv() {
            out.push(notice.severity());
        }
        out
    }
}

#[tokio::test(start_paused = true)]
async fn load_writes_the_remote_document_into_the_mirror() {
    let ctx = SessionTestCtx::loaded().await;

    assert_eq!(ctx.session.load_source(), LoadSource::Remote);
    assert_eq!(*ctx.session.document(), three_folders());
    assert_eq!(ctx.mirrored(), Some(three_folders()));
    assert_eq!(ctx.mirror.current_user().unwrap(), Some(user("alice")));
    assert_eq!(ctx.session.cards().len(), 3);
    assert!(ctx.remote.saves().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_load_falls_back_to_the_empty_document() {
    let remote = MemoryRemote::new().with_document(&user("alice"), three_folders());
    remote.set_fail_fetch(true);
    let ctx = SessionTestCtx::with_remote(remote, SessionConfig::default()).await;

    assert_eq!(ctx.session.load_source(), LoadSource::Empty);
    assert_eq!(*ctx.session.document(), Document::default());
    assert_eq!(ctx.mirrored(), Some(Document::default()));
}

#[tokio::test(start_paused = true)]
async fn mirror_fallback_reuses_the_cached_document() {
    let tmp = TempDir::new("session-fallback");
    let mirror = LocalMirror::new(tmp.path());
    mirror.write(&user("alice"), &three_folders()).unwrap();

    let remote = Arc::new(MemoryRemote::new());
    remote.set_fail_fetch(true);
    let config = SessionConfig {
        load_fallback: LoadFallback::LocalMirror,
        ..SessionConfig::default()
    };
    let (notifier, _notices) = Notifier::channel();
    let session = Session::load(user("alice"), remote, mirror.clone(), notifier, config).await;

    assert_eq!(session.load_source(), LoadSource::Mirror);
    assert_eq!(*session.document(), three_folders());
    assert_eq!(mirror.read(&user("alice")).unwrap(), Some(three_folders()));
}

#[tokio::test(start_paused = true)]
async fn mirror_tracks_every_valid_mutation() {
    let mut ctx = SessionTestCtx::loaded().await;
    let ops = [
        Op::AddFolder {
            name: "  Fresh ".to_owned(),
        },
        Op::AddTab {
            folder: 3,
            name: "Site".to_owned(),
            url: "https://site.test".to_owned(),
        },
        Op::SetTabField {
            position: TabPosition::new(0, 0),
            field: TabField::Url,
            value: String::new(),
        },
        Op::MoveFolder {
            index: 3,
            direction: FolderDirection::Up,
        },
        Op::MoveTab {
            from: TabPosition::new(3, 2),
            to: TabPosition::new(0, 0),
        },
        Op::SetSearchEngine {
            engine: SearchEngine::Google,
        },
        Op::DeleteTab {
            position: TabPosition::new(1, 0),
        },
    ];

    for op in ops {
        assert_eq!(ctx.session.apply(op).unwrap(), ApplyOutcome::Changed);
        assert_eq!(ctx.mirrored().as_ref(), Some(&*ctx.session.document()));
    }
    assert_eq!(folder_names(&ctx.session.document()), ["Work", "News", "Fresh", "Dev"]);
    assert_eq!(ctx.session.document().search_engine(), SearchEngine::Google);
}

#[tokio::test(start_paused = true)]
async fn no_op_and_rejected_ops_trigger_nothing() {
    let mut ctx = SessionTestCtx::loaded().await;
    let revision = ctx.session.revision();

    let outcome = ctx
        .session
        .apply(Op::MoveFolder {
            index: 0,
            direction: FolderDirection::Up,
        })
        .unwrap();
    assert_eq!(outcome, ApplyOutcome::Unchanged);

    let err = ctx
        .session
        .apply(Op::AddFolder {
            name: "   ".to_owned(),
        })
        .unwrap_err();
    assert!(matches!(err, SessionError::Apply(ApplyError::EmptyFolderName)), "{err:?}");

    assert_eq!(ctx.session.revision(), revision);
    assert_eq!(ctx.session.pipeline_state().stats().scheduled, 0);
    assert_eq!(*ctx.session.document(), three_folders());
    assert_eq!(ctx.severities(), vec![Severity::Error]);
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_reach_the_remote_as_one_save() {
    let mut ctx = SessionTestCtx::loaded().await;

    for n in 0..4 {
        ctx.session
            .apply(Op::RenameFolder {
                index: 0,
                name: format!("Work {n}"),
            })
            .unwrap();
        sleep(Duration::from_millis(300)).await;
    }
    sleep(Duration::from_millis(1500)).await;

    let saves = ctx.remote.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].doc.folders()[0].name(), "Work 3");
    assert_eq!(saves[0].doc, *ctx.session.document());
}

#[tokio::test(start_paused = true)]
async fn import_replaces_folders_and_saves_once() {
    let mut ctx = SessionTestCtx::loaded().await;

    let outcome = ctx
        .session
        .import_folders(r#"[{"name":"Work","tabs":[{"name":"Mail","url":"http://mail.test"}]}]"#)
        .unwrap();
    assert_eq!(outcome, ApplyOutcome::Changed);

    let expected = vec![Folder::with_tabs("Work", vec![Tab::new("Mail", "http://mail.test")])];
    assert_eq!(ctx.session.document().folders(), expected.as_slice());

    sleep(Duration::from_millis(2500)).await;
    let saves = ctx.remote.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].doc.folders(), expected.as_slice());
    assert_eq!(
        ctx.severities(),
        vec![Severity::Success, Severity::Success]
    );
}

#[tokio::test(start_paused = true)]
async fn malformed_import_changes_nothing() {
    let mut ctx = SessionTestCtx::loaded().await;
    let revision = ctx.session.revision();

    let err = ctx.session.import_folders(r#"{"not":"an array"}"#).unwrap_err();
    assert!(matches!(err, SessionError::Import(ImportError::NotAnArray)), "{err:?}");

    sleep(Duration::from_millis(2500)).await;
    assert_eq!(*ctx.session.document(), three_folders());
    assert_eq!(ctx.session.revision(), revision);
    assert!(ctx.remote.saves().is_empty());
    assert_eq!(ctx.severities(), vec![Severity::Error]);
}

#[tokio::test(start_paused = true)]
async fn deleting_a_folder_reindexes_and_invalidates_old_drags() {
    let mut ctx = SessionTestCtx::loaded().await;

    assert!(ctx.session.drag_start(TabPosition::new(2, 0)));
    let before = ctx.session.revision();

    ctx.session.apply(Op::DeleteFolder { index: 1 }).unwrap();
    assert_eq!(folder_names(&ctx.session.document()), ["Work", "Dev"]);
    assert_eq!(ctx.session.cards()[1].name, "Dev");
    assert_eq!(ctx.session.cards()[1].index, 1);
    assert!(ctx.session.revision() > before);

    let err = ctx.session.drop_on(2).unwrap_err();
    assert!(
        matches!(err, SessionError::Drop(DropError::StaleRevision { .. })),
        "{err:?}"
    );
    ctx.session.drag_end();
    assert_eq!(folder_names(&ctx.session.document()), ["Work", "Dev"]);
}

#[tokio::test(start_paused = true)]
async fn drag_and_drop_moves_a_tab_across_folders() {
    let mut ctx = SessionTestCtx::loaded().await;
    let total = ctx.session.document().tab_count();

    // Editor rows: Work header 0, Mail 1, Calendar 2; News header 4, Daily 5; Dev header 7, ...
    assert!(ctx.session.drag_start(TabPosition::new(0, 0)));
    assert_eq!(ctx.session.editor().dragging(), Some(TabPosition::new(0, 0)));

    assert_eq!(ctx.session.drag_over(5), Some(1));
    assert_eq!(ctx.session.drag().preview().map(|p| p.target), Some(TabPosition::new(1, 0)));

    let outcome = ctx.session.drop_on(1).unwrap();
    ctx.session.drag_end();

    assert_eq!(outcome, ApplyOutcome::Changed);
    assert_eq!(tab_names(&ctx.session.document(), 0), ["Calendar"]);
    assert_eq!(tab_names(&ctx.session.document(), 1), ["Mail", "Daily"]);
    assert_eq!(ctx.session.document().tab_count(), total);
    assert_eq!(ctx.session.editor().dragging(), None);
    assert_eq!(ctx.mirrored().as_ref(), Some(&*ctx.session.document()));
}

#[tokio::test(start_paused = true)]
async fn drop_in_place_does_not_save() {
    let mut ctx = SessionTestCtx::loaded().await;

    assert!(ctx.session.drag_start(TabPosition::new(2, 1)));
    let outcome = ctx.session.drop_on(2).unwrap();
    ctx.session.drag_end();

    assert_eq!(outcome, ApplyOutcome::Unchanged);
    sleep(Duration::from_millis(2500)).await;
    assert!(ctx.remote.saves().is_empty());
}

#[tokio::test(start_paused = true)]
async fn drag_start_on_a_missing_tab_is_refused() {
    let mut ctx = SessionTestCtx::loaded().await;
    assert!(!ctx.session.drag_start(TabPosition::new(1, 4)));
    assert!(!ctx.session.drag().is_dragging());
    assert_eq!(ctx.session.drag_over(1), None);
}

#[tokio::test(start_paused = true)]
async fn search_uses_the_selected_engine() {
    let mut ctx = SessionTestCtx::loaded().await;
    ctx.session
        .apply(Op::SetSearchEngine {
            engine: SearchEngine::Google,
        })
        .unwrap();

    let url = ctx.session.search_url("cats").unwrap();
    assert!(url.as_str().contains("google.com/search?q=cats"), "{url}");
    assert_eq!(ctx.session.search_url("   "), None);
}

#[tokio::test(start_paused = true)]
async fn export_writes_a_dated_file() {
    let ctx = SessionTestCtx::loaded().await;
    let out = TempDir::new("export");
    let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();

    let path = ctx.session.export_to_dir(out.path(), date).unwrap();

    assert!(path.ends_with("bookmarks-2026-01-02.json"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(crate::format::import_folders(&text).unwrap(), three_folders().folders());
}

#[tokio::test(start_paused = true)]
async fn shutdown_flushes_the_pending_save() {
    let mut ctx = SessionTestCtx::loaded().await;
    ctx.session
        .apply(Op::AddFolder {
            name: "Late".to_owned(),
        })
        .unwrap();

    let stats = ctx.session.shutdown().await;

    assert_eq!(stats.sent, 1);
    let stored = ctx.remote.stored(&user("alice")).unwrap();
    assert_eq!(folder_names(&stored), ["Work", "News", "Dev", "Late"]);
}
