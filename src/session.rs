// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One user's editing session.
//!
//! [`Session`] owns the document, the local mirror, the save pipeline and the drag controller.
//! Every change goes through [`Session::apply`], which writes the mirror, schedules a remote save
//! and re-renders, in that order. No-ops trigger none of the three.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use url::Url;

use crate::drag::{DragController, DropError};
use crate::format::{export_file_name, export_folders, import_folders, ImportError};
use crate::model::{Document, TabPosition, UserId};
use crate::notify::Notifier;
use crate::ops::{apply_op, ApplyError, ApplyOutcome, Op};
use crate::remote::RemoteStore;
use crate::render::{
    project_editor, project_folders, EditorMetrics, EditorView, FolderCard, ViewRevision,
};
use crate::store::helpers::write_atomic;
use crate::store::{LocalMirror, StoreError};
use crate::sync::{PipelineState, PipelineStats, SaveConfig, SavePipeline};

/// What to show when the remote read fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadFallback {
    /// Start from the empty document and overwrite the mirror with it.
    #[default]
    EmptyDocument,
    /// Start from the mirrored document when there is one.
    LocalMirror,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub save: SaveConfig,
    pub load_fallback: LoadFallback,
    pub editor: EditorMetrics,
}

/// Where the document shown after [`Session::load`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Mirror,
    Empty,
}

#[derive(Debug)]
pub enum SessionError {
    Apply(ApplyError),
    Import(ImportError),
    Export(serde_json::Error),
    Store(StoreError),
    Drop(DropError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apply(source) => write!(f, "{source}"),
            Self::Import(source) => write!(f, "import failed: {source}"),
            Self::Export(source) => write!(f, "export failed: {source}"),
            Self::Store(source) => write!(f, "{source}"),
            Self::Drop(source) => write!(f, "drop ignored: {source}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Apply(source) => Some(source),
            Self::Import(source) => Some(source),
            Self::Export(source) => Some(source),
            Self::Store(source) => Some(source),
            Self::Drop(source) => Some(source),
        }
    }
}

impl From<ApplyError> for SessionError {
    fn from(source: ApplyError) -> Self {
        Self::Apply(source)
    }
}

impl From<StoreError> for SessionError {
    fn from(source: StoreError) -> Self {
        Self::Store(source)
    }
}

impl From<DropError> for SessionError {
    fn from(source: DropError) -> Self {
        Self::Drop(source)
    }
}

#[derive(Debug)]
pub struct Session {
    user: UserId,
    mirror: LocalMirror,
    notifier: Notifier,
    doc_tx: watch::Sender<Document>,
    pipeline: SavePipeline,
    drag: DragController,
    config: SessionConfig,
    load_source: LoadSource,
    revision: ViewRevision,
    cards: Vec<FolderCard>,
    editor: EditorView,
}

impl Session {
    /// Loads `user`'s document and starts the save pipeline.
    ///
    /// A failed remote read falls back per [`SessionConfig::load_fallback`]; the resulting
    /// document is written to the mirror either way. Local write failures are reported, not fatal.
    pub async fn load<R: RemoteStore>(
        user: UserId,
        remote: Arc<R>,
        mirror: LocalMirror,
        notifier: Notifier,
        config: SessionConfig,
    ) -> Self {
        if let Err(err) = mirror.set_current_user(&user) {
            warn!(user = %user, %err, "cannot record current user");
            notifier.error(format!("Cannot record current user: {err}"));
        }

        let (doc, load_source) = match remote.fetch_document(&user).await {
            Ok(doc) => (doc, LoadSource::Remote),
            Err(err) => {
                warn!(user = %user, %err, "remote load failed");
                notifier.info("Could not load remote data; working locally");
                fallback_document(&mirror, &user, config.load_fallback)
            }
        };
        info!(
            user = %user,
            source = ?load_source,
            folders = doc.folders().len(),
            "session loaded"
        );

        let (doc_tx, doc_rx) = watch::channel(doc);
        let pipeline =
            SavePipeline::spawn(user.clone(), remote, doc_rx, notifier.clone(), config.save);

        let revision = ViewRevision::default();
        let (cards, editor) = {
            let doc = doc_tx.borrow();
            (
                project_folders(&doc),
                project_editor(&doc, None, config.editor, revision),
            )
        };
        let mut session = Self {
            user,
            mirror,
            notifier,
            doc_tx,
            pipeline,
            drag: DragController::new(),
            config,
            load_source,
            revision,
            cards,
            editor,
        };
        session.write_mirror();
        session.rerender();
        session
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn document(&self) -> watch::Ref<'_, Document> {
        self.doc_tx.borrow()
    }

    pub fn revision(&self) -> ViewRevision {
        self.revision
    }

    pub fn cards(&self) -> &[FolderCard] {
        &self.cards
    }

    pub fn editor(&self) -> &EditorView {
        &self.editor
    }

    pub fn mirror(&self) -> &LocalMirror {
        &self.mirror
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn pipeline_state(&self) -> PipelineState {
        self.pipeline.state()
    }

    pub fn set_editor_metrics(&mut self, metrics: EditorMetrics) {
        if self.config.editor != metrics {
            self.config.editor = metrics;
            self.project_editor();
        }
    }

    /// Applies `op`. On change: mirror write, then save scheduling, then a full re-render.
    pub fn apply(&mut self, op: Op) -> Result<ApplyOutcome, SessionError> {
        let mut result = Ok(ApplyOutcome::Unchanged);
        self.doc_tx.send_if_modified(|doc| {
            result = apply_op(doc, &op);
            matches!(result, Ok(ApplyOutcome::Changed))
        });

        match result {
            Err(err) => {
                debug!(op = op.kind().as_str(), %err, "op rejected");
                self.notifier.error(err.to_string());
                Err(err.into())
            }
            Ok(ApplyOutcome::Unchanged) => {
                debug!(op = op.kind().as_str(), "op was a no-op");
                Ok(ApplyOutcome::Unchanged)
            }
            Ok(ApplyOutcome::Changed) => {
                debug!(op = op.kind().as_str(), "op applied");
                self.write_mirror();
                self.pipeline.schedule();
                self.rerender();
                Ok(ApplyOutcome::Changed)
            }
        }
    }

    /// Replaces all folders with the contents of an export file.
    ///
    /// Callers confirm with the user first; a malformed file leaves the document untouched.
    pub fn import_folders(&mut self, input: &str) -> Result<ApplyOutcome, SessionError> {
        let folders = match import_folders(input) {
            Ok(folders) => folders,
            Err(err) => {
                warn!(user = %self.user, %err, "import rejected");
                self.notifier.error("Import failed");
                return Err(SessionError::Import(err));
            }
        };
        let outcome = self.apply(Op::ReplaceFolders { folders })?;
        self.notifier.success("Import complete");
        Ok(outcome)
    }

    pub fn export_folders(&self) -> Result<String, SessionError> {
        export_folders(&self.doc_tx.borrow()).map_err(SessionError::Export)
    }

    /// Writes the export file for `date` into `dir` and returns its path.
    pub fn export_to_dir(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf, SessionError> {
        let text = self.export_folders()?;
        let path = dir.join(export_file_name(date));
        write_atomic(dir, &path, text.as_bytes(), self.mirror.durability())?;
        info!(path = %path.display(), "exported folders");
        Ok(path)
    }

    pub fn search_url(&self, query: &str) -> Option<Url> {
        self.doc_tx.borrow().search_engine().search_url(query)
    }

    /// Starts dragging the tab at `source`. Returns `false` when no such tab is rendered.
    pub fn drag_start(&mut self, source: TabPosition) -> bool {
        if self.doc_tx.borrow().tab(source).is_none() {
            return false;
        }
        self.drag.drag_start(source, self.revision);
        self.project_editor();
        true
    }

    /// Moves the drag preview under the pointer. Returns the hovered folder.
    pub fn drag_over(&mut self, pointer_y: u16) -> Option<usize> {
        if !self.drag.is_dragging() {
            return None;
        }
        let folder = self.editor.folder_at(pointer_y)?;
        let siblings = self.editor.siblings(folder);
        self.drag.drag_over(folder, &siblings, pointer_y)?;
        self.project_editor();
        Some(folder)
    }

    /// Drops onto `folder`, moving the dragged tab to its previewed position.
    pub fn drop_on(&mut self, folder: usize) -> Result<ApplyOutcome, SessionError> {
        let op = match self.drag.drop(folder, self.revision) {
            Ok(op) => op,
            Err(err) => {
                debug!(%err, "drop ignored");
                return Err(err.into());
            }
        };
        self.apply(op)
    }

    pub fn drag_end(&mut self) {
        if self.drag.is_dragging() {
            self.drag.drag_end();
            self.project_editor();
        }
    }

    /// Flushes any pending save and stops the pipeline.
    pub async fn shutdown(self) -> PipelineStats {
        self.pipeline.shutdown().await
    }

    fn write_mirror(&self) {
        if let Err(err) = self.mirror.write(&self.user, &self.doc_tx.borrow()) {
            warn!(user = %self.user, %err, "mirror write failed");
            self.notifier.error(format!("Local save failed: {err}"));
        }
    }

    fn rerender(&mut self) {
        self.revision = self.revision.next();
        self.cards = project_folders(&self.doc_tx.borrow());
        self.project_editor();
    }

    fn project_editor(&mut self) {
        self.editor = project_editor(
            &self.doc_tx.borrow(),
            self.drag.preview(),
            self.config.editor,
            self.revision,
        );
    }
}

fn fallback_document(
    mirror: &LocalMirror,
    user: &UserId,
    policy: LoadFallback,
) -> (Document, LoadSource) {
    if policy == LoadFallback::LocalMirror {
        match mirror.read(user) {
            Ok(Some(doc)) => return (doc, LoadSource::Mirror),
            Ok(None) => {}
            Err(err) => warn!(user = %user, %err, "mirror read failed"),
        }
    }
    (Document::default(), LoadSource::Empty)
}

#[cfg(test)]
mod tests;
