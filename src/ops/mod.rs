// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for documents.
//!
//! Every UI action is expressed as an [`Op`] and applied with [`apply_op`]. Validation failures
//! (empty required fields) are errors and leave the document untouched; stale or out-of-range
//! indices are silent no-ops reported as [`ApplyOutcome::Unchanged`], so callers only persist and
//! re-render when something actually changed.

use std::fmt;

use crate::model::{Document, Folder, FolderDirection, SearchEngine, Tab, TabField, TabPosition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    AddFolder {
        name: String,
    },
    RenameFolder {
        index: usize,
        name: String,
    },
    DeleteFolder {
        index: usize,
    },
    MoveFolder {
        index: usize,
        direction: FolderDirection,
    },
    AddTab {
        folder: usize,
        name: String,
        url: String,
    },
    SetTabField {
        position: TabPosition,
        field: TabField,
        value: String,
    },
    DeleteTab {
        position: TabPosition,
    },
    /// Removes the tab at `from`, then inserts it at `to` (indexed after the removal).
    MoveTab {
        from: TabPosition,
        to: TabPosition,
    },
    SetSearchEngine {
        engine: SearchEngine,
    },
    /// Replaces the whole folder sequence (import).
    ReplaceFolders {
        folders: Vec<Folder>,
    },
}

impl Op {
    pub fn kind(&self) -> OpKind {
        match self {
            Self::AddFolder { .. } => OpKind::AddFolder,
            Self::RenameFolder { .. } => OpKind::RenameFolder,
            Self::DeleteFolder { .. } => OpKind::DeleteFolder,
            Self::MoveFolder { .. } => OpKind::MoveFolder,
            Self::AddTab { .. } => OpKind::AddTab,
            Self::SetTabField { .. } => OpKind::SetTabField,
            Self::DeleteTab { .. } => OpKind::DeleteTab,
            Self::MoveTab { .. } => OpKind::MoveTab,
            Self::SetSearchEngine { .. } => OpKind::SetSearchEngine,
            Self::ReplaceFolders { .. } => OpKind::ReplaceFolders,
        }
    }

    /// Structural ops insert or remove items, which shifts indices held by the view.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::AddFolder { .. }
                | Self::DeleteFolder { .. }
                | Self::MoveFolder { .. }
                | Self::AddTab { .. }
                | Self::DeleteTab { .. }
                | Self::MoveTab { .. }
                | Self::ReplaceFolders { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    AddFolder,
    RenameFolder,
    DeleteFolder,
    MoveFolder,
    AddTab,
    SetTabField,
    DeleteTab,
    MoveTab,
    SetSearchEngine,
    ReplaceFolders,
}

impl OpKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddFolder => "add_folder",
            Self::RenameFolder => "rename_folder",
            Self::DeleteFolder => "delete_folder",
            Self::MoveFolder => "move_folder",
            Self::AddTab => "add_tab",
            Self::SetTabField => "set_tab_field",
            Self::DeleteTab => "delete_tab",
            Self::MoveTab => "move_tab",
            Self::SetSearchEngine => "set_search_engine",
            Self::ReplaceFolders => "replace_folders",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Changed,
    Unchanged,
}

impl ApplyOutcome {
    pub fn is_changed(self) -> bool {
        self == Self::Changed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    EmptyFolderName,
    EmptyTabName,
    EmptyTabUrl,
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFolderName => f.write_str("folder name must not be empty"),
            Self::EmptyTabName => f.write_str("tab name must not be empty"),
            Self::EmptyTabUrl => f.write_str("tab url must not be empty"),
        }
    }
}

impl std::error::Error for ApplyError {}

pub fn apply_op(doc: &mut Document, op: &Op) -> Result<ApplyOutcome, ApplyError> {
    match op {
        Op::AddFolder { name } => add_folder(doc, name),
        Op::RenameFolder { index, name } => Ok(rename_folder(doc, *index, name)),
        Op::DeleteFolder { index } => Ok(delete_folder(doc, *index)),
        Op::MoveFolder { index, direction } => Ok(move_folder(doc, *index, *direction)),
        Op::AddTab { folder, name, url } => add_tab(doc, *folder, name, url),
        Op::SetTabField {
            position,
            field,
            value,
        } => Ok(set_tab_field(doc, *position, *field, value)),
        Op::DeleteTab { position } => Ok(delete_tab(doc, *position)),
        Op::MoveTab { from, to } => Ok(move_tab(doc, *from, *to)),
        Op::SetSearchEngine { engine } => {
            if doc.search_engine() == *engine {
                return Ok(ApplyOutcome::Unchanged);
            }
            doc.set_search_engine(*engine);
            Ok(ApplyOutcome::Changed)
        }
        Op::ReplaceFolders { folders } => {
            *doc.folders_mut() = folders.clone();
            Ok(ApplyOutcome::Changed)
        }
    }
}

// Per-op implementation helpers used by `apply_op`.
include!("ops_impl.rs");
