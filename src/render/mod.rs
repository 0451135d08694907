// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Projection of the document into view state.
//!
//! Projectors are pure: they read a [`Document`](crate::model::Document) (plus an optional drag
//! preview) and never mutate it. Every full rebuild is stamped with a [`ViewRevision`]; indices
//! captured from an older revision must not be acted upon.

use std::fmt;

pub mod editor;
pub mod grid;

pub use editor::{project_editor, DragPreview, EditorFolder, EditorMetrics, EditorRow, EditorView};
pub use grid::{project_folders, FolderCard, TabLink};

/// Monotonic stamp of a full view rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewRevision(u64);

impl ViewRevision {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for ViewRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
