// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editable folder/tab list with per-row geometry.
//!
//! Coordinates are character-cell rows relative to the top of the editor viewport. Each folder
//! occupies a header line, one line per tab (or a single placeholder line when empty) and a gap.

use super::ViewRevision;
use crate::drag::RowBounds;
use crate::model::{Document, SearchEngine, Tab, TabPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorMetrics {
    pub origin_y: u16,
    pub header_height: u16,
    pub row_height: u16,
    pub folder_gap: u16,
}

impl Default for EditorMetrics {
    fn default() -> Self {
        Self {
            origin_y: 0,
            header_height: 1,
            row_height: 1,
            folder_gap: 1,
        }
    }
}

/// Provisional placement of a dragged tab. `target.tab` is the insert index among the target
/// folder's tabs with the dragged tab taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPreview {
    pub source: TabPosition,
    pub target: TabPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorRow {
    /// Position of the tab in the document, not in the preview layout.
    pub position: TabPosition,
    pub name: String,
    pub url: String,
    pub bounds: RowBounds,
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorFolder {
    pub index: usize,
    pub name: String,
    pub header: RowBounds,
    /// Header plus every row (or the empty placeholder) of this folder.
    pub span: RowBounds,
    pub can_move_up: bool,
    pub can_move_down: bool,
    pub rows: Vec<EditorRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub revision: ViewRevision,
    pub search_engine: SearchEngine,
    pub folders: Vec<EditorFolder>,
    pub height: u16,
}

impl EditorView {
    pub fn folder_at(&self, y: u16) -> Option<usize> {
        self.folders
            .iter()
            .find(|folder| folder.span.contains(y))
            .map(|folder| folder.index)
    }

    pub fn row_at(&self, y: u16) -> Option<&EditorRow> {
        self.folders
            .iter()
            .flat_map(|folder| folder.rows.iter())
            .find(|row| row.bounds.contains(y))
    }

    /// Bounds of the rows in `folder` that are not being dragged, in display order.
    pub fn siblings(&self, folder: usize) -> Vec<RowBounds> {
        self.folders
            .get(folder)
            .map(|folder| {
                folder
                    .rows
                    .iter()
                    .filter(|row| !row.dragging)
                    .map(|row| row.bounds)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn dragging(&self) -> Option<TabPosition> {
        self.folders
            .iter()
            .flat_map(|folder| folder.rows.iter())
            .find(|row| row.dragging)
            .map(|row| row.position)
    }
}

fn preview_lists<'a>(
    doc: &'a Document,
    preview: Option<DragPreview>,
) -> (Vec<Vec<(TabPosition, &'a Tab)>>, Option<TabPosition>) {
    let mut lists = doc
        .folders()
        .iter()
        .enumerate()
        .map(|(folder_index, folder)| {
            folder
                .tabs()
                .iter()
                .enumerate()
                .map(|(tab_index, tab)| (TabPosition::new(folder_index, tab_index), tab))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let Some(preview) = preview else {
        return (lists, None);
    };
    if doc.tab(preview.source).is_none() || preview.target.folder >= lists.len() {
        return (lists, None);
    }

    let item = lists[preview.source.folder].remove(preview.source.tab);
    let target = &mut lists[preview.target.folder];
    let at = preview.target.tab.min(target.len());
    target.insert(at, item);
    (lists, Some(preview.source))
}

/// Builds the editor view. An invalid preview is ignored.
pub fn project_editor(
    doc: &Document,
    preview: Option<DragPreview>,
    metrics: EditorMetrics,
    revision: ViewRevision,
) -> EditorView {
    let (lists, dragging) = preview_lists(doc, preview);
    let folder_count = doc.folders().len();

    let mut y = metrics.origin_y;
    let mut folders = Vec::with_capacity(folder_count);
    for (index, (folder, tabs)) in doc.folders().iter().zip(lists).enumerate() {
        let header = RowBounds::new(y, metrics.header_height);
        y = y.saturating_add(metrics.header_height);

        let mut rows = Vec::with_capacity(tabs.len());
        for (position, tab) in tabs {
            rows.push(EditorRow {
                position,
                name: tab.name().to_owned(),
                url: tab.url().to_owned(),
                bounds: RowBounds::new(y, metrics.row_height),
                dragging: dragging == Some(position),
            });
            y = y.saturating_add(metrics.row_height);
        }
        if rows.is_empty() {
            y = y.saturating_add(metrics.row_height);
        }

        folders.push(EditorFolder {
            index,
            name: folder.name().to_owned(),
            header,
            span: RowBounds::new(header.top, y - header.top),
            can_move_up: index > 0,
            can_move_down: index + 1 < folder_count,
            rows,
        });
        y = y.saturating_add(metrics.folder_gap);
    }

    EditorView {
        revision,
        search_engine: doc.search_engine(),
        folders,
        height: y - metrics.origin_y,
    }
}
