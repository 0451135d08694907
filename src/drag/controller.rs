// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drag state machine: `Idle -> Dragging -> Idle`.
//!
//! `drag_start` captures the source position as a `"<folder>,<tab>"` transfer payload together
//! with the view revision it was taken from. `drag_over` only moves the preview. `drop` turns the
//! payload and the preview into a [`Op::MoveTab`]; it never touches the document itself.
//! `drag_end` always returns to `Idle`.

use std::fmt;

use super::geometry::{nearest_sibling_below, RowBounds};
use crate::model::TabPosition;
use crate::ops::Op;
use crate::render::{DragPreview, ViewRevision};

pub fn encode_payload(source: TabPosition) -> String {
    format!("{},{}", source.folder, source.tab)
}

pub fn parse_payload(payload: &str) -> Option<TabPosition> {
    let (folder, tab) = payload.split_once(',')?;
    let folder = folder.trim().parse().ok()?;
    let tab = tab.trim().parse().ok()?;
    Some(TabPosition::new(folder, tab))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    payload: String,
    revision: ViewRevision,
    source: TabPosition,
    preview: TabPosition,
}

impl DragSession {
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn revision(&self) -> ViewRevision {
        self.revision
    }

    pub fn source(&self) -> TabPosition {
        self.source
    }

    pub fn preview(&self) -> TabPosition {
        self.preview
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropError {
    NotDragging,
    StaleRevision {
        payload: ViewRevision,
        current: ViewRevision,
    },
    MalformedPayload(String),
    /// The drop target is not the folder the preview was placed in.
    NoDestination { folder: usize },
}

impl fmt::Display for DropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDragging => f.write_str("no drag in progress"),
            Self::StaleRevision { payload, current } => {
                write!(f, "drag started on view {payload}, current view is {current}")
            }
            Self::MalformedPayload(payload) => write!(f, "malformed drag payload {payload:?}"),
            Self::NoDestination { folder } => {
                write!(f, "no drop position resolved in folder {folder}")
            }
        }
    }
}

impl std::error::Error for DropError {}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Preview to hand to the editor projector while dragging.
    pub fn preview(&self) -> Option<DragPreview> {
        self.session().map(|session| DragPreview {
            source: session.source,
            target: session.preview,
        })
    }

    /// Starts a drag of the tab at `source`. The preview starts at the source position.
    pub fn drag_start(&mut self, source: TabPosition, revision: ViewRevision) {
        self.state = DragState::Dragging(DragSession {
            payload: encode_payload(source),
            revision,
            source,
            preview: source,
        });
    }

    /// Moves the preview into `folder`, before the nearest sibling below `pointer_y`.
    ///
    /// `siblings` are the folder's rows without the dragged row. Returns the new preview position.
    pub fn drag_over(
        &mut self,
        folder: usize,
        siblings: &[RowBounds],
        pointer_y: u16,
    ) -> Option<TabPosition> {
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        let tab = nearest_sibling_below(siblings, pointer_y).unwrap_or(siblings.len());
        session.preview = TabPosition::new(folder, tab);
        Some(session.preview)
    }

    /// Resolves a drop on `folder` into a move operation.
    ///
    /// The state stays `Dragging` until [`Self::drag_end`].
    pub fn drop(&self, folder: usize, current: ViewRevision) -> Result<Op, DropError> {
        let session = self.session().ok_or(DropError::NotDragging)?;
        if session.revision != current {
            return Err(DropError::StaleRevision {
                payload: session.revision,
                current,
            });
        }
        let from = parse_payload(&session.payload)
            .ok_or_else(|| DropError::MalformedPayload(session.payload.clone()))?;
        if session.preview.folder != folder {
            return Err(DropError::NoDestination { folder });
        }
        Ok(Op::MoveTab {
            from,
            to: session.preview,
        })
    }

    pub fn drag_end(&mut self) {
        self.state = DragState::Idle;
    }
}
