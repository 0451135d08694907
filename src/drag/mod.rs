// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drag-and-drop reordering of tabs.

pub mod controller;
pub mod geometry;

pub use controller::{encode_payload, parse_payload, DragController, DragState, DropError};
pub use geometry::{nearest_sibling_below, RowBounds};
