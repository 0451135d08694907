// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A [`Document`] is the full per-user state: ordered bookmark folders plus the selected search
//! engine. It is owned by exactly one session for one [`UserId`].

pub mod document;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod search;

pub use document::{Document, Folder, FolderDirection, Tab, TabField, TabPosition};
pub use ids::{IdError, UserId};
pub use search::{ParseSearchEngineError, SearchEngine};
