// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Startpage: bookmark folders with a local mirror and a debounced, rate-limited remote save
//! pipeline.
//!
//! The [`session::Session`] ties the layers together: [`ops`] mutate the [`model`], [`store`]
//! mirrors every change locally, [`sync`] pushes snapshots to a [`remote`] store, and [`render`]
//! projects the document for the [`tui`]. The [`server`] module is the matching remote store.

pub mod accounts;
pub mod drag;
pub mod format;
pub mod model;
pub mod notify;
pub mod ops;
pub mod remote;
pub mod render;
pub mod server;
pub mod session;
pub mod store;
pub mod sync;
pub mod tui;

#[cfg(test)]
mod test_utils;
