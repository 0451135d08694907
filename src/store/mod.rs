// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence on disk.
//!
//! The client keeps a per-device [`LocalMirror`] of every document it has seen; the bundled
//! server keeps all accounts in a single [`UsersFile`].

mod error;
pub(crate) mod helpers;
pub mod mirror;
pub mod users;

pub use error::StoreError;
pub use mirror::LocalMirror;
pub use users::{UsersFile, USERS_FILENAME};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Flushes file contents and the rename to stable storage where the platform allows it.
    Durable,
}
