// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::helpers::{encode_key_segment, read_optional, write_atomic};
use super::{StoreError, WriteDurability};
use crate::format::{document_from_str, document_to_string};
use crate::model::{Document, UserId};

const CURRENT_USER_FILENAME: &str = "current_user_id";
const ENTRY_PREFIX: &str = "data_";
const ENTRY_SUFFIX: &str = ".json";

/// Per-device cache of the last known document for each user.
///
/// One file per user (`data_<user>.json`) plus a `current_user_id` file. Every write replaces
/// the whole entry; there is no incremental update and no write log.
#[derive(Debug, Clone)]
pub struct LocalMirror {
    root: PathBuf,
    durability: WriteDurability,
}

impl LocalMirror {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_path(&self, user: &UserId) -> PathBuf {
        self.root.join(format!(
            "{ENTRY_PREFIX}{}{ENTRY_SUFFIX}",
            encode_key_segment(user.as_str())
        ))
    }

    pub fn current_user_path(&self) -> PathBuf {
        self.root.join(CURRENT_USER_FILENAME)
    }

    /// Overwrites the entry for `user` with `doc`.
    pub fn write(&self, user: &UserId, doc: &Document) -> Result<(), StoreError> {
        let path = self.entry_path(user);
        let text = document_to_string(doc).map_err(|source| StoreError::Document {
            path: path.clone(),
            source: Box::new(source),
        })?;
        write_atomic(&self.root, &path, text.as_bytes(), self.durability)?;
        debug!(user = %user, folders = doc.folders().len(), "mirror write");
        Ok(())
    }

    /// Returns the cached document for `user`, or `None` when nothing was written yet.
    pub fn read(&self, user: &UserId) -> Result<Option<Document>, StoreError> {
        let path = self.entry_path(user);
        let Some(text) = read_optional(&path)? else {
            return Ok(None);
        };
        let doc = document_from_str(&text).map_err(|source| StoreError::Document {
            path,
            source: Box::new(source),
        })?;
        Ok(Some(doc))
    }

    pub fn set_current_user(&self, user: &UserId) -> Result<(), StoreError> {
        let path = self.current_user_path();
        write_atomic(&self.root, &path, user.as_str().as_bytes(), self.durability)
    }

    pub fn current_user(&self) -> Result<Option<UserId>, StoreError> {
        let path = self.current_user_path();
        let Some(text) = read_optional(&path)? else {
            return Ok(None);
        };
        UserId::new(text.clone())
            .map(Some)
            .map_err(|source| StoreError::InvalidUserId {
                path,
                value: text,
                source,
            })
    }
}
