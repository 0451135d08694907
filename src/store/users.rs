// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Server-side account storage: one `users.json` map from user id to document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::helpers::{read_optional, write_atomic};
use super::{StoreError, WriteDurability};
use crate::format::{document_to_json, DocumentJson};
use crate::model::Document;

pub const USERS_FILENAME: &str = "users.json";

type Accounts = BTreeMap<String, DocumentJson>;

/// All accounts, held in memory and rewritten as a whole on every change.
///
/// A failed write leaves the in-memory map untouched, so memory never runs ahead of disk.
#[derive(Debug)]
pub struct UsersFile {
    dir: PathBuf,
    path: PathBuf,
    durability: WriteDurability,
    accounts: Accounts,
}

impl UsersFile {
    /// Loads `users.json` from `dir`. A missing file is an empty account list.
    pub fn open(dir: impl Into<PathBuf>, durability: WriteDurability) -> Result<Self, StoreError> {
        let dir = dir.into();
        let path = dir.join(USERS_FILENAME);
        let accounts = match read_optional(&path)? {
            Some(text) => serde_json::from_str::<Accounts>(&text).map_err(|source| {
                StoreError::Json {
                    path: path.clone(),
                    source,
                }
            })?,
            None => Accounts::new(),
        };
        info!(path = %path.display(), users = accounts.len(), "users file loaded");
        Ok(Self {
            dir,
            path,
            durability,
            accounts,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.accounts.contains_key(user_id)
    }

    /// User ids in ascending order.
    pub fn user_ids(&self) -> Vec<String> {
        self.accounts.keys().cloned().collect()
    }

    pub fn document(&self, user_id: &str) -> Option<&DocumentJson> {
        self.accounts.get(user_id)
    }

    /// Stores `doc` for `user_id`, creating the account when it does not exist yet.
    pub fn save(&mut self, user_id: &str, doc: DocumentJson) -> Result<(), StoreError> {
        let mut next = self.accounts.clone();
        next.insert(user_id.to_owned(), doc);
        self.commit(next)?;
        debug!(user = user_id, "user document saved");
        Ok(())
    }

    /// Creates an account seeded with the default document. Returns `false` if it already exists.
    pub fn add(&mut self, user_id: &str) -> Result<bool, StoreError> {
        if self.contains(user_id) {
            return Ok(false);
        }
        let mut next = self.accounts.clone();
        next.insert(user_id.to_owned(), document_to_json(&Document::default()));
        self.commit(next)?;
        info!(user = user_id, "user added");
        Ok(true)
    }

    /// Removes an account. Returns `false` if it did not exist.
    pub fn delete(&mut self, user_id: &str) -> Result<bool, StoreError> {
        if !self.contains(user_id) {
            return Ok(false);
        }
        let mut next = self.accounts.clone();
        next.remove(user_id);
        self.commit(next)?;
        info!(user = user_id, "user deleted");
        Ok(true)
    }

    fn commit(&mut self, next: Accounts) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&next).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.dir, &self.path, text.as_bytes(), self.durability)?;
        self.accounts = next;
        Ok(())
    }
}
