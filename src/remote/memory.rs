// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-process remote used by unit tests. Records every save with its start time.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use super::{RemoteError, RemoteStore};
use crate::model::{Document, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SaveRecord {
    pub(crate) user: UserId,
    pub(crate) started: Instant,
    pub(crate) doc: Document,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryRemote {
    docs: Mutex<BTreeMap<String, Document>>,
    saves: Mutex<Vec<SaveRecord>>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fail_fetch: AtomicBool,
    fail_saves: AtomicBool,
}

impl MemoryRemote {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub(crate) fn with_document(self, user: &UserId, doc: Document) -> Self {
        self.docs.lock().unwrap().insert(user.as_str().to_owned(), doc);
        self
    }

    pub(crate) fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn saves(&self) -> Vec<SaveRecord> {
        self.saves.lock().unwrap().clone()
    }

    pub(crate) fn stored(&self, user: &UserId) -> Option<Document> {
        self.docs.lock().unwrap().get(user.as_str()).cloned()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl RemoteStore for MemoryRemote {
    async fn fetch_document(&self, user: &UserId) -> Result<Document, RemoteError> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("fetch disabled".to_owned()));
        }
        Ok(self.stored(user).unwrap_or_default())
    }

    async fn save_document(&self, user: &UserId, doc: &Document) -> Result<(), RemoteError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.saves.lock().unwrap().push(SaveRecord {
            user: user.clone(),
            started: Instant::now(),
            doc: doc.clone(),
        });

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("save disabled".to_owned()));
        }
        self.docs
            .lock()
            .unwrap()
            .insert(user.as_str().to_owned(), doc.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<String>, RemoteError> {
        Ok(self.docs.lock().unwrap().keys().cloned().collect())
    }

    async fn add_user(&self, user: &UserId) -> Result<(), RemoteError> {
        let mut docs = self.docs.lock().unwrap();
        if docs.contains_key(user.as_str()) {
            return Err(RemoteError::Status {
                endpoint: "add_user",
                status: 400,
                message: Some("User already exists".to_owned()),
            });
        }
        docs.insert(user.as_str().to_owned(), Document::default());
        Ok(())
    }

    async fn delete_user(&self, user: &UserId) -> Result<(), RemoteError> {
        match self.docs.lock().unwrap().remove(user.as_str()) {
            Some(_) => Ok(()),
            None => Err(RemoteError::Status {
                endpoint: "delete_user",
                status: 404,
                message: Some("User not found".to_owned()),
            }),
        }
    }
}
