// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The remote document store as seen from the client.
//!
//! [`RemoteStore`] is the seam between the session/save pipeline and the network. [`HttpRemote`]
//! talks to the JSON endpoints served by [`crate::server`].

use std::fmt;
use std::future::Future;

use crate::format::DocumentFormatError;
use crate::model::{Document, UserId};

pub mod http;
#[cfg(test)]
pub(crate) mod memory;

pub use http::{HttpRemote, DEFAULT_REMOTE_URL};

/// Remote persistence keyed by user id, plus account management.
///
/// Implementations must be shareable across tasks; every returned future is `Send` so it can run
/// on a spawned task.
pub trait RemoteStore: Send + Sync + 'static {
    /// Reads the stored document for `user`. Any failure means "no data".
    fn fetch_document(
        &self,
        user: &UserId,
    ) -> impl Future<Output = Result<Document, RemoteError>> + Send;

    /// Replaces the stored document for `user`.
    fn save_document(
        &self,
        user: &UserId,
        doc: &Document,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;

    fn list_users(&self) -> impl Future<Output = Result<Vec<String>, RemoteError>> + Send;

    fn add_user(&self, user: &UserId) -> impl Future<Output = Result<(), RemoteError>> + Send;

    fn delete_user(&self, user: &UserId) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

#[derive(Debug)]
pub enum RemoteError {
    InvalidUrl(url::ParseError),
    Transport(reqwest::Error),
    /// Non-success HTTP status, with the server's `{error}` message when it sent one.
    Status {
        endpoint: &'static str,
        status: u16,
        message: Option<String>,
    },
    Document(DocumentFormatError),
    /// Failure injected by an in-process store.
    Unavailable(String),
}

impl RemoteError {
    /// Message suitable for a user notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(source) => write!(f, "invalid remote url: {source}"),
            Self::Transport(source) => write!(f, "remote request failed: {source}"),
            Self::Status {
                endpoint,
                status,
                message: Some(message),
            } => write!(f, "{endpoint} returned {status}: {message}"),
            Self::Status {
                endpoint,
                status,
                message: None,
            } => write!(f, "{endpoint} returned {status}"),
            Self::Document(source) => write!(f, "remote sent an invalid document: {source}"),
            Self::Unavailable(reason) => write!(f, "remote unavailable: {reason}"),
        }
    }
}

impl std::error::Error for RemoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidUrl(source) => Some(source),
            Self::Transport(source) => Some(source),
            Self::Document(source) => Some(source),
            Self::Status { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(source: reqwest::Error) -> Self {
        Self::Transport(source)
    }
}

impl From<url::ParseError> for RemoteError {
    fn from(source: url::ParseError) -> Self {
        Self::InvalidUrl(source)
    }
}
