// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User-account operations on the client side.

use std::fmt;

use tracing::info;

use crate::model::{IdError, UserId};
use crate::remote::{RemoteError, RemoteStore};
use crate::store::{LocalMirror, StoreError};

#[derive(Debug)]
pub enum AccountError {
    InvalidId(IdError),
    Remote(RemoteError),
    Store(StoreError),
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId(source) => write!(f, "invalid user id: {source}"),
            Self::Remote(source) => write!(f, "{}", source.user_message()),
            Self::Store(source) => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for AccountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidId(source) => Some(source),
            Self::Remote(source) => Some(source),
            Self::Store(source) => Some(source),
        }
    }
}

impl From<IdError> for AccountError {
    fn from(source: IdError) -> Self {
        Self::InvalidId(source)
    }
}

impl From<RemoteError> for AccountError {
    fn from(source: RemoteError) -> Self {
        Self::Remote(source)
    }
}

impl From<StoreError> for AccountError {
    fn from(source: StoreError) -> Self {
        Self::Store(source)
    }
}

pub async fn list_users<R: RemoteStore>(remote: &R) -> Result<Vec<String>, AccountError> {
    Ok(remote.list_users().await?)
}

/// Creates an account from raw input (trimmed, must not be empty).
pub async fn add_user<R: RemoteStore>(remote: &R, input: &str) -> Result<UserId, AccountError> {
    let user = UserId::from_input(input)?;
    remote.add_user(&user).await?;
    info!(user = %user, "account created");
    Ok(user)
}

pub async fn delete_user<R: RemoteStore>(remote: &R, input: &str) -> Result<UserId, AccountError> {
    let user = UserId::from_input(input)?;
    remote.delete_user(&user).await?;
    info!(user = %user, "account deleted");
    Ok(user)
}

/// Makes `input` the current user of this device.
pub fn select_user(mirror: &LocalMirror, input: &str) -> Result<UserId, AccountError> {
    let user = UserId::from_input(input)?;
    mirror.set_current_user(&user)?;
    Ok(user)
}
