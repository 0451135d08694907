// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{RemoteError, RemoteStore};
use crate::format::{document_from_json, document_to_json, DocumentJson};
use crate::model::{Document, UserId};

pub const DEFAULT_REMOTE_URL: &str = "http://127.0.0.1:5000/";

const HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct AddUserBody<'a> {
    id: &'a str,
}

/// JSON-over-HTTP client for the endpoints served by [`crate::server`].
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: Client,
    base: Url,
}

impl HttpRemote {
    /// `base` is the server root; endpoint paths are resolved relative to it.
    pub fn new(base: &str) -> Result<Self, RemoteError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        Ok(self.base.join(path)?)
    }

    fn user_endpoint(&self, prefix: &str, user: &UserId) -> Result<Url, RemoteError> {
        self.endpoint(&format!("{prefix}/{}", urlencoding::encode(user.as_str())))
    }
}

async fn check_status(endpoint: &'static str, response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.json::<ErrorBody>().await.ok().map(|body| body.error);
    Err(RemoteError::Status {
        endpoint,
        status: status.as_u16(),
        message,
    })
}

impl RemoteStore for HttpRemote {
    async fn fetch_document(&self, user: &UserId) -> Result<Document, RemoteError> {
        let url = self.user_endpoint("get_data", user)?;
        debug!(%url, "fetch document");
        let response = self.client.get(url).send().await?;
        let response = check_status("get_data", response).await?;
        let json = response.json::<DocumentJson>().await?;
        document_from_json(json).map_err(RemoteError::Document)
    }

    async fn save_document(&self, user: &UserId, doc: &Document) -> Result<(), RemoteError> {
        let url = self.user_endpoint("save_data", user)?;
        let body = document_to_json(doc);
        debug!(%url, folders = body.folders.len(), "save document");
        let response = self.client.post(url).json(&body).send().await?;
        check_status("save_data", response).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<String>, RemoteError> {
        let url = self.endpoint("get_users")?;
        let response = self.client.get(url).send().await?;
        let response = check_status("get_users", response).await?;
        Ok(response.json::<Vec<String>>().await?)
    }

    async fn add_user(&self, user: &UserId) -> Result<(), RemoteError> {
        let url = self.endpoint("add_user")?;
        let body = AddUserBody { id: user.as_str() };
        let response = self.client.post(url).json(&body).send().await?;
        check_status("add_user", response).await?;
        Ok(())
    }

    async fn delete_user(&self, user: &UserId) -> Result<(), RemoteError> {
        let url = self.user_endpoint("delete_user", user)?;
        let response = self.client.delete(url).send().await?;
        check_status("delete_user", response).await?;
        Ok(())
    }
}
