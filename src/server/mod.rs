// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reference remote store: the JSON endpoints [`crate::remote::HttpRemote`] talks to.
//!
//! Accounts live in a single [`UsersFile`] guarded by an async mutex, so requests are applied one
//! at a time and every change is written through before the response is sent.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::format::{document_to_json, DocumentJson};
use crate::model::Document;
use crate::store::{StoreError, UsersFile};

mod validate;

pub use validate::{validate_save_body, MAX_FOLDER_NAME_CHARS, MAX_TAB_NAME_CHARS};

pub const DEFAULT_PORT: u16 = 5000;

pub type SharedUsers = Arc<Mutex<UsersFile>>;

#[derive(Debug)]
pub enum ServerError {
    BadRequest(&'static str),
    NotFound(&'static str),
    Store(StoreError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => f.write_str(message),
            Self::Store(_) => f.write_str("Storage failure"),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(source) => Some(source),
            _ => None,
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(source: StoreError) -> Self {
        Self::Store(source)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if let Self::Store(source) = &self {
            error!(%source, "users file write failed");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

fn success() -> Json<Value> {
    Json(json!({ "status": "success" }))
}

pub fn router(users: SharedUsers) -> Router {
    Router::new()
        .route("/get_data/{user_id}", get(get_data))
        .route("/save_data/{user_id}", post(save_data))
        .route("/get_users", get(get_users))
        .route("/add_user", post(add_user))
        .route("/delete_user/{user_id}", delete(delete_user))
        .with_state(users)
}

/// Serves the endpoints on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, users: SharedUsers, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "remote store listening");
    axum::serve(listener, router(users))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn get_data(State(users): State<SharedUsers>, Path(user_id): Path<String>) -> Json<DocumentJson> {
    let users = users.lock().await;
    debug!(user = %user_id, known = users.contains(&user_id), "get_data");
    let mut doc = users
        .document(&user_id)
        .cloned()
        .unwrap_or_else(|| document_to_json(&Document::default()));
    if doc.search_engine.is_none() {
        doc.search_engine = Some(Document::default().search_engine().as_str().to_owned());
    }
    Json(doc)
}

async fn save_data(
    State(users): State<SharedUsers>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ServerError> {
    let value = serde_json::from_slice::<Value>(&body)
        .map_err(|_| ServerError::BadRequest("Invalid data format"))?;
    let doc = validate_save_body(&value)?;
    debug!(user = %user_id, folders = doc.folders.len(), "save_data");
    users.lock().await.save(&user_id, doc)?;
    Ok(success())
}

async fn get_users(State(users): State<SharedUsers>) -> Json<Vec<String>> {
    Json(users.lock().await.user_ids())
}

async fn add_user(State(users): State<SharedUsers>, body: Bytes) -> Result<Json<Value>, ServerError> {
    const REQUIRED: ServerError = ServerError::BadRequest("User ID is required");
    let value = serde_json::from_slice::<Value>(&body).map_err(|_| REQUIRED)?;
    let user_id = value
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or(REQUIRED)?;

    if !users.lock().await.add(user_id)? {
        return Err(ServerError::BadRequest("User already exists"));
    }
    Ok(success())
}

async fn delete_user(
    State(users): State<SharedUsers>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    if !users.lock().await.delete(&user_id)? {
        return Err(ServerError::NotFound("User not found"));
    }
    Ok(success())
}
