// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{Map, Value};
use url::Url;

use super::ServerError;
use crate::format::{DocumentJson, FolderJson, TabJson};
use crate::model::SearchEngine;

pub const MAX_FOLDER_NAME_CHARS: usize = 50;
pub const MAX_TAB_NAME_CHARS: usize = 100;

fn is_web_url(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

fn bounded_str(object: &Map<String, Value>, key: &str, max_chars: usize) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| value.chars().count() <= max_chars)
        .map(str::to_owned)
}

fn validate_tab(raw: &Value) -> Result<TabJson, ServerError> {
    let tab = raw
        .as_object()
        .ok_or(ServerError::BadRequest("Invalid tab name"))?;
    let name = bounded_str(tab, "name", MAX_TAB_NAME_CHARS)
        .ok_or(ServerError::BadRequest("Invalid tab name"))?;
    let url = tab.get("url").and_then(Value::as_str).unwrap_or_default();
    if !is_web_url(url) {
        return Err(ServerError::BadRequest("Invalid URL"));
    }
    Ok(TabJson {
        name,
        url: url.to_owned(),
    })
}

fn validate_folder(raw: &Value) -> Result<FolderJson, ServerError> {
    let folder = raw
        .as_object()
        .ok_or(ServerError::BadRequest("Invalid folder name"))?;
    let name = bounded_str(folder, "name", MAX_FOLDER_NAME_CHARS)
        .ok_or(ServerError::BadRequest("Invalid folder name"))?;
    let tabs = folder
        .get("tabs")
        .and_then(Value::as_array)
        .ok_or(ServerError::BadRequest("Invalid tabs format"))?;
    Ok(FolderJson {
        name,
        tabs: tabs.iter().map(validate_tab).collect::<Result<_, _>>()?,
    })
}

/// Checks a `save_data` body and normalizes it into a stored document.
///
/// Missing `folders` means none; a missing `search_engine` means the default engine. Extra keys
/// are dropped.
pub fn validate_save_body(body: &Value) -> Result<DocumentJson, ServerError> {
    let object = body
        .as_object()
        .ok_or(ServerError::BadRequest("Invalid data format"))?;

    let engine = match object.get("search_engine") {
        None => SearchEngine::default(),
        Some(raw) => raw
            .as_str()
            .and_then(|raw| raw.parse::<SearchEngine>().ok())
            .ok_or(ServerError::BadRequest("Invalid search engine"))?,
    };

    let folders = match object.get("folders") {
        None => Vec::new(),
        Some(raw) => raw
            .as_array()
            .ok_or(ServerError::BadRequest("Invalid folders format"))?
            .iter()
            .map(validate_folder)
            .collect::<Result<_, _>>()?,
    };

    Ok(DocumentJson {
        folders,
        search_engine: Some(engine.as_str().to_owned()),
    })
}
