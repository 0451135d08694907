// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON wire format shared by the local mirror, the remote store and export files.
//!
//! Documents travel as `{"folders": [...], "search_engine": "yandex" | "google"}`. Export files
//! carry only the folder array.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Document, Folder, ParseSearchEngineError, SearchEngine, Tab};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentJson {
    #[serde(default)]
    pub folders: Vec<FolderJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_engine: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderJson {
    pub name: String,
    #[serde(default)]
    pub tabs: Vec<TabJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabJson {
    pub name: String,
    pub url: String,
}

#[derive(Debug)]
pub enum DocumentFormatError {
    Json(serde_json::Error),
    SearchEngine(ParseSearchEngineError),
}

impl fmt::Display for DocumentFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(source) => write!(f, "malformed document json: {source}"),
            Self::SearchEngine(source) => write!(f, "invalid document: {source}"),
        }
    }
}

impl std::error::Error for DocumentFormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(source) => Some(source),
            Self::SearchEngine(source) => Some(source),
        }
    }
}

#[derive(Debug)]
pub enum ImportError {
    Json(serde_json::Error),
    NotAnArray,
    InvalidFolder { index: usize },
    InvalidTab { folder: usize, index: usize },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(source) => write!(f, "import file is not valid json: {source}"),
            Self::NotAnArray => f.write_str("import file must contain a json array of folders"),
            Self::InvalidFolder { index } => write!(
                f,
                "folder #{index} must be an object with a string \"name\" and an array \"tabs\""
            ),
            Self::InvalidTab { folder, index } => write!(
                f,
                "tab #{index} of folder #{folder} must be an object with string \"name\" and \"url\""
            ),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(source) => Some(source),
            _ => None,
        }
    }
}

pub fn folder_to_json(folder: &Folder) -> FolderJson {
    FolderJson {
        name: folder.name().to_owned(),
        tabs: folder
            .tabs()
            .iter()
            .map(|tab| TabJson {
                name: tab.name().to_owned(),
                url: tab.url().to_owned(),
            })
            .collect(),
    }
}

pub fn folder_from_json(folder: FolderJson) -> Folder {
    let tabs = folder
        .tabs
        .into_iter()
        .map(|tab| Tab::new(tab.name, tab.url))
        .collect();
    Folder::with_tabs(folder.name, tabs)
}

pub fn document_to_json(doc: &Document) -> DocumentJson {
    DocumentJson {
        folders: doc.folders().iter().map(folder_to_json).collect(),
        search_engine: Some(doc.search_engine().as_str().to_owned()),
    }
}

/// Converts wire data into a document. A missing search engine falls back to the default.
pub fn document_from_json(json: DocumentJson) -> Result<Document, DocumentFormatError> {
    let search_engine = match json.search_engine.as_deref() {
        None => SearchEngine::default(),
        Some(raw) => raw.parse().map_err(DocumentFormatError::SearchEngine)?,
    };
    let folders = json.folders.into_iter().map(folder_from_json).collect();
    Ok(Document::new(folders, search_engine))
}

pub fn document_to_string(doc: &Document) -> Result<String, DocumentFormatError> {
    serde_json::to_string(&document_to_json(doc)).map_err(DocumentFormatError::Json)
}

pub fn document_from_str(input: &str) -> Result<Document, DocumentFormatError> {
    let json: DocumentJson = serde_json::from_str(input).map_err(DocumentFormatError::Json)?;
    document_from_json(json)
}

/// Serializes the folder array for a manual export file.
pub fn export_folders(doc: &Document) -> Result<String, serde_json::Error> {
    let folders = doc.folders().iter().map(folder_to_json).collect::<Vec<_>>();
    serde_json::to_string_pretty(&folders)
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("bookmarks-{}.json", date.format("%Y-%m-%d"))
}

/// Parses and validates an export file.
///
/// The top level must be an array of objects, each with a string `name` and an array `tabs`;
/// every tab must be an object with string `name` and `url`. Extra keys are ignored.
pub fn import_folders(input: &str) -> Result<Vec<Folder>, ImportError> {
    let value: Value = serde_json::from_str(input).map_err(ImportError::Json)?;
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray);
    };

    let mut folders = Vec::with_capacity(items.len());
    for (folder_index, item) in items.iter().enumerate() {
        let invalid_folder = || ImportError::InvalidFolder {
            index: folder_index,
        };
        let object = item.as_object().ok_or_else(invalid_folder)?;
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(invalid_folder)?;
        let raw_tabs = object
            .get("tabs")
            .and_then(Value::as_array)
            .ok_or_else(invalid_folder)?;

        let mut tabs = Vec::with_capacity(raw_tabs.len());
        for (tab_index, raw_tab) in raw_tabs.iter().enumerate() {
            let invalid_tab = || ImportError::InvalidTab {
                folder: folder_index,
                index: tab_index,
            };
            let tab = raw_tab.as_object().ok_or_else(invalid_tab)?;
            let tab_name = tab
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(invalid_tab)?;
            let url = tab
                .get("url")
                .and_then(Value::as_str)
                .ok_or_else(invalid_tab)?;
            tabs.push(Tab::new(tab_name, url));
        }
        folders.push(Folder::with_tabs(name, tabs));
    }

    Ok(folders)
}
