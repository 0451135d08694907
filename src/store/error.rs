// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::format::DocumentFormatError;
use crate::model::IdError;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    Document {
        path: PathBuf,
        source: Box<DocumentFormatError>,
    },
    InvalidUserId {
        path: PathBuf,
        value: String,
        source: IdError,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::Document { path, source } => {
                write!(f, "cannot read document from {path:?}: {source}")
            }
            Self::InvalidUserId {
                path,
                value,
                source,
            } => write!(f, "invalid user id {value:?} in {path:?}: {source}"),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Document { source, .. } => Some(source),
            Self::InvalidUserId { source, .. } => Some(source),
            Self::SymlinkRefused { .. } => None,
        }
    }
}
