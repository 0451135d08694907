// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use url::Url;

/// The search engines a document can select.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchEngine {
    #[default]
    Yandex,
    Google,
}

impl SearchEngine {
    pub const ALL: [SearchEngine; 2] = [SearchEngine::Yandex, SearchEngine::Google];

    /// Wire name used by the remote store and the local mirror.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yandex => "yandex",
            Self::Google => "google",
        }
    }

    /// Human-facing name, e.g. for the search box placeholder.
    pub fn label(self) -> &'static str {
        match self {
            Self::Yandex => "Yandex",
            Self::Google => "Google",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Yandex => Self::Google,
            Self::Google => Self::Yandex,
        }
    }

    /// Builds the results URL for `query`, or `None` when the trimmed query is empty.
    pub fn search_url(self, query: &str) -> Option<Url> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let encoded = urlencoding::encode(query);
        let raw = match self {
            Self::Google => format!("https://www.google.com/search?q={encoded}"),
            Self::Yandex => format!("https://yandex.ru/search/?text={encoded}"),
        };
        Url::parse(&raw).ok()
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchEngine {
    type Err = ParseSearchEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yandex" => Ok(Self::Yandex),
            "google" => Ok(Self::Google),
            other => Err(ParseSearchEngineError {
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSearchEngineError {
    value: String,
}

impl ParseSearchEngineError {
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseSearchEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown search engine {:?} (expected \"yandex\" or \"google\")",
            self.value
        )
    }
}

impl std::error::Error for ParseSearchEngineError {}
