// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::document::{Document, Folder, Tab};
use super::ids::UserId;
use super::search::SearchEngine;

pub(crate) fn user(value: &str) -> UserId {
    UserId::new(value).expect("user id")
}

/// Three folders with 2/1/3 tabs; used across module tests.
pub(crate) fn three_folders() -> Document {
    Document::new(
        vec![
            Folder::with_tabs(
                "Work",
                vec![
                    Tab::new("Mail", "http://mail.test"),
                    Tab::new("Calendar", "http://calendar.test"),
                ],
            ),
            Folder::with_tabs("News", vec![Tab::new("Daily", "https://daily.test")]),
            Folder::with_tabs(
                "Dev",
                vec![
                    Tab::new("Docs", "https://docs.rs"),
                    Tab::new("Crates", "https://crates.io"),
                    Tab::new("Repo", "https://git.test/repo"),
                ],
            ),
        ],
        SearchEngine::Yandex,
    )
}

pub(crate) fn folder_names(doc: &Document) -> Vec<&str> {
    doc.folders().iter().map(Folder::name).collect()
}

pub(crate) fn tab_names(doc: &Document, folder: usize) -> Vec<&str> {
    doc.folders()[folder].tabs().iter().map(Tab::name).collect()
}
