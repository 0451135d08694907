// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only folder grid shown on the start page.

use crate::model::{Document, TabPosition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabLink {
    pub position: TabPosition,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderCard {
    pub index: usize,
    pub name: String,
    pub tabs: Vec<TabLink>,
}

pub fn project_folders(doc: &Document) -> Vec<FolderCard> {
    doc.folders()
        .iter()
        .enumerate()
        .map(|(folder_index, folder)| FolderCard {
            index: folder_index,
            name: folder.name().to_owned(),
            tabs: folder
                .tabs()
                .iter()
                .enumerate()
                .map(|(tab_index, tab)| TabLink {
                    position: TabPosition::new(folder_index, tab_index),
                    name: tab.name().to_owned(),
                    url: tab.url().to_owned(),
                })
                .collect(),
        })
        .collect()
}
