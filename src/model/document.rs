// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::search::SearchEngine;

/// A bookmark entry. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tab {
    name: String,
    url: String,
}

impl Tab {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn field(&self, field: TabField) -> &str {
        match field {
            TabField::Name => &self.name,
            TabField::Url => &self.url,
        }
    }

    pub fn set_field(&mut self, field: TabField, value: impl Into<String>) {
        match field {
            TabField::Name => self.name = value.into(),
            TabField::Url => self.url = value.into(),
        }
    }
}

/// Editable fields of a [`Tab`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabField {
    Name,
    Url,
}

/// A named, ordered collection of tabs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Folder {
    name: String,
    tabs: Vec<Tab>,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tabs: Vec::new(),
        }
    }

    pub fn with_tabs(name: impl Into<String>, tabs: Vec<Tab>) -> Self {
        Self {
            name: name.into(),
            tabs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut Vec<Tab> {
        &mut self.tabs
    }
}

/// Address of a tab inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabPosition {
    pub folder: usize,
    pub tab: usize,
}

impl TabPosition {
    pub fn new(folder: usize, tab: usize) -> Self {
        Self { folder, tab }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderDirection {
    Up,
    Down,
}

/// The full per-user state: ordered folders plus the preferred search engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    folders: Vec<Folder>,
    search_engine: SearchEngine,
}

impl Document {
    pub fn new(folders: Vec<Folder>, search_engine: SearchEngine) -> Self {
        Self {
            folders,
            search_engine,
        }
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn folders_mut(&mut self) -> &mut Vec<Folder> {
        &mut self.folders
    }

    pub fn folder(&self, index: usize) -> Option<&Folder> {
        self.folders.get(index)
    }

    pub fn tab(&self, position: TabPosition) -> Option<&Tab> {
        self.folders.get(position.folder)?.tabs().get(position.tab)
    }

    pub fn search_engine(&self) -> SearchEngine {
        self.search_engine
    }

    pub fn set_search_engine(&mut self, search_engine: SearchEngine) {
        self.search_engine = search_engine;
    }

    pub fn tab_count(&self) -> usize {
        self.folders.iter().map(|folder| folder.tabs().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}
