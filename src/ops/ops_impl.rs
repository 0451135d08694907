// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Folder/tab mutation helpers used by `apply_op`.
/// Keeps `ops::mod` focused on public op types and dispatch.
fn add_folder(doc: &mut Document, name: &str) -> Result<ApplyOutcome, ApplyError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApplyError::EmptyFolderName);
    }
    doc.folders_mut().push(Folder::new(name));
    Ok(ApplyOutcome::Changed)
}

fn rename_folder(doc: &mut Document, index: usize, name: &str) -> ApplyOutcome {
    let Some(folder) = doc.folders_mut().get_mut(index) else {
        return ApplyOutcome::Unchanged;
    };
    if folder.name() == name {
        return ApplyOutcome::Unchanged;
    }
    folder.set_name(name);
    ApplyOutcome::Changed
}

fn delete_folder(doc: &mut Document, index: usize) -> ApplyOutcome {
    if index >= doc.folders().len() {
        return ApplyOutcome::Unchanged;
    }
    doc.folders_mut().remove(index);
    ApplyOutcome::Changed
}

fn move_folder(doc: &mut Document, index: usize, direction: FolderDirection) -> ApplyOutcome {
    let len = doc.folders().len();
    if index >= len {
        return ApplyOutcome::Unchanged;
    }
    let target = match direction {
        FolderDirection::Up => index.checked_sub(1),
        FolderDirection::Down => Some(index + 1).filter(|target| *target < len),
    };
    let Some(target) = target else {
        return ApplyOutcome::Unchanged;
    };
    doc.folders_mut().swap(index, target);
    ApplyOutcome::Changed
}

fn add_tab(
    doc: &mut Document,
    folder: usize,
    name: &str,
    url: &str,
) -> Result<ApplyOutcome, ApplyError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApplyError::EmptyTabName);
    }
    let url = url.trim();
    if url.is_empty() {
        return Err(ApplyError::EmptyTabUrl);
    }
    let Some(folder) = doc.folders_mut().get_mut(folder) else {
        return Ok(ApplyOutcome::Unchanged);
    };
    folder.tabs_mut().push(Tab::new(name, url));
    Ok(ApplyOutcome::Changed)
}

fn set_tab_field(
    doc: &mut Document,
    position: TabPosition,
    field: TabField,
    value: &str,
) -> ApplyOutcome {
    let Some(tab) = doc
        .folders_mut()
        .get_mut(position.folder)
        .and_then(|folder| folder.tabs_mut().get_mut(position.tab))
    else {
        return ApplyOutcome::Unchanged;
    };
    if tab.field(field) == value {
        return ApplyOutcome::Unchanged;
    }
    tab.set_field(field, value);
    ApplyOutcome::Changed
}

fn delete_tab(doc: &mut Document, position: TabPosition) -> ApplyOutcome {
    let Some(folder) = doc.folders_mut().get_mut(position.folder) else {
        return ApplyOutcome::Unchanged;
    };
    if position.tab >= folder.tabs().len() {
        return ApplyOutcome::Unchanged;
    }
    folder.tabs_mut().remove(position.tab);
    ApplyOutcome::Changed
}

fn move_tab(doc: &mut Document, from: TabPosition, to: TabPosition) -> ApplyOutcome {
    // Validate both folders before removing anything so a bad destination cannot drop the tab.
    if to.folder >= doc.folders().len() || doc.tab(from).is_none() {
        return ApplyOutcome::Unchanged;
    }

    let folders = doc.folders_mut();
    let tab = folders[from.folder].tabs_mut().remove(from.tab);
    let dest = folders[to.folder].tabs_mut();
    let insert_at = to.tab.min(dest.len());
    if from.folder == to.folder && insert_at == from.tab {
        dest.insert(insert_at, tab);
        return ApplyOutcome::Unchanged;
    }
    dest.insert(insert_at, tab);
    ApplyOutcome::Changed
}
