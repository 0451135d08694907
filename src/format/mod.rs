// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Import/export formats.

pub mod json;

pub use json::{
    document_from_json, document_from_str, document_to_json, document_to_string,
    export_file_name, export_folders, import_folders, DocumentFormatError, DocumentJson,
    FolderJson, ImportError, TabJson,
};
