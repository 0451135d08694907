// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Propagation of the in-memory document to the remote store.

pub mod pipeline;

pub use pipeline::{PipelineState, PipelineStats, PipelineStatus, SaveConfig, SavePipeline};
