// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pointer geometry for drag-and-drop.

/// Vertical extent of one rendered row, in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RowBounds {
    pub top: u16,
    pub height: u16,
}

impl RowBounds {
    pub const fn new(top: u16, height: u16) -> Self {
        Self { top, height }
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> u16 {
        self.top.saturating_add(self.height)
    }

    pub fn contains(self, y: u16) -> bool {
        y >= self.top && y < self.bottom()
    }

    /// Signed distance from the row's vertical center to `pointer_y`, doubled so half-cell
    /// centers stay integral. Negative when the center lies below the pointer.
    fn doubled_offset(self, pointer_y: u16) -> i32 {
        2 * i32::from(pointer_y) - (2 * i32::from(self.top) + i32::from(self.height))
    }
}

/// Index of the sibling the dragged row should be placed before.
///
/// Considers only rows whose vertical center is below the pointer and picks the one with the least
/// negative offset (ties go to the earlier row). `None` means "append at the end".
pub fn nearest_sibling_below(siblings: &[RowBounds], pointer_y: u16) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (index, row) in siblings.iter().enumerate() {
        let offset = row.doubled_offset(pointer_y);
        if offset >= 0 {
            continue;
        }
        if best.map_or(true, |(_, closest)| offset > closest) {
            best = Some((index, offset));
        }
    }
    best.map(|(index, _)| index)
}
