// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Parts ledger: the scrollable table mirroring the diagram's highlight.
//!
//! Rows are flattened so each part is followed by its sub-parts. The ledger keeps the active
//! part row centred whenever the active id it is handed changes, whichever view caused the
//! change.

use crate::model::{Diagram, PartId};
use crate::session::InteractionOp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerRowKind {
    Part(PartId),
    /// Listed under its parent; not hover/click interactive.
    SubPart { parent: PartId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    kind: LedgerRowKind,
    number: String,
    code: String,
    name: String,
    quantity: u32,
}

impl LedgerRow {
    pub fn kind(&self) -> &LedgerRowKind {
        &self.kind
    }

    pub fn part_id(&self) -> Option<&PartId> {
        match &self.kind {
            LedgerRowKind::Part(part_id) => Some(part_id),
            LedgerRowKind::SubPart { .. } => None,
        }
    }

    pub fn is_sub_part(&self) -> bool {
        matches!(self.kind, LedgerRowKind::SubPart { .. })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Rows plus scroll position for one diagram's parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartsLedger {
    rows: Vec<LedgerRow>,
    offset: usize,
    scroll_target: usize,
    viewport_height: usize,
    last_active: Option<PartId>,
    cursor: Option<usize>,
}

impl PartsLedger {
    pub fn new(diagram: &Diagram) -> Self {
        let mut rows = Vec::new();
        for part in diagram.parts() {
            rows.push(LedgerRow {
                kind: LedgerRowKind::Part(part.part_id().clone()),
                number: part.number().to_owned(),
                code: part.code().to_owned(),
                name: part.name().to_owned(),
                quantity: part.quantity(),
            });
            for sub_part in part.sub_parts() {
                rows.push(LedgerRow {
                    kind: LedgerRowKind::SubPart {
                        parent: part.part_id().clone(),
                    },
                    number: sub_part.number().to_owned(),
                    code: sub_part.code().to_owned(),
                    name: sub_part.name().to_owned(),
                    quantity: sub_part.quantity(),
                });
            }
        }

        Self {
            rows,
            offset: 0,
            scroll_target: 0,
            viewport_height: 0,
            last_active: None,
            cursor: None,
        }
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn scroll_target(&self) -> usize {
        self.scroll_target
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn row_index(&self, part_id: &PartId) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.part_id() == Some(part_id))
    }

    pub fn part_id_at(&self, row: usize) -> Option<&PartId> {
        self.rows.get(row).and_then(LedgerRow::part_id)
    }

    /// Pointer over `row`: hover-in on part rows, hover-out anywhere else.
    pub fn hover_at(&self, row: usize) -> InteractionOp {
        match self.part_id_at(row) {
            Some(part_id) => InteractionOp::HoverIn(part_id.clone()),
            None => InteractionOp::HoverOut,
        }
    }

    /// Click on `row`; sub-part rows and empty space report nothing.
    pub fn click_at(&self, row: usize) -> Option<InteractionOp> {
        self.part_id_at(row)
            .map(|part_id| InteractionOp::Activate(part_id.clone()))
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        if self.viewport_height == height {
            return;
        }
        self.viewport_height = height;
        let max = self.max_offset();
        self.scroll_target = self.scroll_target.min(max);
        self.offset = self.offset.min(max);
    }

    pub fn max_offset(&self) -> usize {
        self.rows.len().saturating_sub(self.viewport_height)
    }

    /// Offset that puts `row` in the middle of the viewport, within the scrollable range.
    pub fn centered_offset(&self, row: usize) -> usize {
        row.saturating_sub(self.viewport_height / 2)
            .min(self.max_offset())
    }

    /// Reacts to the active id handed down by the session.
    ///
    /// Only a change to a different non-null id moves the scroll target; an id without a
    /// matching part row is ignored. Returns whether the target moved.
    pub fn sync_active(&mut self, active: Option<&PartId>) -> bool {
        if self.last_active.as_ref() == active {
            return false;
        }
        self.last_active = active.cloned();

        let Some(active) = active else {
            return false;
        };
        let Some(row) = self.row_index(active) else {
            return false;
        };
        self.cursor = Some(row);
        let target = self.centered_offset(row);
        let moved = target != self.scroll_target;
        self.scroll_target = target;
        moved
    }

    pub fn is_animating(&self) -> bool {
        self.offset != self.scroll_target
    }

    /// Advances the smooth scroll by one frame: half the remaining distance, at least one row.
    pub fn tick(&mut self) -> bool {
        if self.offset == self.scroll_target {
            return false;
        }
        let distance = self.offset.abs_diff(self.scroll_target);
        let step = (distance / 2).max(1);
        if self.offset < self.scroll_target {
            self.offset += step;
        } else {
            self.offset -= step;
        }
        true
    }

    /// Manual scroll (wheel, page keys); jumps without animation.
    pub fn scroll_by(&mut self, delta: i32) {
        let next = if delta < 0 {
            self.offset.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.offset = next.min(self.max_offset());
        self.scroll_target = self.offset;
    }

    /// Moves the keyboard cursor to the next/previous part row and reports hover for it.
    pub fn move_cursor(&mut self, forward: bool) -> Option<InteractionOp> {
        let part_rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_sub_part())
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>();
        let first = *part_rows.first()?;
        let last = *part_rows.last()?;

        let next = match self.cursor {
            None => {
                if forward {
                    first
                } else {
                    last
                }
            }
            Some(current) if forward => part_rows
                .iter()
                .copied()
                .find(|&idx| idx > current)
                .unwrap_or(last),
            Some(current) => part_rows
                .iter()
                .rev()
                .copied()
                .find(|&idx| idx < current)
                .unwrap_or(first),
        };
        self.cursor = Some(next);
        Some(self.hover_at(next))
    }

    pub fn activate_cursor(&self) -> Option<InteractionOp> {
        self.click_at(self.cursor?)
    }
}
