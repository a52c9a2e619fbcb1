// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Catalog session: the single owner of interaction state.
//!
//! Both the diagram viewport (markers) and the parts ledger report pointer intent as
//! [`InteractionOp`] values. The session reduces them and hands one `effective_active_id` back to
//! both views, so neither view keeps its own copy of what is highlighted.

use tracing::{debug, trace};

use crate::model::{Diagram, Part, PartId, PartsGroup};

/// Intent reported by a marker or a ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOp {
    HoverIn(PartId),
    HoverOut,
    /// Click on a part. Pins it, or unpins it when it is already pinned.
    Activate(PartId),
}

/// Hover/pin state for one diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered_part_id: Option<PartId>,
    selected_part_id: Option<PartId>,
}

impl InteractionState {
    pub fn hovered_part_id(&self) -> Option<&PartId> {
        self.hovered_part_id.as_ref()
    }

    pub fn selected_part_id(&self) -> Option<&PartId> {
        self.selected_part_id.as_ref()
    }

    /// Selection if present, else hover.
    pub fn effective_active_id(&self) -> Option<&PartId> {
        self.selected_part_id
            .as_ref()
            .or(self.hovered_part_id.as_ref())
    }

    pub fn is_pinned(&self) -> bool {
        self.selected_part_id.is_some()
    }

    /// Applies one op; returns whether any state changed.
    ///
    /// Hover is ignored while a part is pinned and is not remembered for after the unpin.
    pub fn apply(&mut self, op: &InteractionOp) -> bool {
        let before = self.clone();
        match op {
            InteractionOp::HoverIn(part_id) => {
                if self.selected_part_id.is_none() {
                    self.hovered_part_id = Some(part_id.clone());
                }
            }
            InteractionOp::HoverOut => {
                if self.selected_part_id.is_none() {
                    self.hovered_part_id = None;
                }
            }
            InteractionOp::Activate(part_id) => {
                if self.selected_part_id.as_ref() == Some(part_id) {
                    self.selected_part_id = None;
                    self.hovered_part_id = None;
                } else {
                    self.selected_part_id = Some(part_id.clone());
                    self.hovered_part_id = Some(part_id.clone());
                }
            }
        }
        let changed = *self != before;
        trace!(?op, changed, active = ?self.effective_active_id(), "interaction op");
        changed
    }

    pub fn clear(&mut self) {
        self.hovered_part_id = None;
        self.selected_part_id = None;
    }
}

/// Interaction state plus diagram-tab selection for one parts group.
///
/// Navigating to another group builds a fresh session, which starts on tab 0 with nothing
/// highlighted.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSession {
    group: PartsGroup,
    active_diagram_index: usize,
    interaction: InteractionState,
}

impl CatalogSession {
    pub fn new(group: PartsGroup) -> Self {
        debug!(
            group = %group.group_id(),
            diagrams = group.diagrams().len(),
            "catalog session opened"
        );
        Self {
            group,
            active_diagram_index: 0,
            interaction: InteractionState::default(),
        }
    }

    pub fn group(&self) -> &PartsGroup {
        &self.group
    }

    pub fn active_diagram_index(&self) -> usize {
        self.active_diagram_index
    }

    pub fn active_diagram(&self) -> Option<&Diagram> {
        self.group.diagrams().get(self.active_diagram_index)
    }

    pub fn diagram_count(&self) -> usize {
        self.group.diagrams().len()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn hovered_part_id(&self) -> Option<&PartId> {
        self.interaction.hovered_part_id()
    }

    pub fn selected_part_id(&self) -> Option<&PartId> {
        self.interaction.selected_part_id()
    }

    pub fn effective_active_id(&self) -> Option<&PartId> {
        self.interaction.effective_active_id()
    }

    /// The highlighted part, resolved against the active diagram.
    pub fn active_part(&self) -> Option<&Part> {
        let part_id = self.effective_active_id()?;
        self.active_diagram()?.part(part_id)
    }

    pub fn apply(&mut self, op: InteractionOp) -> bool {
        self.interaction.apply(&op)
    }

    pub fn apply_all(&mut self, ops: impl IntoIterator<Item = InteractionOp>) -> bool {
        let mut changed = false;
        for op in ops {
            changed |= self.interaction.apply(&op);
        }
        changed
    }

    /// Switches the diagram tab and drops hover and pin, even when `index` is already active.
    ///
    /// Part ids are only unique within a diagram, so no highlight survives a switch. Returns
    /// `false` (and changes nothing) for an index past the last tab.
    pub fn select_diagram(&mut self, index: usize) -> bool {
        if index >= self.group.diagrams().len() {
            return false;
        }
        self.active_diagram_index = index;
        self.interaction.clear();
        debug!(
            group = %self.group.group_id(),
            index,
            diagram = %self.group.diagrams()[index].diagram_id(),
            "diagram tab selected"
        );
        true
    }

    pub fn next_diagram(&mut self) -> bool {
        let count = self.diagram_count();
        if count == 0 {
            return false;
        }
        self.select_diagram((self.active_diagram_index + 1) % count)
    }

    pub fn prev_diagram(&mut self) -> bool {
        let count = self.diagram_count();
        if count == 0 {
            return false;
        }
        let prev = match self.active_diagram_index {
            0 => count - 1,
            n => n - 1,
        };
        self.select_diagram(prev)
    }
}
