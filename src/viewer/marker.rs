// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Part, PartId, Position};
use crate::session::InteractionOp;

/// Visual state of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Part is the effective active part: emphasized, filled, ringed.
    Active,
    Inactive,
    /// Local pointer-over affordance; unrelated to the shared active id.
    InactivePointerOver,
}

/// Numbered hotspot for one part. Holds no state; reports intent as ops.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotMarker {
    part_id: PartId,
    number: String,
    position: Position,
    is_active: bool,
}

impl HotspotMarker {
    pub fn new(
        part_id: PartId,
        number: impl Into<String>,
        position: Position,
        is_active: bool,
    ) -> Self {
        Self {
            part_id,
            number: number.into(),
            position,
            is_active,
        }
    }

    pub fn for_part(part: &Part, active: Option<&PartId>) -> Self {
        Self::new(
            part.part_id().clone(),
            part.number(),
            part.position(),
            active == Some(part.part_id()),
        )
    }

    pub fn part_id(&self) -> &PartId {
        &self.part_id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn on_hover_start(&self) -> InteractionOp {
        InteractionOp::HoverIn(self.part_id.clone())
    }

    pub fn on_hover_end(&self) -> InteractionOp {
        InteractionOp::HoverOut
    }

    /// Always the same op; pin/unpin is decided by the session.
    pub fn on_activate(&self) -> InteractionOp {
        InteractionOp::Activate(self.part_id.clone())
    }

    pub fn style(&self, pointer_over: bool) -> MarkerStyle {
        match (self.is_active, pointer_over) {
            (true, _) => MarkerStyle::Active,
            (false, true) => MarkerStyle::InactivePointerOver,
            (false, false) => MarkerStyle::Inactive,
        }
    }

    pub fn label(&self) -> String {
        if self.is_active {
            format!("❮{}❯", self.number)
        } else {
            format!("({})", self.number)
        }
    }
}

/// A marker with its on-screen cell span (row, first column, width), after the layer transform.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    marker: HotspotMarker,
    label: String,
    col: i32,
    row: i32,
    width: u16,
}

impl PlacedMarker {
    /// Centres the label on the projected point rather than starting it there.
    pub fn centered(marker: HotspotMarker, col: f32, row: f32) -> Self {
        let label = marker.label();
        let width = label.chars().count() as u16;
        let start = (col - f32::from(width) / 2.0).round();
        Self {
            marker,
            label,
            col: clamp_f32_to_i32(start),
            row: clamp_f32_to_i32(row.floor()),
            width,
        }
    }

    pub fn marker(&self) -> &HotspotMarker {
        &self.marker
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn contains(&self, col: i32, row: i32) -> bool {
        row == self.row && col >= self.col && col < self.col + i32::from(self.width)
    }
}

fn clamp_f32_to_i32(value: f32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(i32::MIN as f32, i32::MAX as f32) as i32
}

/// Topmost marker under a cell; later markers draw over earlier ones.
pub fn marker_at(placed: &[PlacedMarker], col: i32, row: i32) -> Option<&PlacedMarker> {
    placed.iter().rev().find(|placed| placed.contains(col, row))
}

#[cfg(test)]
mod tests {
    use super::{marker_at, HotspotMarker, MarkerStyle, PlacedMarker};
    use crate::model::{PartId, Position};
    use crate::session::InteractionOp;

    fn marker(id: &str, active: bool) -> HotspotMarker {
        let part_id = PartId::new(id).expect("part id");
        HotspotMarker::new(part_id, id, Position::new(85.0, 52.0), active)
    }

    #[test]
    fn activate_always_reports_the_same_op() {
        let marker = marker("7", true);
        let id = PartId::new("7").expect("part id");
        assert_eq!(marker.on_activate(), InteractionOp::Activate(id.clone()));
        assert_eq!(marker.on_activate(), InteractionOp::Activate(id.clone()));
        assert_eq!(marker.on_hover_start(), InteractionOp::HoverIn(id));
        assert_eq!(marker.on_hover_end(), InteractionOp::HoverOut);
    }

    #[test]
    fn style_is_binary_with_local_pointer_affordance() {
        assert_eq!(marker("1", true).style(false), MarkerStyle::Active);
        assert_eq!(marker("1", true).style(true), MarkerStyle::Active);
        assert_eq!(marker("1", false).style(false), MarkerStyle::Inactive);
        assert_eq!(marker("1", false).style(true), MarkerStyle::InactivePointerOver);
    }

    #[test]
    fn label_is_centred_on_the_projected_point() {
        let placed = PlacedMarker::centered(marker("12", false), 40.0, 10.6);
        assert_eq!(placed.label(), "(12)");
        assert_eq!(placed.width(), 4);
        assert_eq!(placed.col(), 38);
        assert_eq!(placed.row(), 10);
        assert!(placed.contains(38, 10));
        assert!(placed.contains(41, 10));
        assert!(!placed.contains(42, 10));
        assert!(!placed.contains(39, 11));
    }

    #[test]
    fn marker_at_prefers_the_later_marker() {
        let below = PlacedMarker::centered(marker("1", false), 10.0, 5.0);
        let above = PlacedMarker::centered(marker("2", true), 11.0, 5.0);
        let placed = vec![below, above];
        let hit = marker_at(&placed, 10, 5).expect("hit");
        assert_eq!(hit.marker().number(), "2");
        assert!(marker_at(&placed, 40, 5).is_none());
    }
}
