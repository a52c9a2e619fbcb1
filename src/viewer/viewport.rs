// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Zoom/pan state of the diagram view and the layer transform derived from it.
//!
//! Pan is measured in *nominal pixels*: the viewport spans `2 * PAN_UNIT` of them per axis no
//! matter how many terminal cells it has, so drag distances and the pan clamp do not depend on
//! the window size. [`ViewportGrid`] converts between cells and nominal pixels.

use tracing::debug;

use crate::model::{Diagram, PartId, Position};

use super::marker::{HotspotMarker, PlacedMarker};

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.25;
/// Half of the nominal viewport extent; the pan clamp grows by this much per unit of zoom.
pub const PAN_UNIT: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pan {
    pub x: f32,
    pub y: f32,
}

impl Pan {
    pub const ZERO: Pan = Pan { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pointer location in nominal pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// `scale(zoom)` followed by `translate(pan / zoom)`, applied to image and markers as one layer.
///
/// The translate is pre-divided by the zoom so the on-screen pan equals pointer travel at every
/// zoom level. Points are relative to the layer centre, in nominal pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl LayerTransform {
    pub const IDENTITY: LayerTransform = LayerTransform {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn project(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.scale * (x + self.translate_x),
            self.scale * (y + self.translate_y),
        )
    }

    pub fn unproject(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x / self.scale - self.translate_x,
            y / self.scale - self.translate_y,
        )
    }
}

/// Pan/zoom over one diagram. All mutations clamp; there is no invalid intermediate state.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramViewport {
    zoom: f32,
    pan: Pan,
    is_dragging: bool,
    drag_anchor: PointerPosition,
}

impl Default for DiagramViewport {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            pan: Pan::ZERO,
            is_dragging: false,
            drag_anchor: PointerPosition::default(),
        }
    }
}

impl DiagramViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Pan {
        self.pan
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn can_pan(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    /// Largest allowed |pan| per axis at the current zoom.
    pub fn max_pan(&self) -> f32 {
        (self.zoom - MIN_ZOOM) * PAN_UNIT
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
        debug!(zoom = self.zoom, "zoom in");
    }

    /// Back at 1:1 panning is disallowed, so a leftover offset is dropped.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
        if self.zoom <= MIN_ZOOM {
            self.pan = Pan::ZERO;
        } else {
            self.pan = self.clamp_pan(self.pan);
        }
        debug!(zoom = self.zoom, "zoom out");
    }

    pub fn reset(&mut self) {
        self.zoom = MIN_ZOOM;
        self.pan = Pan::ZERO;
    }

    pub fn begin_drag(&mut self, pointer: PointerPosition) {
        if !self.can_pan() {
            return;
        }
        self.drag_anchor = PointerPosition::new(pointer.x - self.pan.x, pointer.y - self.pan.y);
        self.is_dragging = true;
    }

    pub fn continue_drag(&mut self, pointer: PointerPosition) -> bool {
        if !self.is_dragging || !self.can_pan() {
            return false;
        }
        let candidate = Pan::new(pointer.x - self.drag_anchor.x, pointer.y - self.drag_anchor.y);
        let next = self.clamp_pan(candidate);
        let changed = next != self.pan;
        self.pan = next;
        changed
    }

    /// Pointer up or pointer leaving the view.
    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    /// Keyboard panning by a nominal-pixel delta, under the same clamp as dragging.
    pub fn nudge(&mut self, dx: f32, dy: f32) -> bool {
        if !self.can_pan() {
            return false;
        }
        let next = self.clamp_pan(Pan::new(self.pan.x + dx, self.pan.y + dy));
        let changed = next != self.pan;
        self.pan = next;
        changed
    }

    pub fn transform(&self) -> LayerTransform {
        LayerTransform {
            scale: self.zoom,
            translate_x: self.pan.x / self.zoom,
            translate_y: self.pan.y / self.zoom,
        }
    }

    fn clamp_pan(&self, pan: Pan) -> Pan {
        let max_pan = self.max_pan();
        Pan::new(pan.x.clamp(-max_pan, max_pan), pan.y.clamp(-max_pan, max_pan))
    }

    /// Places one marker per part, centred on its percentage position inside `image_box`.
    ///
    /// Returns nothing for diagrams whose image already carries callouts. The active marker is
    /// emitted last so it draws on top.
    pub fn layout_markers(
        &self,
        diagram: &Diagram,
        active: Option<&PartId>,
        grid: ViewportGrid,
        image_box: ImageBox,
    ) -> Vec<PlacedMarker> {
        if diagram.hide_markers() {
            return Vec::new();
        }

        let transform = self.transform();
        let mut placed = diagram
            .parts()
            .iter()
            .map(|part| {
                let marker = HotspotMarker::for_part(part, active);
                let (col, row) = grid.project_percent(transform, image_box, part.position());
                PlacedMarker::centered(marker, col, row)
            })
            .collect::<Vec<_>>();
        placed.sort_by_key(|placed| placed.marker().is_active());
        placed
    }
}

/// The rectangle the image occupies inside the viewport, in cells relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ImageBox {
    pub fn filling(grid: ViewportGrid) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: f32::from(grid.width),
            height: f32::from(grid.height),
        }
    }

    /// Largest box with the given aspect that fits the grid, centred.
    pub fn contain(grid: ViewportGrid, content_width: f32, content_height: f32) -> Self {
        let area_w = f32::from(grid.width);
        let area_h = f32::from(grid.height);
        if content_width <= 0.0 || content_height <= 0.0 || area_w <= 0.0 || area_h <= 0.0 {
            return Self::filling(grid);
        }
        let scale = (area_w / content_width).min(area_h / content_height);
        let width = content_width * scale;
        let height = content_height * scale;
        Self {
            x: (area_w - width) / 2.0,
            y: (area_h - height) / 2.0,
            width,
            height,
        }
    }

    /// Cell coordinate of a percentage position in the untransformed layer.
    pub fn percent_to_cell(&self, position: Position) -> (f32, f32) {
        let position = position.clamped();
        (
            self.x + position.x() / 100.0 * self.width,
            self.y + position.y() / 100.0 * self.height,
        )
    }

    /// Fractional image coordinates (0..1) of a layer cell, if it lies inside the image.
    pub fn cell_to_fraction(&self, col: f32, row: f32) -> Option<(f32, f32)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let u = (col - self.x) / self.width;
        let v = (row - self.y) / self.height;
        ((0.0..1.0).contains(&u) && (0.0..1.0).contains(&v)).then_some((u, v))
    }
}

/// Cell <-> nominal-pixel mapping for a viewport of `width x height` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportGrid {
    pub width: u16,
    pub height: u16,
}

impl ViewportGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Continuous cell coordinate to nominal pixels relative to the viewport centre.
    pub fn to_nominal(&self, col: f32, row: f32) -> (f32, f32) {
        let w = f32::from(self.width.max(1));
        let h = f32::from(self.height.max(1));
        (
            (col - w / 2.0) / w * 2.0 * PAN_UNIT,
            (row - h / 2.0) / h * 2.0 * PAN_UNIT,
        )
    }

    pub fn to_cell(&self, x: f32, y: f32) -> (f32, f32) {
        let w = f32::from(self.width.max(1));
        let h = f32::from(self.height.max(1));
        (
            x / (2.0 * PAN_UNIT) * w + w / 2.0,
            y / (2.0 * PAN_UNIT) * h + h / 2.0,
        )
    }

    /// Pointer over the centre of a cell. Cells outside the viewport are allowed (drags).
    pub fn pointer(&self, col: i32, row: i32) -> PointerPosition {
        let (x, y) = self.to_nominal(col as f32 + 0.5, row as f32 + 0.5);
        PointerPosition::new(x, y)
    }

    /// Screen cell of a percentage position after the layer transform.
    pub fn project_percent(
        &self,
        transform: LayerTransform,
        image_box: ImageBox,
        position: Position,
    ) -> (f32, f32) {
        let (layer_col, layer_row) = image_box.percent_to_cell(position);
        let (nx, ny) = self.to_nominal(layer_col, layer_row);
        let (sx, sy) = transform.project(nx, ny);
        self.to_cell(sx, sy)
    }

    /// Layer cell shown at the centre of screen cell `(col, row)`.
    pub fn unproject_cell(&self, transform: LayerTransform, col: u16, row: u16) -> (f32, f32) {
        let (nx, ny) = self.to_nominal(f32::from(col) + 0.5, f32::from(row) + 0.5);
        let (lx, ly) = transform.unproject(nx, ny);
        self.to_cell(lx, ly)
    }
}
