// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::PartId;

/// Marker location as percentages of the untransformed image (0..=100 on both axes).
///
/// The viewport transform is applied to the whole image layer; positions are never rescaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 100.0;

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Pulls out-of-range or non-finite coordinates back onto the image edge.
    pub fn clamped(&self) -> Self {
        Self {
            x: clamp_percent(self.x),
            y: clamp_percent(self.y),
        }
    }

    pub fn is_within_image(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && (Self::MIN..=Self::MAX).contains(&self.x)
            && (Self::MIN..=Self::MAX).contains(&self.y)
    }
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        return Position::MIN;
    }
    value.clamp(Position::MIN, Position::MAX)
}

/// A fastener or consumable listed under its parent part. Never markered on the image.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPart {
    number: String,
    code: String,
    name: String,
    quantity: u32,
}

impl SubPart {
    pub fn new(
        number: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            number: number.into(),
            code: code.into(),
            name: name.into(),
            quantity,
        }
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

/// One catalog-listed component of an exploded assembly diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    part_id: PartId,
    number: String,
    code: String,
    name: String,
    quantity: u32,
    position: Position,
    sub_parts: Vec<SubPart>,
}

impl Part {
    pub fn new(
        part_id: PartId,
        number: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        position: Position,
    ) -> Self {
        Self {
            part_id,
            number: number.into(),
            code: code.into(),
            name: name.into(),
            quantity,
            position,
            sub_parts: Vec::new(),
        }
    }

    pub fn with_sub_parts(mut self, sub_parts: Vec<SubPart>) -> Self {
        self.sub_parts = sub_parts;
        self
    }

    pub fn part_id(&self) -> &PartId {
        &self.part_id
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

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn sub_parts(&self) -> &[SubPart] {
        &self.sub_parts
    }
}
