// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::{DiagramId, PartId};
use super::part::Part;

/// Reference to the raster (or text-art) asset of a diagram, relative to the catalog root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name without directories, used as the placeholder caption.
    pub fn file_name(&self) -> &str {
        self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0)
    }

    pub fn is_text_art(&self) -> bool {
        self.0.to_ascii_lowercase().ends_with(".txt")
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One exploded-view image plus the parts it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    diagram_id: DiagramId,
    title: String,
    image: ImageRef,
    parts: Vec<Part>,
    hide_markers: bool,
}

impl Diagram {
    pub fn new(
        diagram_id: DiagramId,
        title: impl Into<String>,
        image: ImageRef,
        parts: Vec<Part>,
    ) -> Self {
        Self {
            diagram_id,
            title: title.into(),
            image,
            parts,
            hide_markers: false,
        }
    }

    /// The image already carries baked-in numbered callouts.
    pub fn with_hidden_markers(mut self, hide_markers: bool) -> Self {
        self.hide_markers = hide_markers;
        self
    }

    pub fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn hide_markers(&self) -> bool {
        self.hide_markers
    }

    pub fn part(&self, part_id: &PartId) -> Option<&Part> {
        self.parts.iter().find(|part| part.part_id() == part_id)
    }

    pub fn part_index(&self, part_id: &PartId) -> Option<usize> {
        self.parts.iter().position(|part| part.part_id() == part_id)
    }
}
