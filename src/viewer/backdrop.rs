// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::ImageRef;

use super::viewport::{ImageBox, ViewportGrid};

/// What the diagram viewport draws underneath the markers.
///
/// Text-art drawings are sampled cell by cell through the layer transform. Anything else (a
/// raster image the terminal cannot show) becomes a placeholder with the file name as caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backdrop {
    Art {
        lines: Vec<Vec<char>>,
        width: usize,
        height: usize,
    },
    Placeholder {
        caption: String,
    },
}

impl Backdrop {
    pub fn from_text(text: &str) -> Self {
        let mut lines = text
            .lines()
            .map(|line| line.trim_end().chars().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);
        let height = lines.len();
        if width == 0 || height == 0 {
            return Self::Placeholder {
                caption: "(empty drawing)".to_owned(),
            };
        }
        Self::Art {
            lines,
            width,
            height,
        }
    }

    pub fn placeholder(image: &ImageRef) -> Self {
        Self::Placeholder {
            caption: format!("[ {} ]", image.file_name()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            Self::Placeholder { caption } => Some(caption.as_str()),
            Self::Art { .. } => None,
        }
    }

    /// Where the drawing sits inside the viewport at zoom 1 (contain-fit for art).
    pub fn image_box(&self, grid: ViewportGrid) -> ImageBox {
        match self {
            Self::Art { width, height, .. } => {
                ImageBox::contain(grid, *width as f32, *height as f32)
            }
            Self::Placeholder { .. } => ImageBox::filling(grid),
        }
    }

    /// Character at fractional image coordinates `(u, v)` in `0..1`.
    ///
    /// Placeholders show a sparse dot lattice; blank art cells return `None`.
    pub fn sample(&self, u: f32, v: f32) -> Option<char> {
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return None;
        }
        match self {
            Self::Art {
                lines,
                width,
                height,
            } => {
                let col = ((u * *width as f32) as usize).min(width - 1);
                let row = ((v * *height as f32) as usize).min(height - 1);
                lines
                    .get(row)
                    .and_then(|line| line.get(col))
                    .copied()
                    .filter(|ch| !ch.is_whitespace())
            }
            Self::Placeholder { .. } => {
                let on_lattice = (u * 24.0) as usize % 3 == 0 && (v * 12.0) as usize % 3 == 0;
                on_lattice.then_some('·')
            }
        }
    }
}
