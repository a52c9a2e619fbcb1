// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Demo catalog compiled into the binary, plus the choice of where drawings are read from.

use std::path::PathBuf;

use super::catalog_folder::{parse_catalog, CatalogFolder, StoreError};
use crate::model::{Catalog, ImageRef};
use crate::viewer::Backdrop;

const DEMO_ORIGIN: &str = "<bundled>/demo-catalog/catalog.json";
const DEMO_CATALOG_JSON: &str = include_str!("../../data/demo-catalog/catalog.json");
const DEMO_ASSETS: [(&str, &str); 2] = [
    (
        "images/arm-main.txt",
        include_str!("../../data/demo-catalog/images/arm-main.txt"),
    ),
    (
        "images/arm-motor.txt",
        include_str!("../../data/demo-catalog/images/arm-motor.txt"),
    ),
];

/// Parses the bundled demo catalog; validated like any folder on disk.
pub fn demo_catalog() -> Result<Catalog, StoreError> {
    parse_catalog(PathBuf::from(DEMO_ORIGIN), DEMO_CATALOG_JSON)
}

fn demo_backdrop(image: &ImageRef) -> Result<Backdrop, StoreError> {
    if !image.is_text_art() {
        return Ok(Backdrop::placeholder(image));
    }
    DEMO_ASSETS
        .iter()
        .find(|(path, _)| *path == image.as_str())
        .map(|(_, text)| Backdrop::from_text(text))
        .ok_or_else(|| StoreError::NotBundled {
            path: image.as_str().to_owned(),
        })
}

/// Where the drawings of a loaded catalog come from.
#[derive(Debug, Clone)]
pub enum CatalogAssets {
    Folder(CatalogFolder),
    Bundled,
    /// Records without drawings; every diagram shows its placeholder.
    Detached,
}

impl CatalogAssets {
    pub fn load_backdrop(&self, image: &ImageRef) -> Result<Backdrop, StoreError> {
        match self {
            Self::Folder(folder) => folder.load_backdrop(image),
            Self::Bundled => demo_backdrop(image),
            Self::Detached => Ok(Backdrop::placeholder(image)),
        }
    }

    /// Short label for logs and `--check` output.
    pub fn origin(&self) -> String {
        match self {
            Self::Folder(folder) => folder.catalog_path().display().to_string(),
            Self::Bundled => DEMO_ORIGIN.to_owned(),
            Self::Detached => "(built-in records)".to_owned(),
        }
    }
}
