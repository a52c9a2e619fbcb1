// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Catalog folders on disk.
//!
//! A catalog folder holds `catalog.json` and the diagram assets it references. Loading validates
//! everything the viewer relies on (unique part ids per diagram, non-empty groups, relative asset
//! paths) so the core never sees malformed records. The demo catalog is compiled in and goes
//! through the same validation.

pub mod bundled;
pub mod catalog_folder;

pub use bundled::{demo_catalog, CatalogAssets};
pub use catalog_folder::{CatalogFolder, StoreError};
