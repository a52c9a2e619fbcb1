// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Immutable catalog records.
//!
//! A catalog holds products; products hold parts groups; groups hold diagrams; diagrams hold
//! parts. Everything here is loaded once and never mutated by the viewer.

pub mod catalog;
pub mod diagram;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod part;

pub use catalog::{Catalog, CatalogPage, GroupIcon, NotFound, PartsGroup, Product};
pub use diagram::{Diagram, ImageRef};
pub use ids::{DiagramId, GroupId, Id, IdError, PartId, ProductId};
pub use part::{Part, Position, SubPart};
