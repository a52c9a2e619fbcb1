// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::diagram::Diagram;
use super::ids::{GroupId, ProductId};

/// Icon shown next to a parts group.
///
/// Closed on purpose: catalogs name icons by kebab-case key and an unknown key fails to load
/// instead of rendering nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupIcon {
    Arm,
    Fuselage,
    Propulsion,
    Spray,
    Spreader,
    Battery,
    Electronics,
    Landing,
    Camera,
    Generic,
}

impl GroupIcon {
    pub fn key(self) -> &'static str {
        match self {
            Self::Arm => "arm",
            Self::Fuselage => "fuselage",
            Self::Propulsion => "propulsion",
            Self::Spray => "spray",
            Self::Spreader => "spreader",
            Self::Battery => "battery",
            Self::Electronics => "electronics",
            Self::Landing => "landing",
            Self::Camera => "camera",
            Self::Generic => "generic",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Arm => "⟋",
            Self::Fuselage => "▣",
            Self::Propulsion => "✢",
            Self::Spray => "⋰",
            Self::Spreader => "⁂",
            Self::Battery => "▮",
            Self::Electronics => "⌁",
            Self::Landing => "⊥",
            Self::Camera => "◉",
            Self::Generic => "•",
        }
    }
}

impl fmt::Display for GroupIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A named collection of related diagrams for one product (e.g. "Arm", "Fuselage").
#[derive(Debug, Clone, PartialEq)]
pub struct PartsGroup {
    group_id: GroupId,
    title: String,
    icon: GroupIcon,
    diagrams: Vec<Diagram>,
}

impl PartsGroup {
    pub fn new(
        group_id: GroupId,
        title: impl Into<String>,
        icon: GroupIcon,
        diagrams: Vec<Diagram>,
    ) -> Self {
        Self {
            group_id,
            title: title.into(),
            icon,
            diagrams,
        }
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> GroupIcon {
        self.icon
    }

    pub fn diagrams(&self) -> &[Diagram] {
        &self.diagrams
    }

    pub fn has_tabs(&self) -> bool {
        self.diagrams.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    product_id: ProductId,
    name: String,
    groups: Vec<PartsGroup>,
}

impl Product {
    pub fn new(product_id: ProductId, name: impl Into<String>, groups: Vec<PartsGroup>) -> Self {
        Self {
            product_id,
            name: name.into(),
            groups,
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groups(&self) -> &[PartsGroup] {
        &self.groups
    }

    pub fn group_index(&self, group_id: &str) -> Option<usize> {
        self.groups
            .iter()
            .position(|group| group.group_id().as_str() == group_id)
    }
}

/// Missing product/group slug; the page shows "not found" instead of the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("product `{0}` not found")]
    Product(String),
    #[error("parts group `{group}` not found in product `{product}`")]
    Group { product: String, group: String },
    #[error("product `{0}` has no parts groups")]
    NoGroups(String),
}

/// Product/group coordinates of the page the viewer is opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogPage {
    pub product_index: usize,
    pub group_index: usize,
}

/// All statically supplied products, in display order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.product_id().as_str() == product_id)
    }

    /// Resolves optional slugs to a page; missing slugs default to the first entry.
    pub fn page(
        &self,
        product_id: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<CatalogPage, NotFound> {
        let product_index = match product_id {
            Some(slug) => self
                .products
                .iter()
                .position(|product| product.product_id().as_str() == slug)
                .ok_or_else(|| NotFound::Product(slug.to_owned()))?,
            None if self.products.is_empty() => {
                return Err(NotFound::Product("<any>".to_owned()));
            }
            None => 0,
        };

        let product = &self.products[product_index];
        let group_index = match group_id {
            Some(slug) => product.group_index(slug).ok_or_else(|| NotFound::Group {
                product: product.product_id().to_string(),
                group: slug.to_owned(),
            })?,
            None if product.groups().is_empty() => {
                return Err(NotFound::NoGroups(product.product_id().to_string()));
            }
            None => 0,
        };

        Ok(CatalogPage {
            product_index,
            group_index,
        })
    }

    pub fn group_at(&self, page: CatalogPage) -> Option<&PartsGroup> {
        self.products
            .get(page.product_index)
            .and_then(|product| product.groups().get(page.group_index))
    }
}
