// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::{
    Catalog, Diagram, DiagramId, GroupIcon, GroupId, Id, IdError, ImageRef, Part, PartId,
    PartsGroup, Position, Product, ProductId, SubPart,
};
use crate::viewer::Backdrop;

const CATALOG_FILENAME: &str = "catalog.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid id for {context}: {value:?}: {source}")]
    InvalidId {
        context: String,
        value: String,
        #[source]
        source: IdError,
    },
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
    #[error("diagram `{diagram}` lists part id `{part}` more than once")]
    DuplicatePartId { diagram: String, part: String },
    #[error("diagram `{diagram}`: part `{number}` must have a positive quantity")]
    InvalidQuantity { diagram: String, number: String },
    #[error("parts group `{group}` has no diagrams")]
    EmptyGroup { group: String },
    #[error("invalid asset path {path:?} (must be relative and stay inside the catalog folder)")]
    InvalidAssetPath { path: String },
    #[error("asset {path:?} is not part of the bundled demo catalog")]
    NotBundled { path: String },
    #[error("catalog at {path:?} contains no products")]
    EmptyCatalog { path: PathBuf },
}

/// Catalog folder on disk: `catalog.json` plus the diagram assets it references.
#[derive(Debug, Clone)]
pub struct CatalogFolder {
    root: PathBuf,
}

impl CatalogFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILENAME)
    }

    /// Reads and validates `catalog.json`.
    pub fn load_catalog(&self) -> Result<Catalog, StoreError> {
        let path = self.catalog_path();
        let json = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        parse_catalog(path, &json)
    }

    /// Absolute path of a diagram asset, refusing anything that would leave the folder.
    pub fn asset_path(&self, image: &ImageRef) -> Result<PathBuf, StoreError> {
        validate_asset_path(image.as_str())?;
        Ok(self.root.join(image.as_str()))
    }

    /// Loads the drawing behind a diagram. Raster assets are never decoded; they map to a
    /// placeholder without touching the file.
    pub fn load_backdrop(&self, image: &ImageRef) -> Result<Backdrop, StoreError> {
        let path = self.asset_path(image)?;
        if !image.is_text_art() {
            debug!(image = %image, "raster asset shown as placeholder");
            return Ok(Backdrop::placeholder(image));
        }
        let text = fs::read_to_string(&path).map_err(|source| StoreError::Io { path, source })?;
        Ok(Backdrop::from_text(&text))
    }
}

/// Validates `catalog.json` contents; `path` only labels errors and logs.
pub(crate) fn parse_catalog(path: PathBuf, json: &str) -> Result<Catalog, StoreError> {
    let dto: CatalogJson = serde_json::from_str(json).map_err(|source| StoreError::Json {
        path: path.clone(),
        source,
    })?;

    if dto.products.is_empty() {
        return Err(StoreError::EmptyCatalog { path });
    }

    let mut product_ids = BTreeSet::new();
    let mut products = Vec::with_capacity(dto.products.len());
    for product in dto.products {
        let product = product_from_json(product)?;
        if !product_ids.insert(product.product_id().clone()) {
            return Err(StoreError::DuplicateId {
                kind: "product",
                id: product.product_id().to_string(),
            });
        }
        products.push(product);
    }

    let catalog = Catalog::new(products);
    info!(
        path = %path.display(),
        products = catalog.products().len(),
        diagrams = catalog
            .products()
            .iter()
            .flat_map(Product::groups)
            .map(|group| group.diagrams().len())
            .sum::<usize>(),
        "catalog loaded"
    );
    Ok(catalog)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogJson {
    products: Vec<ProductJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductJson {
    id: String,
    name: String,
    #[serde(default)]
    groups: Vec<GroupJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupJson {
    id: String,
    title: String,
    #[serde(default = "default_icon")]
    icon: GroupIcon,
    #[serde(default)]
    diagrams: Vec<DiagramJson>,
}

fn default_icon() -> GroupIcon {
    GroupIcon::Generic
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiagramJson {
    id: String,
    title: String,
    image: String,
    #[serde(default)]
    hide_markers: bool,
    #[serde(default)]
    parts: Vec<PartJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartJson {
    id: String,
    number: String,
    code: String,
    name: String,
    quantity: u32,
    position: PositionJson,
    #[serde(default)]
    sub_parts: Vec<SubPartJson>,
}

#[derive(Debug, Deserialize)]
struct PositionJson {
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubPartJson {
    number: String,
    code: String,
    name: String,
    quantity: u32,
}

fn parse_id<T>(context: impl Into<String>, value: String) -> Result<Id<T>, StoreError> {
    Id::new(value.clone()).map_err(|source| StoreError::InvalidId {
        context: context.into(),
        value,
        source,
    })
}

fn product_from_json(product: ProductJson) -> Result<Product, StoreError> {
    let product_id: ProductId = parse_id("product", product.id)?;

    let mut group_ids = BTreeSet::new();
    let mut groups = Vec::with_capacity(product.groups.len());
    for group in product.groups {
        let group = group_from_json(&product_id, group)?;
        if !group_ids.insert(group.group_id().clone()) {
            return Err(StoreError::DuplicateId {
                kind: "parts group",
                id: format!("{product_id}/{}", group.group_id()),
            });
        }
        groups.push(group);
    }

    Ok(Product::new(product_id, product.name, groups))
}

fn group_from_json(product_id: &ProductId, group: GroupJson) -> Result<PartsGroup, StoreError> {
    let group_id: GroupId = parse_id(format!("parts group in `{product_id}`"), group.id)?;
    if group.diagrams.is_empty() {
        return Err(StoreError::EmptyGroup {
            group: group_id.to_string(),
        });
    }

    let mut diagram_ids = BTreeSet::new();
    let mut diagrams = Vec::with_capacity(group.diagrams.len());
    for diagram in group.diagrams {
        let diagram = diagram_from_json(&group_id, diagram)?;
        if !diagram_ids.insert(diagram.diagram_id().clone()) {
            return Err(StoreError::DuplicateId {
                kind: "diagram",
                id: format!("{group_id}/{}", diagram.diagram_id()),
            });
        }
        diagrams.push(diagram);
    }

    Ok(PartsGroup::new(group_id, group.title, group.icon, diagrams))
}

fn diagram_from_json(group_id: &GroupId, diagram: DiagramJson) -> Result<Diagram, StoreError> {
    let diagram_id: DiagramId = parse_id(format!("diagram in `{group_id}`"), diagram.id)?;
    validate_asset_path(&diagram.image)?;

    let mut part_ids = BTreeSet::new();
    let mut parts = Vec::with_capacity(diagram.parts.len());
    for part in diagram.parts {
        let part_id: PartId = parse_id(format!("part in `{diagram_id}`"), part.id)?;
        if !part_ids.insert(part_id.clone()) {
            return Err(StoreError::DuplicatePartId {
                diagram: diagram_id.to_string(),
                part: part_id.to_string(),
            });
        }
        if part.quantity == 0 {
            return Err(StoreError::InvalidQuantity {
                diagram: diagram_id.to_string(),
                number: part.number,
            });
        }

        let mut sub_parts = Vec::with_capacity(part.sub_parts.len());
        for sub_part in part.sub_parts {
            if sub_part.quantity == 0 {
                return Err(StoreError::InvalidQuantity {
                    diagram: diagram_id.to_string(),
                    number: sub_part.number,
                });
            }
            sub_parts.push(SubPart::new(
                sub_part.number,
                sub_part.code,
                sub_part.name,
                sub_part.quantity,
            ));
        }

        let position = Position::new(part.position.x, part.position.y);
        if !position.is_within_image() {
            warn!(
                diagram = %diagram_id,
                part = %part_id,
                x = position.x(),
                y = position.y(),
                "part position outside the image, marker drawn on the nearest edge"
            );
        }

        parts.push(
            Part::new(
                part_id,
                part.number,
                part.code,
                part.name,
                part.quantity,
                position,
            )
            .with_sub_parts(sub_parts),
        );
    }

    Ok(Diagram::new(
        diagram_id,
        diagram.title,
        ImageRef::new(diagram.image),
        parts,
    )
    .with_hidden_markers(diagram.hide_markers))
}

fn validate_asset_path(value: &str) -> Result<(), StoreError> {
    let invalid = || StoreError::InvalidAssetPath {
        path: value.to_owned(),
    };

    let path = Path::new(value);
    if value.trim().is_empty() || path.is_absolute() || value.starts_with(['/', '\\']) {
        return Err(invalid());
    }

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::ParentDir => {
                return Err(invalid());
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    if value.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(invalid());
    }

    Ok(())
}
