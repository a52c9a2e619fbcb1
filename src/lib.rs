// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Partscope: interactive exploded parts diagrams in the terminal.
//!
//! A catalog of products, parts groups and diagrams is loaded from a folder ([`store`]), one
//! group at a time is driven by a [`session::CatalogSession`], and the [`viewer`] pieces
//! (pan/zoom viewport, hotspot markers, parts ledger) are rendered by the [`tui`].

pub mod logging;
pub mod model;
pub mod session;
pub mod store;
pub mod tui;
pub mod viewer;
