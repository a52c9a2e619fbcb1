// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Views over one diagram: pan/zoom viewport, hotspot markers, parts ledger and the backdrop
//! drawing. None of them owns hover/pin state; they take the session's active id as input and
//! report pointer intent as [`crate::session::InteractionOp`].

pub mod backdrop;
pub mod ledger;
pub mod marker;
pub mod viewport;

pub use backdrop::Backdrop;
pub use ledger::{LedgerRow, LedgerRowKind, PartsLedger};
pub use marker::{marker_at, HotspotMarker, MarkerStyle, PlacedMarker};
pub use viewport::{
    DiagramViewport, ImageBox, LayerTransform, Pan, PointerPosition, ViewportGrid, MAX_ZOOM,
    MIN_ZOOM, PAN_UNIT, ZOOM_STEP,
};
