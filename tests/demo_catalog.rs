// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use partscope::model::{Catalog, NotFound, PartId};
use partscope::session::{CatalogSession, InteractionOp};
use partscope::store::CatalogFolder;
use partscope::viewer::{
    marker_at, Backdrop, DiagramViewport, PartsLedger, PointerPosition, ViewportGrid,
};

fn demo_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("demo-catalog")
}

fn load() -> (CatalogFolder, Catalog) {
    let folder = CatalogFolder::new(demo_dir());
    let catalog = folder
        .load_catalog()
        .unwrap_or_else(|err| panic!("failed to load demo catalog: {err}"));
    (folder, catalog)
}

fn pid(value: &str) -> PartId {
    PartId::new(value).expect("part id")
}

fn arm_session(catalog: &Catalog) -> CatalogSession {
    let page = catalog.page(Some("t40"), Some("arm")).expect("arm page");
    CatalogSession::new(catalog.group_at(page).expect("arm group").clone())
}

#[test]
fn demo_catalog_loads_with_expected_shape() {
    let (_, catalog) = load();
    let product = catalog.product("t40").expect("t40");
    assert_eq!(product.groups().len(), 2);

    let arm = &product.groups()[0];
    assert_eq!(arm.diagrams().len(), 2);
    assert_eq!(arm.diagrams()[0].parts().len(), 9);
    assert!(product.groups()[1].diagrams()[0].hide_markers());
}

#[test]
fn unknown_group_slug_is_not_found() {
    let (_, catalog) = load();
    assert!(matches!(
        catalog.page(Some("t40"), Some("tail")),
        Err(NotFound::Group { .. })
    ));
}

#[test]
fn diagram_assets_resolve_to_art_or_placeholder() {
    let (folder, catalog) = load();
    let product = catalog.product("t40").expect("t40");

    let arm_main = &product.groups()[0].diagrams()[0];
    let art = folder.load_backdrop(arm_main.image()).expect("arm art");
    assert!(matches!(art, Backdrop::Art { .. }));

    let fuselage = &product.groups()[1].diagrams()[0];
    let placeholder = folder.load_backdrop(fuselage.image()).expect("placeholder");
    assert_eq!(placeholder.caption(), Some("[ fuselage.png ]"));
}

#[test]
fn hover_and_pin_flow_through_marker_and_ledger() {
    let (folder, catalog) = load();
    let mut session = arm_session(&catalog);
    let diagram = session.active_diagram().expect("diagram").clone();

    let mut ledger = PartsLedger::new(&diagram);
    ledger.set_viewport_height(6);

    let backdrop = folder.load_backdrop(diagram.image()).expect("backdrop");
    let viewport = DiagramViewport::new();
    let grid = ViewportGrid::new(80, 24);
    let placed = viewport.layout_markers(&diagram, None, grid, backdrop.image_box(grid));
    let seven = placed
        .iter()
        .find(|placed| placed.marker().part_id() == &pid("7"))
        .expect("marker 7");

    // Pointer over marker 7 on screen.
    let hit = marker_at(&placed, seven.col() + 1, seven.row()).expect("hit");
    session.apply(hit.marker().on_hover_start());
    ledger.sync_active(session.effective_active_id());
    assert_eq!(session.effective_active_id(), Some(&pid("7")));
    assert_eq!(ledger.scroll_target(), ledger.centered_offset(8));

    // Pin from the ledger row, then hover elsewhere.
    let op = ledger.click_at(8).expect("part row");
    assert_eq!(op, InteractionOp::Activate(pid("7")));
    session.apply(op);
    session.apply(InteractionOp::HoverIn(pid("2")));
    assert_eq!(session.effective_active_id(), Some(&pid("7")));

    // Sub-part rows are read-only.
    assert_eq!(ledger.click_at(9), None);

    // Switching tabs forgets everything.
    assert!(session.select_diagram(1));
    assert_eq!(session.effective_active_id(), None);
}

#[test]
fn zoomed_drag_stays_inside_the_pan_clamp() {
    let mut viewport = DiagramViewport::new();
    for _ in 0..8 {
        viewport.zoom_in();
    }
    viewport.begin_drag(PointerPosition::new(0.0, 0.0));
    viewport.continue_drag(PointerPosition::new(1_000.0, -1_000.0));
    viewport.end_drag();

    let pan = viewport.pan();
    assert_eq!(pan.x, viewport.max_pan());
    assert_eq!(pan.y, -viewport.max_pan());
}
