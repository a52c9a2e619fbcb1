// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::catalog::{Catalog, GroupIcon, PartsGroup, Product};
use super::diagram::{Diagram, ImageRef};
use super::ids::{DiagramId, GroupId, PartId, ProductId};
use super::part::{Part, Position, SubPart};

fn pid(value: &str) -> PartId {
    PartId::new(value).expect("part id")
}

fn part(id: &str, code: &str, name: &str, quantity: u32, x: f32, y: f32) -> Part {
    Part::new(pid(id), id, code, name, quantity, Position::new(x, y))
}

/// Main arm assembly: nine markered parts, `7` sits at (85, 52).
pub(crate) fn arm_main_diagram() -> Diagram {
    let parts = vec![
        part("1", "T40-A-001", "Arm tube (CW)", 2, 18.0, 30.0),
        part("2", "T40-A-002", "Arm folding joint", 2, 32.0, 44.0).with_sub_parts(vec![
            SubPart::new("2.1", "M3x10", "Hex socket screw", 6),
            SubPart::new("2.2", "W3", "Spring washer", 6),
        ]),
        part("3", "T40-A-003", "Arm lock sleeve", 2, 41.0, 58.0),
        part("4", "T40-A-004", "Motor mount base", 4, 55.0, 22.0),
        part("5", "T40-A-005", "ESC cover", 4, 63.0, 71.0),
        part("6", "T40-A-006", "Arm signal cable", 4, 72.0, 36.0),
        part("7", "T40-A-007", "Arm clamp", 2, 85.0, 52.0).with_sub_parts(vec![SubPart::new(
            "7.1",
            "M4x12",
            "Clamp screw",
            4,
        )]),
        part("8", "T40-A-008", "Arm sensor", 2, 90.0, 80.0),
        part("9", "T40-A-009", "Arm end cap", 4, 12.0, 86.0),
    ];
    Diagram::new(
        DiagramId::new("arm-main").expect("diagram id"),
        "Arm assembly",
        ImageRef::new("images/arm-main.txt"),
        parts,
    )
}

/// Motor view of the same group; reuses part id `3` for a different part.
pub(crate) fn arm_motor_diagram() -> Diagram {
    let parts = vec![
        part("1", "T40-M-001", "Motor", 1, 50.0, 30.0),
        part("2", "T40-M-002", "Propeller adapter", 1, 50.0, 12.0),
        part("3", "T40-M-003", "Motor bearing", 2, 30.0, 62.0).with_sub_parts(vec![
            SubPart::new("3.1", "6802RS", "Ball bearing", 2),
        ]),
    ];
    Diagram::new(
        DiagramId::new("arm-motor").expect("diagram id"),
        "Motor and propeller",
        ImageRef::new("images/arm-motor.txt"),
        parts,
    )
}

/// Fuselage drawing with callouts printed into the image.
pub(crate) fn fuselage_diagram() -> Diagram {
    let parts = vec![
        part("1", "T40-F-001", "Upper shell", 1, 50.0, 20.0),
        part("2", "T40-F-002", "Lower shell", 1, 50.0, 80.0),
        part("3", "T40-F-003", "Avionics tray", 1, 50.0, 50.0),
    ];
    Diagram::new(
        DiagramId::new("fuselage").expect("diagram id"),
        "Fuselage",
        ImageRef::new("images/fuselage.png"),
        parts,
    )
    .with_hidden_markers(true)
}

pub(crate) fn arm_group() -> PartsGroup {
    PartsGroup::new(
        GroupId::new("arm").expect("group id"),
        "Arm",
        GroupIcon::Arm,
        vec![arm_main_diagram(), arm_motor_diagram()],
    )
}

pub(crate) fn demo_catalog() -> Catalog {
    let t40 = Product::new(
        ProductId::new("t40").expect("product id"),
        "T40 spraying drone",
        vec![
            arm_group(),
            PartsGroup::new(
                GroupId::new("fuselage").expect("group id"),
                "Fuselage",
                GroupIcon::Fuselage,
                vec![fuselage_diagram()],
            ),
        ],
    );
    Catalog::new(vec![t40])
}

#[cfg(test)]
mod tests {
    use super::{arm_group, demo_catalog};

    #[test]
    fn demo_catalog_is_well_formed() {
        let catalog = demo_catalog();
        assert_eq!(catalog.products().len(), 1);
        let group = arm_group();
        assert!(group.has_tabs());
        for diagram in group.diagrams() {
            for part in diagram.parts() {
                assert!(part.position().is_within_image());
                assert!(part.quantity() > 0);
            }
        }
    }
}
