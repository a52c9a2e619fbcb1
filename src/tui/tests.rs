// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{
    code_key, diagram_counter_label, fit, osc52_sequence, ranked_search_results,
    search_candidates_from_diagram, stack_main_panes_vertically, testing::HeadlessTui,
    SearchCandidate, SearchKind,
};
use crate::model::{fixtures, PartId};
use crate::store::{demo_catalog, CatalogAssets};
use crate::viewer::{Pan, MIN_ZOOM};
use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::{buffer::Buffer, layout::Rect, style::Modifier};
use rstest::{fixture, rstest};

fn pid(value: &str) -> PartId {
    PartId::new(value).expect("part id")
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[fixture]
fn tui() -> HeadlessTui {
    HeadlessTui::new(fixtures::demo_catalog(), CatalogAssets::Detached, 120, 30)
}

fn hover_marker(tui: &mut HeadlessTui, id: &str) {
    let (col, row) = tui.marker_cell(&pid(id)).expect("marker placed");
    tui.mouse(MouseEventKind::Moved, col, row);
}

fn click_marker(tui: &mut HeadlessTui, id: &str) {
    let (col, row) = tui.marker_cell(&pid(id)).expect("marker placed");
    tui.mouse(MouseEventKind::Moved, col, row);
    tui.click(col, row);
}

fn move_to_empty_diagram_space(tui: &mut HeadlessTui) {
    let (col, row) = tui.diagram_center();
    tui.mouse(MouseEventKind::Moved, col, row);
}

#[rstest]
fn hovering_a_marker_highlights_it_and_leaving_clears(mut tui: HeadlessTui) {
    hover_marker(&mut tui, "7");
    assert_eq!(tui.session().hovered_part_id(), Some(&pid("7")));
    assert_eq!(tui.session().effective_active_id(), Some(&pid("7")));
    assert_eq!(tui.ledger().cursor(), Some(8));

    move_to_empty_diagram_space(&mut tui);
    assert_eq!(tui.session().effective_active_id(), None);
}

#[rstest]
fn clicking_pins_until_the_same_marker_is_clicked_again(mut tui: HeadlessTui) {
    click_marker(&mut tui, "7");
    assert_eq!(tui.session().selected_part_id(), Some(&pid("7")));

    hover_marker(&mut tui, "2");
    assert_eq!(tui.session().effective_active_id(), Some(&pid("7")));

    click_marker(&mut tui, "7");
    assert_eq!(tui.session().selected_part_id(), None);
    // The pointer still rests on 7, but hover is not replayed after an unpin.
    assert_eq!(tui.session().effective_active_id(), None);
}

#[rstest]
fn clicking_another_marker_moves_the_pin(mut tui: HeadlessTui) {
    click_marker(&mut tui, "7");
    click_marker(&mut tui, "3");
    assert_eq!(tui.session().selected_part_id(), Some(&pid("3")));
}

#[rstest]
fn ledger_rows_report_hover_and_sub_parts_clear_it(mut tui: HeadlessTui) {
    let (col, row) = tui.ledger_cell(1).expect("part 2 row visible");
    tui.mouse(MouseEventKind::Moved, col, row);
    assert_eq!(tui.session().hovered_part_id(), Some(&pid("2")));

    let (col, row) = tui.ledger_cell(2).expect("sub-part row visible");
    tui.mouse(MouseEventKind::Moved, col, row);
    assert_eq!(tui.session().hovered_part_id(), None);

    tui.click(col, row);
    assert_eq!(tui.session().selected_part_id(), None);
}

#[rstest]
fn ledger_click_pins_the_marker_too(mut tui: HeadlessTui) {
    let (col, row) = tui.ledger_cell(8).expect("part 7 row visible");
    tui.mouse(MouseEventKind::Moved, col, row);
    tui.click(col, row);
    assert_eq!(tui.session().selected_part_id(), Some(&pid("7")));

    let screen = buffer_to_string(tui.render());
    assert!(screen.contains("❮7❯"));
    assert!(screen.contains("[pinned]"));
}

fn ledger_row_modifier(tui: &mut HeadlessTui, index: usize) -> Modifier {
    let (col, row) = tui.ledger_cell(index).expect("ledger row visible");
    tui.render()
        .cell((col, row))
        .map(|cell| cell.modifier)
        .expect("cell in buffer")
}

#[rstest]
fn active_ledger_row_is_highlighted_in_both_focus_states(mut tui: HeadlessTui) {
    let (col, row) = tui.ledger_cell(8).expect("part 7 row visible");
    tui.mouse(MouseEventKind::Moved, col, row);
    tui.click(col, row);
    tui.settle();

    let modifier = ledger_row_modifier(&mut tui, 8);
    assert!(modifier.contains(Modifier::REVERSED));
    assert!(modifier.contains(Modifier::UNDERLINED));

    tui.press(KeyCode::Tab);
    let modifier = ledger_row_modifier(&mut tui, 8);
    assert!(modifier.contains(Modifier::REVERSED));
    assert!(!modifier.contains(Modifier::UNDERLINED));

    let other = ledger_row_modifier(&mut tui, 1);
    assert!(!other.contains(Modifier::REVERSED));
}

#[rstest]
fn zoom_then_drag_pans_and_zooming_back_out_recentres(mut tui: HeadlessTui) {
    for _ in 0..3 {
        tui.press(KeyCode::Char('+'));
    }
    assert_eq!(tui.viewport().zoom(), 1.75);

    let (col, row) = tui.diagram_center();
    tui.mouse(MouseEventKind::Down(MouseButton::Left), col, row);
    assert!(tui.viewport().is_dragging());
    tui.mouse(MouseEventKind::Drag(MouseButton::Left), col + 6, row + 2);
    tui.mouse(MouseEventKind::Up(MouseButton::Left), col + 6, row + 2);
    assert!(!tui.viewport().is_dragging());
    let pan = tui.viewport().pan();
    assert!(pan.x > 0.0);
    assert!(pan.y > 0.0);
    assert!(pan.x <= tui.viewport().max_pan());

    for _ in 0..5 {
        tui.press(KeyCode::Char('-'));
    }
    assert_eq!(tui.viewport().zoom(), MIN_ZOOM);
    assert_eq!(tui.viewport().pan(), Pan::ZERO);
}

#[rstest]
fn dragging_at_min_zoom_does_nothing(mut tui: HeadlessTui) {
    let (col, row) = tui.diagram_center();
    tui.mouse(MouseEventKind::Down(MouseButton::Left), col, row);
    tui.mouse(MouseEventKind::Drag(MouseButton::Left), col + 10, row + 3);
    assert_eq!(tui.viewport().pan(), Pan::ZERO);
    assert!(!tui.viewport().is_dragging());
}

#[rstest]
fn wheel_over_the_diagram_zooms(mut tui: HeadlessTui) {
    let (col, row) = tui.diagram_center();
    tui.mouse(MouseEventKind::ScrollUp, col, row);
    tui.mouse(MouseEventKind::ScrollUp, col, row);
    assert_eq!(tui.viewport().zoom(), 1.5);
    tui.mouse(MouseEventKind::ScrollDown, col, row);
    assert_eq!(tui.viewport().zoom(), 1.25);
}

#[rstest]
fn switching_tabs_clears_the_pin_and_resets_the_view(mut tui: HeadlessTui) {
    click_marker(&mut tui, "3");
    tui.press(KeyCode::Char('+'));

    let (col, row) = tui.tab_cell(1).expect("second tab");
    tui.click(col, row);

    assert_eq!(tui.session().active_diagram_index(), 1);
    assert_eq!(tui.session().effective_active_id(), None);
    assert_eq!(tui.viewport().zoom(), MIN_ZOOM);
    assert_eq!(tui.ledger().rows().len(), 4);
}

#[rstest]
fn clicking_the_active_tab_still_clears(mut tui: HeadlessTui) {
    click_marker(&mut tui, "7");
    let (col, row) = tui.tab_cell(0).expect("first tab");
    tui.click(col, row);
    assert_eq!(tui.session().active_diagram_index(), 0);
    assert_eq!(tui.session().selected_part_id(), None);
}

#[rstest]
fn bracket_keys_cycle_diagram_tabs(mut tui: HeadlessTui) {
    tui.press(KeyCode::Char(']'));
    assert_eq!(tui.session().active_diagram_index(), 1);
    tui.press(KeyCode::Char(']'));
    assert_eq!(tui.session().active_diagram_index(), 0);
    tui.press(KeyCode::Char('['));
    assert_eq!(tui.session().active_diagram_index(), 1);
}

#[rstest]
fn group_switch_starts_a_fresh_session(mut tui: HeadlessTui) {
    click_marker(&mut tui, "7");
    tui.press(KeyCode::Char('}'));

    assert_eq!(tui.group_index(), 1);
    assert_eq!(tui.session().group().group_id().as_str(), "fuselage");
    assert_eq!(tui.session().effective_active_id(), None);
    // Callouts are printed in the fuselage drawing.
    assert_eq!(tui.marker_cell(&pid("1")), None);

    tui.press(KeyCode::Char('}'));
    assert_eq!(tui.group_index(), 0);
}

#[rstest]
fn focus_lost_ends_hover_and_drag(mut tui: HeadlessTui) {
    hover_marker(&mut tui, "4");
    assert_eq!(tui.session().hovered_part_id(), Some(&pid("4")));
    tui.focus_lost();
    assert_eq!(tui.session().hovered_part_id(), None);
}

#[rstest]
fn ledger_keyboard_cursor_hovers_and_pins(mut tui: HeadlessTui) {
    tui.press(KeyCode::Tab);
    tui.press(KeyCode::Char('j'));
    assert_eq!(tui.session().hovered_part_id(), Some(&pid("1")));

    tui.press(KeyCode::Char('j'));
    tui.press(KeyCode::Char('j'));
    // Sub-part rows are skipped.
    assert_eq!(tui.session().hovered_part_id(), Some(&pid("3")));

    tui.press(KeyCode::Enter);
    assert_eq!(tui.session().selected_part_id(), Some(&pid("3")));

    tui.press(KeyCode::Esc);
    assert_eq!(tui.session().selected_part_id(), None);
}

#[rstest]
fn leaving_the_ledger_drops_the_cursor_hover(mut tui: HeadlessTui) {
    tui.press(KeyCode::Tab);
    tui.press(KeyCode::Char('j'));
    assert_eq!(tui.session().hovered_part_id(), Some(&pid("1")));

    tui.press(KeyCode::Tab);
    assert_eq!(tui.session().hovered_part_id(), None);
    assert_eq!(tui.session().effective_active_id(), None);
}

#[rstest]
fn leaving_the_ledger_keeps_a_pointer_hover(mut tui: HeadlessTui) {
    tui.press(KeyCode::Tab);
    tui.press(KeyCode::Char('j'));
    hover_marker(&mut tui, "4");
    assert_eq!(tui.session().hovered_part_id(), Some(&pid("4")));

    tui.press(KeyCode::Tab);
    assert_eq!(tui.session().hovered_part_id(), Some(&pid("4")));
}

#[rstest]
fn leaving_the_ledger_keeps_the_pin(mut tui: HeadlessTui) {
    tui.press(KeyCode::Tab);
    tui.press(KeyCode::Char('j'));
    tui.press(KeyCode::Enter);
    tui.press(KeyCode::Tab);
    assert_eq!(tui.session().selected_part_id(), Some(&pid("1")));
    assert_eq!(tui.session().effective_active_id(), Some(&pid("1")));
}

#[rstest]
fn marker_hints_pin_by_label(mut tui: HeadlessTui) {
    tui.press(KeyCode::Char('f'));
    let screen = buffer_to_string(tui.render());
    assert!(!screen.contains("(7)"));

    tui.press(KeyCode::Char('l'));
    assert_eq!(tui.session().selected_part_id(), Some(&pid("7")));

    let screen = buffer_to_string(tui.render());
    assert!(screen.contains("❮7❯"));
}

#[rstest]
fn search_pins_the_best_match_and_never_unpins(mut tui: HeadlessTui) {
    tui.press(KeyCode::Char('/'));
    for ch in "clamp".chars() {
        tui.press(KeyCode::Char(ch));
    }
    assert_eq!(tui.session().selected_part_id(), Some(&pid("7")));

    tui.press(KeyCode::Backspace);
    assert_eq!(tui.session().selected_part_id(), Some(&pid("7")));

    tui.press(KeyCode::Enter);
    assert_eq!(tui.session().selected_part_id(), Some(&pid("7")));
}

#[rstest]
fn search_results_cycle_with_n(mut tui: HeadlessTui) {
    tui.press(KeyCode::Char('/'));
    for ch in "arm".chars() {
        tui.press(KeyCode::Char(ch));
    }
    let first = tui.session().selected_part_id().cloned().expect("pinned");
    tui.press(KeyCode::Enter);
    tui.press(KeyCode::Char('n'));
    let second = tui.session().selected_part_id().cloned().expect("pinned");
    assert_ne!(first, second);
    tui.press(KeyCode::Char('N'));
    assert_eq!(tui.session().selected_part_id(), Some(&first));
}

#[test]
fn ledger_scrolls_the_active_row_to_the_middle() {
    let mut tui = HeadlessTui::new(fixtures::demo_catalog(), CatalogAssets::Detached, 120, 14);
    assert_eq!(tui.ledger().offset(), 0);

    hover_marker(&mut tui, "7");
    tui.settle();
    assert_eq!(tui.ledger().offset(), tui.ledger().max_offset());
    assert!(tui.ledger().offset() > 0);

    // Clearing the hover leaves the ledger where it is.
    move_to_empty_diagram_space(&mut tui);
    tui.settle();
    assert!(tui.ledger().offset() > 0);
}

#[rstest]
fn first_frame_shows_tabs_markers_and_ledger(mut tui: HeadlessTui) {
    let screen = buffer_to_string(tui.render());
    assert!(screen.contains("Arm assembly"));
    assert!(screen.contains("Motor and propeller"));
    assert!(screen.contains("(7)"));
    assert!(screen.contains("T40-A-007"));
    assert!(screen.contains("Arm clamp"));
    assert!(screen.contains("[ arm-main.txt ]"));
    assert!(screen.contains("partscope"));
}

#[rstest]
fn help_overlay_toggles(mut tui: HeadlessTui) {
    tui.press(KeyCode::Char('?'));
    let screen = buffer_to_string(tui.render());
    assert!(screen.contains("--- Diagram ---"));
    tui.press(KeyCode::Esc);
    let screen = buffer_to_string(tui.render());
    assert!(!screen.contains("--- Diagram ---"));
}

#[rstest]
fn q_quits(mut tui: HeadlessTui) {
    assert!(!tui.press(KeyCode::Char('+')));
    assert!(tui.press(KeyCode::Char('q')));
}

#[test]
fn bundled_demo_catalog_renders_text_art() {
    let catalog = demo_catalog().expect("bundled demo catalog");
    let mut tui = HeadlessTui::new(catalog, CatalogAssets::Bundled, 120, 30);
    let screen = buffer_to_string(tui.render());
    assert!(!screen.contains("[ arm-main.txt ]"));
    assert!(screen.contains("(7)"));
}

#[test]
fn main_panes_stack_vertically_on_narrow_terminals() {
    assert!(stack_main_panes_vertically(Rect::new(0, 0, 89, 30)));
    assert!(!stack_main_panes_vertically(Rect::new(0, 0, 90, 30)));
}

#[test]
fn diagram_counter_pads_to_the_total_width() {
    assert_eq!(diagram_counter_label(Some(1), 2), "[1/2]");
    assert_eq!(diagram_counter_label(Some(3), 12), "[03/12]");
    assert_eq!(diagram_counter_label(None, 0), "[0/0]");
}

#[test]
fn fit_pads_and_truncates() {
    assert_eq!(fit("abc", 5), "abc  ");
    assert_eq!(fit("abcdef", 4), "abc…");
    assert_eq!(fit("abc", 0), "");
}

#[test]
fn osc52_sequence_base64_encodes_the_payload() {
    assert_eq!(osc52_sequence("T40-A-007"), "\x1b]52;c;VDQwLUEtMDA3\x1b\\");
}

fn candidate(number: &str, code: &str, name: &str) -> SearchCandidate {
    SearchCandidate {
        part_id: pid(number),
        number: number.to_lowercase(),
        code: code.to_lowercase(),
        code_key: code_key(code),
        name: name.to_lowercase(),
    }
}

#[test]
fn regular_search_ranks_substring_matches() {
    let candidates = search_candidates_from_diagram(&fixtures::arm_main_diagram());
    let results = ranked_search_results(&candidates, "clamp", SearchKind::Regular);
    assert_eq!(results, vec![pid("7")]);

    let results = ranked_search_results(&candidates, "T40-A-004", SearchKind::Regular);
    assert_eq!(results, vec![pid("4")]);

    assert!(ranked_search_results(&candidates, "   ", SearchKind::Regular).is_empty());
}

#[test]
fn exact_part_number_ranks_first() {
    let candidates = vec![
        candidate("12", "A-0001", "Bracket 1"),
        candidate("1", "B-0012", "Arm"),
        candidate("21", "C-0001", "Cable"),
    ];
    let results = ranked_search_results(&candidates, "1", SearchKind::Regular);
    assert_eq!(results, vec![pid("1"), pid("12"), pid("21")]);

    let results = ranked_search_results(&candidates, "1", SearchKind::Fuzzy);
    assert_eq!(results.first(), Some(&pid("1")));
}

#[test]
fn codes_match_without_separators() {
    let candidates = search_candidates_from_diagram(&fixtures::arm_main_diagram());
    let results = ranked_search_results(&candidates, "t40a007", SearchKind::Regular);
    assert_eq!(results, vec![pid("7")]);

    let results = ranked_search_results(&candidates, "T40A00", SearchKind::Regular);
    assert_eq!(results.len(), 9);
    assert_eq!(results.first(), Some(&pid("1")));
}

#[test]
fn name_word_starts_beat_mid_word_hits() {
    let candidates = vec![
        candidate("1", "X-1", "Screwdriver"),
        candidate("2", "Y-2", "Driver"),
    ];
    let results = ranked_search_results(&candidates, "driver", SearchKind::Regular);
    assert_eq!(results, vec![pid("2"), pid("1")]);
}

#[test]
fn fuzzy_search_matches_subsequences() {
    let candidates = search_candidates_from_diagram(&fixtures::arm_main_diagram());
    let results = ranked_search_results(&candidates, "armclmp", SearchKind::Fuzzy);
    assert_eq!(results, vec![pid("7")]);

    let results = ranked_search_results(&candidates, "t4a7", SearchKind::Fuzzy);
    assert_eq!(results, vec![pid("7")]);
}
