// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Interactive viewer shell (ratatui + crossterm) over a loaded catalog: group/diagram tabs, the
//! pan/zoom diagram with hotspot markers, and the parts ledger. Pointer and key events become
//! [`InteractionOp`] values for the [`CatalogSession`]; nothing in here keeps its own idea of
//! which part is highlighted.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tracing::{debug, info, warn};

use crate::model::{Catalog, CatalogPage, Diagram, NotFound, PartId, Position};
use crate::session::{CatalogSession, InteractionOp};
use crate::store::CatalogAssets;
use crate::viewer::{
    marker_at, Backdrop, DiagramViewport, LedgerRow, PartsLedger, PlacedMarker, ViewportGrid,
    PAN_UNIT,
};

mod hints;
mod theme;

pub use theme::ThemeError;

use hints::{HintMatch, HintTarget};
use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "partscope";
const MARKER_HINT_CHARS: &str = "ASDFJKLEWCMPGH";
/// Keyboard pan step in nominal pixels; `H/J/K/L` move four steps.
const NUDGE_STEP: f32 = PAN_UNIT / 10.0;
const WHEEL_ROWS: i32 = 3;
const IDLE_POLL: Duration = Duration::from_millis(250);
const FRAME: Duration = Duration::from_millis(16);

/// Runs the interactive terminal UI on `page` of `catalog` until the user quits.
pub fn run_with_catalog(
    catalog: Catalog,
    assets: CatalogAssets,
    page: CatalogPage,
) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut app = App::new(catalog, assets, page)?;
    app.theme = theme;
    info!(
        group = %app.session.group().group_id(),
        diagrams = app.session.diagram_count(),
        "viewer started"
    );

    let mut terminal = TerminalSession::new()?;
    let mut last_frame = Instant::now();
    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        let timeout = if app.is_animating() { FRAME } else { IDLE_POLL };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::FocusLost => app.pointer_left(),
                _ => {}
            }
        }

        if last_frame.elapsed() >= FRAME {
            app.tick();
            last_frame = Instant::now();
        }
    }

    Ok(())
}

/// Cached screen geometry from the last draw, used for mouse hit-testing.
#[derive(Debug, Clone, Default)]
struct ScreenLayout {
    tabs: Rect,
    tab_hits: Vec<TabHit>,
    main: Rect,
    diagram_pane: Rect,
    ledger_pane: Rect,
    active_part: Rect,
    status: Rect,
    /// Inner area of the diagram panel.
    diagram: Rect,
    /// Ledger body, below the header row.
    ledger: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TabHit {
    x0: u16,
    x1: u16,
    index: usize,
}

fn compute_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    let direction = if stack_main_panes_vertically(rows[1]) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let panes = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[1]);

    let diagram = inner(panes[0]);
    let ledger_inner = inner(panes[1]);
    let ledger = Rect {
        y: ledger_inner.y.saturating_add(1),
        height: ledger_inner.height.saturating_sub(1),
        ..ledger_inner
    };

    ScreenLayout {
        tabs: rows[0],
        tab_hits: Vec::new(),
        main: rows[1],
        diagram_pane: panes[0],
        ledger_pane: panes[1],
        active_part: rows[2],
        status: rows[3],
        diagram,
        ledger,
    }
}

fn inner(rect: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(rect)
}

fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && row >= rect.y
        && u32::from(col) < u32::from(rect.x) + u32::from(rect.width)
        && u32::from(row) < u32::from(rect.y) + u32::from(rect.height)
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let mut layout = compute_layout(frame.area());

    let (tabs_line, tab_hits) = tabs_line(app, layout.tabs);
    layout.tab_hits = tab_hits;
    frame.render_widget(Paragraph::new(tabs_line), layout.tabs);

    let grid = ViewportGrid::new(layout.diagram.width, layout.diagram.height);
    app.ledger
        .set_viewport_height(usize::from(layout.ledger.height));
    app.placed_markers = match app.session.active_diagram() {
        Some(diagram) => app.viewport.layout_markers(
            diagram,
            app.session.effective_active_id(),
            grid,
            app.backdrop.image_box(grid),
        ),
        None => Vec::new(),
    };
    let (diagram_pane, ledger_pane, active_area, status_area, main_area) = (
        layout.diagram_pane,
        layout.ledger_pane,
        layout.active_part,
        layout.status,
        layout.main,
    );
    app.layout = layout;

    let diagram_block = Block::default()
        .borders(Borders::ALL)
        .title(diagram_view_title(app))
        .border_style(app.theme.panel_border_style(app.focus == Focus::Diagram));
    frame.render_widget(
        Paragraph::new(app.diagram_text(grid)).block(diagram_block),
        diagram_pane,
    );

    let ledger_block = Block::default()
        .borders(Borders::ALL)
        .title(ledger_view_title(app))
        .border_style(app.theme.panel_border_style(app.focus == Focus::Ledger));
    frame.render_widget(
        Paragraph::new(ledger_text(app, ledger_pane.width.saturating_sub(2)))
            .block(ledger_block),
        ledger_pane,
    );

    frame.render_widget(Paragraph::new(active_part_line(app)), active_area);

    let toast_suffix = app.take_live_toast();
    if app.search_mode != SearchMode::Inactive {
        frame.render_widget(
            Paragraph::new(search_footer_line(app, &toast_suffix)),
            status_area,
        );
        if app.search_mode == SearchMode::Editing {
            let cursor_x = status_area
                .x
                .saturating_add(1)
                .saturating_add(app.search_query.chars().count() as u16)
                .min(status_area.x.saturating_add(status_area.width.saturating_sub(1)));
            frame.set_cursor_position((cursor_x, status_area.y));
        }
    } else {
        frame.render_widget(
            Paragraph::new(footer_help_line(app, &toast_suffix)),
            status_area,
        );
    }
    frame.render_widget(
        Paragraph::new(footer_brand_line()).alignment(Alignment::Right),
        status_area,
    );

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

// Extracted panel/header/footer/help rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchMode {
    Inactive,
    Editing,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchKind {
    Regular,
    Fuzzy,
}

/// Lowercased searchable fields of one part.
#[derive(Debug, Clone)]
struct SearchCandidate {
    part_id: PartId,
    number: String,
    code: String,
    /// Code without separators, so `t40a007` finds `T40-A-007`.
    code_key: String,
    name: String,
}

#[derive(Debug, Clone, Default)]
enum HintMode {
    #[default]
    Inactive,
    Typing {
        typed: String,
        targets: Vec<HintTarget>,
    },
}

/// What the pointer rests on; a change of target is what produces hover ops.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PointerTarget {
    Marker(PartId),
    LedgerRow(usize),
}

struct App {
    catalog: Catalog,
    assets: CatalogAssets,
    page: CatalogPage,
    session: CatalogSession,
    viewport: DiagramViewport,
    ledger: PartsLedger,
    backdrop: Backdrop,
    focus: Focus,
    layout: ScreenLayout,
    placed_markers: Vec<PlacedMarker>,
    pointer_target: Option<PointerTarget>,
    /// The current hover came from the ledger keyboard cursor.
    cursor_hover: bool,
    hint_mode: HintMode,
    theme: TuiTheme,
    show_help: bool,
    help_scroll: u16,
    help_viewport_height: u16,
    toast: Option<Toast>,
    search_mode: SearchMode,
    search_kind: SearchKind,
    search_query: String,
    search_candidates: Vec<SearchCandidate>,
    search_results: Vec<PartId>,
    search_result_index: usize,
    should_quit: bool,
}

impl App {
    fn new(
        catalog: Catalog,
        assets: CatalogAssets,
        page: CatalogPage,
    ) -> Result<Self, NotFound> {
        let group = catalog.group_at(page).cloned().ok_or_else(|| NotFound::Group {
            product: catalog
                .products()
                .get(page.product_index)
                .map(|product| product.product_id().to_string())
                .unwrap_or_else(|| format!("#{}", page.product_index)),
            group: format!("#{}", page.group_index),
        })?;

        let mut app = Self {
            catalog,
            assets,
            page,
            session: CatalogSession::new(group),
            viewport: DiagramViewport::new(),
            ledger: PartsLedger::default(),
            backdrop: Backdrop::Placeholder {
                caption: String::new(),
            },
            focus: Focus::Diagram,
            layout: ScreenLayout::default(),
            placed_markers: Vec::new(),
            pointer_target: None,
            cursor_hover: false,
            hint_mode: HintMode::Inactive,
            theme: TuiTheme::default(),
            show_help: false,
            help_scroll: 0,
            help_viewport_height: 0,
            toast: None,
            search_mode: SearchMode::Inactive,
            search_kind: SearchKind::Regular,
            search_query: String::new(),
            search_candidates: Vec::new(),
            search_results: Vec::new(),
            search_result_index: 0,
            should_quit: false,
        };
        app.reload_diagram();
        Ok(app)
    }

    fn active_diagram(&self) -> Option<&Diagram> {
        self.session.active_diagram()
    }

    fn grid(&self) -> ViewportGrid {
        ViewportGrid::new(self.layout.diagram.width, self.layout.diagram.height)
    }

    fn is_animating(&self) -> bool {
        self.ledger.is_animating()
    }

    fn tick(&mut self) {
        self.ledger.tick();
    }

    /// Feeds ops to the session and lets the ledger follow the resulting active id.
    fn apply_ops(&mut self, ops: impl IntoIterator<Item = InteractionOp>) {
        if self.session.apply_all(ops) {
            self.ledger.sync_active(self.session.effective_active_id());
        }
    }

    /// Pins `part_id` unless it already is; used by search, which must never unpin.
    fn pin_part(&mut self, part_id: &PartId) {
        if self.session.selected_part_id() != Some(part_id) {
            self.apply_ops([InteractionOp::Activate(part_id.clone())]);
        }
    }

    fn unpin(&mut self) {
        if let Some(part_id) = self.session.selected_part_id().cloned() {
            self.apply_ops([InteractionOp::Activate(part_id)]);
        }
    }

    /// Rebuilds every per-diagram view after a tab or group switch.
    fn reload_diagram(&mut self) {
        self.viewport.end_drag();
        self.viewport.reset();
        self.pointer_target = None;
        self.cursor_hover = false;
        self.placed_markers.clear();
        self.cancel_hint_mode();
        if self.search_mode != SearchMode::Inactive {
            self.clear_search();
        }

        let height = self.layout.ledger.height;
        match self.session.active_diagram() {
            Some(diagram) => {
                self.ledger = PartsLedger::new(diagram);
                self.backdrop = load_backdrop(&self.assets, diagram);
            }
            None => {
                self.ledger = PartsLedger::default();
                self.backdrop = Backdrop::Placeholder {
                    caption: "(no diagram)".to_owned(),
                };
            }
        }
        self.ledger.set_viewport_height(usize::from(height));
    }

    fn select_diagram(&mut self, index: usize) {
        if self.session.select_diagram(index) {
            self.reload_diagram();
        }
    }

    fn switch_diagram_next(&mut self) {
        if self.session.diagram_count() <= 1 {
            self.set_toast("Only one diagram in this group");
            return;
        }
        if self.session.next_diagram() {
            self.reload_diagram();
        }
    }

    fn switch_diagram_prev(&mut self) {
        if self.session.diagram_count() <= 1 {
            self.set_toast("Only one diagram in this group");
            return;
        }
        if self.session.prev_diagram() {
            self.reload_diagram();
        }
    }

    /// Moves to the neighbouring parts group of the current product with a fresh session.
    fn switch_group(&mut self, forward: bool) {
        let count = self
            .catalog
            .products()
            .get(self.page.product_index)
            .map_or(0, |product| product.groups().len());
        if count <= 1 {
            self.set_toast("No other parts group");
            return;
        }

        let next = if forward {
            (self.page.group_index + 1) % count
        } else {
            (self.page.group_index + count - 1) % count
        };
        let page = CatalogPage {
            product_index: self.page.product_index,
            group_index: next,
        };
        let Some(group) = self.catalog.group_at(page).cloned() else {
            return;
        };
        debug!(group = %group.group_id(), "parts group selected");
        self.page = page;
        self.session = CatalogSession::new(group);
        self.reload_diagram();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            if self.search_mode != SearchMode::Inactive {
                self.clear_search();
            }
            self.cancel_hint_mode();
            self.help_scroll = 0;
        }
    }

    fn help_scroll_by(&mut self, delta: i32) {
        if delta < 0 {
            self.help_scroll = self.help_scroll.saturating_sub(delta.unsigned_abs() as u16);
        } else {
            self.help_scroll = self.help_scroll.saturating_add(delta as u16);
        }
    }

    fn help_scroll_page(&mut self, direction: i32) {
        let page = self.help_viewport_height.max(1).saturating_sub(1) as i32;
        self.help_scroll_by(direction.signum() * page.max(1));
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                KeyCode::Down | KeyCode::Char('j') => self.help_scroll_by(1),
                KeyCode::Up | KeyCode::Char('k') => self.help_scroll_by(-1),
                KeyCode::PageDown => self.help_scroll_page(1),
                KeyCode::PageUp => self.help_scroll_page(-1),
                KeyCode::Home => self.help_scroll = 0,
                KeyCode::End => self.help_scroll = u16::MAX,
                _ => {}
            }
            return false;
        }

        match self.search_mode {
            SearchMode::Editing => {
                self.handle_search_edit_key(code);
                return false;
            }
            SearchMode::Results => {
                if matches!(code, KeyCode::Esc) {
                    self.clear_search();
                    return false;
                }
            }
            SearchMode::Inactive => {}
        }

        if self.handle_hint_key(code) {
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.toggle_help(),
            KeyCode::Tab | KeyCode::BackTab => self.set_focus(self.focus.toggle()),
            KeyCode::Char('[') => self.switch_diagram_prev(),
            KeyCode::Char(']') => self.switch_diagram_next(),
            KeyCode::Char('{') => self.switch_group(false),
            KeyCode::Char('}') => self.switch_group(true),
            KeyCode::Char('/') => self.enter_search_mode(SearchKind::Regular),
            KeyCode::Char('\\') => self.enter_search_mode(SearchKind::Fuzzy),
            KeyCode::Char('n') => self.search_next(),
            KeyCode::Char('N') => self.search_prev(),
            KeyCode::Char('y') => self.yank_active_part_code(),
            KeyCode::Esc => self.unpin(),
            _ => match self.focus {
                Focus::Diagram => self.handle_diagram_key(code),
                Focus::Ledger => self.handle_ledger_key(code),
            },
        }

        false
    }

    fn handle_diagram_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('+') | KeyCode::Char('=') => self.viewport.zoom_in(),
            KeyCode::Char('-') => self.viewport.zoom_out(),
            KeyCode::Char('0') => self.viewport.reset(),
            KeyCode::Char('f') => self.enter_hint_mode(),
            // Keys move the view, so the layer moves the opposite way.
            KeyCode::Left | KeyCode::Char('h') => self.nudge(1.0, 0.0),
            KeyCode::Right | KeyCode::Char('l') => self.nudge(-1.0, 0.0),
            KeyCode::Up | KeyCode::Char('k') => self.nudge(0.0, 1.0),
            KeyCode::Down | KeyCode::Char('j') => self.nudge(0.0, -1.0),
            KeyCode::Char('H') => self.nudge(4.0, 0.0),
            KeyCode::Char('L') => self.nudge(-4.0, 0.0),
            KeyCode::Char('K') => self.nudge(0.0, 4.0),
            KeyCode::Char('J') => self.nudge(0.0, -4.0),
            _ => {}
        }
    }

    fn nudge(&mut self, steps_x: f32, steps_y: f32) {
        if !self.viewport.nudge(steps_x * NUDGE_STEP, steps_y * NUDGE_STEP)
            && !self.viewport.can_pan()
        {
            self.set_toast("Zoom in to pan");
        }
    }

    /// Leaving the ledger drops a hover its keyboard cursor produced.
    fn set_focus(&mut self, focus: Focus) {
        if self.focus == Focus::Ledger && focus != Focus::Ledger && self.cursor_hover {
            self.cursor_hover = false;
            self.apply_ops([InteractionOp::HoverOut]);
        }
        self.focus = focus;
    }

    fn handle_ledger_key(&mut self, code: KeyCode) {
        let page = i32::from(self.layout.ledger.height.max(2) - 1);
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(op) = self.ledger.move_cursor(true) {
                    self.cursor_hover = matches!(op, InteractionOp::HoverIn(_));
                    self.apply_ops([op]);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(op) = self.ledger.move_cursor(false) {
                    self.cursor_hover = matches!(op, InteractionOp::HoverIn(_));
                    self.apply_ops([op]);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(op) = self.ledger.activate_cursor() {
                    self.apply_ops([op]);
                }
            }
            KeyCode::PageDown => self.ledger.scroll_by(page),
            KeyCode::PageUp => self.ledger.scroll_by(-page),
            KeyCode::Home => self.ledger.scroll_by(i32::MIN),
            KeyCode::End => self.ledger.scroll_by(i32::MAX),
            _ => {}
        }
    }

    fn cancel_hint_mode(&mut self) {
        self.hint_mode = HintMode::Inactive;
    }

    fn enter_hint_mode(&mut self) {
        let Some(diagram) = self.active_diagram() else {
            return;
        };
        if diagram.hide_markers() {
            self.set_toast("Markers are printed in this drawing");
            return;
        }
        let targets = hints::hint_targets(
            diagram.parts().iter().map(|part| part.part_id()),
            MARKER_HINT_CHARS,
        );
        if targets.is_empty() {
            return;
        }
        self.hint_mode = HintMode::Typing {
            typed: String::new(),
            targets,
        };
    }

    fn handle_hint_key(&mut self, code: KeyCode) -> bool {
        let mode = std::mem::take(&mut self.hint_mode);
        let HintMode::Typing { mut typed, targets } = mode else {
            return false;
        };

        match code {
            KeyCode::Esc => {}
            KeyCode::Backspace => {
                typed.pop();
                self.hint_mode = HintMode::Typing { typed, targets };
            }
            KeyCode::Char(ch) => {
                typed.push(ch.to_ascii_uppercase());
                match hints::match_hint(&targets, &typed) {
                    HintMatch::Exact(part_id) => {
                        self.apply_ops([InteractionOp::Activate(part_id)]);
                    }
                    HintMatch::Partial => self.hint_mode = HintMode::Typing { typed, targets },
                    HintMatch::Miss => self.set_toast(format!("No marker hint '{typed}'")),
                }
            }
            _ => self.hint_mode = HintMode::Typing { typed, targets },
        }
        true
    }

    /// Hint label to draw instead of the marker number, for markers still matching the input.
    fn hint_label_for(&self, part_id: &PartId) -> Option<&str> {
        let HintMode::Typing { typed, targets } = &self.hint_mode else {
            return None;
        };
        targets
            .iter()
            .find(|target| &target.part_id == part_id && target.label.starts_with(typed.as_str()))
            .map(|target| target.label.as_str())
    }

    fn enter_search_mode(&mut self, kind: SearchKind) {
        self.cancel_hint_mode();
        self.search_mode = SearchMode::Editing;
        self.search_kind = kind;
        self.search_query.clear();
        self.search_result_index = 0;
        self.search_results.clear();
        self.search_candidates = self
            .active_diagram()
            .map(search_candidates_from_diagram)
            .unwrap_or_default();
    }

    fn handle_search_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.clear_search(),
            KeyCode::Enter => self.commit_search(),
            KeyCode::Backspace => {
                self.search_query.pop();
                self.update_search_results();
            }
            KeyCode::Char(ch) => {
                self.search_query.push(ch);
                self.update_search_results();
            }
            _ => {}
        }
    }

    fn commit_search(&mut self) {
        if self.search_results.len() > 1 {
            self.search_mode = SearchMode::Results;
        } else {
            self.search_mode = SearchMode::Inactive;
        }
    }

    fn clear_search(&mut self) {
        self.search_mode = SearchMode::Inactive;
        self.search_query.clear();
        self.search_candidates.clear();
        self.search_results.clear();
        self.search_result_index = 0;
    }

    fn update_search_results(&mut self) {
        self.search_results =
            ranked_search_results(&self.search_candidates, &self.search_query, self.search_kind);
        self.search_result_index = 0;
        self.jump_to_current_search_result();
    }

    fn search_prefix(&self) -> char {
        match self.search_kind {
            SearchKind::Regular => '/',
            SearchKind::Fuzzy => '\\',
        }
    }

    fn jump_to_current_search_result(&mut self) {
        let Some(part_id) = self.search_results.get(self.search_result_index).cloned() else {
            return;
        };
        self.pin_part(&part_id);
    }

    fn search_next(&mut self) {
        let len = self.search_results.len();
        if len <= 1 {
            return;
        }
        self.search_result_index = (self.search_result_index + 1) % len;
        self.jump_to_current_search_result();
    }

    fn search_prev(&mut self) {
        let len = self.search_results.len();
        if len <= 1 {
            return;
        }
        self.search_result_index = match self.search_result_index {
            0 => len - 1,
            n => n - 1,
        };
        self.jump_to_current_search_result();
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (col, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => self.pointer_moved(col, row),
            MouseEventKind::Down(MouseButton::Left) => self.pointer_pressed(col, row),
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.viewport.is_dragging() {
                    let (x, y) = self.diagram_local(col, row);
                    let pointer = self.grid().pointer(x, y);
                    self.viewport.continue_drag(pointer);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.viewport.end_drag(),
            MouseEventKind::ScrollUp => self.wheel(col, row, true),
            MouseEventKind::ScrollDown => self.wheel(col, row, false),
            _ => {}
        }
    }

    fn diagram_local(&self, col: u16, row: u16) -> (i32, i32) {
        (
            i32::from(col) - i32::from(self.layout.diagram.x),
            i32::from(row) - i32::from(self.layout.diagram.y),
        )
    }

    fn ledger_row_at(&self, col: u16, row: u16) -> Option<usize> {
        if !rect_contains(self.layout.ledger, col, row) {
            return None;
        }
        let row = self.ledger.offset() + usize::from(row - self.layout.ledger.y);
        (row < self.ledger.rows().len()).then_some(row)
    }

    fn tab_at(&self, col: u16, row: u16) -> Option<usize> {
        if !rect_contains(self.layout.tabs, col, row) {
            return None;
        }
        self.layout
            .tab_hits
            .iter()
            .find(|hit| col >= hit.x0 && col < hit.x1)
            .map(|hit| hit.index)
    }

    /// Resolves the element under the pointer and the hover op it reports when entered.
    fn hit_test(&self, col: u16, row: u16) -> Option<(PointerTarget, InteractionOp)> {
        if rect_contains(self.layout.diagram, col, row) {
            let (x, y) = self.diagram_local(col, row);
            let placed = marker_at(&self.placed_markers, x, y)?;
            let marker = placed.marker();
            return Some((
                PointerTarget::Marker(marker.part_id().clone()),
                marker.on_hover_start(),
            ));
        }
        let index = self.ledger_row_at(col, row)?;
        Some((PointerTarget::LedgerRow(index), self.ledger.hover_at(index)))
    }

    fn pointer_moved(&mut self, col: u16, row: u16) {
        let hit = self.hit_test(col, row);
        let target = hit.as_ref().map(|(target, _)| target.clone());
        if target == self.pointer_target {
            return;
        }

        let mut ops = Vec::with_capacity(2);
        if self.pointer_target.is_some() {
            ops.push(InteractionOp::HoverOut);
        }
        if let Some((_, op)) = hit {
            ops.push(op);
        }
        self.pointer_target = target;
        self.cursor_hover = false;
        self.apply_ops(ops);
    }

    /// Pointer left the window: same as leaving every element.
    fn pointer_left(&mut self) {
        self.viewport.end_drag();
        if self.pointer_target.take().is_some() {
            self.apply_ops([InteractionOp::HoverOut]);
        }
    }

    fn pointer_pressed(&mut self, col: u16, row: u16) {
        if let Some(index) = self.tab_at(col, row) {
            self.select_diagram(index);
            return;
        }

        if rect_contains(self.layout.diagram, col, row) {
            self.set_focus(Focus::Diagram);
            let (x, y) = self.diagram_local(col, row);
            if let Some(placed) = marker_at(&self.placed_markers, x, y) {
                let op = placed.marker().on_activate();
                self.apply_ops([op]);
            } else {
                let pointer = self.grid().pointer(x, y);
                self.viewport.begin_drag(pointer);
            }
            return;
        }

        if let Some(index) = self.ledger_row_at(col, row) {
            self.set_focus(Focus::Ledger);
            if let Some(op) = self.ledger.click_at(index) {
                self.apply_ops([op]);
            }
        }
    }

    fn wheel(&mut self, col: u16, row: u16, up: bool) {
        if rect_contains(self.layout.diagram, col, row) {
            if up {
                self.viewport.zoom_in();
            } else {
                self.viewport.zoom_out();
            }
        } else if rect_contains(self.layout.ledger, col, row) {
            self.ledger
                .scroll_by(if up { -WHEEL_ROWS } else { WHEEL_ROWS });
        }
    }

    /// Backdrop sampled through the layer transform, with markers stamped on top.
    fn diagram_text(&self, grid: ViewportGrid) -> Text<'static> {
        if grid.is_empty() {
            return Text::default();
        }
        let width = usize::from(grid.width);
        let height = usize::from(grid.height);
        let mut cells = vec![vec![(' ', self.theme.base_style()); width]; height];

        let transform = self.viewport.transform();
        let image_box = self.backdrop.image_box(grid);
        let art_style = self.theme.backdrop_style();
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                let (layer_col, layer_row) = grid.unproject_cell(transform, col as u16, row as u16);
                let sampled = image_box
                    .cell_to_fraction(layer_col, layer_row)
                    .and_then(|(u, v)| self.backdrop.sample(u, v));
                if let Some(ch) = sampled {
                    *cell = (ch, art_style);
                }
            }
        }

        if let Some(caption) = self.backdrop.caption() {
            let (col, row) = grid.project_percent(transform, image_box, Position::new(50.0, 50.0));
            let start = col - caption.chars().count() as f32 / 2.0;
            stamp(
                &mut cells,
                caption,
                start.round() as i32,
                row.floor() as i32,
                self.theme.muted_style(),
            );
        }

        let pointer_over = match &self.pointer_target {
            Some(PointerTarget::Marker(part_id)) => Some(part_id),
            _ => None,
        };
        for placed in &self.placed_markers {
            let marker = placed.marker();
            match self.hint_label_for(marker.part_id()) {
                Some(label) => stamp(
                    &mut cells,
                    label,
                    placed.col(),
                    placed.row(),
                    self.theme.hint_style(),
                ),
                None => stamp(
                    &mut cells,
                    placed.label(),
                    placed.col(),
                    placed.row(),
                    self.theme
                        .marker_style(marker.style(pointer_over == Some(marker.part_id()))),
                ),
            }
        }

        cells_to_text(cells)
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(2),
        });
    }

    fn take_live_toast(&mut self) -> String {
        let now = Instant::now();
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
        self.toast
            .as_ref()
            .map(|toast| format!(" | {}", toast.message))
            .unwrap_or_default()
    }

    fn yank_active_part_code(&mut self) {
        let Some(part) = self.session.active_part() else {
            self.set_toast("No active part");
            return;
        };

        let code = part.code().to_owned();
        match copy_to_clipboard(&code) {
            Ok(backend) => self.set_toast(format!("Yanked {code} ({backend})")),
            Err(err) => self.set_toast(format!("Clipboard error: {err}")),
        }
    }
}

/// Writes `text` into the cell grid starting at `(col, row)`, clipping at the edges.
fn stamp(cells: &mut [Vec<(char, Style)>], text: &str, col: i32, row: i32, style: Style) {
    let Ok(row) = usize::try_from(row) else {
        return;
    };
    let Some(line) = cells.get_mut(row) else {
        return;
    };
    for (offset, ch) in text.chars().enumerate() {
        let Ok(x) = usize::try_from(col.saturating_add(offset as i32)) else {
            continue;
        };
        if let Some(cell) = line.get_mut(x) {
            *cell = (ch, style);
        }
    }
}

fn cells_to_text(cells: Vec<Vec<(char, Style)>>) -> Text<'static> {
    let lines = cells
        .into_iter()
        .map(|line| {
            let mut spans = Vec::<Span<'static>>::new();
            let mut run = String::new();
            let mut run_style = None::<Style>;
            for (ch, style) in line {
                if run_style.is_some_and(|current| current != style) {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
                }
                run_style = Some(style);
                run.push(ch);
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style.unwrap_or_default()));
            }
            Line::from(spans)
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

fn load_backdrop(assets: &CatalogAssets, diagram: &Diagram) -> Backdrop {
    assets.load_backdrop(diagram.image()).unwrap_or_else(|err| {
        warn!(diagram = %diagram.diagram_id(), error = %err, "backdrop unavailable, using placeholder");
        Backdrop::placeholder(diagram.image())
    })
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )
        .map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    );
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

#[derive(Debug, Clone, Copy)]
struct SubsequenceStats {
    first: usize,
    span: usize,
    consecutive: usize,
    start_boundary: bool,
}

fn search_candidates_from_diagram(diagram: &Diagram) -> Vec<SearchCandidate> {
    diagram
        .parts()
        .iter()
        .map(|part| SearchCandidate {
            part_id: part.part_id().clone(),
            number: part.number().to_lowercase(),
            code: part.code().to_lowercase(),
            code_key: code_key(part.code()),
            name: part.name().to_lowercase(),
        })
        .collect()
}

fn code_key(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Best match first; ties keep ledger order.
fn ranked_search_results(
    candidates: &[SearchCandidate],
    query: &str,
    kind: SearchKind,
) -> Vec<PartId> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches = candidates
        .iter()
        .enumerate()
        .filter_map(|(idx, candidate)| {
            let score = match kind {
                SearchKind::Regular => regular_score(&needle, candidate),
                SearchKind::Fuzzy => fuzzy_score(&needle, candidate),
            }?;
            Some((score, idx))
        })
        .collect::<Vec<_>>();
    matches.sort_by(|(score_a, idx_a), (score_b, idx_b)| {
        score_b.cmp(score_a).then_with(|| idx_a.cmp(idx_b))
    });

    matches
        .into_iter()
        .map(|(_, idx)| candidates[idx].part_id.clone())
        .collect()
}

// Tiers for substring search; a tier always beats every lower one.
const RANK_EXACT_NUMBER: i64 = 1_000_000;
const RANK_EXACT_CODE: i64 = 900_000;
const RANK_NUMBER_PREFIX: i64 = 800_000;
const RANK_CODE_PREFIX: i64 = 700_000;
const RANK_NAME_WORD: i64 = 500_000;
const RANK_NAME: i64 = 300_000;
const RANK_CODE: i64 = 200_000;

/// Substring ranking: what a parts counter types first (number, then code) wins over names.
fn regular_score(needle: &str, candidate: &SearchCandidate) -> Option<i64> {
    let key = code_key(needle);
    let remainder = |field: &str| (field.chars().count() - needle.chars().count()) as i64;

    if candidate.number == needle {
        return Some(RANK_EXACT_NUMBER);
    }
    if candidate.code == needle || (!key.is_empty() && candidate.code_key == key) {
        return Some(RANK_EXACT_CODE);
    }
    if candidate.number.starts_with(needle) {
        return Some(RANK_NUMBER_PREFIX - remainder(candidate.number.as_str()));
    }
    if candidate.code.starts_with(needle) {
        return Some(RANK_CODE_PREFIX - remainder(candidate.code.as_str()));
    }
    if !key.is_empty() && candidate.code_key.starts_with(&key) {
        return Some(RANK_CODE_PREFIX - (candidate.code_key.len() - key.len()) as i64);
    }
    if let Some(first) = candidate.name.find(needle) {
        let word_start = candidate.name[..first]
            .chars()
            .last()
            .map_or(true, is_boundary_char);
        let tier = if word_start { RANK_NAME_WORD } else { RANK_NAME };
        return Some(tier - (first as i64) * 100 - candidate.name.chars().count() as i64);
    }
    candidate
        .code
        .find(needle)
        .map(|first| RANK_CODE - first as i64)
}

/// Subsequence ranking over the code and the name separately, best field wins.
fn fuzzy_score(needle: &str, candidate: &SearchCandidate) -> Option<i64> {
    if candidate.number == needle {
        return Some(RANK_EXACT_NUMBER);
    }

    let key = code_key(needle);
    let code = (!key.is_empty())
        .then(|| field_fuzzy_score(&key, &candidate.code_key))
        .flatten()
        .map(|score| score + 300);
    let name = field_fuzzy_score(needle, &candidate.name);
    code.max(name)
}

fn field_fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let subseq = subsequence_stats(needle, haystack)?;
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());
    let mut score = (ratio * 1000.0).round() as i64;
    score -= subseq.span as i64;
    score -= (subseq.first as i64) / 4;
    score += (subseq.consecutive as i64) * 40;
    if subseq.start_boundary {
        score += 150;
    }
    if haystack.contains(needle) {
        score += 2000;
    }
    Some(score)
}

fn subsequence_stats(needle: &str, haystack: &str) -> Option<SubsequenceStats> {
    let mut needle_iter = needle.chars().peekable();
    let mut first: Option<usize> = None;
    let mut last = 0usize;
    let mut prev_match: Option<usize> = None;
    let mut consecutive = 0usize;
    let mut start_boundary = false;
    let mut prev_hay: Option<char> = None;

    for (idx, ch) in haystack.chars().enumerate() {
        let Some(&want) = needle_iter.peek() else {
            break;
        };

        if ch == want {
            needle_iter.next();
            if first.is_none() {
                first = Some(idx);
                start_boundary = prev_hay.map_or(true, is_boundary_char);
            }
            if prev_match.is_some_and(|prev| idx == prev + 1) {
                consecutive += 1;
            }
            prev_match = Some(idx);
            last = idx;
        }

        prev_hay = Some(ch);
    }

    if needle_iter.peek().is_some() {
        return None;
    }

    let first = first?;
    Some(SubsequenceStats {
        first,
        span: last.saturating_sub(first).saturating_add(1),
        consecutive,
        start_boundary,
    })
}

fn is_boundary_char(ch: char) -> bool {
    matches!(ch, ' ' | '-' | '_' | '.' | '/' | '(')
}


#[cfg(test)]
mod tests;
