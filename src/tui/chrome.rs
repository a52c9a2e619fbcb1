// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, ledger, footer, and help helpers used by TUI rendering.
fn stack_main_panes_vertically(area: Rect) -> bool {
    area.width < 90
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Diagram,
    Ledger,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Self::Diagram => Self::Ledger,
            Self::Ledger => Self::Diagram,
        }
    }
}

const TAB_SEPARATOR: &str = " │ ";

/// Group title followed by one tab per diagram; returns the tab hit ranges for mouse clicks.
///
/// A group with a single diagram shows its title without a clickable tab.
fn tabs_line(app: &App, area: Rect) -> (Line<'static>, Vec<TabHit>) {
    let group = app.session.group();
    let mut spans = vec![Span::styled(
        format!(" {} {} ", group.icon().glyph(), group.title()),
        app.theme.muted_style().add_modifier(Modifier::BOLD),
    )];
    let mut hits = Vec::new();
    let mut x = area.x.saturating_add(spans[0].width() as u16);
    let right = area.x.saturating_add(area.width);

    if !group.has_tabs() {
        if let Some(diagram) = app.active_diagram() {
            spans.push(Span::raw(TAB_SEPARATOR));
            spans.push(Span::styled(
                diagram.title().to_owned(),
                app.theme.tab_style(true),
            ));
        }
        return (Line::from(spans), hits);
    }

    for (index, diagram) in group.diagrams().iter().enumerate() {
        let separator = Span::raw(TAB_SEPARATOR);
        x = x.saturating_add(separator.width() as u16);
        spans.push(separator);

        let active = index == app.session.active_diagram_index();
        let tab = Span::styled(
            format!(" {} {} ", index + 1, diagram.title()),
            app.theme.tab_style(active),
        );
        let x1 = x.saturating_add(tab.width() as u16).min(right);
        if x < right {
            hits.push(TabHit { x0: x, x1, index });
        }
        x = x1;
        spans.push(tab);
    }

    (Line::from(spans), hits)
}

fn diagram_view_title(app: &App) -> Line<'static> {
    let diagram_id = app
        .active_diagram()
        .map(|diagram| diagram.diagram_id().to_string())
        .unwrap_or_default();
    let id_color = if app.focus == Focus::Diagram {
        Color::White
    } else {
        Color::Gray
    };
    let counter = diagram_counter_label(
        Some(app.session.active_diagram_index() + 1),
        app.session.diagram_count(),
    );

    let mut spans = vec![
        Span::raw("─ Diagram ".to_owned()),
        Span::styled(counter, Style::default().fg(Color::LightGreen)),
        Span::raw(" ".to_owned()),
        Span::styled(diagram_id, Style::default().fg(id_color)),
        Span::raw(" ".to_owned()),
    ];
    let zoom = app.viewport.zoom();
    if zoom > crate::viewer::MIN_ZOOM {
        spans.push(Span::styled(
            format!("{zoom:.2}x "),
            Style::default().fg(FOOTER_KEY_COLOR),
        ));
    }
    Line::from(spans)
}

fn diagram_counter_label(diagram_index: Option<usize>, diagram_total: usize) -> String {
    if diagram_total == 0 {
        return "[0/0]".to_owned();
    }

    let width = diagram_total.to_string().len();
    let index = diagram_index.unwrap_or(0).min(diagram_total);
    format!("[{index:0width$}/{diagram_total}]")
}

fn ledger_view_title(app: &App) -> Line<'static> {
    let parts = app
        .active_diagram()
        .map(|diagram| diagram.parts().len())
        .unwrap_or(0);
    let color = if app.focus == Focus::Ledger {
        Color::White
    } else {
        Color::Gray
    };
    Line::from(vec![
        Span::raw("─ ".to_owned()),
        Span::styled("Parts ".to_owned(), Style::default().fg(color)),
        Span::styled(format!("[{parts}]"), Style::default().fg(Color::LightGreen)),
        Span::raw(" ".to_owned()),
    ])
}

const LEDGER_NUMBER_WIDTH: usize = 6;
const LEDGER_CODE_WIDTH: usize = 12;
const LEDGER_QTY_WIDTH: usize = 4;

/// Header plus the rows visible from the current scroll offset.
fn ledger_text(app: &App, width: u16) -> Text<'static> {
    let width = usize::from(width);
    let mut lines = vec![Line::from(Span::styled(
        ledger_columns("No.", "Code", "Name", "Qty", width),
        app.theme.muted_style().add_modifier(Modifier::BOLD),
    ))];

    let active = app.session.effective_active_id();
    let cursor = (app.focus == Focus::Ledger)
        .then(|| app.ledger.cursor())
        .flatten();
    let height = usize::from(app.layout.ledger.height);
    let rows = app.ledger.rows().iter().enumerate();
    for (index, row) in rows.skip(app.ledger.offset()).take(height) {
        let mut style = if row.part_id().is_some() && row.part_id() == active {
            app.theme.selection_style()
        } else if row.is_sub_part() {
            app.theme.muted_style()
        } else {
            app.theme.base_style()
        };
        if cursor == Some(index) {
            style = style.patch(app.theme.cursor_style());
        }
        lines.push(Line::from(Span::styled(ledger_row_text(row, width), style)));
    }

    Text::from(lines)
}

fn ledger_row_text(row: &LedgerRow, width: usize) -> String {
    let number = if row.is_sub_part() {
        format!("  └ {}", row.number())
    } else {
        row.number().to_owned()
    };
    ledger_columns(
        &number,
        row.code(),
        row.name(),
        &row.quantity().to_string(),
        width,
    )
}

fn ledger_columns(number: &str, code: &str, name: &str, qty: &str, width: usize) -> String {
    let fixed = LEDGER_NUMBER_WIDTH + LEDGER_CODE_WIDTH + LEDGER_QTY_WIDTH + 3;
    let name_width = width.saturating_sub(fixed).max(1);
    let number_width = if number.starts_with("  └") {
        LEDGER_NUMBER_WIDTH + 2
    } else {
        LEDGER_NUMBER_WIDTH
    };
    let line = format!(
        "{} {} {} {:>qty_w$}",
        fit(number, number_width),
        fit(code, LEDGER_CODE_WIDTH),
        fit(name, name_width.saturating_sub(number_width - LEDGER_NUMBER_WIDTH)),
        qty,
        qty_w = LEDGER_QTY_WIDTH,
    );
    let mut out = line.chars().take(width).collect::<String>();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

/// Pads or truncates (with an ellipsis) to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        let mut out = text.to_owned();
        out.extend(std::iter::repeat(' ').take(width - len));
        return out;
    }
    if width == 0 {
        return String::new();
    }
    let mut out = text.chars().take(width - 1).collect::<String>();
    out.push('…');
    out
}

fn active_part_line(app: &App) -> Line<'static> {
    let Some(part) = app.session.active_part() else {
        let hint = match app.active_diagram() {
            Some(diagram) if diagram.hide_markers() => " Hover a ledger row to highlight a part",
            _ => " Hover a marker or ledger row to highlight a part",
        };
        return Line::from(Span::styled(hint, app.theme.muted_style()));
    };

    let mut spans = vec![
        Span::styled(" Part ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)),
        Span::styled(
            part.number().to_owned(),
            Style::default()
                .fg(FOOTER_KEY_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  ".to_owned()),
        Span::raw(part.code().to_owned()),
        Span::raw("  ".to_owned()),
        Span::styled(
            part.name().to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  ×{}", part.quantity())),
    ];
    if !part.sub_parts().is_empty() {
        spans.push(Span::styled(
            format!("  +{} sub-parts", part.sub_parts().len()),
            app.theme.muted_style(),
        ));
    }
    if app.session.interaction().is_pinned() {
        spans.push(Span::styled(
            "  [pinned]".to_owned(),
            Style::default().fg(Color::LightGreen),
        ));
    }
    Line::from(spans)
}

fn footer_help_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    match (&app.hint_mode, app.focus) {
        (HintMode::Typing { .. }, _) => {
            push_footer_entry(&mut spans, "HINT", "letters");
            push_footer_entry(&mut spans, "CANCEL", "Esc");
        }
        (HintMode::Inactive, Focus::Diagram) => {
            push_footer_entry(&mut spans, "ZOOM", "+/-");
            push_footer_entry(&mut spans, "PAN", "hjkl");
            push_footer_entry(&mut spans, "RESET", "0");
            push_footer_entry(&mut spans, "HINT", "f");
        }
        (HintMode::Inactive, Focus::Ledger) => {
            push_footer_entry(&mut spans, "MOVE", "j/k");
            push_footer_entry(&mut spans, "PIN", "⏎");
            push_footer_entry(&mut spans, "PAGE", "PgUp/PgDn");
        }
    }

    if app.session.group().has_tabs() {
        push_footer_entry(&mut spans, "DIAGRAM", "[]");
    }
    push_footer_entry(&mut spans, "GROUP", "{}");
    push_footer_entry(&mut spans, "SEARCH", "/");
    if app.session.interaction().is_pinned() {
        push_footer_entry(&mut spans, "UNPIN", "Esc");
    }
    push_footer_entry(&mut spans, "HELP", "?");
    push_footer_entry(&mut spans, "QUIT", "q");

    push_toast(&mut spans, toast_suffix);
    Line::from(spans)
}

fn search_footer_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let query = app.search_query.as_str();
    let (idx, total) = match app.search_results.len() {
        0 => (0usize, 0usize),
        n => (app.search_result_index.saturating_add(1), n),
    };

    let count = if query.is_empty() {
        None
    } else if total == 0 {
        Some("0".to_owned())
    } else {
        Some(format!("{idx}/{total}"))
    };

    let mut spans = vec![
        Span::styled(
            app.search_prefix().to_string(),
            Style::default()
                .fg(FOOTER_KEY_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(query.to_owned()),
        Span::raw("   "),
    ];
    if let Some(count) = count {
        let style = if total == 0 {
            app.theme.error_style()
        } else {
            Style::default().fg(Color::LightGreen)
        };
        spans.push(Span::styled(count, style));
    }

    if app.search_mode == SearchMode::Results {
        push_footer_entry_with_separator(&mut spans, "Next", "n/N", " | ");
    }
    push_footer_entry_with_separator(&mut spans, "Accept", "Enter", " | ");
    push_footer_entry_with_separator(&mut spans, "Close", "Esc", " | ");

    push_toast(&mut spans, toast_suffix);
    Line::from(spans)
}

fn push_toast(spans: &mut Vec<Span<'static>>, toast_suffix: &str) {
    let toast_message = toast_suffix
        .strip_prefix(" | ")
        .unwrap_or(toast_suffix)
        .trim();
    if !toast_message.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::styled(
            "Toast:".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
        spans.push(Span::raw(toast_message.to_owned()));
    }
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn help_key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn render_help(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let area = centered_rect(82, 84, main_area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let header_style = help_header_style();
    let dim_style = Style::default().fg(Color::DarkGray);

    let sections: [(&str, &[(&str, &str)]); 5] = [
        (
            "Global",
            &[
                ("?", "Help (toggle)"),
                ("q", "Quit"),
                ("Tab/Shift-Tab", "Switch focus diagram/ledger"),
                ("[ / ]", "Previous/next diagram tab"),
                ("{ / }", "Previous/next parts group"),
                ("/", "Search parts (substring)"),
                ("\\", "Search parts (fuzzy)"),
                ("n/N", "Next/previous search result"),
                ("y", "Yank active part code (OSC52)"),
                ("Esc", "Unpin the pinned part"),
            ],
        ),
        (
            "Diagram",
            &[
                ("+/=, -", "Zoom in/out"),
                ("0", "Reset zoom and pan"),
                ("h/j/k/l, arrows", "Pan (when zoomed in)"),
                ("H/J/K/L", "Pan in larger steps"),
                ("f", "Marker hints: type a label to pin"),
            ],
        ),
        (
            "Ledger",
            &[
                ("j/k, ↑/↓", "Move cursor (highlights the part)"),
                ("Enter/Space", "Pin or unpin the part under the cursor"),
                ("PgUp/PgDn, Home/End", "Scroll"),
            ],
        ),
        (
            "Mouse",
            &[
                ("hover", "Highlight a marker or ledger row"),
                ("click", "Pin; click the pinned part again to unpin"),
                ("drag", "Pan the diagram (when zoomed in)"),
                ("wheel", "Zoom diagram / scroll ledger"),
            ],
        ),
        (
            "Help",
            &[
                ("j/k, ↑/↓, PgUp/PgDn, Home/End", "Scroll help"),
                ("Esc/?", "Close help"),
            ],
        ),
    ];

    let key_col_width = sections
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    for (title, entries) in sections {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("--- {title} ---"),
            header_style,
        )));
        for (key, desc) in entries {
            lines.push(help_kv(key, desc, key_col_width, key_style));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Note: ", dim_style),
        Span::styled(
            "a pinned part ignores hover until it is unpinned.",
            dim_style,
        ),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .title("─ Help ─")
        .border_style(app.theme.panel_border_style(true))
        .title_style(
            app.theme
                .panel_border_style(true)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    app.help_viewport_height = inner.height;
    let max_scroll = lines
        .len()
        .saturating_sub(inner.height.max(1) as usize)
        .min(u16::MAX as usize) as u16;
    app.help_scroll = app.help_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_with_separator(spans, label, value, " | ");
}

fn push_footer_entry_with_separator(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    separator: &'static str,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            separator.to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default()
            .fg(FOOTER_KEY_COLOR)
            .add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}
