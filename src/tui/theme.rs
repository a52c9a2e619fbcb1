// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

use crate::viewer::MarkerStyle;

const PALETTE_ENV: &str = "PARTSCOPE_TUI_PALETTE";
const PALETTE_ENV_FALLBACK: &str = "PARTSCOPE_PALETTE";

/// Colours for the viewer. Without a palette override everything maps onto the terminal's own
/// ANSI colours.
#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_override(|name| env::var(name))?;
        Ok(Self { palette })
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn ansi_color(&self, color: Ansi16) -> Color {
        match &self.palette {
            Some(palette) => palette.ansi_color(color.idx()),
            None => color.into(),
        }
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.ansi_color(Ansi16::BrightGreen))
        } else {
            self.base_style()
        }
    }

    pub(crate) fn muted_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::BrightBlack))
    }

    pub(crate) fn backdrop_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::White))
    }

    /// Ledger row of the effective active part.
    pub(crate) fn selection_style(&self) -> Style {
        self.base_style()
            .add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn cursor_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::UNDERLINED)
    }

    pub(crate) fn marker_style(&self, style: MarkerStyle) -> Style {
        match style {
            MarkerStyle::Active => self
                .base_style()
                .fg(self.ansi_color(Ansi16::Black))
                .bg(self.ansi_color(Ansi16::Yellow))
                .add_modifier(Modifier::BOLD),
            MarkerStyle::InactivePointerOver => self
                .base_style()
                .fg(self.ansi_color(Ansi16::BrightCyan))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            MarkerStyle::Inactive => self
                .base_style()
                .fg(self.ansi_color(Ansi16::Cyan))
                .add_modifier(Modifier::BOLD),
        }
    }

    pub(crate) fn hint_style(&self) -> Style {
        self.base_style()
            .fg(self.ansi_color(Ansi16::Black))
            .bg(self.ansi_color(Ansi16::Magenta))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn tab_style(&self, active: bool) -> Style {
        if active {
            self.base_style()
                .fg(self.ansi_color(Ansi16::BrightGreen))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            self.base_style().fg(self.ansi_color(Ansi16::White))
        }
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Red))
    }
}

#[derive(Debug, Clone)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl TuiPalette {
    const CSV_LEN: usize = 18;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(|part| part.trim()).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg, then the 16 ANSI colors), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        let fg = parse_palette_color(parts[0])?;
        let bg = parse_palette_color(parts[1])?;

        let mut ansi = [Color::Reset; 16];
        for (idx, part) in parts.iter().skip(2).enumerate() {
            ansi[idx] = parse_palette_color(part)?;
        }

        Ok(Self { fg, bg, ansi })
    }

    fn ansi_color(&self, idx: usize) -> Color {
        self.ansi[idx]
    }
}

/// Reads the palette override; the first variable wins, an empty value means "no override".
fn palette_override(
    lookup: impl Fn(&str) -> Result<String, env::VarError>,
) -> Result<Option<TuiPalette>, ThemeError> {
    let mut found = None;
    for name in [PALETTE_ENV, PALETTE_ENV_FALLBACK] {
        match lookup(name) {
            Ok(value) => {
                found = Some((name, value));
                break;
            }
            Err(env::VarError::NotPresent) => {}
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: name.to_owned(),
                    value: "<non-unicode>".to_owned(),
                });
            }
        }
    }
    let Some((name, value)) = found else {
        return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = TuiPalette::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
        name: name.to_owned(),
        value: format!("{trimmed} ({error})"),
    })?;

    Ok(Some(parsed))
}

fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgb:") {
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != 3 {
            return Err(format!("invalid rgb: value: {trimmed}"));
        }
        let r = parse_hex_channel(parts[0])?;
        let g = parse_hex_channel(parts[1])?;
        let b = parse_hex_channel(parts[2])?;
        return Ok(Color::Rgb(r, g, b));
    }

    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"));
    let Some(hex) = hex else {
        // Named colours ("red", "lightblue", ...) as ratatui spells them.
        return lower
            .parse::<Color>()
            .map_err(|_| format!("invalid color: {trimmed} (expected #RRGGBB or a color name)"));
    };

    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    let r = ((rgb >> 16) & 0xFF) as u8;
    let g = ((rgb >> 8) & 0xFF) as u8;
    let b = (rgb & 0xFF) as u8;
    Ok(Color::Rgb(r, g, b))
}

fn parse_hex_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    match value.len() {
        2 => u8::from_str_radix(value, 16).map_err(|_| format!("invalid rgb: component {value}")),
        4 => u16::from_str_radix(value, 16)
            .map(|parsed| (parsed >> 8) as u8)
            .map_err(|_| format!("invalid rgb: component {value}")),
        _ => Err(format!(
            "invalid rgb: component {value} (expected 2 or 4 hex digits)"
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
enum Ansi16 {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Ansi16 {
    const fn idx(self) -> usize {
        self as usize
    }
}

impl From<Ansi16> for Color {
    fn from(value: Ansi16) -> Self {
        match value {
            Ansi16::Black => Color::Black,
            Ansi16::Red => Color::Red,
            Ansi16::Green => Color::Green,
            Ansi16::Yellow => Color::Yellow,
            Ansi16::Blue => Color::Blue,
            Ansi16::Magenta => Color::Magenta,
            Ansi16::Cyan => Color::Cyan,
            Ansi16::White => Color::Gray,
            Ansi16::BrightBlack => Color::DarkGray,
            Ansi16::BrightRed => Color::LightRed,
            Ansi16::BrightGreen => Color::LightGreen,
            Ansi16::BrightYellow => Color::LightYellow,
            Ansi16::BrightBlue => Color::LightBlue,
            Ansi16::BrightMagenta => Color::LightMagenta,
            Ansi16::BrightCyan => Color::LightCyan,
            Ansi16::BrightWhite => Color::White,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ThemeError {
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: String, value: String },
}

#[cfg(test)]
mod tests {
    use std::env::VarError;

    use ratatui::style::Color;

    use super::{palette_override, ThemeError, TuiPalette, TuiTheme, PALETTE_ENV_FALLBACK};
    use crate::viewer::MarkerStyle;

    const PALETTE: &str = "#111111,#222222,#000000,#ff0000,#00ff00,#ffff00,#0000ff,#ff00ff,\
                           #00ffff,#ffffff,#1a1a1a,#ff1111,#11ff11,#ffff11,#1111ff,#ff11ff,\
                           #11ffff,#fefefe";

    #[test]
    fn palette_parses_hex_csv() {
        let palette = TuiPalette::parse_csv(PALETTE).expect("palette");
        assert_eq!(palette.fg, Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.bg, Color::Rgb(0x22, 0x22, 0x22));
        assert_eq!(palette.ansi_color(1), Color::Rgb(0xff, 0, 0));
        assert_eq!(palette.ansi_color(15), Color::Rgb(0xfe, 0xfe, 0xfe));
    }

    #[test]
    fn palette_accepts_names_and_xterm_rgb() {
        let csv = PALETTE.replacen("#111111", "white", 1).replacen("#222222", "rgb:00/80/ffff", 1);
        let palette = TuiPalette::parse_csv(&csv).expect("palette");
        assert_eq!(palette.fg, Color::White);
        assert_eq!(palette.bg, Color::Rgb(0, 0x80, 0xff));
    }

    #[test]
    fn palette_rejects_wrong_length() {
        let err = TuiPalette::parse_csv("nope").unwrap_err();
        assert!(err.contains("expected"));
    }

    #[test]
    fn fallback_variable_is_read_when_primary_is_missing() {
        let palette = palette_override(|name| {
            if name == PALETTE_ENV_FALLBACK {
                Ok(PALETTE.to_owned())
            } else {
                Err(VarError::NotPresent)
            }
        })
        .expect("palette");
        assert!(palette.is_some());
    }

    #[test]
    fn blank_override_means_no_palette() {
        let palette = palette_override(|_| Ok("   ".to_owned())).expect("palette");
        assert!(palette.is_none());
    }

    #[test]
    fn invalid_override_names_the_variable() {
        let err = palette_override(|_| Ok("#zzzzzz".to_owned())).unwrap_err();
        let ThemeError::InvalidEnv { name, .. } = err;
        assert_eq!(name, "PARTSCOPE_TUI_PALETTE");
    }

    #[test]
    fn active_marker_stands_out_without_palette() {
        let theme = TuiTheme::default();
        let active = theme.marker_style(MarkerStyle::Active);
        let inactive = theme.marker_style(MarkerStyle::Inactive);
        assert_eq!(active.bg, Some(Color::Yellow));
        assert_eq!(inactive.bg, None);
        assert_ne!(theme.marker_style(MarkerStyle::InactivePointerOver), inactive);
    }
}
