//! Color and emphasis configuration for every widget.
//!
//! All styling goes through [`Styles`] so `--no-color` / `NO_COLOR`
//! strips color in one place. Emphasis (bold, reversed) is kept without
//! color so the cursor and selections stay visible.

use crate::charts::ChartColor;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether colors are rendered.
///
/// Resolved from config: `color = false`, `NO_COLOR` or `--no-color`
/// disable it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colors on or off.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

// ===== Styles =====

/// Resolved styles for the whole UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styles {
    config: ColorConfig,
    /// "Clear Check" title.
    pub title: Style,
    /// Subtitle and hints.
    pub muted: Style,
    /// Section headers (help categories, panel labels).
    pub section: Style,
    /// Border of the focused pane.
    pub focused_border: Style,
    /// Border of unfocused panes.
    pub border: Style,
    /// Table header row.
    pub table_header: Style,
    /// Highlighted table row / chart element.
    pub cursor: Style,
    /// Active tab, current page.
    pub active: Style,
    /// Search failure line and error notices.
    pub error: Style,
    /// Info notices and the loading spinner.
    pub info: Style,
    /// Key names in hints and help.
    pub key: Style,
}

impl Styles {
    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let reversed = Style::default().add_modifier(Modifier::REVERSED);

        if config.colors_enabled() {
            Self {
                config,
                title: bold.fg(Color::Cyan),
                muted: Style::default().fg(Color::DarkGray),
                section: bold.fg(Color::Cyan),
                focused_border: Style::default().fg(Color::Yellow),
                border: Style::default().fg(Color::Gray),
                table_header: bold.fg(Color::White),
                cursor: reversed,
                active: bold.fg(Color::Yellow),
                error: Style::default().fg(Color::Red),
                info: Style::default().fg(Color::Green),
                key: bold.fg(Color::Yellow),
            }
        } else {
            Self {
                config,
                title: bold,
                muted: Style::default(),
                section: bold,
                focused_border: bold,
                border: Style::default(),
                table_header: bold,
                cursor: reversed,
                active: bold.add_modifier(Modifier::UNDERLINED),
                error: bold,
                info: Style::default(),
                key: bold,
            }
        }
    }

    /// Whether colors are rendered.
    pub fn colors_enabled(&self) -> bool {
        self.config.colors_enabled()
    }

    /// Terminal color for a chart palette entry, blended against black.
    pub fn chart_color(&self, color: ChartColor) -> Color {
        if !self.colors_enabled() {
            return Color::Reset;
        }
        let (r, g, b) = color.blended();
        Color::Rgb(r, g, b)
    }

    /// Foreground style for a chart element.
    pub fn chart_style(&self, color: ChartColor) -> Style {
        if self.colors_enabled() {
            Style::default().fg(self.chart_color(color))
        } else {
            Style::default()
        }
    }

    /// Border style for a pane depending on focus.
    pub fn pane_border(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.border
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::default())
    }
}

// ===== Tests =====
