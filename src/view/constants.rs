//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the header ("Clear Check" plus subtitle).
pub const HEADER_HEIGHT: u16 = 2;

/// Height of the mode selector tab bar (border + content).
pub const MODE_BAR_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the search error line.
pub const ERROR_LINE_HEIGHT: u16 = 1;

/// Lines below the results table: range caption and pagination bar.
pub const RESULTS_FOOTER_HEIGHT: u16 = 2;

/// Height of the chart tab bar.
pub const CHART_TABS_HEIGHT: u16 = 3;

/// Width of the checkbox column.
pub const CHECKBOX_WIDTH: u16 = 3;

/// Width percentage of the drill-down panel beside the chart.
pub const DRILL_DOWN_WIDTH_PERCENT: u16 = 35;

/// Narrowest and widest bar in the bar chart.
pub const MIN_BAR_WIDTH: u16 = 3;
/// See [`MIN_BAR_WIDTH`].
pub const MAX_BAR_WIDTH: u16 = 12;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
