//! Fixed chart palettes.

/// An RGB color with an opacity percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity in percent (0..=100).
    pub alpha: u8,
}

impl ChartColor {
    /// Build a color.
    pub const fn rgba(r: u8, g: u8, b: u8, alpha: u8) -> Self {
        Self { r, g, b, alpha }
    }

    /// Same color at full opacity.
    pub const fn opaque(self) -> Self {
        Self { alpha: 100, ..self }
    }

    /// Blend onto a black terminal background.
    ///
    /// Terminals have no alpha channel, so translucent fills are
    /// pre-multiplied.
    pub fn blended(self) -> (u8, u8, u8) {
        let scale = |c: u8| (u16::from(c) * u16::from(self.alpha.min(100)) / 100) as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Bar chart fills (70% opacity).
pub const BAR: &[ChartColor] = &[
    ChartColor::rgba(255, 99, 132, 70),
    ChartColor::rgba(54, 162, 235, 70),
    ChartColor::rgba(255, 206, 86, 70),
    ChartColor::rgba(75, 192, 192, 70),
    ChartColor::rgba(153, 102, 255, 70),
];

/// Doughnut slices.
pub const DOUGHNUT: &[ChartColor] = &[
    ChartColor::rgba(0xFF, 0x63, 0x84, 100),
    ChartColor::rgba(0x36, 0xA2, 0xEB, 100),
    ChartColor::rgba(0xFF, 0xCE, 0x56, 100),
    ChartColor::rgba(0x4B, 0xC0, 0xC0, 100),
    ChartColor::rgba(0x99, 0x66, 0xFF, 100),
    ChartColor::rgba(0xFF, 0x9F, 0x40, 100),
    ChartColor::rgba(0xFF, 0x99, 0xCC, 100),
];

/// Polar area segments (70% opacity).
pub const POLAR: &[ChartColor] = BAR;

/// Trend line.
pub const TREND_LINE: ChartColor = ChartColor::rgba(75, 192, 192, 100);

/// Outline of doughnut and polar slices.
pub const SLICE_BORDER: ChartColor = ChartColor::rgba(255, 255, 255, 100);

/// Color for element `index`, cycling when there are more elements than colors.
pub fn cycle(colors: &[ChartColor], index: usize) -> ChartColor {
    if colors.is_empty() {
        return SLICE_BORDER;
    }
    colors[index % colors.len()]
}
