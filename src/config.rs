use bon::Builder;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::WheelError;
use crate::selector::PriorityNames;

/// RGB color used by every scene element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Slice colors, cycled by slice index.
pub const PALETTE: [Color; 10] = [
    Color::from_hex(0xFF6B6B),
    Color::from_hex(0x4ECDC4),
    Color::from_hex(0x45B7D1),
    Color::from_hex(0xFFA07A),
    Color::from_hex(0x98D8C8),
    Color::from_hex(0xF7DC6F),
    Color::from_hex(0xBB8FCE),
    Color::from_hex(0x85C1E2),
    Color::from_hex(0xF8B88B),
    Color::from_hex(0xABEBC6),
];

pub fn slice_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, Builder)]
pub struct WheelConfig {
    #[builder(default = "Lucky Wheel".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 600)]
    pub wheel_size: usize,
    #[builder(default = 360)]
    pub panel_width: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Wheel configuration
    #[builder(default = 10)]
    pub wheel_margin: i32,
    #[builder(default = 2.0)]
    pub slice_border_thickness: f32,
    #[builder(default = 30.0)]
    pub label_inset: f64,
    #[builder(default = 14.0)]
    pub label_font_size: f32,

    // Hub configuration
    #[builder(default = 30)]
    pub hub_radius: i32,
    #[builder(default = 3)]
    pub hub_ring_thickness: i32,
    #[builder(default = "QUAY".to_string())]
    pub hub_label: String,
    #[builder(default = 18.0)]
    pub hub_font_size: f32,

    // Pointer configuration
    #[builder(default = 20)]
    pub pointer_top: i32,
    #[builder(default = 20)]
    pub pointer_height: i32,
    #[builder(default = 10)]
    pub pointer_half_width: i32,

    // Side panel configuration
    #[builder(default = 16.0)]
    pub panel_font_size: f32,
    #[builder(default = 22.0)]
    pub dialog_font_size: f32,

    // Spin timing
    #[builder(default = Duration::from_millis(2000))]
    pub spin_duration: Duration,
    #[builder(default = Duration::from_millis(2000))]
    pub result_delay: Duration,
    #[builder(default = 5)]
    pub spin_turns: u32,

    // Content
    #[builder(default = 50)]
    pub max_input_chars: usize,
    #[builder(default)]
    pub priority_names: PriorityNames,
    #[builder(default)]
    pub initial_items: Vec<String>,
    pub seed: Option<u64>,

    // Colors
    #[builder(default = Color::from_hex(0xF5F5F5))]
    pub background_color: Color,
    #[builder(default = Color::from_hex(0xFF6B6B))]
    pub pointer_color: Color,
    #[builder(default = Color::from_hex(0x333333))]
    pub text_color: Color,
    #[builder(default = Color::from_hex(0xFFFFFF))]
    pub panel_color: Color,

    // Font configuration
    pub font_path: Option<PathBuf>,
}

impl WheelConfig {
    pub fn window_width(&self) -> usize {
        self.wheel_size + self.panel_width
    }

    pub fn window_height(&self) -> usize {
        self.wheel_size
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Reads one item per line, skipping blank lines.
pub fn load_items(path: &Path) -> Result<Vec<String>, WheelError> {
    let text = std::fs::read_to_string(path).map_err(|source| WheelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_items(&text))
}

pub fn parse_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn palette_cycles_every_ten_slices() {
        assert_eq!(slice_color(0), Color::new(0xFF, 0x6B, 0x6B));
        assert_eq!(slice_color(9), Color::new(0xAB, 0xEB, 0xC6));
        assert_eq!(slice_color(10), slice_color(0));
        assert_eq!(slice_color(23), slice_color(3));
    }

    #[test]
    fn defaults_describe_the_600px_wheel() {
        let config = WheelConfig::default();
        assert_eq!(config.window_height(), 600);
        assert_eq!(config.window_width(), 960);
        assert_eq!(config.hub_label, "QUAY");
        assert_eq!(config.spin_duration, Duration::from_secs(2));
        assert_eq!(config.result_delay, Duration::from_secs(2));
        assert_eq!(config.max_input_chars, 50);
        assert!(config.priority_names.is_empty());
    }

    #[test]
    fn parse_items_takes_one_item_per_line() {
        let items = parse_items("Alice\n\n  Bob  \r\n   \nCarol");
        assert_eq!(items, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn load_items_reports_missing_file() {
        let err = load_items(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, WheelError::Read { .. }));
    }
}
