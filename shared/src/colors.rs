pub type Rgb = (u8, u8, u8);

pub const MANDARIN: Rgb = (0xFF, 0x6B, 0x6B);
pub const HOKKIEN: Rgb = (0x4E, 0xCB, 0x71);
pub const HAKKA: Rgb = (0x6B, 0x8E, 0xFF);
pub const INDIGENOUS: Rgb = (0xFF, 0xD9, 0x3D);

/// Fill for regions without language data.
pub const NO_DATA: Rgb = (0xCC, 0xCC, 0xCC);
/// Fill applied while the pointer hovers a region.
pub const HIGHLIGHT: Rgb = (0x43, 0x48, 0x4A);

pub const STROKE: &str = "black";

/// Format as a CSS hex color, e.g. `#FF6B6B`.
pub fn to_hex((r, g, b): Rgb) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}
