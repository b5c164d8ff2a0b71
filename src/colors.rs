//! Color conversion helpers.
//!
//! Sequence files store colors as 24-bit packed integers (`0xRRGGBB`), while the
//! in-memory model works with `palette::Srgb` (0.0-1.0 per channel). The
//! functions here convert between the two and provide the HSV helpers used to
//! build the default generator palette.

use palette::{FromColor, Hsv, Srgb};

/// Number of entries in the default palette.
pub const DEFAULT_PALETTE_SIZE: usize = 32;

/// Decodes a packed `0xRRGGBB` color. Bits above the low 24 are ignored.
#[inline]
pub fn unpack_rgb(packed: u32) -> Srgb {
    Srgb::new(
        channel_to_f32((packed >> 16) & 0xFF),
        channel_to_f32((packed >> 8) & 0xFF),
        channel_to_f32(packed & 0xFF),
    )
}

/// Encodes a color as packed `0xRRGGBB`, rounding each channel to the nearest byte.
///
/// Channels outside 0.0-1.0 are clamped.
#[inline]
pub fn pack_rgb(color: Srgb) -> u32 {
    (channel_to_u8(color.red) << 16) | (channel_to_u8(color.green) << 8) | channel_to_u8(color.blue)
}

#[inline]
fn channel_to_f32(byte: u32) -> f32 {
    (1.0 / 255.0) * byte as f32
}

#[inline]
fn channel_to_u8(channel: f32) -> u32 {
    (channel.clamp(0.0, 1.0) * 255.0 + 0.5) as u32
}

/// Creates an RGB color from HSV (Hue, Saturation, Value) components.
///
/// Hue is in degrees.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    let hsv = Hsv::new(hue, saturation, value);
    Srgb::from_color(hsv)
}

/// Creates an RGB color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Srgb {
    hsv(hue, 1.0, 1.0)
}

/// Returns the default color palette offered to the generator.
///
/// Entry `n` walks the hue circle in 31 equal slices at 80% saturation and value,
/// so the first and last entries are both red.
pub fn default_palette() -> [Srgb; DEFAULT_PALETTE_SIZE] {
    let last = (DEFAULT_PALETTE_SIZE - 1) as f32;
    core::array::from_fn(|n| hsv(360.0 * n as f32 / last, 0.8, 0.8))
}
