//! Packed ARGB8888 color helpers.
//!
//! Colors are stored as `0xAARRGGBB` in a `u32`, which is also the layout the
//! presentation layer streams into an `ARGB8888` texture.

pub const BLACK: u32 = 0xFF000000;
pub const WHITE: u32 = 0xFFFFFFFF;
pub const BACKGROUND: u32 = 0xFF1E1E1E;
/// Color of the placeholder texel used when a texture fails to load.
pub const FALLBACK: u32 = 0xFFFF00FF;

/// Pack 8-bit channels into an ARGB `u32`.
#[inline]
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Unpack an ARGB `u32` into `(a, r, g, b)` channels.
#[inline]
pub const fn unpack_argb(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    )
}

/// Build an opaque gray from a single intensity byte.
#[inline]
pub const fn gray(level: u8) -> u32 {
    pack_argb(0xFF, level, level, level)
}
