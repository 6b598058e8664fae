//! Textures sampled by the rasterizer.

use std::path::Path;

use log::{debug, warn};

use crate::colors;
use crate::error::AssetError;

/// How texture coordinates outside `[0, 1]` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Coordinates are clamped to the edge texels.
    #[default]
    Clamp,
    /// Coordinates wrap around (`rem_euclid`), tiling the texture.
    Repeat,
}

/// A 2D grid of ARGB texels, at least 1x1.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    data: Vec<u32>,
    width: u32,
    height: u32,
    wrap: WrapMode,
}

impl Bitmap {
    /// Create a bitmap filled with a single color.
    pub fn new(width: u32, height: u32, color: u32) -> Result<Self, AssetError> {
        Self::from_pixels(width, height, vec![color; width as usize * height as usize])
    }

    /// Create a bitmap from row-major texels (row 0 is the top row).
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self, AssetError> {
        if width == 0 || height == 0 {
            return Err(AssetError::EmptyBitmap { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(AssetError::TexelCountMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            wrap: WrapMode::default(),
        })
    }

    /// A 1x1 bitmap of `color`.
    pub fn solid(color: u32) -> Self {
        Self {
            data: vec![color],
            width: 1,
            height: 1,
            wrap: WrapMode::default(),
        }
    }

    /// The 1x1 placeholder substituted for textures that fail to load.
    pub fn fallback() -> Self {
        Self::solid(colors::FALLBACK)
    }

    /// Load a bitmap from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                colors::pack_argb(a, r, g, b)
            })
            .collect();

        debug!("loaded bitmap {} ({}x{})", path.display(), width, height);
        Self::from_pixels(width, height, data)
    }

    /// Load a bitmap, substituting [`Bitmap::fallback`] on failure.
    pub fn from_file_or_fallback<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::from_file(path).unwrap_or_else(|err| {
            warn!("using fallback texture for {}: {}", path.display(), err);
            Self::fallback()
        })
    }

    /// Builder-style wrap mode selection.
    pub fn with_wrap_mode(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at integer coordinates, or None if out of range.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.data[(y * self.width + x) as usize])
    }

    /// Overwrite a texel. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: u32) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = color;
        }
    }

    /// Fill every texel with `color`.
    pub fn clear(&mut self, color: u32) {
        self.data.fill(color);
    }

    /// Map a texture coordinate to a texel index along an axis of `size` texels.
    ///
    /// `0.0` is the first texel and `1.0` the last; the nearest texel wins.
    #[inline]
    fn texel_index(&self, coord: f32, size: u32) -> u32 {
        let coord = match self.wrap {
            WrapMode::Clamp => coord.clamp(0.0, 1.0),
            WrapMode::Repeat => coord.rem_euclid(1.0),
        };
        // NaN falls through `clamp` and casts to 0.
        let index = (coord * (size - 1) as f32 + 0.5) as u32;
        index.min(size - 1)
    }

    /// Sample the bitmap at normalized coordinates using nearest-neighbor
    /// filtering. `(0, 0)` is the top-left texel, `(1, 1)` the bottom-right.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let x = self.texel_index(u, self.width);
        let y = self.texel_index(v, self.height);
        self.data[(y * self.width + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFFFF0000;
    const GREEN: u32 = 0xFF00FF00;
    const BLUE: u32 = 0xFF0000FF;
    const WHITE: u32 = 0xFFFFFFFF;

    fn checker() -> Bitmap {
        Bitmap::from_pixels(2, 2, vec![RED, GREEN, BLUE, WHITE]).unwrap()
    }

    #[test]
    fn corners_map_to_corner_texels() {
        let b = checker();
        assert_eq!(b.sample(0.0, 0.0), RED);
        assert_eq!(b.sample(1.0, 0.0), GREEN);
        assert_eq!(b.sample(0.0, 1.0), BLUE);
        assert_eq!(b.sample(1.0, 1.0), WHITE);
    }

    #[test]
    fn clamp_mode_holds_edge_texels() {
        let b = checker();
        assert_eq!(b.sample(-3.0, -0.1), RED);
        assert_eq!(b.sample(7.5, 0.0), GREEN);
        assert_eq!(b.sample(2.0, 2.0), WHITE);
        assert_eq!(b.sample(f32::NAN, 0.0), RED);
    }

    #[test]
    fn repeat_mode_wraps() {
        let b = checker().with_wrap_mode(WrapMode::Repeat);
        assert_eq!(b.sample(1.0, 0.0), RED);
        assert_eq!(b.sample(-0.1, 0.0), GREEN);
        assert_eq!(b.sample(2.9, 0.0), GREEN);
    }

    #[test]
    fn zero_sized_bitmaps_are_rejected() {
        assert!(matches!(
            Bitmap::new(0, 4, RED),
            Err(AssetError::EmptyBitmap { width: 0, height: 4 })
        ));
        assert!(matches!(
            Bitmap::from_pixels(2, 2, vec![RED; 3]),
            Err(AssetError::TexelCountMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn missing_file_falls_back_to_placeholder() {
        let b = Bitmap::from_file_or_fallback("does/not/exist.png");
        assert_eq!((b.width(), b.height()), (1, 1));
        assert_eq!(b.sample(0.3, 0.7), colors::FALLBACK);
        assert!(Bitmap::from_file("does/not/exist.png").is_err());
    }

    #[test]
    fn get_set_respect_bounds() {
        let mut b = Bitmap::new(3, 2, RED).unwrap();
        b.set(2, 1, BLUE);
        b.set(3, 0, GREEN);
        assert_eq!(b.get(2, 1), Some(BLUE));
        assert_eq!(b.get(3, 0), None);
        b.clear(WHITE);
        assert_eq!(b.sample(0.5, 0.5), WHITE);
    }
}
