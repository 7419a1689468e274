//! Core value types shared by every engine module.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A linear system or 3x3 inversion has no numerically stable solution.
    ///
    /// Raised for collinear or duplicated perspective correspondences.
    #[error("Singular system: input points are degenerate")]
    Singular,

    /// Buffer or matrix sizes disagree with the declared dimensions.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// A 2D coordinate in image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle in image space.
///
/// `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle, flipping the origin when an extent is negative.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (x, width) = if width < 0.0 {
            (x + width, -width)
        } else {
            (x, width)
        };
        let (y, height) = if height < 0.0 {
            (y + height, -height)
        } else {
            (y, height)
        };
        Self { x, y, width, height }
    }

    /// Smallest rectangle spanning two corner points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Intersect with `bounds`. Disjoint rectangles collapse to zero size
    /// at the nearest bounds corner.
    pub fn clamp_to(&self, bounds: &Rect) -> Rect {
        let left = self.x.clamp(bounds.x, bounds.right());
        let top = self.y.clamp(bounds.y, bounds.bottom());
        let right = self.right().clamp(left, bounds.right());
        let bottom = self.bottom().clamp(top, bounds.bottom());
        Rect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }
}

/// An RGBA image buffer with 8 bits per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Bytes per pixel.
    pub const CHANNELS: usize = 4;

    /// Create a new PixelBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * Self::CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a PixelBuffer after checking the data length.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> EngineResult<Self> {
        let expected = width as usize * height as usize * Self::CHANNELS;
        if pixels.len() != expected {
            return Err(EngineError::DimensionMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * Self::CHANNELS],
        }
    }

    /// Create a PixelBuffer from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * Self::CHANNELS
    }

    /// RGBA value at (x, y). Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index_of(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index_of(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// Single-channel coverage mask: 0 = unselected, 255 = fully selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    pub width: u32,
    pub height: u32,
    /// Row-major coverage, one byte per pixel.
    pub data: Vec<u8>,
}

impl AlphaMask {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize,
            "Mask length doesn't match dimensions"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap caller-provided coverage bytes, checking the length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> EngineResult<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(EngineError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self::new(width, height, data))
    }

    /// A mask with every pixel unselected.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Convert to an image::GrayImage for preview or export.
    pub fn to_gray_image(&self) -> Option<image::GrayImage> {
        image::GrayImage::from_raw(self.width, self.height, self.data.clone())
    }

    /// Number of pixels with coverage strictly between 0 and 255.
    pub fn soft_pixel_count(&self) -> usize {
        self.data.iter().filter(|&&a| a > 0 && a < 255).count()
    }
}
