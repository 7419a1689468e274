//! Retouch Core - Geometry and color engine
//!
//! This crate provides the pure computation behind the Retouch editor's crop,
//! perspective, selection and adjustment tools: color conversion, crop
//! handle hit-testing, Bézier flattening, homography solving and warping,
//! and feathered selection masks.

pub mod adjustments;
pub mod color;
pub mod geometry;
pub mod linalg;
pub mod mask;
pub mod transform;
pub mod types;

pub use adjustments::{apply_color_adjustments, ColorAdjustments};
pub use color::{hex_to_rgba, hsl_to_rgb, rgb_to_hsl, Hsl, Rgb};
pub use geometry::{
    approximate_cubic_bezier, get_handle_at_point, is_point_in_rect, CropResizeHandle, ResizeCursor,
};
pub use linalg::Matrix3x3;
pub use mask::{build_feathered_mask, composite_masked, FeatherSpec, FillRule, SelectionShape};
pub use transform::{apply_crop, compute_transform, perspective_crop, warp};
pub use types::{AlphaMask, EngineError, EngineResult, PixelBuffer, Point, Rect};
