//! Selection masks for region-based editing
//!
//! This module turns vector selections into soft-edged alpha masks and uses
//! them to composite edits back over the original image.
//!
//! ## Pipeline
//!
//! - **Path**: a [`SelectionShape`] of move/line/cubic/close commands with a
//!   [`FillRule`]
//! - **Rasterize**: pixel-centre scanline fill into a 0/1 coverage map
//! - **Feather**: pad, Gaussian blur and crop back to the image size
//! - **Composite**: blend edited pixels over the original by mask coverage
//!
//! ## Algorithm
//!
//! Masks hold one byte per pixel from 0 (unselected) to 255 (fully
//! selected). A feather radius of 0 gives a hard mask with no partial
//! values.

pub mod apply;
pub mod blur;
pub mod feather;
pub mod path;
pub mod raster;

pub use apply::{apply_mask_to_alpha, composite_masked};
pub use blur::{gaussian_blur, gaussian_kernel};
pub use feather::{build_feathered_mask, FeatherSpec, DEFAULT_FEATHER_PADDING};
pub use path::{FillRule, PathCommand, SelectionShape};
pub use raster::rasterize;
