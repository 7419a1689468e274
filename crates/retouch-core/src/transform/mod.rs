//! Image transformation operations: perspective correction and cropping.
//!
//! # Perspective Crop
//!
//! When the user commits a 4-point perspective crop:
//! 1. [`compute_transform`] solves the homography from the picked quad to
//!    an upright rectangle
//! 2. [`warp`] inverse-maps every output pixel back into the source and
//!    samples it bilinearly
//!
//! [`perspective_crop`] does both steps and sizes the output from the quad.
//!
//! # Coordinate System
//!
//! - Coordinates are image-space pixels; pixel `(x, y)` sits at integer
//!   position `(x, y)`
//! - Correspondences are ordered top-left, top-right, bottom-left, bottom-right
//! - Origin is top-left corner

mod crop;
mod perspective;

pub use crop::apply_crop;
pub use perspective::{compute_transform, perspective_crop, perspective_output_size, warp};
