#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Perspective transform
//!
//! Computes the 3x3 projective transform that maps four source corners onto four
//! destination corners, as used for image rectification, overlay placement and
//! document perspective correction.
//!
//! The entry points never fail: degenerate or malformed input yields
//! [`Matrix3x3::IDENTITY`], and the reason is reported through the [`log`] facade.
//!
//! ## Example
//!
//! ```rust
//! use perspective_transform::{compute_homography, Corners};
//!
//! let src = Corners::from_array([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
//! let dst = Corners::from_array([[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
//!
//! let h = compute_homography(Some(&src), Some(&dst));
//! assert!((h.m00 - 2.0).abs() < 1e-9);
//! assert_eq!(h.m22, 1.0);
//! ```

mod error;

/// Homography estimation from four point correspondences.
pub mod homography;

mod linalg;

/// Isotropic point normalization used to condition the linear system.
pub mod normalize;

/// Parameters controlling the homography estimation.
pub mod params;

/// Point, corner and matrix value types.
pub mod types;

pub use homography::{compute_homography, compute_homography_with_params};
pub use params::HomographyParams;
pub use types::{Corners, Matrix3x3, Point2D};
