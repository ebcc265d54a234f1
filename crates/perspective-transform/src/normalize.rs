//! Centers a corner set on its centroid and scales it so the mean distance to the
//! centroid is √2.
//!
//! Solving for the homography between normalized corner sets and mapping the result
//! back keeps the entries of the linear system at a similar magnitude, which matters
//! when the input coordinates are large. The pre-pass is only applied when
//! [`crate::HomographyParams::normalize`] is set.

use crate::types::{Corners, Matrix3x3, Point2D};

/// Mean distances below this are treated as coincident points.
const MIN_MEAN_DISTANCE: f64 = 1e-10;

/// The similarity `p' = (p + t) * scale` applied by [`normalize_corners`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    /// Isotropic scale factor.
    pub scale: f64,
    /// Translation along x, applied before scaling.
    pub tx: f64,
    /// Translation along y, applied before scaling.
    pub ty: f64,
}

impl Similarity {
    /// Apply the transform to a point.
    pub fn apply(&self, p: Point2D) -> Point2D {
        Point2D::new((p.x + self.tx) * self.scale, (p.y + self.ty) * self.scale)
    }

    /// The transform as a homogeneous matrix.
    #[rustfmt::skip]
    pub fn to_matrix(&self) -> Matrix3x3 {
        let s = self.scale;
        Matrix3x3::from_rows([
            [s, 0.0, s * self.tx],
            [0.0, s, s * self.ty],
            [0.0, 0.0, 1.0],
        ])
    }

    /// The inverse transform as a homogeneous matrix.
    #[rustfmt::skip]
    pub fn inverse_matrix(&self) -> Matrix3x3 {
        let inv_s = 1.0 / self.scale;
        Matrix3x3::from_rows([
            [inv_s, 0.0, -self.tx],
            [0.0, inv_s, -self.ty],
            [0.0, 0.0, 1.0],
        ])
    }
}

/// Normalize the four corners.
///
/// * `corners` - The corners to normalize.
///
/// # Returns
///
/// The normalized corners and the similarity that produced them. Coincident corners
/// are only translated (`scale == 1.0`).
///
/// Example:
///
/// ```
/// use perspective_transform::{normalize::normalize_corners, Corners};
///
/// let c = Corners::from_array([[10.0, 10.0], [12.0, 10.0], [12.0, 12.0], [10.0, 12.0]]);
/// let (normalized, t) = normalize_corners(&c);
/// assert_eq!(t.tx, -11.0);
/// assert!((normalized.tl.x + 1.0).abs() < 1e-12);
/// ```
pub fn normalize_corners(corners: &Corners) -> (Corners, Similarity) {
    let points = corners.points();

    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let mean_x = sum_x / 4.0;
    let mean_y = sum_y / 4.0;

    let mean_dist = points
        .iter()
        .map(|p| (p.x - mean_x).hypot(p.y - mean_y))
        .sum::<f64>()
        / 4.0;

    let scale = if mean_dist > MIN_MEAN_DISTANCE {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };

    let similarity = Similarity {
        scale,
        tx: -mean_x,
        ty: -mean_y,
    };

    (
        Corners::from(points.map(|p| similarity.apply(p))),
        similarity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_centroid_and_scale() {
        let c = Corners::from_array([[100.0, 50.0], [420.0, 80.0], [400.0, 300.0], [90.0, 310.0]]);
        let (normalized, _) = normalize_corners(&c);
        let points = normalized.points();

        let cx = points.iter().map(|p| p.x).sum::<f64>() / 4.0;
        let cy = points.iter().map(|p| p.y).sum::<f64>() / 4.0;
        assert_relative_eq!(cx, 0.0, epsilon = 1e-12);
        assert_relative_eq!(cy, 0.0, epsilon = 1e-12);

        let mean_dist = points.iter().map(|p| p.x.hypot(p.y)).sum::<f64>() / 4.0;
        assert_relative_eq!(mean_dist, std::f64::consts::SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_unit_square() {
        let c = Corners::from_array([[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
        let (normalized, t) = normalize_corners(&c);
        // every corner is at distance √2 from (1, 1) already
        assert_relative_eq!(t.scale, 1.0, epsilon = 1e-12);
        assert_eq!((t.tx, t.ty), (-1.0, -1.0));
        assert_relative_eq!(normalized.tl.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(normalized.br.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_coincident_points() {
        let c = Corners::from_array([[3.0, 4.0]; 4]);
        let (normalized, t) = normalize_corners(&c);
        assert_eq!(t.scale, 1.0);
        for p in normalized.points() {
            assert_eq!(p, Point2D::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_similarity_matrices() {
        let t = Similarity {
            scale: 0.25,
            tx: -3.0,
            ty: 7.0,
        };
        let p = Point2D::new(5.0, -2.0);

        let expected = t.apply(p);
        let projected = t.to_matrix().transform_point(p).unwrap();
        assert_relative_eq!(projected.x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(projected.y, expected.y, epsilon = 1e-12);

        let roundtrip = t.inverse_matrix().mul(&t.to_matrix());
        for (val, id) in roundtrip
            .as_array()
            .iter()
            .zip(Matrix3x3::IDENTITY.as_array().iter())
        {
            assert_relative_eq!(*val, *id, epsilon = 1e-12);
        }
    }
}
