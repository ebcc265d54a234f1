/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2D {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

/// The four corners of a quadrilateral.
///
/// The order is fixed: top-left, top-right, bottom-right, bottom-left. Source and
/// destination corners must follow the same order, otherwise the estimated transform
/// maps the wrong corners onto each other.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Corners {
    /// Top-left corner.
    pub tl: Point2D,
    /// Top-right corner.
    pub tr: Point2D,
    /// Bottom-right corner.
    pub br: Point2D,
    /// Bottom-left corner.
    pub bl: Point2D,
}

impl Corners {
    /// Create the corners from the four points in {tl, tr, br, bl} order.
    pub const fn new(tl: Point2D, tr: Point2D, br: Point2D, bl: Point2D) -> Self {
        Self { tl, tr, br, bl }
    }

    /// Create the corners from `[x, y]` pairs in {tl, tr, br, bl} order.
    ///
    /// Example:
    ///
    /// ```
    /// use perspective_transform::{Corners, Point2D};
    ///
    /// let c = Corners::from_array([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    /// assert_eq!(c.br, Point2D::new(1.0, 1.0));
    /// ```
    pub fn from_array(points: [[f64; 2]; 4]) -> Self {
        Self::new(
            points[0].into(),
            points[1].into(),
            points[2].into(),
            points[3].into(),
        )
    }

    /// The four points in {tl, tr, br, bl} order.
    pub fn points(&self) -> [Point2D; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    /// The four points as `[x, y]` pairs in {tl, tr, br, bl} order.
    pub fn to_array(&self) -> [[f64; 2]; 4] {
        self.points().map(Into::into)
    }
}

impl From<[Point2D; 4]> for Corners {
    fn from(p: [Point2D; 4]) -> Self {
        Self::new(p[0], p[1], p[2], p[3])
    }
}

/// A 3x3 projective transform in row-major order.
///
/// Matrices produced by this crate are normalized so that `m22 == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix3x3 {
    /// Row 0, column 0.
    pub m00: f64,
    /// Row 0, column 1.
    pub m01: f64,
    /// Row 0, column 2. The x translation for affine transforms.
    pub m02: f64,
    /// Row 1, column 0.
    pub m10: f64,
    /// Row 1, column 1.
    pub m11: f64,
    /// Row 1, column 2. The y translation for affine transforms.
    pub m12: f64,
    /// Row 2, column 0. Zero for affine transforms.
    pub m20: f64,
    /// Row 2, column 1. Zero for affine transforms.
    pub m21: f64,
    /// Row 2, column 2. Always 1 for matrices produced by this crate.
    pub m22: f64,
}

impl Matrix3x3 {
    /// The identity transform, also returned whenever estimation fails.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self {
        m00: 1.0, m01: 0.0, m02: 0.0,
        m10: 0.0, m11: 1.0, m12: 0.0,
        m20: 0.0, m21: 0.0, m22: 1.0,
    };

    /// Create the matrix from its rows.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]] = rows;
        Self {
            m00,
            m01,
            m02,
            m10,
            m11,
            m12,
            m20,
            m21,
            m22,
        }
    }

    /// The rows of the matrix.
    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        [
            [self.m00, self.m01, self.m02],
            [self.m10, self.m11, self.m12],
            [self.m20, self.m21, self.m22],
        ]
    }

    /// The nine coefficients in row-major order.
    pub fn as_array(&self) -> [f64; 9] {
        [
            self.m00, self.m01, self.m02, self.m10, self.m11, self.m12, self.m20, self.m21,
            self.m22,
        ]
    }

    /// Whether this is exactly the identity matrix.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Whether all nine coefficients are finite.
    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }

    /// Project a point through the transform.
    ///
    /// The point is lifted to `(x, y, 1)`, multiplied by the matrix and divided by the
    /// resulting third coordinate. Returns `None` for points mapped to infinity.
    ///
    /// Example:
    ///
    /// ```
    /// use perspective_transform::{Matrix3x3, Point2D};
    ///
    /// let m = Matrix3x3::from_rows([[1.0, 0.0, 5.0], [0.0, 1.0, 3.0], [0.0, 0.0, 1.0]]);
    /// assert_eq!(m.transform_point(Point2D::new(1.0, 1.0)), Some(Point2D::new(6.0, 4.0)));
    /// ```
    pub fn transform_point(&self, p: Point2D) -> Option<Point2D> {
        let w = self.m20 * p.x + self.m21 * p.y + self.m22;
        if w == 0.0 {
            return None;
        }
        let x = (self.m00 * p.x + self.m01 * p.y + self.m02) / w;
        let y = (self.m10 * p.x + self.m11 * p.y + self.m12) / w;
        let projected = Point2D::new(x, y);
        projected.is_finite().then_some(projected)
    }

    pub(crate) fn mul(&self, other: &Self) -> Self {
        let a = self.to_rows();
        let b = other.to_rows();
        let mut c = [[0.0; 3]; 3];
        for (i, row) in c.iter_mut().enumerate() {
            for (j, val) in row.iter_mut().enumerate() {
                *val = (0..3).map(|k| a[i][k] * b[k][j]).sum();
            }
        }
        Self::from_rows(c)
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Matrix3x3> for [[f64; 3]; 3] {
    fn from(m: Matrix3x3) -> Self {
        m.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_order() {
        let c = Corners::from_array([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert_eq!(c.tl, Point2D::new(0.0, 0.0));
        assert_eq!(c.tr, Point2D::new(1.0, 0.0));
        assert_eq!(c.br, Point2D::new(1.0, 1.0));
        assert_eq!(c.bl, Point2D::new(0.0, 1.0));
        assert_eq!(Corners::from(c.points()), c);
        assert_eq!(c.to_array(), [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_identity() {
        let m = Matrix3x3::IDENTITY;
        assert!(m.is_identity());
        assert!(m.is_finite());
        assert_eq!(Matrix3x3::default(), m);
        assert_eq!(m.as_array(), [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Matrix3x3::from_rows(m.to_rows()), m);
    }

    #[test]
    fn test_transform_point_perspective() {
        let m = Matrix3x3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 1.0]]);
        assert_eq!(m.transform_point(Point2D::new(1.0, 2.0)), Some(Point2D::new(0.5, 1.0)));
        // the line x = -1 is sent to infinity
        assert_eq!(m.transform_point(Point2D::new(-1.0, 2.0)), None);
    }

    #[test]
    fn test_mul_identity() {
        let m = Matrix3x3::from_rows([[2.0, 0.5, 1.0], [0.0, 3.0, -1.0], [0.1, 0.2, 1.0]]);
        assert_eq!(m.mul(&Matrix3x3::IDENTITY), m);
        assert_eq!(Matrix3x3::IDENTITY.mul(&m), m);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point2D::new(1.0, -2.0).is_finite());
        assert!(!Point2D::new(f64::NAN, 0.0).is_finite());
        assert!(!Point2D::new(0.0, f64::NEG_INFINITY).is_finite());
    }
}
