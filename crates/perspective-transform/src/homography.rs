use crate::{
    error::HomographyError,
    linalg::{LinearSystem8x8, N},
    normalize::normalize_corners,
    params::HomographyParams,
    types::{Corners, Matrix3x3, Point2D},
};

/// A (source, destination) pair of points.
type Correspondence = (Point2D, Point2D);

/// Compute the homography mapping four source corners onto four destination corners.
///
/// Uses [`HomographyParams::default`]. See [`compute_homography_with_params`].
///
/// * `src` - The source corners in {tl, tr, br, bl} order.
/// * `dst` - The destination corners in the same order.
///
/// # Returns
///
/// The 3x3 matrix `H` with `dst ~ H * src` in homogeneous coordinates and
/// `H[2][2] == 1.0`, or [`Matrix3x3::IDENTITY`] if it cannot be estimated.
///
/// Example:
///
/// ```
/// use perspective_transform::{compute_homography, Corners, Matrix3x3};
///
/// let src = Corners::from_array([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
/// let dst = Corners::from_array([[5.0, 3.0], [6.0, 3.0], [6.0, 4.0], [5.0, 4.0]]);
/// let h = compute_homography(Some(&src), Some(&dst));
/// assert!((h.m02 - 5.0).abs() < 1e-9);
/// assert!((h.m12 - 3.0).abs() < 1e-9);
///
/// // collinear corners cannot be mapped
/// let line = Corners::from_array([[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
/// assert_eq!(compute_homography(Some(&line), Some(&dst)), Matrix3x3::IDENTITY);
/// ```
pub fn compute_homography(src: Option<&Corners>, dst: Option<&Corners>) -> Matrix3x3 {
    compute_homography_with_params(src, dst, &HomographyParams::default())
}

/// Compute the homography mapping four source corners onto four destination corners.
///
/// The eight unknowns `[m00, m01, m02, m10, m11, m12, m20, m21]` are found by solving
/// the linear system implied by the four correspondences, with `m22` fixed to 1.
///
/// The function never fails. Missing corners, NaN or infinite coordinates, singular
/// systems (e.g. collinear corners) and solutions with a coefficient larger than
/// [`HomographyParams::max_coefficient`] all yield [`Matrix3x3::IDENTITY`]. The reason
/// is logged at `warn` level.
///
/// * `src` - The source corners in {tl, tr, br, bl} order.
/// * `dst` - The destination corners in the same order.
/// * `params` - Tolerances and the optional normalization pre-pass.
pub fn compute_homography_with_params(
    src: Option<&Corners>,
    dst: Option<&Corners>,
    params: &HomographyParams,
) -> Matrix3x3 {
    match try_compute_homography(src, dst, params) {
        Ok(homo) => homo,
        Err(err) => {
            log::warn!("failed to compute homography, returning identity: {err}");
            Matrix3x3::IDENTITY
        }
    }
}

pub(crate) fn try_compute_homography(
    src: Option<&Corners>,
    dst: Option<&Corners>,
    params: &HomographyParams,
) -> Result<Matrix3x3, HomographyError> {
    let (Some(src), Some(dst)) = (src, dst) else {
        return Err(HomographyError::NullInput);
    };

    log::debug!("computing homography from src {src:?} to dst {dst:?}");

    let has_nan = src
        .points()
        .iter()
        .chain(dst.points().iter())
        .any(|p| p.x.is_nan() || p.y.is_nan());
    if has_nan {
        return Err(HomographyError::InvalidCoordinate { kind: "NaN" });
    }

    let pairs = correspondences(src, dst)?;

    let homo = if params.normalize {
        solve_normalized(src, dst, params)?
    } else {
        solve_direct(&pairs, params)?
    };

    log::debug!("result matrix: {:?}", homo.to_rows());

    Ok(homo)
}

/// Pair up the corners, rejecting infinite coordinates.
fn correspondences(src: &Corners, dst: &Corners) -> Result<[Correspondence; 4], HomographyError> {
    let mut pairs = [(Point2D::default(), Point2D::default()); 4];
    for (pair, (s, d)) in pairs
        .iter_mut()
        .zip(src.points().into_iter().zip(dst.points()))
    {
        if s.x.is_infinite() || s.y.is_infinite() || d.x.is_infinite() || d.y.is_infinite() {
            return Err(HomographyError::InvalidCoordinate { kind: "Inf" });
        }
        *pair = (s, d);
    }
    Ok(pairs)
}

/// Build the 8x8 system for the unknowns `[m00, m01, m02, m10, m11, m12, m20, m21]`.
///
/// Correspondence `i` contributes the x equation in row `i` and the y equation in
/// row `i + 4`.
fn build_system(pairs: &[Correspondence; 4]) -> LinearSystem8x8 {
    let mut system = LinearSystem8x8::zeros();
    for (i, (s, d)) in pairs.iter().enumerate() {
        let (sx, sy) = (s.x, s.y);
        let (dx, dy) = (d.x, d.y);

        system.a[i] = [sx, sy, 1.0, 0.0, 0.0, 0.0, -sx * dx, -sy * dx];
        system.b[i] = dx;

        system.a[i + 4] = [0.0, 0.0, 0.0, sx, sy, 1.0, -sx * dy, -sy * dy];
        system.b[i + 4] = dy;
    }
    system
}

fn solve_direct(
    pairs: &[Correspondence; 4],
    params: &HomographyParams,
) -> Result<Matrix3x3, HomographyError> {
    let system = build_system(pairs);
    log::debug!("linear system A: {:?}, b: {:?}", system.a, system.b);

    let x = system.solve(params.singular_eps)?;
    log::debug!("solution: {x:?}");

    check_coefficients(&x, params.max_coefficient)?;
    assemble(&x)
}

/// Solve between the normalized corner sets and map the result back.
fn solve_normalized(
    src: &Corners,
    dst: &Corners,
    params: &HomographyParams,
) -> Result<Matrix3x3, HomographyError> {
    let (src_norm, t_src) = normalize_corners(src);
    let (dst_norm, t_dst) = normalize_corners(dst);
    log::debug!("normalized src with {t_src:?}, dst with {t_dst:?}");

    let homo_norm = solve_direct(&correspondences(&src_norm, &dst_norm)?, params)?;

    // H = T_dst^-1 * H_norm * T_src
    let homo = t_dst
        .inverse_matrix()
        .mul(&homo_norm)
        .mul(&t_src.to_matrix());

    if !homo.m22.is_finite() || homo.m22.abs() < params.singular_eps {
        return Err(HomographyError::InvalidResultMatrix);
    }

    let rows = homo.to_rows();
    let mut x = [0.0; N];
    for (i, x_i) in x.iter_mut().enumerate() {
        *x_i = rows[i / 3][i % 3] / homo.m22;
    }

    check_coefficients(&x, params.max_coefficient)?;
    assemble(&x)
}

/// Reject non-finite solutions and coefficients above `bound` in magnitude.
fn check_coefficients(x: &[f64; N], bound: f64) -> Result<(), HomographyError> {
    for (index, &value) in x.iter().enumerate() {
        if !value.is_finite() {
            return Err(HomographyError::InvalidSolution { index });
        }
        if value.abs() > bound {
            return Err(HomographyError::DegenerateSolution {
                index,
                value,
                bound,
            });
        }
    }
    Ok(())
}

/// Assemble the matrix with `m22 = 1`.
fn assemble(x: &[f64; N]) -> Result<Matrix3x3, HomographyError> {
    let homo = Matrix3x3::from_rows([[x[0], x[1], x[2]], [x[3], x[4], x[5]], [x[6], x[7], 1.0]]);
    if !homo.is_finite() {
        return Err(HomographyError::InvalidResultMatrix);
    }
    Ok(homo)
}
