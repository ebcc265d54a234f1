//! Dense 8x8 linear solver.
//!
//! Gaussian elimination with partial pivoting followed by back-substitution, on
//! fixed-size stack buffers.

use crate::error::HomographyError;

/// Number of unknowns.
pub(crate) const N: usize = 8;

/// Augmented matrix `[A | b]`.
type Augmented = [[f64; N + 1]; N];

/// A square system `A x = b` with eight unknowns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LinearSystem8x8 {
    pub a: [[f64; N]; N],
    pub b: [f64; N],
}

impl LinearSystem8x8 {
    pub fn zeros() -> Self {
        Self {
            a: [[0.0; N]; N],
            b: [0.0; N],
        }
    }

    /// Solve the system, treating pivots with magnitude below `eps` as zero.
    pub fn solve(&self, eps: f64) -> Result<[f64; N], HomographyError> {
        solve_8x8(&self.a, &self.b, eps)
    }
}

/// Solve `A x = b` with Gaussian elimination and partial pivoting.
///
/// * `a` - The coefficient matrix with shape (8, 8).
/// * `b` - The right-hand side with shape (8,).
/// * `eps` - Absolute threshold below which a pivot is considered zero.
///
/// # Returns
///
/// The solution vector, or the reason the system could not be solved.
pub(crate) fn solve_8x8(
    a: &[[f64; N]; N],
    b: &[f64; N],
    eps: f64,
) -> Result<[f64; N], HomographyError> {
    let mut aug: Augmented = [[0.0; N + 1]; N];
    for (row, (a_row, b_i)) in aug.iter_mut().zip(a.iter().zip(b.iter())) {
        row[..N].copy_from_slice(a_row);
        row[N] = *b_i;
    }

    eliminate(&mut aug, eps)?;
    back_substitute(&aug, eps)
}

/// Reduce the augmented matrix to upper triangular form in place.
fn eliminate(aug: &mut Augmented, eps: f64) -> Result<(), HomographyError> {
    for i in 0..N {
        // find the pivot, first maximum wins
        let mut max_row = i;
        let mut max_val = aug[i][i].abs();
        for k in (i + 1)..N {
            let val = aug[k][i].abs();
            if val > max_val {
                max_val = val;
                max_row = k;
            }
        }

        if max_val.is_nan() || max_val < eps {
            return Err(HomographyError::SingularMatrix {
                column: i,
                value: max_val,
                eps,
            });
        }

        if max_row != i {
            aug.swap(i, max_row);
        }
        log::trace!("pivot column {i}: row {max_row}, |pivot| = {max_val:e}");

        let pivot_row = aug[i];
        for row in aug.iter_mut().skip(i + 1) {
            let factor = row[i] / pivot_row[i];
            for (val, pivot_val) in row.iter_mut().zip(pivot_row.iter()).skip(i) {
                *val -= factor * pivot_val;
            }
        }
    }

    Ok(())
}

/// Solve an upper triangular augmented system from the last row up.
fn back_substitute(aug: &Augmented, eps: f64) -> Result<[f64; N], HomographyError> {
    let mut x = [0.0; N];
    for i in (0..N).rev() {
        let pivot = aug[i][i];
        if pivot.is_nan() || pivot.abs() < eps {
            return Err(HomographyError::ZeroPivot { row: i });
        }

        let rhs = ((i + 1)..N).fold(aug[i][N], |acc, j| acc - aug[i][j] * x[j]);
        x[i] = rhs / pivot;

        if !x[i].is_finite() {
            return Err(HomographyError::InvalidSolution { index: i });
        }
    }
    Ok(x)
}
