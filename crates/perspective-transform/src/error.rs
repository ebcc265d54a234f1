use thiserror::Error;

/// Reasons the estimation falls back to the identity transform.
///
/// None of these reach the caller of the public entry points; they are logged and
/// replaced by [`crate::Matrix3x3::IDENTITY`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub(crate) enum HomographyError {
    /// One or both corner sets are absent.
    #[error("source or destination corners are missing")]
    NullInput,

    /// A coordinate is NaN or infinite.
    #[error("invalid coordinate ({kind}) in the input corners")]
    InvalidCoordinate {
        /// Either "NaN" or "Inf".
        kind: &'static str,
    },

    /// No usable pivot was found in a column during elimination.
    #[error("matrix is nearly singular: pivot {value:e} in column {column} is below {eps:e}")]
    SingularMatrix {
        /// Pivot column.
        column: usize,
        /// Largest absolute value found in the column.
        value: f64,
        /// Threshold the pivot was compared against.
        eps: f64,
    },

    /// A pivot vanished during back-substitution.
    #[error("zero pivot encountered in row {row}")]
    ZeroPivot {
        /// Row of the vanished pivot.
        row: usize,
    },

    /// A solved unknown is NaN or infinite.
    #[error("solution entry {index} is not finite")]
    InvalidSolution {
        /// Index into the solution vector.
        index: usize,
    },

    /// A solved unknown exceeds the magnitude bound.
    #[error("solution entry {index} = {value:e} exceeds the bound {bound:e}")]
    DegenerateSolution {
        /// Index into the solution vector.
        index: usize,
        /// The offending value.
        value: f64,
        /// The configured magnitude bound.
        bound: f64,
    },

    /// The assembled matrix contains a non-finite entry.
    #[error("result matrix contains non-finite values")]
    InvalidResultMatrix,
}
