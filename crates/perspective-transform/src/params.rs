/// Tolerances and options for [`crate::compute_homography_with_params`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HomographyParams {
    /// Absolute threshold below which a pivot is treated as zero.
    pub singular_eps: f64,
    /// Largest magnitude accepted for any of the eight free matrix entries.
    pub max_coefficient: f64,
    /// Center and isotropically scale both corner sets before solving.
    ///
    /// Improves conditioning for coordinates of large magnitude. Off by default.
    pub normalize: bool,
}

impl Default for HomographyParams {
    fn default() -> Self {
        Self {
            singular_eps: 1e-10,
            max_coefficient: 1e6,
            normalize: false,
        }
    }
}
