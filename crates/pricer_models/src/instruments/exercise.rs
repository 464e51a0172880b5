//! Option exercise style definitions.

/// Option exercise style.
///
/// Selects whether the lattice engine applies the early-exercise maximum at
/// every node during backward induction.
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseStyle;
///
/// assert!(ExerciseStyle::American.allows_early_exercise());
/// assert!(!ExerciseStyle::European.allows_early_exercise());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// Exercise only at expiry.
    #[default]
    European,
    /// Exercise at any node up to and including expiry.
    American,
}

impl ExerciseStyle {
    /// Returns whether this style permits exercise before expiry.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Returns whether this is a European exercise style.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }
}

impl std::fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "European"),
            ExerciseStyle::American => write!(f, "American"),
        }
    }
}
