// Inversion settings for IntSar-xform

/// Knobs for the fallible inverse entry points and the 4x4 dispatcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseConfig {
    /// `|det| <= singular_epsilon` is reported as a singular matrix.
    pub singular_epsilon: f32,
    /// Take the affine block path when the bottom row is `(0, 0, 0, w)`.
    pub affine_fast_path: bool,
}

impl InverseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_singular_epsilon(mut self, epsilon: f32) -> Self {
        self.singular_epsilon = epsilon.abs();
        self
    }

    pub fn with_affine_fast_path(mut self, enabled: bool) -> Self {
        self.affine_fast_path = enabled;
        self
    }

    /// Whether a determinant is too small to divide by.
    ///
    /// A non-finite determinant is rejected too: it means the entries are so
    /// large that the cofactor products overflowed, and `1 / det` would zero
    /// the whole inverse.
    #[inline]
    pub fn is_singular(&self, determinant: f32) -> bool {
        !determinant.is_finite() || determinant.abs() <= self.singular_epsilon
    }
}

impl Default for InverseConfig {
    fn default() -> Self {
        Self {
            singular_epsilon: f32::MIN_POSITIVE,
            affine_fast_path: true,
        }
    }
}
