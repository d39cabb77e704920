//! 2-opt configuration.

/// Configuration shared by [`TwoOpt`](super::TwoOpt) and
/// [`GuidedTwoOpt`](super::GuidedTwoOpt).
///
/// # Examples
///
/// ```
/// use u_tsp::local::TwoOptConfig;
///
/// let config = TwoOptConfig::default().with_max_passes(50);
/// assert!(config.closing_edge);
/// assert_eq!(config.max_passes, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptConfig {
    /// Whether the full pairwise scan may use the closing edge
    /// `(N-1, 0)` as its second cut.
    ///
    /// With `false` the second cut point stops at `N-2`, which never
    /// removes the closing edge and can leave some crossings in place.
    /// Only affects [`TwoOpt`](super::TwoOpt).
    pub closing_edge: bool,

    /// Maximum number of scans over the tour. `0` means run until no
    /// improving move remains (or until cancelled).
    pub max_passes: usize,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            closing_edge: true,
            max_passes: 0,
        }
    }
}

impl TwoOptConfig {
    /// Enables or disables the closing edge as a second cut.
    pub fn with_closing_edge(mut self, enabled: bool) -> Self {
        self.closing_edge = enabled;
        self
    }

    /// Sets the scan limit (0 for unbounded).
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    pub(crate) fn pass_limit_reached(&self, passes: usize) -> bool {
        self.max_passes > 0 && passes >= self.max_passes
    }
}
