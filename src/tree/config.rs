//! Configuration types for tree walkers

/// Configuration for tree walking behavior.
///
/// Both limits default to `None` (unbounded). With `Some(n)`, entries past
/// the n-th are dropped without interrupting the walk.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Maximum number of distinct extension labels kept in the statistics
    pub max_extensions: Option<usize>,
    /// Maximum number of inaccessible paths kept in the statistics
    pub max_inaccessible: Option<usize>,
}
