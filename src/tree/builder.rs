//! Top-down greedy tree induction.
//!
//! Nodes are grown from an explicit work stack rather than by recursion, so
//! the native call stack stays flat whatever `max_depth` is configured.

use super::metrics::majority_label;
use super::node::{NodeId, Tree};
use super::split::find_best_split;
use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, trace};

/// Default minimum number of samples a node needs before a split is tried.
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;

/// Default hard ceiling on tree depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// A node waiting to be resolved into a leaf or a split.
struct Pending {
    node: NodeId,
    rows: Vec<usize>,
    depth: usize,
}

/// Grows a [`Tree`] from a sample matrix and its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeBuilder {
    min_samples_split: usize,
    max_depth: usize,
    random_state: Option<u64>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            max_depth: DEFAULT_MAX_DEPTH,
            random_state: None,
        }
    }
}

impl TreeBuilder {
    /// Creates a builder with the given stopping parameters and an optional
    /// seed for the feature visiting order.
    #[must_use]
    pub fn new(min_samples_split: usize, max_depth: usize, random_state: Option<u64>) -> Self {
        Self {
            min_samples_split,
            max_depth,
            random_state,
        }
    }

    /// Builds a tree over every row of `x`.
    ///
    /// Callers validate the input: `x` must have at least one row, `y` one
    /// label per row, and every feature value must be comparable.
    ///
    /// # Panics
    ///
    /// Panics if `y` is shorter than the number of rows of `x`.
    #[must_use]
    pub fn build(&self, x: &Matrix<f64>, y: &[usize]) -> Tree {
        let n_features = x.n_cols();
        let mut rng = self.random_state.map(StdRng::seed_from_u64);
        let mut tree = Tree::with_root();
        let mut stack = vec![Pending {
            node: tree.root(),
            rows: (0..x.n_rows()).collect(),
            depth: 0,
        }];

        while let Some(Pending { node, rows, depth }) = stack.pop() {
            let labels: Vec<usize> = rows.iter().map(|&r| y[r]).collect();
            // rows is never empty: the root has every row and splits are two-sided
            let majority = majority_label(&labels).unwrap_or_default();

            if let Some(reason) = self.stop_reason(&labels, depth) {
                trace!(node, depth, n_samples = rows.len(), reason, "leaf");
                tree.make_leaf(node, majority, rows.len());
                continue;
            }

            let mut features: Vec<usize> = (0..n_features).collect();
            if let Some(rng) = rng.as_mut() {
                features.shuffle(rng);
            }

            let split = match find_best_split(x, y, &rows, &features) {
                Some(split) if split.gain_ratio > 0.0 => split,
                _ => {
                    trace!(node, depth, n_samples = rows.len(), "leaf: no informative split");
                    tree.make_leaf(node, majority, rows.len());
                    continue;
                }
            };

            debug!(
                node,
                depth,
                feature = split.feature_idx,
                threshold = split.threshold,
                gain_ratio = split.gain_ratio,
                n_left = split.left.len(),
                n_right = split.right.len(),
                "split"
            );

            let (left, right) = tree.apply_split(
                node,
                split.feature_idx,
                split.threshold,
                rows.len(),
                split.gain_ratio,
            );
            // right first so the left subtree is resolved first
            stack.push(Pending {
                node: right,
                rows: split.right,
                depth: depth + 1,
            });
            stack.push(Pending {
                node: left,
                rows: split.left,
                depth: depth + 1,
            });
        }

        tree
    }

    fn stop_reason(&self, labels: &[usize], depth: usize) -> Option<&'static str> {
        if labels.windows(2).all(|w| w[0] == w[1]) {
            Some("pure")
        } else if depth >= self.max_depth {
            Some("max depth")
        } else if labels.len() < self.min_samples_split {
            Some("too few samples")
        } else {
            None
        }
    }
}
