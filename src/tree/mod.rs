//! C4.5-style decision tree classification.
//!
//! This module implements:
//! - Entropy and gain-ratio metrics ([`metrics`])
//! - The node arena a trained tree lives in ([`node`])
//! - Exhaustive threshold search over every observed feature value ([`split`])
//! - Greedy top-down induction with an explicit work stack ([`builder`])
//!
//! # Example
//!
//! ```
//! use c45tree::prelude::*;
//!
//! let x = Matrix::from_rows(&[
//!     vec![0.0, 1.0],
//!     vec![0.0, 0.0],
//!     vec![1.0, 1.0],
//!     vec![2.0, 0.0],
//! ]).expect("rows have equal length");
//! let y = vec![0, 0, 1, 1];
//!
//! let mut clf = C45Classifier::new()
//!     .with_min_samples_split(2)
//!     .with_max_depth(5);
//! clf.fit(&x, &y).expect("fit should succeed");
//!
//! assert_eq!(clf.predict(&x).expect("model is fitted"), vec![0, 0, 1, 1]);
//! ```

pub mod builder;
pub mod metrics;
pub mod node;
pub mod split;

pub use builder::{TreeBuilder, DEFAULT_MAX_DEPTH, DEFAULT_MIN_SAMPLES_SPLIT};
pub use node::{InternalNode, Leaf, NodeId, Tree, TreeNode};
pub use split::{find_best_split, SplitCandidate};

use crate::error::{Result, TreeError};
use crate::primitives::Matrix;
use tracing::info;

/// Decision tree classifier using the C4.5 gain-ratio criterion.
///
/// Binary `<=` threshold splits on numeric features, grown greedily until a
/// node is pure, too small, too deep, or has no informative split.
#[derive(Debug, Clone)]
pub struct C45Classifier {
    tree: Option<Tree>,
    min_samples_split: usize,
    max_depth: usize,
    random_state: Option<u64>,
    /// Number of features the model was trained on (for validation)
    n_features: Option<usize>,
}

impl C45Classifier {
    /// Creates a new classifier with default parameters
    /// (`min_samples_split = 2`, `max_depth = 100`, deterministic feature order).
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            max_depth: DEFAULT_MAX_DEPTH,
            random_state: None,
            n_features: None,
        }
    }

    /// Sets the minimum number of samples a node needs before it may split.
    ///
    /// Values of 0 and 1 both mean "always try to split".
    #[must_use]
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples;
        self
    }

    /// Sets the maximum depth of the tree.
    ///
    /// # Arguments
    ///
    /// * `depth` - Maximum depth (root has depth 0, so 0 gives a single leaf)
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Shuffles the feature visiting order at every node with a seeded RNG.
    ///
    /// Without a seed, features are visited in ascending index order, so ties
    /// between equally good splits go to the lowest feature index. With a seed,
    /// ties are broken randomly but reproducibly.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Minimum samples required to split a node.
    #[must_use]
    pub fn min_samples_split(&self) -> usize {
        self.min_samples_split
    }

    /// Maximum tree depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns true once `fit` has succeeded.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.tree.is_some()
    }

    /// The trained tree, for inspection and export.
    #[must_use]
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// Fits the decision tree to training data, replacing any previous tree.
    ///
    /// # Arguments
    ///
    /// * `x` - Training features (n_samples × n_features)
    /// * `y` - Training labels (n_samples class labels)
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidInput`] if `x` has no rows or no columns,
    /// if `y` has a different length, or if a feature value is not finite.
    /// The previously trained tree is kept when validation fails.
    pub fn fit(&mut self, x: &Matrix<f64>, y: &[usize]) -> Result<()> {
        let (n_rows, n_cols) = x.shape();
        if n_rows == 0 {
            return Err(TreeError::invalid_input("cannot fit with zero samples"));
        }
        if n_cols == 0 {
            return Err(TreeError::invalid_input("cannot fit with zero features"));
        }
        if n_rows != y.len() {
            return Err(TreeError::dimension_mismatch("labels", n_rows, y.len()));
        }
        if let Some(pos) = x.as_slice().iter().position(|v| !v.is_finite()) {
            return Err(TreeError::invalid_input(format!(
                "non-finite feature value at row {}, column {}",
                pos / n_cols,
                pos % n_cols
            )));
        }

        info!(
            n_samples = n_rows,
            n_features = n_cols,
            min_samples_split = self.min_samples_split,
            max_depth = self.max_depth,
            "training started"
        );

        let tree = TreeBuilder::new(self.min_samples_split, self.max_depth, self.random_state)
            .build(x, y);

        info!(
            n_nodes = tree.n_nodes(),
            n_leaves = tree.n_leaves(),
            depth = tree.depth(),
            "training completed"
        );

        self.n_features = Some(n_cols);
        self.tree = Some(tree);
        Ok(())
    }

    fn fitted_tree(&self) -> Result<(&Tree, usize)> {
        match (&self.tree, self.n_features) {
            (Some(tree), Some(n_features)) => Ok((tree, n_features)),
            _ => Err(TreeError::ModelNotTrained),
        }
    }

    /// Predicts class labels for samples, one per row, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::ModelNotTrained`] before `fit`, and
    /// [`TreeError::InvalidInput`] if the column count differs from training.
    pub fn predict(&self, x: &Matrix<f64>) -> Result<Vec<usize>> {
        let (tree, n_features) = self.fitted_tree()?;
        if x.n_cols() != n_features {
            return Err(TreeError::dimension_mismatch(
                "n_features",
                n_features,
                x.n_cols(),
            ));
        }
        Ok(x.rows().map(|row| tree.predict_row(row)).collect())
    }

    /// Predicts the class label for a single sample.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::ModelNotTrained`] before `fit`, and
    /// [`TreeError::InvalidInput`] if the sample length differs from training.
    pub fn predict_one(&self, sample: &[f64]) -> Result<usize> {
        let (tree, n_features) = self.fitted_tree()?;
        if sample.len() != n_features {
            return Err(TreeError::dimension_mismatch(
                "n_features",
                n_features,
                sample.len(),
            ));
        }
        Ok(tree.predict_row(sample))
    }

    /// Computes the accuracy score on test data.
    ///
    /// # Returns
    ///
    /// Fraction of correct predictions
    ///
    /// # Errors
    ///
    /// Returns the errors of [`predict`](Self::predict), and
    /// [`TreeError::InvalidInput`] if `y` is empty or its length differs from
    /// the row count.
    pub fn score(&self, x: &Matrix<f64>, y: &[usize]) -> Result<f64> {
        let predictions = self.predict(x)?;
        if y.is_empty() {
            return Err(TreeError::invalid_input("cannot score zero samples"));
        }
        if predictions.len() != y.len() {
            return Err(TreeError::dimension_mismatch(
                "labels",
                predictions.len(),
                y.len(),
            ));
        }
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(pred, true_label)| pred == true_label)
            .count();
        Ok(correct as f64 / y.len() as f64)
    }
}

impl Default for C45Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
