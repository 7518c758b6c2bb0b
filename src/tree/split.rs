//! Exhaustive best-split search.
//!
//! Every distinct value observed in a feature column is tried as a `<=`
//! threshold; the (feature, threshold) pair with the highest gain ratio wins.

use super::metrics::gain_ratio;
use crate::primitives::Matrix;

/// The winning split of one search: where to cut and which rows go where.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitCandidate {
    /// Feature (column) the split tests
    pub feature_idx: usize,
    /// Rows with `x[feature_idx] <= threshold` go left
    pub threshold: f64,
    /// Row indices sent left, in input order
    pub left: Vec<usize>,
    /// Row indices sent right, in input order
    pub right: Vec<usize>,
    /// Gain ratio of this split
    pub gain_ratio: f64,
}

/// Distinct values of one feature over `rows`, ascending.
fn sorted_unique_values(x: &Matrix<f64>, rows: &[usize], feature_idx: usize) -> Vec<f64> {
    let mut values: Vec<f64> = rows.iter().map(|&r| x.get(r, feature_idx)).collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// Splits `rows` by `x[row, feature_idx] <= threshold`.
///
/// Returns `None` when either side would be empty.
fn partition_by_threshold(
    x: &Matrix<f64>,
    rows: &[usize],
    feature_idx: usize,
    threshold: f64,
) -> Option<(Vec<usize>, Vec<usize>)> {
    let (left, right): (Vec<usize>, Vec<usize>) = rows
        .iter()
        .partition(|&&r| x.get(r, feature_idx) <= threshold);

    if left.is_empty() || right.is_empty() {
        None
    } else {
        Some((left, right))
    }
}

fn gather_labels(y: &[usize], rows: &[usize]) -> Vec<usize> {
    rows.iter().map(|&r| y[r]).collect()
}

/// Finds the split of `rows` with the highest gain ratio.
///
/// Features are visited in the order given by `features`, thresholds in
/// ascending order, and a candidate replaces the current best only if its
/// gain ratio is strictly greater. Ties therefore go to the first candidate
/// visited. The returned split may have a gain ratio of zero; deciding
/// whether it is worth taking is up to the caller.
///
/// Returns `None` if no feature separates `rows` into two nonempty sides,
/// for instance when every feature is constant over `rows`.
///
/// # Panics
///
/// Panics if a row or feature index is out of bounds, or if `y` is shorter
/// than a row index.
#[must_use]
pub fn find_best_split(
    x: &Matrix<f64>,
    y: &[usize],
    rows: &[usize],
    features: &[usize],
) -> Option<SplitCandidate> {
    let parent_labels = gather_labels(y, rows);
    let mut best: Option<SplitCandidate> = None;
    let mut best_gain = -1.0;

    for &feature_idx in features {
        for threshold in sorted_unique_values(x, rows, feature_idx) {
            let Some((left, right)) = partition_by_threshold(x, rows, feature_idx, threshold)
            else {
                continue;
            };

            let left_labels = gather_labels(y, &left);
            let right_labels = gather_labels(y, &right);
            let gain = gain_ratio(&parent_labels, &[&left_labels, &right_labels]);

            if gain > best_gain {
                best_gain = gain;
                best = Some(SplitCandidate {
                    feature_idx,
                    threshold,
                    left,
                    right,
                    gain_ratio: gain,
                });
            }
        }
    }

    best
}
