//! Impurity metrics for the gain-ratio splitting criterion.
//!
//! All functions are pure and operate on class-label slices.

use std::collections::BTreeMap;

/// Stabilizer added inside every logarithm so `log2(0)` is never evaluated.
pub const LOG_EPSILON: f64 = 1e-9;

/// Information gains at or below this are rounding noise and count as zero.
pub const GAIN_TOLERANCE: f64 = 1e-12;

/// Counts occurrences of each label, keyed in ascending label order.
#[must_use]
pub fn label_counts(labels: &[usize]) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Shannon entropy (in bits) of a label distribution.
///
/// Computes `-Σ p·log2(p + ε)` over the empirical class probabilities.
/// Returns exactly 0.0 for an empty slice or a single-class slice.
///
/// # Examples
///
/// ```
/// use c45tree::tree::metrics::entropy;
///
/// assert_eq!(entropy(&[1, 1, 1]), 0.0);
/// assert!((entropy(&[0, 0, 1, 1]) - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn entropy(labels: &[usize]) -> f64 {
    let counts = label_counts(labels);
    if counts.len() <= 1 {
        return 0.0;
    }

    let n = labels.len() as f64;
    -counts
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            p * (p + LOG_EPSILON).log2()
        })
        .sum::<f64>()
}

/// Gain ratio of splitting `parent` into `children`.
///
/// Information gain (parent entropy minus size-weighted child entropy)
/// normalized by the split info `-Σ w·log2(w + ε)`, where `w` is each
/// child's share of the parent.
///
/// Returns exactly 0.0 when the split is degenerate (an empty parent, fewer
/// than two nonempty children, or a nonpositive split info) and when the
/// information gain does not exceed [`GAIN_TOLERANCE`].
///
/// # Examples
///
/// ```
/// use c45tree::tree::metrics::gain_ratio;
///
/// let parent = [0, 0, 1, 1];
/// let gr = gain_ratio(&parent, &[&[0, 0], &[1, 1]]);
/// assert!((gr - 1.0).abs() < 1e-6);
///
/// assert_eq!(gain_ratio(&parent, &[&parent]), 0.0);
/// ```
#[must_use]
pub fn gain_ratio(parent: &[usize], children: &[&[usize]]) -> f64 {
    let n_parent = parent.len();
    let nonempty = children.iter().filter(|c| !c.is_empty()).count();
    if n_parent == 0 || nonempty < 2 {
        return 0.0;
    }

    let parent_entropy = entropy(parent);
    let mut weighted_child_entropy = 0.0;
    let mut split_info = 0.0;

    for child in children {
        let weight = child.len() as f64 / n_parent as f64;
        weighted_child_entropy += weight * entropy(child);
        split_info -= weight * (weight + LOG_EPSILON).log2();
    }

    let gain = parent_entropy - weighted_child_entropy;
    if gain <= GAIN_TOLERANCE || split_info <= 0.0 {
        return 0.0;
    }

    gain / split_info
}

/// Most frequent label, ties broken by the smallest label value.
///
/// Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use c45tree::tree::metrics::majority_label;
///
/// assert_eq!(majority_label(&[0, 0, 0, 1, 1]), Some(0));
/// assert_eq!(majority_label(&[7, 3, 7, 3]), Some(3));
/// ```
#[must_use]
pub fn majority_label(labels: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    // ascending key order plus strict > keeps the smallest label on ties
    for (label, count) in label_counts(labels) {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}
