use crate::data::{Label, LabeledPoint};
use serde::{Deserialize, Serialize};

/// The split committed for a node.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SplitInfo {
    /// Feature index the node tests.
    pub attribute: usize,
    /// Points with `x[attribute] < threshold` go left.
    pub threshold: f64,
    /// Weighted average entropy the candidate scored during the search.
    pub avg_entropy: f64,
    /// Position in the subset the threshold was taken from.
    pub position: usize,
}

/// Count of points carrying label `0` and label `1`.
pub fn label_counts(subset: &[&LabeledPoint]) -> [usize; 2] {
    let mut counts = [0_usize; 2];
    for p in subset {
        counts[usize::from(p.y())] += 1;
    }
    counts
}

/// Entropy, in bits, of a two label population.
/// Empty populations have zero entropy.
pub fn entropy_from_counts(counts: [usize; 2]) -> f64 {
    let n = counts[0] + counts[1];
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    counts
        .iter()
        .filter(|c| **c > 0)
        .map(|c| {
            let p = *c as f64 / n;
            -p * p.log2()
        })
        .sum()
}

/// Entropy, in bits, of the labels of a subset.
pub fn entropy(subset: &[&LabeledPoint]) -> f64 {
    entropy_from_counts(label_counts(subset))
}

/// The label held by most points, ties go to the smaller label.
pub fn majority_vote(subset: &[&LabeledPoint]) -> Label {
    let votes = label_counts(subset);
    if votes[0] >= votes[1] {
        0
    } else {
        1
    }
}

/// The shared label when every point in the subset carries the same one.
pub fn pure_label(subset: &[&LabeledPoint]) -> Option<Label> {
    let first = subset.first()?.y();
    if subset.iter().all(|p| p.y() == first) {
        Some(first)
    } else {
        None
    }
}

/// Weighted average entropy of cutting the subset after each position.
///
/// Entry `j` scores the partition that puts points `0..=j` on the left and
/// the rest on the right, in the order of the subset. The score only depends
/// on the position, so it is shared by every feature.
pub fn positional_scores(subset: &[&LabeledPoint]) -> Vec<f64> {
    let n = subset.len();
    let total = label_counts(subset);
    let mut left = [0_usize; 2];
    let mut scores = Vec::with_capacity(n);
    for p in subset {
        left[usize::from(p.y())] += 1;
        let right = [total[0] - left[0], total[1] - left[1]];
        let n_left = (left[0] + left[1]) as f64;
        let n_right = (right[0] + right[1]) as f64;
        let avg = (n_left * entropy_from_counts(left) + n_right * entropy_from_counts(right)) / n as f64;
        scores.push(avg);
    }
    scores
}

/// Search every feature and every candidate threshold for the split with
/// the lowest weighted average entropy.
///
/// Candidates are visited feature by feature, and by position within a
/// feature. The first candidate reaching the minimum wins. A candidate whose
/// threshold is the smallest value of its feature would send no point left
/// and is skipped. Returns `None` when no candidate separates the subset.
pub fn find_best_split(subset: &[&LabeledPoint], n_features: usize) -> Option<SplitInfo> {
    let scores = positional_scores(subset);
    let mut best: Option<SplitInfo> = None;
    for attribute in 0..n_features {
        let min_value = subset.iter().map(|p| p.x()[attribute]).fold(f64::INFINITY, f64::min);
        for (position, (p, avg_entropy)) in subset.iter().zip(scores.iter()).enumerate() {
            let threshold = p.x()[attribute];
            if threshold <= min_value {
                continue;
            }
            if best.map_or(true, |b| *avg_entropy < b.avg_entropy) {
                best = Some(SplitInfo {
                    attribute,
                    threshold,
                    avg_entropy: *avg_entropy,
                    position,
                });
            }
        }
    }
    best
}

/// Partition a subset on `x[attribute] < threshold`, keeping the order of the points.
pub fn split_subset<'a>(
    subset: &[&'a LabeledPoint],
    attribute: usize,
    threshold: f64,
) -> (Vec<&'a LabeledPoint>, Vec<&'a LabeledPoint>) {
    subset.iter().partition(|p| p.x()[attribute] < threshold)
}
