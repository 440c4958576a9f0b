use crate::config::TreeIO;
use crate::constants::PERFORMANCE_DECIMALS;
use crate::data::{validate_dataset, Label, LabeledPoint, Matrix};
use crate::errors::DecisionTreeError;
use crate::metric::{error_count, metric_callables, Metric};
use crate::node::TreeNode;
use crate::splitter::{find_best_split, majority_vote, pure_label, split_subset};
use crate::utils::{format_ratio, validate_min_usize_parameter};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A binary classification tree grown by entropy minimizing splits.
///
/// The tree is grown once, when it is created, and never changes afterwards.
/// Nodes are stored flat, the root is at position 0 and every child sits
/// after its parent.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
    min_size_datalist: usize,
    n_features: usize,
}

impl DecisionTree {
    /// Grow a tree on a dataset.
    ///
    /// * `data` - Non-empty labeled points sharing the same number of features.
    /// * `min_size_datalist` - Subsets with fewer points than this become majority
    ///   vote leaves without attempting a split. Must be at least 1.
    pub fn new(data: &[LabeledPoint], min_size_datalist: usize) -> Result<Self, DecisionTreeError> {
        validate_min_usize_parameter(min_size_datalist, 1, "min_size_datalist")?;
        let n_features = validate_dataset(data)?;

        let nodes = grow_nodes(data, n_features, min_size_datalist);

        let tree = DecisionTree {
            nodes,
            min_size_datalist,
            n_features,
        };
        info!(
            "Grew tree on {} points: {} nodes, {} leaves, depth {}.",
            data.len(),
            tree.n_nodes(),
            tree.n_leaves(),
            tree.depth()
        );
        Ok(tree)
    }

    /// Wrap an existing node vector, checking that it forms a tree usable for classification.
    pub fn from_nodes(
        nodes: Vec<TreeNode>,
        min_size_datalist: usize,
        n_features: usize,
    ) -> Result<Self, DecisionTreeError> {
        let tree = DecisionTree {
            nodes,
            min_size_datalist,
            n_features,
        };
        tree.validate_loaded()?;
        Ok(tree)
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn min_size_datalist(&self) -> usize {
        self.min_size_datalist
    }

    /// Number of features of the training data.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Number of edges on the longest root to leaf path.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut n_depth = vec![0; self.nodes.len()];
        // Children always follow their parent, so one forward pass is enough.
        for (idx, node) in self.nodes.iter().enumerate() {
            if let Some((left, right)) = node.children() {
                n_depth[left] = n_depth[idx] + 1;
                n_depth[right] = n_depth[idx] + 1;
                depth = depth.max(n_depth[idx] + 1);
            }
        }
        depth
    }

    /// Split attributes in pre-order, leaves contribute `0`.
    fn preorder_attributes(&self) -> Vec<usize> {
        let mut markers = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![0];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            markers.push(node.attribute_marker());
            if let Some((left, right)) = node.children() {
                stack.push(right);
                stack.push(left);
            }
        }
        markers
    }

    fn predict_with<F>(&self, n_values: usize, value: F) -> Result<Label, DecisionTreeError>
    where
        F: Fn(usize) -> Option<f64>,
    {
        let mut node_idx = 0;
        loop {
            match &self.nodes[node_idx] {
                TreeNode::Leaf { label } => return Ok(*label),
                TreeNode::Split {
                    attribute,
                    threshold,
                    left,
                    right,
                } => {
                    let v = value(*attribute).ok_or(DecisionTreeError::DimensionMismatch(*attribute, n_values))?;
                    node_idx = if v < *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Predict the label of a single feature vector.
    ///
    /// Fails with [`DecisionTreeError::DimensionMismatch`] when the path reaches
    /// a split on a feature the vector does not have.
    pub fn classify(&self, x: &[f64]) -> Result<Label, DecisionTreeError> {
        self.predict_with(x.len(), |i| x.get(i).copied())
    }

    fn predict_row(&self, data: &Matrix<f64>, row: usize) -> Result<Label, DecisionTreeError> {
        self.predict_with(data.cols, |i| if i < data.cols { Some(*data.get(row, i)) } else { None })
    }

    fn predict_single_threaded(&self, data: &Matrix<f64>) -> Result<Vec<Label>, DecisionTreeError> {
        (0..data.rows).map(|i| self.predict_row(data, i)).collect()
    }

    fn predict_parallel(&self, data: &Matrix<f64>) -> Result<Vec<Label>, DecisionTreeError> {
        (0..data.rows).into_par_iter().map(|i| self.predict_row(data, i)).collect()
    }

    /// Predict the label of every row of a matrix.
    ///
    /// * `data` - Column major matrix, one feature vector per row.
    /// * `parallel` - Spread the rows over the rayon thread pool.
    pub fn predict(&self, data: &Matrix<f64>, parallel: bool) -> Result<Vec<Label>, DecisionTreeError> {
        if parallel {
            self.predict_parallel(data)
        } else {
            self.predict_single_threaded(data)
        }
    }

    /// Predict the label of every point of a dataset, ignoring the true labels.
    pub fn predict_dataset(&self, data: &[LabeledPoint]) -> Result<Vec<Label>, DecisionTreeError> {
        data.iter().map(|p| self.classify(p.x())).collect()
    }

    fn labels_and_predictions(&self, data: &[LabeledPoint]) -> Result<(Vec<Label>, Vec<Label>), DecisionTreeError> {
        if data.is_empty() {
            return Err(DecisionTreeError::EmptyDataset);
        }
        let yhat = self.predict_dataset(data)?;
        let y = data.iter().map(|p| p.y()).collect();
        Ok((y, yhat))
    }

    /// Fraction of points whose predicted label differs from their true label.
    pub fn error_rate(&self, data: &[LabeledPoint]) -> Result<f64, DecisionTreeError> {
        self.evaluate(data, &Metric::ErrorRate)
    }

    /// Error rate formatted with three fractional digits, rounding half up.
    pub fn check_performance(&self, data: &[LabeledPoint]) -> Result<String, DecisionTreeError> {
        let (y, yhat) = self.labels_and_predictions(data)?;
        format_ratio(error_count(&y, &yhat), y.len(), PERFORMANCE_DECIMALS).ok_or(DecisionTreeError::EmptyDataset)
    }

    /// Score the tree on a dataset.
    pub fn evaluate(&self, data: &[LabeledPoint], metric: &Metric) -> Result<f64, DecisionTreeError> {
        let (y, yhat) = self.labels_and_predictions(data)?;
        Ok(metric_callables(metric)(&y, &yhat))
    }

    /// Number of split nodes testing each feature.
    pub fn feature_split_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.n_features];
        for attribute in self.nodes.iter().filter_map(|n| n.attribute()) {
            if let Some(c) = counts.get_mut(attribute) {
                *c += 1;
            }
        }
        counts
    }

    /// Compare the shape of two trees.
    ///
    /// The pre-order sequences of split attributes must match, where a leaf
    /// counts as attribute `0`. The two roots must agree on attribute,
    /// threshold, label and on being a leaf. Thresholds and labels below the
    /// root are not compared.
    pub fn equals(dt1: &DecisionTree, dt2: &DecisionTree) -> bool {
        if dt1.preorder_attributes() != dt2.preorder_attributes() {
            return false;
        }
        let (r1, r2) = (dt1.root(), dt2.root());
        r1.attribute_marker() == r2.attribute_marker()
            && r1.threshold() == r2.threshold()
            && r1.label() == r2.label()
            && r1.is_leaf() == r2.is_leaf()
    }
}

impl PartialEq for DecisionTree {
    fn eq(&self, other: &Self) -> bool {
        DecisionTree::equals(self, other)
    }
}

impl TreeIO for DecisionTree {
    fn validate_loaded(&self) -> Result<(), DecisionTreeError> {
        validate_min_usize_parameter(self.min_size_datalist, 1, "min_size_datalist")?;
        if self.nodes.is_empty() {
            return Err(DecisionTreeError::MalformedTree("tree has no nodes".to_string()));
        }
        // Every node but the root has exactly one parent placed before it.
        let mut referenced = vec![false; self.nodes.len()];
        for (idx, node) in self.nodes.iter().enumerate() {
            node.validate(self.n_features)?;
            if let Some((left, right)) = node.children() {
                for child in [left, right] {
                    if child <= idx || child >= self.nodes.len() {
                        return Err(DecisionTreeError::MalformedTree(format!(
                            "node {} links to child {} out of {} nodes",
                            idx,
                            child,
                            self.nodes.len()
                        )));
                    }
                    if referenced[child] {
                        return Err(DecisionTreeError::MalformedTree(format!(
                            "node {} is the child of more than one split",
                            child
                        )));
                    }
                    referenced[child] = true;
                }
            }
        }
        if let Some(orphan) = referenced.iter().skip(1).position(|r| !r) {
            return Err(DecisionTreeError::MalformedTree(format!(
                "node {} is not reachable from the root",
                orphan + 1
            )));
        }
        Ok(())
    }
}

impl Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "features={},min_size_datalist={},nodes={},depth={}",
            self.n_features,
            self.min_size_datalist,
            self.n_nodes(),
            self.depth()
        )?;
        let mut stack = vec![(0, 0)];
        while let Some((idx, depth)) = stack.pop() {
            let node = &self.nodes[idx];
            write!(f, "\n{}{}:{}", "      ".repeat(depth), idx, node)?;
            if let Some((left, right)) = node.children() {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
        }
        Ok(())
    }
}

/// Grow the nodes for a validated dataset.
///
/// Subsets waiting to be grown are kept on an explicit stack together with
/// the position of the node they fill, so deep trees do not exhaust the
/// call stack.
fn grow_nodes(data: &[LabeledPoint], n_features: usize, min_size_datalist: usize) -> Vec<TreeNode> {
    let mut nodes = vec![TreeNode::leaf(0)];
    let mut growable: Vec<(usize, Vec<&LabeledPoint>)> = vec![(0, data.iter().collect())];

    while let Some((idx, subset)) = growable.pop() {
        if subset.len() < min_size_datalist {
            nodes[idx] = TreeNode::leaf(majority_vote(&subset));
            continue;
        }
        if let Some(label) = pure_label(&subset) {
            nodes[idx] = TreeNode::leaf(label);
            continue;
        }
        match find_best_split(&subset, n_features) {
            Some(split) => {
                let (left, right) = split_subset(&subset, split.attribute, split.threshold);
                let left_idx = nodes.len();
                let right_idx = left_idx + 1;
                nodes.push(TreeNode::leaf(0));
                nodes.push(TreeNode::leaf(0));
                nodes[idx] = TreeNode::split(split.attribute, split.threshold, left_idx, right_idx);
                // Left is popped first, matching a depth first build.
                growable.push((right_idx, right));
                growable.push((left_idx, left));
            }
            None => {
                debug!(
                    "No threshold separates a mixed subset of {} points, using a majority vote leaf.",
                    subset.len()
                );
                nodes[idx] = TreeNode::leaf(majority_vote(&subset));
            }
        }
    }
    nodes
}
