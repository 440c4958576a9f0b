use crate::data::Label;
use crate::errors::DecisionTreeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of a fitted decision tree.
///
/// Nodes live in a flat vector owned by the tree, children are referenced
/// by their position in that vector. A child always sits after its parent.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
pub enum TreeNode {
    Leaf {
        label: Label,
    },
    Split {
        attribute: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

impl TreeNode {
    pub fn leaf(label: Label) -> Self {
        TreeNode::Leaf { label }
    }

    pub fn split(attribute: usize, threshold: f64, left: usize, right: usize) -> Self {
        TreeNode::Split {
            attribute,
            threshold,
            left,
            right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Feature index of a split, `None` for leaves.
    pub fn attribute(&self) -> Option<usize> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split { attribute, .. } => Some(*attribute),
        }
    }

    /// Attribute as seen by the structural comparison, leaves carry the unset value `0`.
    pub fn attribute_marker(&self) -> usize {
        self.attribute().unwrap_or(0)
    }

    /// Threshold of a split, `None` for leaves.
    pub fn threshold(&self) -> Option<f64> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split { threshold, .. } => Some(*threshold),
        }
    }

    /// Predicted label of a leaf, `None` for splits.
    pub fn label(&self) -> Option<Label> {
        match self {
            TreeNode::Leaf { label } => Some(*label),
            TreeNode::Split { .. } => None,
        }
    }

    /// Left and right child positions of a split.
    pub fn children(&self) -> Option<(usize, usize)> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split { left, right, .. } => Some((*left, *right)),
        }
    }

    /// Check the fields of this node, the links are checked by the tree.
    pub fn validate(&self, n_features: usize) -> Result<(), DecisionTreeError> {
        match self {
            TreeNode::Leaf { label } => {
                if *label > 1 {
                    return Err(DecisionTreeError::MalformedTree(format!(
                        "leaf label {} is not 0 or 1",
                        label
                    )));
                }
            }
            TreeNode::Split {
                attribute, threshold, ..
            } => {
                if *attribute >= n_features {
                    return Err(DecisionTreeError::MalformedTree(format!(
                        "split attribute {} out of range for {} features",
                        attribute, n_features
                    )));
                }
                if !threshold.is_finite() {
                    return Err(DecisionTreeError::MalformedTree(format!(
                        "split on attribute {} has threshold {}",
                        attribute, threshold
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TreeNode::Leaf { label } => write!(f, "leaf={}", label),
            TreeNode::Split {
                attribute,
                threshold,
                left,
                right,
            } => write!(f, "[{} < {}] yes={},no={}", attribute, threshold, left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children() {
        assert_eq!(TreeNode::split(1, 5.0, 1, 2).children(), Some((1, 2)));
        assert_eq!(TreeNode::leaf(1).children(), None);
    }

    #[test]
    fn test_accessors() {
        let leaf = TreeNode::leaf(1);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.attribute(), None);
        assert_eq!(leaf.attribute_marker(), 0);
        assert_eq!(leaf.label(), Some(1));
        assert_eq!(leaf.threshold(), None);

        let split = TreeNode::split(3, 0.5, 1, 2);
        assert!(!split.is_leaf());
        assert_eq!(split.attribute_marker(), 3);
        assert_eq!(split.label(), None);
        assert_eq!(split.threshold(), Some(0.5));
    }

    #[test]
    fn test_validate() {
        assert!(TreeNode::split(1, 5.0, 1, 2).validate(2).is_ok());
        assert!(matches!(
            TreeNode::split(1, 5.0, 1, 2).validate(1),
            Err(DecisionTreeError::MalformedTree(_))
        ));
        assert!(matches!(TreeNode::leaf(3).validate(1), Err(DecisionTreeError::MalformedTree(_))));
        let inf = TreeNode::split(0, f64::INFINITY, 1, 2);
        assert!(matches!(inf.validate(1), Err(DecisionTreeError::MalformedTree(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(TreeNode::split(0, 1.0, 1, 2).to_string(), "[0 < 1] yes=1,no=2");
        assert_eq!(TreeNode::leaf(0).to_string(), "leaf=0");
    }
}
