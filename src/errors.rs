//! Errors
//!
//! Custom error types used throughout the `dtree` crate.
use thiserror::Error;

/// Errors that can occur while building, evaluating or persisting a decision tree.
#[derive(Debug, Error, PartialEq)]
pub enum DecisionTreeError {
    /// The dataset passed in has no points.
    #[error("The dataset is empty, at least one labeled point is required.")]
    EmptyDataset,
    /// A point does not share the dimensionality of the first point.
    /// Values are the row, the expected number of features, and what was found.
    #[error("Point {0} has {2} features, expected {1}.")]
    InconsistentDimension(usize, usize, usize),
    /// A label outside of the two supported classes.
    #[error("Point {0} has label {1}, expected 0 or 1.")]
    InvalidLabel(usize, u8),
    /// NaN or infinite feature value, these cannot be ordered against a threshold.
    #[error("Point {0} has a non finite value for feature {1}.")]
    NonFiniteFeature(usize, usize),
    /// A query vector too short for the attribute a split node reads.
    #[error("Split on attribute {0} can not be evaluated on a vector with {1} features.")]
    DimensionMismatch(usize, usize),
    /// The tree structure can not be used for classification.
    #[error("Malformed tree: {0}")]
    MalformedTree(String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Unable to write tree to file.
    #[error("Unable to write tree to file: {0}")]
    UnableToWrite(String),
    /// Unable to read tree from file.
    #[error("Unable to read tree from a file {0}")]
    UnableToRead(String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
}
