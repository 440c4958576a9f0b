//! Tree Configuration
//!
//! Parameters used to grow a decision tree, and the JSON persistence shared
//! by parameters and fitted trees.
use crate::constants::DEFAULT_MIN_SIZE_DATALIST;
use crate::data::LabeledPoint;
use crate::errors::DecisionTreeError;
use crate::tree::DecisionTree;
use crate::utils::validate_min_usize_parameter;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_min_size_datalist() -> usize {
    DEFAULT_MIN_SIZE_DATALIST
}

/// Parameters for growing a [`DecisionTree`].
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct TreeParameters {
    /// Minimum number of points a subset needs before a split is attempted.
    /// Smaller subsets become majority vote leaves, pure or not.
    #[serde(default = "default_min_size_datalist")]
    pub min_size_datalist: usize,
}

impl Default for TreeParameters {
    fn default() -> Self {
        TreeParameters {
            min_size_datalist: DEFAULT_MIN_SIZE_DATALIST,
        }
    }
}

impl TreeParameters {
    /// Set the minimum subset size required to attempt a split.
    /// * `min_size_datalist` - Must be at least 1.
    pub fn set_min_size_datalist(mut self, min_size_datalist: usize) -> Self {
        self.min_size_datalist = min_size_datalist;
        self
    }

    pub fn validate_parameters(&self) -> Result<(), DecisionTreeError> {
        validate_min_usize_parameter(self.min_size_datalist, 1, "min_size_datalist")
    }

    /// Grow a tree on `data` with these parameters.
    pub fn fit(&self, data: &[LabeledPoint]) -> Result<DecisionTree, DecisionTreeError> {
        DecisionTree::new(data, self.min_size_datalist)
    }
}

/// IO
pub trait TreeIO: Serialize + DeserializeOwned + Sized {
    /// Check a value that was just read back.
    fn validate_loaded(&self) -> Result<(), DecisionTreeError> {
        Ok(())
    }

    /// Save as a json object to a file.
    ///
    /// * `path` - Path to save to.
    fn save_tree<P: AsRef<Path>>(&self, path: P) -> Result<(), DecisionTreeError> {
        fs::write(path, self.json_dump()?).map_err(|e| DecisionTreeError::UnableToWrite(e.to_string()))
    }

    /// Dump as a json object
    fn json_dump(&self) -> Result<String, DecisionTreeError> {
        serde_json::to_string(self).map_err(|e| DecisionTreeError::UnableToWrite(e.to_string()))
    }

    /// Load from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, DecisionTreeError> {
        let value =
            serde_json::from_str::<Self>(json_str).map_err(|e| DecisionTreeError::UnableToRead(e.to_string()))?;
        value.validate_loaded()?;
        Ok(value)
    }

    /// Load from a path to a json object.
    ///
    /// * `path` - Path to load from.
    fn load_tree<P: AsRef<Path>>(path: P) -> Result<Self, DecisionTreeError> {
        let json_str = fs::read_to_string(path).map_err(|e| DecisionTreeError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl TreeIO for TreeParameters {
    fn validate_loaded(&self) -> Result<(), DecisionTreeError> {
        self.validate_parameters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_tree_parameters_default() {
        let params = TreeParameters::default();
        assert_eq!(params.min_size_datalist, 1);
        assert!(params.validate_parameters().is_ok());
    }

    #[test]
    fn test_tree_parameters_invalid() {
        let params = TreeParameters::default().set_min_size_datalist(0);
        assert!(matches!(
            params.validate_parameters(),
            Err(DecisionTreeError::InvalidParameter(..))
        ));
        let data = vec![LabeledPoint::new(vec![0.0], 0)];
        assert!(matches!(params.fit(&data), Err(DecisionTreeError::InvalidParameter(..))));
    }

    #[test]
    fn test_tree_parameters_io_json() {
        let params = TreeParameters::default().set_min_size_datalist(5);
        let json = params.json_dump().unwrap();
        let params2 = TreeParameters::from_json(&json).unwrap();
        assert_eq!(params, params2);

        let params3 = TreeParameters::from_json("{}").unwrap();
        assert_eq!(params3.min_size_datalist, 1);

        assert!(matches!(
            TreeParameters::from_json(r#"{"min_size_datalist": 0}"#),
            Err(DecisionTreeError::InvalidParameter(..))
        ));
    }

    #[test]
    fn test_tree_parameters_io_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("params.json");
        let params = TreeParameters::default().set_min_size_datalist(3);
        params.save_tree(&file_path).unwrap();
        let params2 = TreeParameters::load_tree(&file_path).unwrap();
        assert_eq!(params, params2);
    }
}
