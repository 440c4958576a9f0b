mod node;

// Modules
pub mod config;
pub mod constants;
pub mod data;
pub mod errors;
pub mod metric;
pub mod splitter;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use config::{TreeIO, TreeParameters};
pub use data::{LabeledPoint, Matrix};
pub use errors::DecisionTreeError;
pub use node::TreeNode;
pub use tree::DecisionTree;
