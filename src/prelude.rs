//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use c45tree::prelude::*;
//! ```

pub use crate::data::Dataset;
pub use crate::error::{Result, TreeError};
pub use crate::primitives::Matrix;
pub use crate::tree::metrics::{entropy, gain_ratio, majority_label};
pub use crate::tree::{C45Classifier, Tree, TreeNode};
