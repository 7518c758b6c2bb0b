//! c45tree: C4.5-style decision tree classification in pure Rust.
//!
//! Trees are induced top-down with binary `<=` threshold splits chosen by
//! gain ratio (information gain normalized by split info), the criterion
//! C4.5 introduced over ID3's raw information gain.
//!
//! # Quick Start
//!
//! ```
//! use c45tree::prelude::*;
//!
//! let x = Matrix::from_rows(&[
//!     vec![0.0, 1.0],
//!     vec![0.0, 0.0],
//!     vec![1.0, 1.0],
//!     vec![2.0, 0.0],
//! ]).unwrap();
//! let y = vec![0, 0, 1, 1];
//!
//! let mut clf = C45Classifier::new().with_max_depth(5);
//! clf.fit(&x, &y).unwrap();
//! assert_eq!(clf.predict(&x).unwrap(), y);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Row-major sample matrix
//! - [`tree`]: Metrics, split search, tree builder and classifier
//! - [`data`]: CSV dataset loading with categorical encoding
//! - [`export`]: Graphviz DOT and IF/THEN rule rendering of a trained tree
//! - [`config`]: TOML run configuration for the command-line driver
//! - [`logging`]: Tracing subscriber setup for the command-line driver

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod logging;
pub mod prelude;
pub mod primitives;
pub mod tree;

pub use error::{Result, TreeError};
pub use primitives::Matrix;
pub use tree::C45Classifier;
