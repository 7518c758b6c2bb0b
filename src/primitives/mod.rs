//! Core compute primitives.
//!
//! The sample matrix every estimator in this crate trains and predicts on.

mod matrix;

pub use matrix::Matrix;
