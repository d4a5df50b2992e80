//! Distance matrices.
//!
//! Provides a dense, possibly asymmetric cost matrix for salesman problems.

mod matrix;

pub use matrix::DistanceMatrix;
