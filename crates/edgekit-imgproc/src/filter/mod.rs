//! Filter operations
//!
//! This module provides border-aware convolution filters for image processing.

/// Filter kernels
pub mod kernels;

/// Border-aware 2D convolution
mod convolution;
pub use convolution::*;

/// Filter operations
mod ops;
pub use ops::*;
