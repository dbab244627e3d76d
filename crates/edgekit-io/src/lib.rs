#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// See [`functional::read_image_pgm_mono8`] and [`functional::write_image_pgm_mono8`].
pub mod functional;

/// PGM (portable graymap) image encoding and decoding.
///
/// Decodes binary (`P5`) and ASCII (`P2`) graymaps, encodes binary graymaps.
pub mod pgm;

pub use crate::error::IoError;
pub use crate::functional::{read_image_pgm_mono8, write_image_pgm_mono8};
