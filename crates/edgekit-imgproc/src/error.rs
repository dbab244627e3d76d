use edgekit_image::{ImageError, ImageRoi, ImageSize};

use crate::parallel::ParallelError;

/// An error type for the filtering operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The kernel must have odd, non-zero dimensions.
    #[error("Kernel must have odd dimensions, got {0}x{1}")]
    EvenSizedKernel(usize, usize),

    /// The number of kernel weights does not match its dimensions.
    #[error("Kernel weights ({0}) do not match the kernel size ({1})")]
    InvalidKernelWeights(usize, usize),

    /// The kernel anchor lies outside the kernel.
    #[error("Kernel anchor ({0}, {1}) lies outside the {2}x{3} kernel")]
    AnchorOutOfBounds(usize, usize, usize, usize),

    /// The kernel weights could overflow the accumulator on 8-bit input.
    #[error("Kernel weights are too large for a 32-bit accumulator")]
    KernelWeightsOverflow,

    /// The requested mask size has no predefined kernel.
    #[error("Unsupported mask size: {0}")]
    UnsupportedMaskSize(usize),

    /// The source image has zero width or height.
    #[error("Source image is empty: {0}")]
    EmptyImage(ImageSize),

    /// The region of interest has zero width or height.
    #[error("Region of interest is empty: {0}")]
    EmptyRoi(ImageRoi),

    /// The region of interest is not fully inside the source image.
    #[error("Region of interest {0} lies outside the source image {1}")]
    RoiOutOfBounds(ImageRoi, ImageSize),

    /// The destination image does not have the size of the region of interest.
    #[error("Destination size {0} does not match the region of interest size {1}")]
    InvalidDestinationSize(ImageSize, ImageSize),

    /// Error from the image module.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error while scheduling the work.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
