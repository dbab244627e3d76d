use edgekit_image::{Image, ImageRoi};

use super::convolution::filter_border_with;
use super::kernels::{laplace_kernel, MaskSize};
use crate::border::BorderPolicy;
use crate::error::FilterError;
use crate::parallel::ExecutionStrategy;

/// Compute the Laplacian of a grayscale image with border extension.
///
/// Highlights regions of rapid intensity change. The output is saturated to
/// `[0, 255]`, so only the positive side of an edge response is kept.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `dst` - The destination image with the size of the region of interest.
/// * `mask_size` - The size of the Laplacian mask.
/// * `roi` - The region of the source to filter.
/// * `border` - The policy producing samples outside the source.
///
/// # Examples
///
/// ```
/// use edgekit_image::{Image, ImageRoi};
/// use edgekit_imgproc::border::BorderType;
/// use edgekit_imgproc::filter::{filter_laplace_border, kernels::MaskSize};
///
/// let src = Image::<u8, 1>::from_size_val([5, 5].into(), 127).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 1).unwrap();
///
/// filter_laplace_border(
///     &src,
///     &mut dst,
///     MaskSize::Size5x5,
///     ImageRoi::full(src.size()),
///     &BorderType::Replicate,
/// )
/// .unwrap();
///
/// assert!(dst.as_slice().iter().all(|&v| v == 0));
/// ```
pub fn filter_laplace_border<B: BorderPolicy>(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    mask_size: MaskSize,
    roi: ImageRoi,
    border: &B,
) -> Result<(), FilterError> {
    filter_laplace_border_with(src, dst, mask_size, roi, border, ExecutionStrategy::Serial)
}

/// Compute the Laplacian of a grayscale image with border extension, using the
/// given execution strategy.
///
/// PRECONDITION: `dst` must have the size of `roi`.
pub fn filter_laplace_border_with<B: BorderPolicy>(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    mask_size: MaskSize,
    roi: ImageRoi,
    border: &B,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    let kernel = laplace_kernel(mask_size);
    filter_border_with(src, dst, &kernel, roi, border, strategy)
}
