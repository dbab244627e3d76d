use edgekit_image::{Image, ImageRoi};

use super::kernels::Kernel2d;
use crate::border::BorderPolicy;
use crate::error::FilterError;
use crate::parallel::{execute_rows, ExecutionStrategy};

/// Saturating cast of the accumulator to the 8-bit output range.
#[inline]
fn saturate_u8(sum: i32) -> u8 {
    sum.clamp(0, u8::MAX as i32) as u8
}

/// Check the filter preconditions shared by all the border filters.
fn check_filter_args(
    src: &Image<u8, 1>,
    dst: &Image<u8, 1>,
    roi: &ImageRoi,
) -> Result<(), FilterError> {
    if src.is_empty() {
        return Err(FilterError::EmptyImage(src.size()));
    }

    if roi.is_empty() {
        return Err(FilterError::EmptyRoi(*roi));
    }

    if !roi.fits_within(src.size()) {
        return Err(FilterError::RoiOutOfBounds(*roi, src.size()));
    }

    if dst.size() != roi.size {
        return Err(FilterError::InvalidDestinationSize(dst.size(), roi.size));
    }

    Ok(())
}

/// Compute one row of the destination.
///
/// `y` is the row index local to the region of interest.
fn filter_row<B: BorderPolicy>(
    src: &Image<u8, 1>,
    kernel: &Kernel2d,
    roi: &ImageRoi,
    border: &B,
    y: usize,
    dst_row: &mut [u8],
) {
    let (anchor_x, anchor_y) = kernel.anchor();
    let (kernel_w, kernel_h) = (kernel.width(), kernel.height());
    let src_w = src.width();
    let fill = i32::from(border.border_value());

    // resolve the source row read by each kernel row once for the whole row
    let sy0 = (roi.y + y) as isize - anchor_y as isize;
    let src_rows = (0..kernel_h)
        .map(|j| {
            border
                .map_index(sy0 + j as isize, src.height())
                .and_then(|sy| src.row(sy))
        })
        .collect::<Vec<_>>();

    for (x, out) in dst_row.iter_mut().enumerate() {
        let sx0 = (roi.x + x) as isize - anchor_x as isize;
        let interior = sx0 >= 0 && sx0 as usize + kernel_w <= src_w;

        let mut sum = 0i32;
        for (j, src_row) in src_rows.iter().enumerate() {
            let weights = kernel.row(j);
            match src_row {
                Some(row) if interior => {
                    let start = sx0 as usize;
                    sum += weights
                        .iter()
                        .zip(&row[start..start + kernel_w])
                        .map(|(&w, &v)| w * i32::from(v))
                        .sum::<i32>();
                }
                Some(row) => {
                    for (i, &w) in weights.iter().enumerate() {
                        let v = border
                            .map_index(sx0 + i as isize, src_w)
                            .and_then(|sx| row.get(sx))
                            .map_or(fill, |&v| i32::from(v));
                        sum += w * v;
                    }
                }
                None => {
                    sum += weights.iter().map(|&w| w * fill).sum::<i32>();
                }
            }
        }

        *out = saturate_u8(sum);
    }
}

/// Apply a 2D kernel to a grayscale image with border extension.
///
/// Every destination pixel `(x, y)` is the weighted sum of the source samples
/// under the kernel anchored at `(roi.x + x, roi.y + y)`, saturated to
/// `[0, 255]`. Kernel cells falling outside the source are sampled through the
/// border policy, so the destination is defined everywhere including its edges.
/// The kernel is applied as a correlation, without flipping.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `dst` - The destination image with the size of the region of interest.
/// * `kernel` - The kernel to apply.
/// * `roi` - The region of the source to filter.
/// * `border` - The policy producing samples outside the source.
///
/// # Errors
///
/// Returns an error if the source or the region is empty, if the region is not
/// inside the source, or if `dst` does not have the size of the region.
///
/// # Examples
///
/// ```
/// use edgekit_image::{Image, ImageRoi};
/// use edgekit_imgproc::border::BorderType;
/// use edgekit_imgproc::filter::{filter_border, kernels::Kernel2d};
///
/// let src = Image::<u8, 1>::new([3, 1].into(), vec![10, 20, 40]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
/// let kernel = Kernel2d::new(3, 1, vec![-1, 0, 1]).unwrap();
///
/// filter_border(&src, &mut dst, &kernel, ImageRoi::full(src.size()), &BorderType::Replicate)
///     .unwrap();
///
/// assert_eq!(dst.as_slice(), &[10, 30, 20]);
/// ```
pub fn filter_border<B: BorderPolicy>(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    kernel: &Kernel2d,
    roi: ImageRoi,
    border: &B,
) -> Result<(), FilterError> {
    filter_border_with(src, dst, kernel, roi, border, ExecutionStrategy::Serial)
}

/// Apply a 2D kernel to a grayscale image with border extension, using the
/// given execution strategy.
///
/// Same semantics as [`filter_border`]; every strategy produces identical output.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `dst` - The destination image with the size of the region of interest.
/// * `kernel` - The kernel to apply.
/// * `roi` - The region of the source to filter.
/// * `border` - The policy producing samples outside the source.
/// * `strategy` - How the destination rows are scheduled.
pub fn filter_border_with<B: BorderPolicy>(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    kernel: &Kernel2d,
    roi: ImageRoi,
    border: &B,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    check_filter_args(src, dst, &roi)?;

    log::debug!(
        "filter_border: src {} roi {} kernel {}x{} anchor {:?} strategy {}",
        src.size(),
        roi,
        kernel.width(),
        kernel.height(),
        kernel.anchor(),
        strategy
    );

    let stride = dst.stride();
    let row_len = dst.width();

    execute_rows(dst.as_slice_mut(), stride, row_len, strategy, |y, dst_row| {
        filter_row(src, kernel, &roi, border, y, dst_row)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::BorderType;
    use crate::filter::kernels::{laplace_kernel, MaskSize};
    use edgekit_image::ImageSize;

    #[test]
    fn test_saturate_u8() {
        assert_eq!(saturate_u8(-3060), 0);
        assert_eq!(saturate_u8(0), 0);
        assert_eq!(saturate_u8(128), 128);
        assert_eq!(saturate_u8(255), 255);
        assert_eq!(saturate_u8(3060), 255);
    }

    #[test]
    fn test_identity_kernel() -> Result<(), FilterError> {
        let src = Image::<u8, 1>::new([3, 2].into(), vec![1, 2, 3, 4, 5, 6])?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
        let kernel = Kernel2d::new(3, 3, vec![0, 0, 0, 0, 1, 0, 0, 0, 0])?;

        filter_border(
            &src,
            &mut dst,
            &kernel,
            ImageRoi::full(src.size()),
            &BorderType::Replicate,
        )?;

        assert_eq!(dst.as_slice(), src.as_slice());
        Ok(())
    }

    #[test]
    fn test_replicate_vs_constant_at_edges() -> Result<(), FilterError> {
        // sums the three horizontal neighbours
        let src = Image::<u8, 1>::new([3, 1].into(), vec![10, 20, 30])?;
        let kernel = Kernel2d::new(3, 1, vec![1, 1, 1])?;
        let roi = ImageRoi::full(src.size());

        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
        filter_border(&src, &mut dst, &kernel, roi, &BorderType::Replicate)?;
        assert_eq!(dst.as_slice(), &[40, 60, 80]);

        filter_border(&src, &mut dst, &kernel, roi, &BorderType::Constant(0))?;
        assert_eq!(dst.as_slice(), &[30, 60, 50]);

        filter_border(&src, &mut dst, &kernel, roi, &BorderType::Constant(100))?;
        assert_eq!(dst.as_slice(), &[130, 60, 150]);

        filter_border(&src, &mut dst, &kernel, roi, &BorderType::Wrap)?;
        assert_eq!(dst.as_slice(), &[60, 60, 60]);

        filter_border(&src, &mut dst, &kernel, roi, &BorderType::Reflect101)?;
        assert_eq!(dst.as_slice(), &[50, 60, 70]);

        Ok(())
    }

    #[test]
    fn test_constant_border_rows() -> Result<(), FilterError> {
        // vertical kernel reading rows above and below a single row image
        let src = Image::<u8, 1>::new([2, 1].into(), vec![5, 7])?;
        let kernel = Kernel2d::new(1, 3, vec![1, 1, 1])?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        filter_border(
            &src,
            &mut dst,
            &kernel,
            ImageRoi::full(src.size()),
            &BorderType::Constant(9),
        )?;

        assert_eq!(dst.as_slice(), &[23, 25]);
        Ok(())
    }

    #[test]
    fn test_custom_anchor() -> Result<(), FilterError> {
        // anchored on the left cell, the kernel reads the pixel and its right neighbour
        let src = Image::<u8, 1>::new([3, 1].into(), vec![1, 2, 4])?;
        let kernel = Kernel2d::new(3, 1, vec![1, 10, 0])?.with_anchor(0, 0)?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        filter_border(
            &src,
            &mut dst,
            &kernel,
            ImageRoi::full(src.size()),
            &BorderType::Replicate,
        )?;

        assert_eq!(dst.as_slice(), &[21, 42, 44]);
        Ok(())
    }

    #[test]
    fn test_roi_uses_pixels_outside_roi() -> Result<(), FilterError> {
        let src = Image::<u8, 1>::new([4, 1].into(), vec![0, 10, 20, 90])?;
        let kernel = Kernel2d::new(3, 1, vec![1, 1, 1])?;
        let roi = ImageRoi::new(1, 0, [2, 1].into());
        let mut dst = Image::<u8, 1>::from_size_val(roi.size, 0)?;

        filter_border(&src, &mut dst, &kernel, roi, &BorderType::Replicate)?;

        // real neighbours are read, not border samples
        assert_eq!(dst.as_slice(), &[30, 120]);
        Ok(())
    }

    #[test]
    fn test_strided_source_and_destination() -> Result<(), FilterError> {
        let src = Image::<u8, 1>::from_raw_parts(
            [2, 2].into(),
            4,
            vec![1, 2, 200, 200, 3, 4, 200, 200],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val_with_stride(src.size(), 3, 77)?;
        let kernel = Kernel2d::new(1, 1, vec![2])?;

        filter_border(
            &src,
            &mut dst,
            &kernel,
            ImageRoi::full(src.size()),
            &BorderType::Replicate,
        )?;

        // padding is neither read nor written
        assert_eq!(dst.as_slice(), &[2, 4, 77, 6, 8, 77]);
        Ok(())
    }

    #[test]
    fn test_preconditions() -> Result<(), FilterError> {
        let kernel = laplace_kernel(MaskSize::Size3x3);
        let border = BorderType::Replicate;

        let empty = Image::<u8, 1>::from_size_val([0, 3].into(), 0)?;
        let mut dst = Image::<u8, 1>::from_size_val([0, 3].into(), 0)?;
        let res = filter_border(&empty, &mut dst, &kernel, ImageRoi::full(empty.size()), &border);
        assert_eq!(res, Err(FilterError::EmptyImage(empty.size())));

        let src = Image::<u8, 1>::from_size_val([4, 4].into(), 0)?;

        let roi = ImageRoi::new(0, 0, [0, 2].into());
        let mut dst = Image::<u8, 1>::from_size_val(roi.size, 0)?;
        let res = filter_border(&src, &mut dst, &kernel, roi, &border);
        assert_eq!(res, Err(FilterError::EmptyRoi(roi)));

        let roi = ImageRoi::new(2, 2, [3, 2].into());
        let mut dst = Image::<u8, 1>::from_size_val(roi.size, 0)?;
        let res = filter_border(&src, &mut dst, &kernel, roi, &border);
        assert_eq!(res, Err(FilterError::RoiOutOfBounds(roi, src.size())));

        let mut dst = Image::<u8, 1>::from_size_val([3, 4].into(), 0)?;
        let res = filter_border(&src, &mut dst, &kernel, ImageRoi::full(src.size()), &border);
        assert_eq!(
            res,
            Err(FilterError::InvalidDestinationSize(
                ImageSize {
                    width: 3,
                    height: 4
                },
                src.size()
            ))
        );

        Ok(())
    }
}
