use crate::error::FilterError;

/// 3x3 discrete Laplacian weights, row-major.
pub const LAPLACE_3X3: [i32; 9] = [
    -1, -1, -1, //
    -1, 8, -1, //
    -1, -1, -1,
];

/// 5x5 discrete Laplacian weights, row-major.
pub const LAPLACE_5X5: [i32; 25] = [
    -1, -3, -4, -3, -1, //
    -3, 0, 6, 0, -3, //
    -4, 6, 20, 6, -4, //
    -3, 0, 6, 0, -3, //
    -1, -3, -4, -3, -1,
];

/// Predefined square mask sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskSize {
    /// A 3x3 mask.
    Size3x3,
    /// A 5x5 mask.
    #[default]
    Size5x5,
}

impl MaskSize {
    /// The side length of the mask in pixels.
    pub fn side(&self) -> usize {
        match self {
            MaskSize::Size3x3 => 3,
            MaskSize::Size5x5 => 5,
        }
    }
}

impl TryFrom<usize> for MaskSize {
    type Error = FilterError;

    fn try_from(side: usize) -> Result<Self, Self::Error> {
        match side {
            3 => Ok(MaskSize::Size3x3),
            5 => Ok(MaskSize::Size5x5),
            _ => Err(FilterError::UnsupportedMaskSize(side)),
        }
    }
}

impl std::fmt::Display for MaskSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{0}x{0}", self.side())
    }
}

/// A 2D convolution kernel of signed integer weights.
///
/// The weights are stored row-major. The anchor is the kernel cell aligned
/// with the output pixel and defaults to the kernel center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel2d {
    width: usize,
    height: usize,
    weights: Vec<i32>,
    anchor: (usize, usize),
}

impl Kernel2d {
    /// Create a new kernel anchored at its center.
    ///
    /// # Arguments
    ///
    /// * `width` - The kernel width, must be odd.
    /// * `height` - The kernel height, must be odd.
    /// * `weights` - The row-major weights, `width * height` long.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is even or zero, if the number of weights
    /// does not match, or if the weights could overflow a 32-bit accumulator
    /// when applied to 8-bit samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_imgproc::filter::kernels::Kernel2d;
    ///
    /// let kernel = Kernel2d::new(3, 1, vec![1, -2, 1]).unwrap();
    /// assert_eq!(kernel.anchor(), (1, 0));
    /// assert!(Kernel2d::new(2, 1, vec![1, -1]).is_err());
    /// ```
    pub fn new(width: usize, height: usize, weights: Vec<i32>) -> Result<Self, FilterError> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(FilterError::EvenSizedKernel(width, height));
        }

        let expected = width
            .checked_mul(height)
            .ok_or(FilterError::InvalidKernelWeights(weights.len(), usize::MAX))?;
        if weights.len() != expected {
            return Err(FilterError::InvalidKernelWeights(weights.len(), expected));
        }

        // worst case magnitude of the accumulator on 8-bit input
        let magnitude = weights
            .iter()
            .try_fold(0i64, |acc, &w| acc.checked_add(i64::from(w).abs() * 255))
            .ok_or(FilterError::KernelWeightsOverflow)?;
        if magnitude > i64::from(i32::MAX) {
            return Err(FilterError::KernelWeightsOverflow);
        }

        Ok(Self {
            width,
            height,
            weights,
            anchor: (width / 2, height / 2),
        })
    }

    /// Move the anchor to the cell `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor lies outside the kernel.
    pub fn with_anchor(mut self, x: usize, y: usize) -> Result<Self, FilterError> {
        if x >= self.width || y >= self.height {
            return Err(FilterError::AnchorOutOfBounds(x, y, self.width, self.height));
        }
        self.anchor = (x, y);
        Ok(self)
    }

    /// The width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The anchor cell as `(x, y)`.
    pub fn anchor(&self) -> (usize, usize) {
        self.anchor
    }

    /// The row-major weights.
    pub fn weights(&self) -> &[i32] {
        &self.weights
    }

    /// The weights of the kernel row `j`.
    pub fn row(&self, j: usize) -> &[i32] {
        &self.weights[j * self.width..(j + 1) * self.width]
    }

    /// The sum of all weights.
    pub fn weight_sum(&self) -> i32 {
        self.weights.iter().sum()
    }
}

/// Create the discrete Laplacian kernel for the given mask size.
///
/// # Arguments
///
/// * `mask_size` - The size of the mask.
///
/// # Returns
///
/// A zero-sum kernel anchored at its center.
pub fn laplace_kernel(mask_size: MaskSize) -> Kernel2d {
    let weights = match mask_size {
        MaskSize::Size3x3 => LAPLACE_3X3.to_vec(),
        MaskSize::Size5x5 => LAPLACE_5X5.to_vec(),
    };
    let side = mask_size.side();

    Kernel2d {
        width: side,
        height: side,
        weights,
        anchor: (side / 2, side / 2),
    }
}
