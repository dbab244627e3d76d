use crate::image::ImageSize;

/// A rectangular region of interest within an image.
///
/// The region starts at pixel `(x, y)` and spans `size` pixels.
///
/// # Examples
///
/// ```
/// use edgekit_image::{ImageRoi, ImageSize};
///
/// let roi = ImageRoi::new(2, 1, [4, 3].into());
///
/// assert!(roi.fits_within(ImageSize { width: 6, height: 4 }));
/// assert!(!roi.fits_within(ImageSize { width: 5, height: 4 }));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ImageRoi {
    /// Horizontal offset of the region in pixels.
    pub x: usize,
    /// Vertical offset of the region in pixels.
    pub y: usize,
    /// Size of the region in pixels.
    pub size: ImageSize,
}

impl ImageRoi {
    /// Create a new region of interest.
    pub fn new(x: usize, y: usize, size: ImageSize) -> Self {
        Self { x, y, size }
    }

    /// Create a region covering a whole image of the given size.
    pub fn full(size: ImageSize) -> Self {
        Self { x: 0, y: 0, size }
    }

    /// Whether the region has no pixels.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Whether the region lies entirely inside an image of size `bounds`.
    pub fn fits_within(&self, bounds: ImageSize) -> bool {
        let fits = |offset: usize, len: usize, limit: usize| {
            offset
                .checked_add(len)
                .is_some_and(|end| end <= limit)
        };
        fits(self.x, self.size.width, bounds.width) && fits(self.y, self.size.height, bounds.height)
    }
}

impl std::fmt::Display for ImageRoi {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageRoi {{ x: {}, y: {}, width: {}, height: {} }}",
            self.x, self.y, self.size.width, self.size.height
        )
    }
}
