use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use edgekit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major with `CHANNELS` interleaved samples per pixel.
/// Each row occupies `stride` elements in the backing buffer, of which only the
/// first `width * CHANNELS` hold pixel data; the remainder is row padding
/// (the "pitch" of the image) and is never interpreted as pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    stride: usize,
    data: Vec<T>,
}

/// Number of elements in a tightly packed row, checked for overflow.
fn packed_row_len<const CHANNELS: usize>(size: ImageSize) -> Result<usize, ImageError> {
    size.width
        .checked_mul(CHANNELS)
        .ok_or(ImageError::SizeOverflow(size.width, size.height))
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from tightly packed pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let stride = packed_row_len::<CHANNELS>(size)?;
        Self::from_raw_parts(size, stride, data)
    }

    /// Create a new image from a buffer whose rows are `stride` elements apart.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `stride` - The number of elements between the start of two consecutive rows.
    /// * `data` - The backing buffer, `stride * height` elements long.
    ///
    /// # Errors
    ///
    /// If the stride cannot hold a row, or the buffer length does not match
    /// `stride * height`, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::{Image, ImageSize};
    ///
    /// // two rows of three pixels, padded to four elements per row
    /// let image = Image::<u8, 1>::from_raw_parts(
    ///     [3, 2].into(),
    ///     4,
    ///     vec![1, 2, 3, 0, 4, 5, 6, 0],
    /// ).unwrap();
    ///
    /// assert_eq!(image.row(1), Some(&[4u8, 5, 6][..]));
    /// assert!(!image.is_contiguous());
    /// ```
    pub fn from_raw_parts(
        size: ImageSize,
        stride: usize,
        data: Vec<T>,
    ) -> Result<Self, ImageError> {
        let row_len = packed_row_len::<CHANNELS>(size)?;
        if stride < row_len {
            return Err(ImageError::InvalidStride(stride, row_len));
        }

        let expected = stride
            .checked_mul(size.height)
            .ok_or(ImageError::SizeOverflow(size.width, size.height))?;

        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, stride, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The default value of the pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 1>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0u8).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 1);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let stride = packed_row_len::<CHANNELS>(size)?;
        Self::from_size_val_with_stride(size, stride, val)
    }

    /// Create a new image with padded rows, every element set to `val`.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `stride` - The number of elements per row, including padding.
    /// * `val` - The default value of the pixel data and padding.
    pub fn from_size_val_with_stride(
        size: ImageSize,
        stride: usize,
        val: T,
    ) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let len = stride
            .checked_mul(size.height)
            .ok_or(ImageError::SizeOverflow(size.width, size.height))?;
        Self::from_raw_parts(size, stride, vec![val; len])
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the number of elements between the start of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether the rows are tightly packed, i.e. the buffer has no row padding.
    pub fn is_contiguous(&self) -> bool {
        self.stride == self.size.width * CHANNELS
    }

    /// Whether the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Get the pixel samples of a row, without the row padding.
    ///
    /// Returns `None` if `y` is out of bounds.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height() {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.size.width * CHANNELS)
    }

    /// Get the mutable pixel samples of a row, without the row padding.
    ///
    /// Returns `None` if `y` is out of bounds.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [T]> {
        if y >= self.height() {
            return None;
        }
        let start = y * self.stride;
        let row_len = self.size.width * CHANNELS;
        self.data.get_mut(start..start + row_len)
    }

    /// Iterate over the rows of the image, each without its padding.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> {
        let row_len = self.size.width * CHANNELS;
        // a zero stride only happens for zero-width images
        self.data
            .chunks(self.stride.max(1))
            .take(self.size.height)
            .map(move |row| &row[..row_len])
    }

    /// Get a reference to the sample at `[y, x, channel]`.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [y, x, ch] = index;
        if y >= self.height() || x >= self.width() || ch >= CHANNELS {
            return None;
        }
        self.data.get(self.offset(y, x, ch))
    }

    /// Get a reference to the sample at `[y, x, channel]` without checking
    /// the index against the image size.
    ///
    /// PRECONDITION: the index is within the image. An out-of-bounds index may
    /// alias a different pixel or panic.
    #[inline]
    pub fn get_unchecked(&self, index: [usize; 3]) -> &T {
        let [y, x, ch] = index;
        &self.data[self.offset(y, x, ch)]
    }

    /// Set the sample at `[y, x, channel]`.
    ///
    /// # Errors
    ///
    /// If the pixel or channel index is out of bounds, an error is returned.
    pub fn set(&mut self, index: [usize; 3], val: T) -> Result<(), ImageError> {
        let [y, x, ch] = index;
        if y >= self.height() || x >= self.width() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }
        let offset = self.offset(y, x, ch);
        self.data[offset] = val;
        Ok(())
    }

    /// Get the backing buffer of the image, row padding included.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the mutable backing buffer of the image, row padding included.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Copy the image into a new tightly packed image.
    pub fn to_contiguous(&self) -> Image<T, CHANNELS>
    where
        T: Clone,
    {
        let data = self
            .rows_iter()
            .flat_map(|row| row.iter().cloned())
            .collect::<Vec<_>>();

        Image {
            size: self.size,
            stride: self.size.width * CHANNELS,
            data,
        }
    }

    #[inline]
    fn offset(&self, y: usize, x: usize, ch: usize) -> usize {
        y * self.stride + x * CHANNELS + ch
    }
}
