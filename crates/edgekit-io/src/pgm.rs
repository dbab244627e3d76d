use edgekit_image::{Image, ImageSize};
use image::codecs::pnm::{PnmDecoder, PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ExtendedColorType, ImageDecoder, ImageEncoder};

use crate::error::IoError;

/// The raster encoding of a PGM file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PgmFormat {
    /// ASCII samples, magic number `P2`.
    Ascii,
    /// Binary samples, magic number `P5`.
    Binary,
}

/// The header of a PGM file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgmHeader {
    /// The raster encoding.
    pub format: PgmFormat,
    /// The size of the image in pixels.
    pub size: ImageSize,
    /// The maximum sample value, between 1 and 65535.
    pub max_value: u32,
}

impl PgmHeader {
    /// The number of bytes per sample in a binary raster.
    pub fn bytes_per_sample(&self) -> usize {
        if self.max_value > u8::MAX as u32 {
            2
        } else {
            1
        }
    }
}

fn graymap_format(subtype: PnmSubtype) -> Result<PgmFormat, IoError> {
    match subtype {
        PnmSubtype::Graymap(SampleEncoding::Binary) => Ok(PgmFormat::Binary),
        PnmSubtype::Graymap(SampleEncoding::Ascii) => Ok(PgmFormat::Ascii),
        other => Err(IoError::PgmDecodeError(format!(
            "not a graymap: {other:?}"
        ))),
    }
}

fn checked_size(width: u32, height: u32) -> Result<ImageSize, IoError> {
    if width == 0 || height == 0 {
        return Err(IoError::PgmDecodeError(format!(
            "invalid image size: {width}x{height}"
        )));
    }
    Ok(ImageSize {
        width: width as usize,
        height: height as usize,
    })
}

/// Rescale a 16-bit sample to 8 bits, rounding to nearest.
#[inline]
fn u16_to_u8(value: u16) -> u8 {
    ((value as u32 * 255 + 32767) / 65535) as u8
}

/// Decode the header of a PGM file.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the pgm file.
pub fn decode_pgm_header(bytes: &[u8]) -> Result<PgmHeader, IoError> {
    let (_, header) = PnmDecoder::new(bytes)?.into_inner();
    Ok(PgmHeader {
        format: graymap_format(header.subtype())?,
        size: checked_size(header.width(), header.height())?,
        max_value: header.maximal_sample(),
    })
}

/// Decode a PGM image with a single channel (mono8) from raw bytes.
///
/// Both binary (`P5`) and ASCII (`P2`) rasters are accepted. Samples of images
/// whose maximum value is not 255 are rescaled to the full 8-bit range.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the pgm file.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
///
/// # Example
///
/// ```
/// use edgekit_io::pgm::decode_image_pgm_mono8;
///
/// let image = decode_image_pgm_mono8(b"P2\n# tiny\n3 1\n255\n0 128 255\n").unwrap();
///
/// assert_eq!(image.size().width, 3);
/// assert_eq!(image.as_slice(), &[0, 128, 255]);
/// ```
pub fn decode_image_pgm_mono8(bytes: &[u8]) -> Result<Image<u8, 1>, IoError> {
    let header = decode_pgm_header(bytes)?;
    let size = header.size;

    let decoder = PnmDecoder::new(bytes)?;
    let color_type = decoder.color_type();

    let mut buf = vec![0u8; decoder.total_bytes() as usize];
    decoder.read_image(&mut buf)?;

    let data = match color_type {
        ColorType::L8 => buf,
        ColorType::L16 => buf
            .chunks_exact(2)
            .map(|c| u16_to_u8(u16::from_ne_bytes([c[0], c[1]])))
            .collect(),
        other => {
            return Err(IoError::PgmDecodeError(format!(
                "unsupported color type: {other:?}"
            )))
        }
    };

    log::debug!("decoded {:?} pgm {} as {:?}", header.format, size, color_type);

    Ok(Image::new(size, data)?)
}

/// Encode a grayscale image (mono8) as a binary PGM file.
///
/// Row padding of strided images is not written.
///
/// # Arguments
///
/// * `image` - The image to encode.
///
/// # Returns
///
/// The bytes of the pgm file.
pub fn encode_image_pgm_mono8(image: &Image<u8, 1>) -> Result<Vec<u8>, IoError> {
    if image.is_empty() {
        return Err(IoError::PgmEncodeError(format!(
            "cannot encode an empty image: {}",
            image.size()
        )));
    }

    let width = u32::try_from(image.width())
        .map_err(|_| IoError::PgmEncodeError(format!("width too large: {}", image.width())))?;
    let height = u32::try_from(image.height())
        .map_err(|_| IoError::PgmEncodeError(format!("height too large: {}", image.height())))?;

    let packed = image.to_contiguous();
    let mut bytes = Vec::with_capacity(packed.as_slice().len() + 32);
    PnmEncoder::new(&mut bytes)
        .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
        .write_image(packed.as_slice(), width, height, ExtendedColorType::L8)?;

    Ok(bytes)
}
