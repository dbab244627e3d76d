use std::{io::Write, path::Path};

use edgekit_image::Image;

use crate::{
    error::IoError,
    pgm::{decode_image_pgm_mono8, encode_image_pgm_mono8},
};

/// Reads a PGM image with a single channel (mono8) from the given file path.
///
/// # Arguments
///
/// * `file_path` - The path to the PGM image, with a `pgm` or `pnm` extension.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
///
/// # Errors
///
/// Returns an error if the file does not exist, does not have a `pgm`/`pnm`
/// extension, cannot be read, or is not a valid PGM file.
///
/// # Example
///
/// ```
/// use edgekit_image::Image;
/// use edgekit_io::functional as F;
///
/// let image: Image<u8, 1> = F::read_image_pgm_mono8("../../tests/data/sample.pgm").unwrap();
///
/// assert_eq!(image.size().width, 64);
/// assert_eq!(image.size().height, 48);
/// ```
pub fn read_image_pgm_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists and is a PGM
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if file_path.extension().map_or(true, |ext| {
        !ext.eq_ignore_ascii_case("pgm") && !ext.eq_ignore_ascii_case("pnm")
    }) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(&file_path)?;
    let image = decode_image_pgm_mono8(&bytes)?;

    log::debug!("read {} from {}", image.size(), file_path.display());

    Ok(image)
}

/// Writes a grayscale image (mono8) as a binary PGM file.
///
/// The data is written to a temporary file in the destination directory and
/// then renamed over `file_path`, so a failed write never leaves a partially
/// written file behind.
///
/// # Arguments
///
/// * `file_path` - The path to the PGM image.
/// * `image` - The image to write.
pub fn write_image_pgm_mono8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let bytes = encode_image_pgm_mono8(image)?;

    let parent = match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp_file = tempfile::NamedTempFile::new_in(parent)?;
    tmp_file.write_all(&bytes)?;
    tmp_file.flush()?;
    tmp_file.persist(file_path).map_err(|e| e.error)?;

    log::debug!("wrote {} to {}", image.size(), file_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_file() {
        let res = read_image_pgm_mono8("does/not/exist.pgm");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_invalid_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.png");
        std::fs::write(&file_path, b"P5\n1 1\n255\n\0")?;

        let res = read_image_pgm_mono8(&file_path);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }

    #[test]
    fn write_read_pgm() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.PGM");

        let image = Image::<u8, 1>::new([3, 2].into(), vec![0, 50, 100, 150, 200, 250])?;
        write_image_pgm_mono8(&file_path, &image)?;

        let read = read_image_pgm_mono8(&file_path)?;
        assert_eq!(read, image);

        // overwrite in place
        let image = Image::<u8, 1>::from_size_val([1, 1].into(), 9)?;
        write_image_pgm_mono8(&file_path, &image)?;
        assert_eq!(read_image_pgm_mono8(&file_path)?, image);

        // no temporary files are left behind
        assert_eq!(std::fs::read_dir(tmp_dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn write_into_missing_directory() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("missing").join("image.pgm");
        let image = Image::<u8, 1>::from_size_val([1, 1].into(), 0)?;

        let res = write_image_pgm_mono8(&file_path, &image);
        assert!(matches!(res, Err(IoError::FileError(_))));
        assert!(!file_path.exists());
        Ok(())
    }
}
