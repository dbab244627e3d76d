/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] edgekit_image::ImageError),

    /// Error from the pnm codec.
    #[error("Error with Pnm encoding/decoding. {0}")]
    PnmError(#[from] image::ImageError),

    /// Error to decode the PGM image.
    #[error("Failed to decode the pgm image. {0}")]
    PgmDecodeError(String),

    /// Error to encode the PGM image.
    #[error("Failed to encode the pgm image. {0}")]
    PgmEncodeError(String),
}
