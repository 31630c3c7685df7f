use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("Flow artifact contains no pages")]
    NoPages,
    #[error("Page out of order: expected index {expected}, found {found}")]
    PageOrder { expected: usize, found: usize },
    #[error("Failed to decode bitmap: {0}")]
    Decode(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for WriterError {
    fn from(err: lopdf::Error) -> Self {
        WriterError::Pdf(err.to_string())
    }
}

impl From<&str> for WriterError {
    fn from(s: &str) -> Self {
        WriterError::Other(s.to_string())
    }
}
