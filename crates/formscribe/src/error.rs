#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Input too large: {size} bytes exceeds the {limit} byte limit")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("Unsupported file type: {0} (expected .pdf or .txt)")]
    UnsupportedFile(String),

    #[error("Could not open PDF: {0}")]
    PdfLoad(String),

    #[error("Document is encrypted")]
    Encrypted,
}
