// ABOUTME: Error types for inline image encoding and frame emission
// ABOUTME: Unsupported terminals are an outcome, not an error, and live in transport.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImgcatError {
    #[error("Invalid payload: image buffer is empty")]
    InvalidPayload,

    #[error("Invalid display hint: {0}")]
    InvalidHint(String),

    #[error("Write failed: {0}")]
    WriteFailure(#[from] std::io::Error),
}

impl ImgcatError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            ImgcatError::InvalidPayload => Some("Make sure the input file is not empty"),
            ImgcatError::InvalidHint(_) => {
                Some("Use N (cells), Npx (pixels), N% (percent of window) or auto")
            }
            ImgcatError::WriteFailure(err) if err.kind() == std::io::ErrorKind::BrokenPipe => {
                Some("The output stream was closed before the image was written")
            }
            ImgcatError::WriteFailure(_) => None,
        }
    }
}
