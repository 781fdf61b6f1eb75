//! Error taxonomy shared by the extractor, the playback controller and the
//! shell session.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning a file into tokens.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Unsupported file type '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Could not read {}: {reason}", path.display())]
    ExtractionFailed { path: PathBuf, reason: String },

    #[error("{} is not valid UTF-8 text: {reason}", path.display())]
    EncodingError { path: PathBuf, reason: String },

    #[error("No readable text found in {}", path.display())]
    EmptyDocument { path: PathBuf },
}

/// Failures raised by playback navigation and speed control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("Speed {wpm} WPM is outside {min}..={max}")]
    InvalidSpeed { wpm: u32, min: u32, max: u32 },

    #[error("Position {index} is outside 0..={len}")]
    OutOfRange { index: usize, len: usize },
}

/// Flat discriminant used by the shell to pick a status severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    UnsupportedFormat,
    ExtractionFailed,
    EncodingError,
    EmptyDocument,
    InvalidSpeed,
    OutOfRange,
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::FileNotFound { .. } => ErrorKind::FileNotFound,
            ExtractError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            ExtractError::ExtractionFailed { .. } => ErrorKind::ExtractionFailed,
            ExtractError::EncodingError { .. } => ErrorKind::EncodingError,
            ExtractError::EmptyDocument { .. } => ErrorKind::EmptyDocument,
        }
    }

    pub(crate) fn failed(path: &std::path::Path, reason: impl ToString) -> Self {
        ExtractError::ExtractionFailed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

impl PlaybackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlaybackError::InvalidSpeed { .. } => ErrorKind::InvalidSpeed,
            PlaybackError::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_path() {
        let err = ExtractError::UnsupportedFormat {
            path: PathBuf::from("notes.docx"),
            extension: "docx".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported file type 'docx' for notes.docx");
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn speed_error_reports_bounds() {
        let err = PlaybackError::InvalidSpeed {
            wpm: 50,
            min: 100,
            max: 1000,
        };
        assert_eq!(err.to_string(), "Speed 50 WPM is outside 100..=1000");
    }
}
