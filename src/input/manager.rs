//! Input manager for loading the resume and job description

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{PlainTextExtractor, TextExtractor};
use log::info;
use std::path::Path;
use tokio::fs;

/// An uploaded resume, held only for the duration of one analysis
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub file_name: String,
    pub file_type: FileType,
    pub bytes: Vec<u8>,
}

impl ResumeDocument {
    /// Build a document from raw bytes, typing it from the file name
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let file_type = FileType::from_path(Path::new(&file_name));
        Self {
            file_name,
            file_type,
            bytes,
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.file_type.content_type()
    }

    pub fn is_pdf(&self) -> bool {
        self.file_type == FileType::Pdf
    }
}

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a resume from disk. The type check happens at validation time.
    pub async fn load_resume(&self, path: &Path) -> Result<ResumeDocument> {
        Self::ensure_exists(path)?;

        let bytes = fs::read(path).await.map_err(|e| Self::unreadable(path, e))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        info!("Loaded resume {} ({} bytes)", file_name, bytes.len());
        Ok(ResumeDocument::new(file_name, bytes))
    }

    /// Read a job description file (TXT or MD), verbatim
    pub async fn load_job_description(&self, path: &Path) -> Result<String> {
        Self::ensure_exists(path)?;

        match FileType::from_path(path) {
            FileType::Text | FileType::Markdown => {
                info!("Reading job description: {}", path.display());
                PlainTextExtractor.extract(path).await.map_err(|e| match e {
                    ScreenerError::Io(io) => Self::unreadable(path, io),
                    other => other,
                })
            }
            _ => Err(ScreenerError::Validation(format!(
                "Unsupported job description file: {} (expected .txt or .md)",
                path.display()
            ))),
        }
    }

    fn unreadable(path: &Path, error: std::io::Error) -> ScreenerError {
        ScreenerError::Validation(format!("Cannot read {}: {}", path.display(), error))
    }

    fn ensure_exists(path: &Path) -> Result<()> {
        if path.exists() {
            Ok(())
        } else {
            Err(ScreenerError::Validation(format!(
                "File does not exist: {}",
                path.display()
            )))
        }
    }
}
