//! Up-front checks run before any extraction or network call

use crate::error::{Result, ScreenerError};
use crate::input::manager::ResumeDocument;

/// Everything the recruiter supplied for one analysis
#[derive(Debug, Clone, Default)]
pub struct ScreeningRequest {
    pub api_key: Option<String>,
    pub job_description: String,
    pub resume: Option<ResumeDocument>,
    /// Why the job description file could not be read
    pub job_load_error: Option<String>,
    /// Why the resume file could not be read
    pub resume_load_error: Option<String>,
}

impl ScreeningRequest {
    pub fn new(api_key: Option<String>, job_description: impl Into<String>, resume: Option<ResumeDocument>) -> Self {
        Self {
            api_key,
            job_description: job_description.into(),
            resume,
            ..Self::default()
        }
    }

    /// Take the result of loading the job description; a failure is reported at validation
    pub fn with_loaded_job_description(mut self, loaded: Result<String>) -> Self {
        match loaded {
            Ok(text) => {
                self.job_description = text;
                self.job_load_error = None;
            }
            Err(e) => {
                self.job_description.clear();
                self.job_load_error = Some(load_error_message(e));
            }
        }
        self
    }

    /// Take the result of loading the resume; a failure is reported at validation
    pub fn with_loaded_resume(mut self, loaded: Result<ResumeDocument>) -> Self {
        match loaded {
            Ok(resume) => {
                self.resume = Some(resume);
                self.resume_load_error = None;
            }
            Err(e) => {
                self.resume = None;
                self.resume_load_error = Some(load_error_message(e));
            }
        }
        self
    }
}

fn load_error_message(error: ScreenerError) -> String {
    match error {
        ScreenerError::Validation(msg) => msg,
        other => other.to_string(),
    }
}

/// A request whose inputs are all present
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub api_key: String,
    pub job_description: String,
    pub resume: ResumeDocument,
}

pub fn validate(request: ScreeningRequest) -> Result<ValidatedRequest> {
    let api_key = request
        .api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            ScreenerError::Validation(
                "Missing API key: pass --api-key, set OPENAI_API_KEY or add provider.api_key to the config file"
                    .to_string(),
            )
        })?;

    if let Some(msg) = request.job_load_error {
        return Err(ScreenerError::Validation(msg));
    }

    if request.job_description.trim().is_empty() {
        return Err(ScreenerError::Validation(
            "Missing job description: provide --job <file> or --job-text <text>".to_string(),
        ));
    }

    if let Some(msg) = request.resume_load_error {
        return Err(ScreenerError::Validation(msg));
    }

    let resume = request.resume.ok_or_else(|| {
        ScreenerError::Validation("Missing resume: provide a PDF with --resume".to_string())
    })?;

    if !resume.is_pdf() {
        return Err(ScreenerError::Validation(format!(
            "Resume '{}' has content type {}, only application/pdf is accepted",
            resume.file_name,
            resume.content_type()
        )));
    }

    Ok(ValidatedRequest {
        api_key,
        job_description: request.job_description,
        resume,
    })
}
