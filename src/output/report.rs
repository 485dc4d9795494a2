//! Report structures handed to the formatters

use crate::llm::analyzer::AnalysisResult;
use crate::llm::prompts::MODEL;
use crate::processing::session::ScreeningOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Color classification of the compatibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Green,
    Orange,
    Red,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => ScoreBand::Green,
            50..=69 => ScoreBand::Orange,
            _ => ScoreBand::Red,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScoreBand::Green => "green",
            ScoreBand::Orange => "orange",
            ScoreBand::Red => "red",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            ScoreBand::Green => "Strong fit",
            ScoreBand::Orange => "Partial fit",
            ScoreBand::Red => "Weak fit",
        }
    }
}

/// One complete screening, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub analysis: AnalysisResult,
    pub score_band: ScoreBand,
    /// Model output as received, for the debug view
    pub raw_response: Value,
    pub inputs: InputSummary,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub resume_file: String,
    pub resume_pages: usize,
    pub resume_chars: usize,
    pub job_description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub processing_time_ms: u64,
    pub screener_version: String,
}

impl ScreeningReport {
    pub fn from_outcome(outcome: &ScreeningOutcome) -> Self {
        Self {
            score_band: ScoreBand::from_score(outcome.result.score_match),
            raw_response: outcome.result.raw.clone(),
            analysis: outcome.result.clone(),
            inputs: InputSummary {
                resume_file: outcome.resume_file.clone(),
                resume_pages: outcome.resume_pages,
                resume_chars: outcome.resume_chars,
                job_description: outcome.job_description.clone(),
            },
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                model: MODEL.to_string(),
                processing_time_ms: outcome.processing_time_ms,
                screener_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn raw_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw_response).unwrap_or_else(|_| self.raw_response.to_string())
    }
}
