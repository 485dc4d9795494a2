//! Screening session: one analysis at a time, from inputs to a displayable result

use crate::error::{ErrorKind, Result, ScreenerError};
use crate::input::text_extractor::PdfExtractor;
use crate::llm::analyzer::{AnalysisResult, Analyzer};
use crate::llm::client::ChatTransport;
use crate::llm::prompts::{self, SYSTEM_INSTRUCTION};
use crate::processing::validation::{self, ScreeningRequest};
use log::{debug, info};
use std::fmt;
use std::time::Instant;

/// Where an invocation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Validating,
    Extracting,
    Requesting,
    ParsingResponse,
    Displaying,
    Failed(ErrorKind),
}

impl Stage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Displaying | Stage::Failed(_))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Idle => write!(f, "Idle"),
            Stage::Validating => write!(f, "Checking inputs"),
            Stage::Extracting => write!(f, "Extracting resume text"),
            Stage::Requesting => write!(f, "Waiting for the model"),
            Stage::ParsingResponse => write!(f, "Reading the analysis"),
            Stage::Displaying => write!(f, "Analysis ready"),
            Stage::Failed(kind) => write!(f, "Failed ({:?})", kind),
        }
    }
}

/// A successful analysis together with what it was computed from
#[derive(Debug, Clone)]
pub struct ScreeningOutcome {
    pub result: AnalysisResult,
    pub resume_file: String,
    pub resume_pages: usize,
    pub resume_chars: usize,
    pub job_description: String,
    pub processing_time_ms: u64,
}

pub type StageObserver = Box<dyn Fn(&Stage) + Send + Sync>;

pub struct ScreeningSession<T: ChatTransport> {
    analyzer: Analyzer<T>,
    extractor: PdfExtractor,
    stage: Stage,
    last_outcome: Option<ScreeningOutcome>,
    observer: Option<StageObserver>,
}

impl<T: ChatTransport> ScreeningSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            analyzer: Analyzer::new(transport),
            extractor: PdfExtractor,
            stage: Stage::Idle,
            last_outcome: None,
            observer: None,
        }
    }

    /// Be notified of every stage transition (e.g. to drive a progress spinner)
    pub fn with_observer(mut self, observer: StageObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn last_outcome(&self) -> Option<&ScreeningOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_outcome.as_ref().map(|outcome| &outcome.result)
    }

    pub fn transport(&self) -> &T {
        self.analyzer.transport()
    }

    /// Run one analysis to completion.
    ///
    /// The previous outcome is dropped as soon as a new run starts, so a
    /// failed run never leaves stale results behind.
    pub async fn run(&mut self, request: ScreeningRequest) -> Result<&ScreeningOutcome> {
        self.last_outcome = None;

        match self.execute(request).await {
            Ok(outcome) => {
                self.transition(Stage::Displaying);
                let outcome: &ScreeningOutcome = self.last_outcome.insert(outcome);
                Ok(outcome)
            }
            Err(e) => {
                self.transition(Stage::Failed(e.kind()));
                Err(e)
            }
        }
    }

    async fn execute(&mut self, request: ScreeningRequest) -> Result<ScreeningOutcome> {
        let start_time = Instant::now();

        self.transition(Stage::Validating);
        let validated = validation::validate(request)?;

        self.transition(Stage::Extracting);
        let pages = self.extractor.extract_pages(&validated.resume.bytes)?;
        let resume_pages = pages.len();
        let resume_text = pages.concat();

        if resume_text.trim().is_empty() {
            return Err(ScreenerError::Extraction(format!(
                "No extractable text in '{}' (scanned or image-only PDF?)",
                validated.resume.file_name
            )));
        }

        let chat_request = prompts::build(SYSTEM_INSTRUCTION, &validated.job_description, &resume_text);

        self.transition(Stage::Requesting);
        let content = self.analyzer.request(&validated.api_key, &chat_request).await?;

        self.transition(Stage::ParsingResponse);
        let result = AnalysisResult::from_content(&content)?;

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Analysis of '{}' finished in {}ms with score {}",
            validated.resume.file_name, processing_time_ms, result.score_match
        );

        Ok(ScreeningOutcome {
            result,
            resume_file: validated.resume.file_name,
            resume_pages,
            resume_chars: resume_text.chars().count(),
            job_description: validated.job_description,
            processing_time_ms,
        })
    }

    fn transition(&mut self, next: Stage) {
        debug!("Screening stage: {:?} -> {:?}", self.stage, next);
        self.stage = next;
        if let Some(observer) = &self.observer {
            observer(&self.stage);
        }
    }
}
