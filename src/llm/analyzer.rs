//! Structured analysis returned by the model

use crate::error::{Result, ScreenerError};
use crate::llm::client::ChatTransport;
use crate::llm::prompts::ChatRequest;
use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};

/// Candidate/job compatibility assessment.
///
/// Built only from a JSON object. Every field is read leniently: a missing or
/// mistyped field becomes its empty default instead of failing the analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub score_match: u8,
    pub synthese: String,
    pub points_forts: Vec<String>,
    pub points_vigilance: Vec<String>,
    pub questions_entretien: Vec<String>,
    /// The object exactly as the model returned it
    #[serde(skip)]
    pub raw: Value,
}

impl AnalysisResult {
    /// Parse the message content of a completion
    pub fn from_content(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| {
            ScreenerError::MalformedResponse(format!("content is not valid JSON: {}", e))
        })?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            ScreenerError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_type_name(&value)
            ))
        })?;

        let result = Self {
            score_match: read_score(object.get("score_match")),
            synthese: read_text(object, "synthese"),
            points_forts: read_list(object, "points_forts"),
            points_vigilance: read_list(object, "points_vigilance"),
            questions_entretien: read_list(object, "questions_entretien"),
            raw: value.clone(),
        };

        debug!(
            "Parsed analysis: score {}, {} strengths, {} concerns, {} questions",
            result.score_match,
            result.points_forts.len(),
            result.points_vigilance.len(),
            result.questions_entretien.len()
        );
        Ok(result)
    }

    pub fn raw_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.raw)?)
    }
}

fn read_score(value: Option<&Value>) -> u8 {
    let score = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    };

    match score {
        Some(s) if (0..=100).contains(&s) => s as u8,
        Some(s) => {
            warn!("score_match {} is outside 0-100, clamping", s);
            s.clamp(0, 100) as u8
        }
        None => 0,
    }
}

fn read_text(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn read_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match object.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Runs one chat request through a transport and parses the answer
pub struct Analyzer<T: ChatTransport> {
    transport: T,
}

impl<T: ChatTransport> Analyzer<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue exactly one request and return the raw message content
    pub async fn request(&self, api_key: &str, request: &ChatRequest) -> Result<String> {
        self.transport.send(api_key, request).await
    }

    pub async fn analyze(&self, api_key: &str, request: &ChatRequest) -> Result<AnalysisResult> {
        let content = self.request(api_key, request).await?;
        AnalysisResult::from_content(&content)
    }
}
