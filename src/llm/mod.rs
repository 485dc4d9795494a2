//! LLM integration module

pub mod prompts;
pub mod client;
pub mod analyzer;

pub use analyzer::{AnalysisResult, Analyzer};
pub use client::{ChatTransport, OpenAiTransport};
pub use prompts::{ChatRequest, SYSTEM_INSTRUCTION};
