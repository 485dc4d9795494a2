//! Smart-screener library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod llm;
pub mod output;

pub use error::{ErrorKind, Result, ScreenerError};
pub use config::Config;
