//! Report model and output formatters

pub mod report;
pub mod formatter;

pub use formatter::{ReportGenerator, save_report_to_file};
pub use report::{ScoreBand, ScreeningReport};
