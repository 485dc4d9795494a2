//! Output formatters: console, JSON, Markdown and a two-column HTML report

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::{ScoreBand, ScreeningReport};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

const ORANGE: Color = Color::TrueColor { r: 255, g: 165, b: 0 };

/// Trait for rendering a screening report
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    show_raw: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Smart-Screener - {{ resume_file }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            margin: 0 auto;
            max-width: 1200px;
            padding: 20px;
            background: #f8f9fa;
        }
        .columns {
            display: grid;
            grid-template-columns: 1fr 1fr;
            gap: 24px;
        }
        .panel {
            background: white;
            padding: 24px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .job-text {
            white-space: pre-wrap;
            background: #f1f3f5;
            padding: 12px;
            border-radius: 6px;
        }
        .score {
            text-align: center;
            border: 2px solid #f0f2f6;
            padding: 20px;
            border-radius: 10px;
        }
        .score h1 { font-size: 60px; margin: 0; }
        .score-green { color: green; }
        .score-orange { color: orange; }
        .score-red { color: red; }
        .synthesis {
            background: #e6f4ea;
            padding: 12px;
            border-radius: 6px;
            margin: 16px 0;
        }
        pre.raw {
            background: #272822;
            color: #f8f8f2;
            padding: 12px;
            overflow-x: auto;
        }
        .metadata { color: #6c757d; font-size: 0.9em; margin-top: 24px; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Smart-Screener</h1>
    <div class="columns">
        <div class="panel">
            <h2>1. Inputs</h2>
            <p><strong>Resume:</strong> {{ resume_file }} ({{ resume_pages }} page(s), {{ resume_chars }} characters)</p>
            <h3>Job description</h3>
            <div class="job-text">{{ job_description }}</div>
        </div>
        <div class="panel">
            <h2>2. Analysis</h2>
            <div class="score">
                <h2>Compatibility</h2>
                <h1 class="score-{{ score_band }}">{{ score }}/100</h1>
                <p>{{ verdict }}</p>
            </div>
            <div class="synthesis"><strong>Summary:</strong> {{ synthese }}</div>

            <h3>Strengths</h3>
            <ul>
            {% for point in points_forts %}
                <li>{{ point }}</li>
            {% endfor %}
            </ul>

            <h3>Concerns</h3>
            <ul>
            {% for point in points_vigilance %}
                <li>{{ point }}</li>
            {% endfor %}
            </ul>

            <h3>Interview questions</h3>
            <ol>
            {% for question in questions_entretien %}
                <li><strong>{{ question }}</strong></li>
            {% endfor %}
            </ol>

            <details>
                <summary>Raw JSON</summary>
                <pre class="raw">{{ raw_json }}</pre>
            </details>
        </div>
    </div>
    <div class="metadata">
        Generated {{ generated_at }} by Smart-Screener v{{ version }} with {{ model }} in {{ processing_time }}ms
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    resume_file: String,
    resume_pages: usize,
    resume_chars: usize,
    job_description: String,
    score: u8,
    score_band: &'static str,
    verdict: &'static str,
    synthese: String,
    points_forts: Vec<String>,
    points_vigilance: Vec<String>,
    questions_entretien: Vec<String>,
    raw_json: String,
    generated_at: String,
    version: String,
    model: String,
    processing_time: u64,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, show_raw: bool) -> Self {
        Self { use_colors, show_raw }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn band_color(band: ScoreBand) -> Color {
        match band {
            ScoreBand::Green => Color::Green,
            ScoreBand::Orange => ORANGE,
            ScoreBand::Red => Color::Red,
        }
    }

    fn format_score_badge(&self, score: u8, band: ScoreBand) -> String {
        let badge = format!("{}/100", score);
        if self.use_colors {
            format!("[{}] {}", badge.color(Self::band_color(band)).bold(), band.verdict())
        } else {
            format!("[{}] {} ({})", badge, band.verdict(), band.name())
        }
    }

    fn format_list(&self, output: &mut String, items: &[String], bullet: &str, color: Color) {
        if items.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("(none)", Color::BrightBlack)));
            return;
        }
        for item in items {
            output.push_str(&format!("  {} {}\n", bullet, self.colorize(item, color)));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header("Compatibility"));
        output.push_str(&format!(
            "{}\n",
            self.format_score_badge(analysis.score_match, report.score_band)
        ));
        output.push_str(&format!(
            "\n{} {}\n",
            self.colorize("Summary:", Color::Cyan),
            analysis.synthese
        ));

        output.push_str(&self.format_header("Strengths"));
        self.format_list(&mut output, &analysis.points_forts, "•", Color::Green);

        output.push_str(&self.format_header("Concerns"));
        self.format_list(&mut output, &analysis.points_vigilance, "•", Color::Yellow);

        output.push_str(&self.format_header("Interview questions"));
        self.format_list(&mut output, &analysis.questions_entretien, "?", Color::White);

        if self.show_raw {
            output.push_str(&self.format_header("Raw JSON"));
            output.push_str(&report.raw_json_pretty());
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{}\n",
            self.colorize(
                &format!(
                    "Resume: {} ({} page(s)) | Model: {} | {}ms",
                    report.inputs.resume_file,
                    report.inputs.resume_pages,
                    report.metadata.model,
                    report.metadata.processing_time_ms
                ),
                Color::BrightBlack
            )
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Green => "🟢",
            ScoreBand::Orange => "🟠",
            ScoreBand::Red => "🔴",
        }
    }

    fn push_list(output: &mut String, title: &str, items: &[String]) {
        output.push_str(&format!("## {}\n\n", title));
        if items.is_empty() {
            output.push_str("_None_\n\n");
            return;
        }
        for item in items {
            output.push_str(&format!("- {}\n", item.lines().collect::<Vec<_>>().join("\n  ")));
        }
        output.push('\n');
    }

    /// Quote every line, so multi-line text stays inside the blockquote
    fn blockquote(text: &str) -> String {
        text.lines()
            .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {}", line) })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&format!("# Screening: {}\n\n", report.inputs.resume_file));
        output.push_str(&format!(
            "**Compatibility:** {} {}/100 ({})\n\n",
            Self::markdown_score_badge(report.score_band),
            analysis.score_match,
            report.score_band.verdict()
        ));
        output.push_str(&format!("{}\n\n", Self::blockquote(&analysis.synthese)));

        Self::push_list(&mut output, "Strengths", &analysis.points_forts);
        Self::push_list(&mut output, "Concerns", &analysis.points_vigilance);
        Self::push_list(&mut output, "Interview questions", &analysis.questions_entretien);

        output.push_str("<details>\n<summary>Raw JSON</summary>\n\n```json\n");
        output.push_str(&report.raw_json_pretty());
        output.push_str("\n```\n\n</details>\n");

        if self.include_metadata {
            output.push_str(&format!(
                "\n---\n\n*Generated {} by Smart-Screener v{} with {} in {}ms*\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.screener_version,
                report.metadata.model,
                report.metadata.processing_time_ms
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ScreeningReport) -> HtmlTemplate {
        HtmlTemplate {
            include_styles: self.include_styles,
            resume_file: report.inputs.resume_file.clone(),
            resume_pages: report.inputs.resume_pages,
            resume_chars: report.inputs.resume_chars,
            job_description: report.inputs.job_description.clone(),
            score: report.analysis.score_match,
            score_band: report.score_band.name(),
            verdict: report.score_band.verdict(),
            synthese: report.analysis.synthese.clone(),
            points_forts: report.analysis.points_forts.clone(),
            points_vigilance: report.analysis.points_vigilance.clone(),
            questions_entretien: report.analysis.questions_entretien.clone(),
            raw_json: report.raw_json_pretty(),
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            version: report.metadata.screener_version.clone(),
            model: report.metadata.model.clone(),
            processing_time: report.metadata.processing_time_ms,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ScreenerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, show_raw: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, show_raw),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_screening{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_screening{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_screening{}.md", base_name, timestamp_suffix),
        OutputFormat::Html => format!("{}_screening{}.html", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::analyzer::AnalysisResult;
    use crate::processing::session::ScreeningOutcome;

    fn report(content: &str) -> ScreeningReport {
        let outcome = ScreeningOutcome {
            result: AnalysisResult::from_content(content).unwrap(),
            resume_file: "jane_doe.pdf".to_string(),
            resume_pages: 1,
            resume_chars: 512,
            job_description: "Rust engineer <remote>".to_string(),
            processing_time_ms: 1500,
        };
        ScreeningReport::from_outcome(&outcome)
    }

    fn green_report() -> ScreeningReport {
        report(r#"{"score_match": 82, "synthese": "Strong match", "points_forts": ["A"], "points_vigilance": [], "questions_entretien": ["Q1"]}"#)
    }

    #[test]
    fn test_console_output_without_colors() {
        let output = ConsoleFormatter::new(false, false)
            .format_report(&green_report())
            .unwrap();

        assert!(output.contains("[82/100] Strong fit (green)"));
        assert!(output.contains("Summary: Strong match"));
        assert!(output.contains("  • A\n"));
        assert!(output.contains("  ? Q1\n"));
        assert!(output.contains("(none)"));
        assert!(!output.contains("Raw JSON"));
    }

    #[test]
    fn test_console_raw_view() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&green_report())
            .unwrap();

        assert!(output.contains("Raw JSON"));
        assert!(output.contains("\"score_match\": 82"));
    }

    #[test]
    fn test_json_output() {
        let output = JsonFormatter::new(false).format_report(&green_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["score_band"], "green");
        assert_eq!(value["analysis"]["synthese"], "Strong match");
        assert_eq!(value["raw_response"]["questions_entretien"][0], "Q1");
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(false)
            .format_report(&report(r#"{"score_match": 30, "synthese": "Weak"}"#))
            .unwrap();

        assert!(output.contains("🔴 30/100"));
        assert!(output.contains("> Weak"));
        assert!(output.contains("## Strengths\n\n_None_"));
        assert!(!output.contains("Generated"));
    }

    #[test]
    fn test_markdown_multiline_text_stays_quoted() {
        let output = MarkdownFormatter::new(false)
            .format_report(&report(
                r#"{"score_match": 60, "synthese": "Solid backend\n\nWeak on ops", "points_forts": ["Rust\nand Go"]}"#,
            ))
            .unwrap();

        assert!(output.contains("> Solid backend\n>\n> Weak on ops\n\n"));
        assert!(output.contains("- Rust\n  and Go\n"));
    }

    #[test]
    fn test_html_two_columns_and_escaping() {
        let report = report(r#"{"score_match": 55, "synthese": "<b>mixed</b>", "points_forts": ["Rust & Go"]}"#);
        let output = HtmlFormatter::new(true).format_report(&report).unwrap();

        assert!(output.contains("class=\"columns\""));
        assert!(output.contains("score-orange"));
        assert!(output.contains("55/100"));
        assert!(output.contains("mixed"));
        assert!(!output.contains("<b>mixed"));
        assert!(output.contains("Go"));
        assert!(!output.contains("Rust & Go"));
        assert!(output.contains("Rust engineer"));
        assert!(!output.contains("<remote>"));
        assert!(output.contains("<details>"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false);
        let report = green_report();

        let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let html = generator.generate_report(&report, OutputFormat::Html).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));

        assert_eq!(ConsoleFormatter::new(false, false).supports_format(), OutputFormat::Console);
        assert_eq!(MarkdownFormatter::new(true).supports_format(), OutputFormat::Markdown);
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Html, "cv/jane_doe.pdf", false),
            "jane_doe_screening.html"
        );
        assert!(suggest_filename(OutputFormat::Json, "jane.pdf", true).ends_with(".json"));
    }
}
