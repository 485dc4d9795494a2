//! Smart-screener: recruiter assistant that scores a resume against a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use smart_screener::cli::{self, Cli, Commands, ConfigAction};
use smart_screener::config::{mask_secret, Config};
use smart_screener::input::InputManager;
use smart_screener::llm::OpenAiTransport;
use smart_screener::output::formatter::suggest_filename;
use smart_screener::output::{save_report_to_file, ReportGenerator, ScreeningReport};
use smart_screener::processing::{ScreeningRequest, ScreeningSession, Stage};
use smart_screener::{Result, ScreenerError};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("{}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            api_key,
            output,
            save,
            raw,
            no_color,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ScreenerError::Validation)?,
                None => config.output.format,
            };

            let use_colors = !no_color && config.output.color_output && save.is_none();
            if !use_colors {
                colored::control::set_override(false);
            }

            // Load failures are reported by the validation stage, in check order
            let input_manager = InputManager::new();
            let resume_doc = input_manager.load_resume(&resume).await;
            let job_description = match (job, job_text) {
                (Some(path), _) => input_manager.load_job_description(&path).await,
                (None, Some(text)) => Ok(text),
                (None, None) => Ok(String::new()),
            };

            let transport = OpenAiTransport::new(&config.provider.base_url, config.request_timeout())?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(120));

            let mut session = ScreeningSession::new(transport).with_observer(Box::new(move |stage: &Stage| {
                if stage.is_terminal() {
                    spinner.finish_and_clear();
                } else {
                    spinner.set_message(stage.to_string());
                }
            }));

            let request = ScreeningRequest::new(config.resolve_api_key(api_key), String::new(), None)
                .with_loaded_job_description(job_description)
                .with_loaded_resume(resume_doc);
            let outcome = session.run(request).await?;

            let report = ScreeningReport::from_outcome(outcome);
            let generator = ReportGenerator::with_options(use_colors, raw || config.output.show_raw_json);
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(output_format, &report.inputs.resume_file, true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    info!("Report saved to {}", path.display());
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration\n");
                    println!("File: {}", path.display());
                    println!("Provider URL: {}", config.provider.base_url);
                    println!("Request timeout: {}s", config.provider.timeout_secs);
                    println!(
                        "Stored API key: {}",
                        config
                            .provider
                            .api_key
                            .as_deref()
                            .map(mask_secret)
                            .unwrap_or_else(|| "(none)".to_string())
                    );
                    println!("Output format: {:?}", config.output.format);
                    println!("Colors: {}", config.output.color_output);
                    println!("Raw JSON view: {}", config.output.show_raw_json);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}
