use clap::Parser;
use login_scout::{
    OpenAiOracle, Progress, ProgressSink, Scout, ScoutConfig, ScoutError, WorkflowResult,
};
use std::process::ExitCode;
use std::sync::Arc;

mod args;
use args::Args;

/// Prints progress to stderr so stdout carries only the result
struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn notify(&self, progress: &Progress) {
        eprintln!("{}", progress.message);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    if args.url.trim().is_empty() {
        eprintln!("Please enter a valid URL.");
        return ExitCode::FAILURE;
    }

    match run(&args).await {
        Ok(result) => {
            if let Err(e) = report(&result, args.json) {
                ::log::error!("Failed to print result: {}", e);
                return ExitCode::FAILURE;
            }
            if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            ::log::error!("Failed to start: {}", e);
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<WorkflowResult, ScoutError> {
    let mut config = match &args.config {
        Some(path) => ScoutConfig::from_file(path)?,
        None => ScoutConfig::default(),
    };

    // Command-line flags win over the file
    if let Some(policy) = args.policy {
        config.policy = policy.into();
    }
    if let Some(timeout) = args.timeout {
        config.fetch.timeout_secs = timeout;
    }
    if let Some(model) = &args.model {
        config.oracle.model = model.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.oracle.base_url = base_url.clone();
    }

    ::log::info!("Scouting {} with policy {:?}", args.url, config.policy);

    let oracle = OpenAiOracle::new(&config.oracle, args.api_key.as_str())?;
    Scout::new(Arc::new(oracle))
        .with_config(config)
        .with_progress(Arc::new(ConsoleProgress))
        .run(args.url.trim())
        .await
}

fn report(result: &WorkflowResult, json: bool) -> Result<(), ScoutError> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if result.is_success() {
        println!("Extracted HTML snippet:\n");
        println!("{}", result.snippet_or_message);
        println!("\nTarget URL: {}", result.resolved_url);
    } else {
        println!("ERROR: {}", result.snippet_or_message);
        println!("URL: {}", result.resolved_url);
    }
    Ok(())
}
