use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use serde::{Deserialize, Serialize};
use serde_json;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use caseledger::cli::{Cli, Commands};
use caseledger::defaults;
use caseledger::{
    CancelToken, Config, CsvFileSink, LineSource, PromptSource, RecordedSource,
    ResultRecorder, ResultSource, Status, SuiteManifest, Summary, TestSuite,
};

/// JSON response structure for --json output mode
#[derive(Serialize, Deserialize)]
struct JsonResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl JsonResponse {
    fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }

    fn print(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Failed to serialize JSON response: {}", e),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let json_mode = cli.json;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "caseledger", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load()
        .await
        .context("Failed to load configuration")?;
    init_tracing(&config.log_level);

    let result = match command {
        Commands::Init { path, force } => handle_init_command(path, force, json_mode).await,
        Commands::Run {
            manifest,
            output,
            from,
            stdin,
        } => handle_run_command(&config, &manifest, output, from, stdin, json_mode).await,
        Commands::Summary { results } => handle_summary_command(&results, json_mode),
        Commands::Show { results } => handle_show_command(&results, json_mode),
        Commands::Completion { .. } => Ok(()),
    };

    match result {
        Err(e) if json_mode => {
            JsonResponse::error(format!("{:#}", e)).print();
            std::process::exit(1);
        }
        other => other,
    }
}

fn init_tracing(config_level: &str) {
    let filter = EnvFilter::try_from_env(defaults::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

async fn handle_init_command(path: Option<PathBuf>, force: bool, json_mode: bool) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(defaults::DEFAULT_MANIFEST_NAME));

    if path.exists() && !force {
        anyhow::bail!(
            "Suite manifest already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let manifest = SuiteManifest::sample();
    manifest.save(&path).await?;

    if json_mode {
        JsonResponse::success(serde_json::json!({
            "manifest": path,
            "suite": manifest.name,
            "cases": manifest.cases.len(),
        }))
        .print();
    } else {
        println!(
            "{} Wrote suite manifest {} ({} cases)",
            "✅".green(),
            path.display().to_string().bright_blue(),
            manifest.cases.len()
        );
    }

    Ok(())
}

async fn handle_run_command(
    config: &Config,
    manifest: &Path,
    output: Option<PathBuf>,
    from: Option<PathBuf>,
    stdin: bool,
    json_mode: bool,
) -> Result<()> {
    let suite = SuiteManifest::load(manifest).await?.into_suite();
    let output = output.unwrap_or_else(|| config.results_path.clone());

    let recorded = match &from {
        Some(path) => Some(
            ResultRecorder::read_path(path)
                .with_context(|| format!("Failed to read recorded results {}", path.display()))?,
        ),
        None => None,
    };

    let cancel = CancelToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!(
                "{} Cancellation requested, stopping after the current case",
                "⚠".yellow()
            );
            signal_token.cancel();
        }
    });

    if !json_mode {
        println!(
            "\n{} Executing Test Suite: {}\n",
            "▶".bright_green(),
            suite.name().bold()
        );
    }

    let prompt = config.prompt.clone();
    let (suite, run) = tokio::task::spawn_blocking(move || {
        let mut suite = suite;
        let mut source: Box<dyn ResultSource> = match recorded {
            Some(rows) => Box::new(RecordedSource::from_rows(rows)),
            None if stdin => Box::new(LineSource::new(io::stdin().lock())),
            None => Box::new(PromptSource::new(prompt)),
        };
        let run = suite.run_all_with_cancel(source.as_mut(), &cancel);
        (suite, run)
    })
    .await
    .context("Suite execution task failed")?;

    // Whatever was recorded is exported, even when the run stopped early
    let mut sink = CsvFileSink::new(&output);
    suite
        .export_results(&mut sink)
        .context("Failed to export results")?;

    let run = run.context("Suite run aborted")?;
    let summary = suite.summarize();

    if json_mode {
        JsonResponse::success(serde_json::json!({
            "run": run,
            "results": output,
            "summary": summary,
        }))
        .print();
    } else {
        if run.cancelled {
            println!(
                "{} Run cancelled after {} of {} cases",
                "⚠".yellow(),
                run.recorded,
                suite.len()
            );
        }
        println!(
            "{} Results saved to {}",
            "💾".bright_black(),
            output.display().to_string().bright_blue()
        );
        print_summary(&summary);
    }

    Ok(())
}

fn handle_summary_command(results: &Path, json_mode: bool) -> Result<()> {
    let suite = load_results(results)?;
    let summary = suite.summarize();

    if json_mode {
        JsonResponse::success(serde_json::json!({
            "results": results,
            "summary": summary,
        }))
        .print();
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn handle_show_command(results: &Path, json_mode: bool) -> Result<()> {
    let suite = load_results(results)?;

    if json_mode {
        let cases: Vec<_> = suite.cases().map(|case| case.describe()).collect();
        JsonResponse::success(serde_json::json!({ "cases": cases })).print();
        return Ok(());
    }

    if suite.is_empty() {
        println!("{} No test cases recorded", "ℹ️".bright_blue());
        return Ok(());
    }

    for case in suite.cases() {
        println!("  {} {}", status_icon(case.status()), case.describe());
    }

    Ok(())
}

fn load_results(results: &Path) -> Result<TestSuite> {
    let name = results
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());

    TestSuite::load_csv(name, results)
        .with_context(|| format!("Failed to read results file {}", results.display()))
}

fn status_icon(status: &Status) -> ColoredString {
    match status {
        Status::Pass => "✓".green(),
        Status::Fail => "✗".red(),
        Status::NotExecuted => "○".bright_black(),
        Status::Other(_) => "?".yellow(),
    }
}

fn print_summary(summary: &Summary) {
    println!("\n{}", "--- Test Execution Summary ---".bold());
    println!("Total Tests       : {}", summary.total);
    println!("Passed Tests      : {}", summary.passed.to_string().green());
    println!("Failed Tests      : {}", summary.failed.to_string().red());
    println!("Not Executed Tests: {}", summary.not_executed);
    if summary.other > 0 {
        println!(
            "Other Status Tests: {}",
            summary.other.to_string().yellow()
        );
    }
}
