//! CLI entrypoint for company-research
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use tokio::time::Instant;
use toolkit_application::{
    AgentProgressNotifier, ConversationLogger, NoAgentProgress, ResearchCompanyInput,
    ResearchCompanyUseCase, RunAgentUseCase,
};
use toolkit_domain::DEFAULT_COMPANY;
use toolkit_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiCompatibleGateway, default_tool_set,
};
use toolkit_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting company-research");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate()?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!();
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    let Some(api_key) = config.model.api_key() else {
        bail!(
            "{} is required. Get one at https://openrouter.ai/keys",
            config.model.api_key_env
        );
    };

    // === Dependency Injection ===
    let gateway = Arc::new(
        OpenAiCompatibleGateway::new(config.model.base_url.clone(), Some(api_key))
            .with_timeout(config.model.timeout()),
    );
    let tools = Arc::new(default_tool_set(&config)?);
    info!("Registered tools: {}", tools.names().collect::<Vec<_>>().join(", "));

    let mut agent = RunAgentUseCase::new(gateway, tools);
    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Writing transcript to {}", logger.path().display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                agent = agent.with_conversation_logger(logger);
            }
            None => warn!("Continuing without transcript"),
        }
    }
    let use_case = ResearchCompanyUseCase::new(agent);

    // JSON output stays machine-readable
    let show_progress = !cli.quiet && cli.output == OutputFormat::Report;
    let progress: Box<dyn AgentProgressNotifier> = if show_progress {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(NoAgentProgress)
    };

    let companies = if cli.companies.is_empty() {
        vec![DEFAULT_COMPANY.to_string()]
    } else {
        cli.companies.clone()
    };

    let mut failures = 0usize;
    for company in &companies {
        if show_progress {
            println!();
            println!("{} {}", "Researching".cyan().bold(), company.bold());
        }

        let input = ResearchCompanyInput::new(company.clone(), config.model.name.clone())
            .with_execution(config.agent.to_execution_params());

        let started = Instant::now();
        match use_case.execute(input, progress.as_ref()).await {
            Ok(report) => {
                info!(
                    company = %company,
                    turns = report.turns,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Research finished"
                );
                let output = match cli.output {
                    OutputFormat::Report => ConsoleFormatter::format(&report),
                    OutputFormat::Json => ConsoleFormatter::format_json(&report),
                };
                println!("{}", output);
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", "Error".red().bold(), company, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} research run(s) failed", failures, companies.len());
    }

    Ok(())
}

/// Install the tracing subscriber; diagnostics go to stderr or `log_file`.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// CLI flags win over every configuration source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.model.name = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.model.base_url = base_url.clone();
    }
    if let Some(max_turns) = cli.max_turns {
        config.agent.max_turns = max_turns;
    }
    if cli.parallel_tools {
        config.agent.parallel_tool_calls = true;
    }
    if let Some(path) = &cli.conversation_log {
        config.logging.conversation_log = Some(path.clone());
    }
}
