//! PocketPath - Smart 'Jugaad' travel planning
//!
//! CLI entry point: launches the TUI, or plans a trip headless.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use pocketpath::background::BackgroundSelector;
use pocketpath::cli::{Cli, Command, TripArgs, get_log_path};
use pocketpath::config::Config;
use pocketpath::llm::create_client;
use pocketpath::prompts::PromptLoader;
use pocketpath::session::{Session, prepare};
use pocketpath::trip::format_rupees;
use pocketpath::tui;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(provider = %config.llm.provider, model = %config.llm.model, "PocketPath loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan { trip, pdf, out }) => {
            debug!(pdf, ?out, "main: matched Plan command");
            cmd_plan(&config, &trip, pdf, out).await
        }
        Some(Command::Prompt { trip }) => {
            debug!("main: matched Prompt command");
            cmd_prompt(&config, &trip)
        }
        None => {
            debug!("main: no command specified, launching TUI");
            cmd_tui(&config).await
        }
    }
}

/// Build a session from config around the given backdrop selector
fn build_session(config: &Config, backgrounds: BackgroundSelector) -> Result<Session> {
    let llm = create_client(&config.llm).context("Failed to create text generation client")?;
    let prompts = PromptLoader::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    Ok(Session::new(llm, backgrounds, prompts, config.llm.max_tokens))
}

/// Generate an itinerary and print it
async fn cmd_plan(config: &Config, trip: &TripArgs, pdf: bool, out: Option<PathBuf>) -> Result<()> {
    debug!(?trip, "cmd_plan: called");
    let request = trip.to_request(&config.defaults);

    // Validation first, so a missing destination never needs an API key
    prepare(&PromptLoader::embedded_only(), &request)?;

    // Headless: no backdrop, no image search
    let mut session = build_session(config, BackgroundSelector::new(None, &config.background))?;

    let dest = request.destination.trim().to_string();
    println!("{}", format!("Crafting Jugaad plan for {}...", dest).dimmed());
    session.submit(&request).await?;

    let Some(itinerary) = session.itinerary() else {
        return Err(eyre::eyre!("Session did not produce an itinerary"));
    };

    println!();
    println!("{}", format!("🗺️  Epic Plan for {}", itinerary.destination).bold().cyan());
    println!();
    println!("{}", itinerary.markdown);
    println!();
    if itinerary.truncated {
        println!(
            "{}",
            "⚠ The plan was cut short at the token limit. Try fewer days.".yellow().bold()
        );
    }
    println!(
        "{} {}",
        "Paisa Vasool Share (Per Person):".bold(),
        format!("₹{}", itinerary.per_person()).green().bold()
    );

    if pdf {
        let dir = out.unwrap_or_else(|| config.export.dir.clone());
        let (path, bytes) = session.export_pdf(&dir)?;
        println!(
            "{} {} ({} bytes)",
            "📥 Saved".green(),
            path.display().to_string().bold(),
            bytes.len()
        );
    }

    Ok(())
}

/// Print the prompt and budget without calling the generator
fn cmd_prompt(config: &Config, trip: &TripArgs) -> Result<()> {
    debug!(?trip, "cmd_prompt: called");
    let request = trip.to_request(&config.defaults);
    let prompts = PromptLoader::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let prepared = prepare(&prompts, &request)?;

    println!("{}", "Derived budget".bold().underline());
    println!("  {:<12} {}", "Total:", format_rupees(prepared.budget.actual_budget).green());
    println!("  {:<12} {}", "Tier:", prepared.budget.tier);
    println!("  {:<12} {}", "Travelers:", prepared.group_size);
    println!("  {:<12} {}", "Window:", prepared.window.descriptor);
    println!();
    println!("{}", "Prompt".bold().underline());
    println!("{}", prepared.prompt);
    Ok(())
}

/// Launch the interactive TUI
async fn cmd_tui(config: &Config) -> Result<()> {
    debug!("cmd_tui: called");
    let session = build_session(config, BackgroundSelector::from_config(&config.background))?;
    tui::run(session, config).await
}
