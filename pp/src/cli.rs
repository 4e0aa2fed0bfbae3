//! CLI command definitions and subcommands

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::FormDefaults;
use crate::trip::{DateWindow, TravelStyle, TravelerType, TripRequest, parse_date_field};

/// PocketPath - Smart 'Jugaad' travel planning
#[derive(Parser)]
#[command(
    name = "pp",
    about = "Budget-aware trip itineraries, generated and rendered in the terminal",
    version = env!("CARGO_PKG_VERSION"),
    after_help = generate_after_help(),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute; none launches the TUI
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an itinerary without the TUI
    Plan {
        #[command(flatten)]
        trip: TripArgs,

        /// Also export the itinerary as a PDF
        #[arg(long)]
        pdf: bool,

        /// Directory for the PDF (defaults to export.dir from config)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Print the assembled prompt and derived budget without calling the generator
    Prompt {
        #[command(flatten)]
        trip: TripArgs,
    },
}

/// Trip form fields as flags
#[derive(Debug, Clone, Args)]
pub struct TripArgs {
    /// Departure city (defaults to defaults.origin from config)
    #[arg(short, long)]
    pub origin: Option<String>,

    /// Where to go
    #[arg(short, long, default_value = "")]
    pub destination: String,

    /// Group travel with this many people (at least 2); omit for solo
    #[arg(short, long, value_name = "N")]
    pub group: Option<u32>,

    /// Trip length in days, 1-14
    #[arg(long, value_name = "N", conflicts_with_all = ["from", "to", "dates"])]
    pub days: Option<u32>,

    /// Plan with explicit dates, even if only one endpoint is given
    #[arg(long)]
    pub dates: bool,

    /// First day of the trip (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Fixed total budget in rupees; 0 lets the generator pick the style
    #[arg(short, long, default_value_t = 0)]
    pub budget: u64,

    /// Travel style used when no budget is given
    #[arg(short, long, value_enum, default_value_t = TravelStyle::Backpacker)]
    pub style: TravelStyle,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    match parse_date_field(s) {
        Ok(Some(date)) => Ok(date),
        Ok(None) => Err("date is empty".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

impl TripArgs {
    /// Build the request the session submits, filling gaps from config
    pub fn to_request(&self, defaults: &FormDefaults) -> TripRequest {
        debug!(?self, "TripArgs::to_request: called");
        let (traveler_type, group_size) = match self.group {
            Some(n) => (TravelerType::Group, n),
            None => (TravelerType::Solo, defaults.group_size),
        };

        let window = if self.dates || self.from.is_some() || self.to.is_some() {
            DateWindow::from_endpoints(self.from, self.to)
        } else {
            DateWindow::duration(self.days.unwrap_or(defaults.duration_days))
        };

        TripRequest {
            origin: self.origin.clone().unwrap_or_else(|| defaults.origin.clone()),
            destination: self.destination.clone(),
            traveler_type,
            group_size,
            window,
            custom_budget: self.budget,
            style: self.style,
        }
    }
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pocketpath")
        .join("logs")
        .join("pocketpath.log")
}

/// After-help text: key status and log location
pub fn generate_after_help() -> String {
    let key_status = |var: &str| {
        let set = std::env::var(var).map(|v| !v.trim().is_empty()).unwrap_or(false);
        format!("  {} {}\n", if set { "\u{2705}" } else { "\u{274C}" }, var)
    };

    let mut help = String::new();
    help.push_str("API keys (default env vars):\n");
    help.push_str(&key_status("GEMINI_API_KEY"));
    help.push_str(&key_status("UNSPLASH_API_KEY"));
    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(cli: Cli) -> TripArgs {
        match cli.command {
            Some(Command::Plan { trip, .. }) | Some(Command::Prompt { trip }) => trip,
            None => panic!("expected a subcommand"),
        }
    }

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["pp"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_plan_defaults() {
        let cli = Cli::parse_from(["pp", "plan", "--destination", "Goa"]);
        assert!(matches!(cli.command, Some(Command::Plan { pdf: false, out: None, .. })));

        let request = trip(cli).to_request(&FormDefaults::default());
        assert_eq!(request.origin, "Mumbai");
        assert_eq!(request.destination, "Goa");
        assert_eq!(request.traveler_type, TravelerType::Solo);
        assert_eq!(request.window, DateWindow::Duration(4));
        assert_eq!(request.custom_budget, 0);
        assert_eq!(request.style, TravelStyle::Backpacker);
    }

    #[test]
    fn test_cli_parse_group_and_style() {
        let cli = Cli::parse_from([
            "pp", "prompt", "-d", "Leh", "-o", "Delhi", "--group", "5", "--days", "9", "--style", "comfort",
        ]);
        let request = trip(cli).to_request(&FormDefaults::default());
        assert_eq!(request.origin, "Delhi");
        assert_eq!(request.traveler_type, TravelerType::Group);
        assert_eq!(request.effective_group_size(), 5);
        assert_eq!(request.window, DateWindow::Duration(9));
        assert_eq!(request.style, TravelStyle::Comfort);
    }

    #[test]
    fn test_cli_parse_date_range() {
        let cli = Cli::parse_from(["pp", "plan", "-d", "Goa", "--from", "2026-01-10", "--to", "2026-01-12"]);
        let request = trip(cli).to_request(&FormDefaults::default());
        assert_eq!(request.window.resolve().days, 3);
    }

    #[test]
    fn test_cli_dates_flag_without_endpoints_is_incomplete() {
        let cli = Cli::parse_from(["pp", "plan", "-d", "Goa", "--dates", "--from", "2026-01-10"]);
        let request = trip(cli).to_request(&FormDefaults::default());
        assert_eq!(request.window, DateWindow::Incomplete);
    }

    #[test]
    fn test_cli_days_clamped() {
        let cli = Cli::parse_from(["pp", "plan", "-d", "Goa", "--days", "30"]);
        let request = trip(cli).to_request(&FormDefaults::default());
        assert_eq!(request.window, DateWindow::Duration(14));
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["pp", "plan", "-d", "Goa", "--from", "10/01/2026"]).is_err());
    }

    #[test]
    fn test_cli_days_conflicts_with_dates() {
        assert!(Cli::try_parse_from(["pp", "plan", "-d", "Goa", "--days", "3", "--from", "2026-01-10"]).is_err());
    }

    #[test]
    fn test_cli_with_config_and_pdf() {
        let cli = Cli::parse_from(["pp", "-c", "/path/to/pp.yml", "plan", "-d", "Goa", "--pdf", "--out", "/tmp/x"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/pp.yml")));
        assert!(matches!(cli.command, Some(Command::Plan { pdf: true, out: Some(_), .. })));
    }
}
