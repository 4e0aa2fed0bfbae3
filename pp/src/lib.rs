//! PocketPath - Smart 'Jugaad' travel planning
//!
//! PocketPath collects a handful of trip parameters, derives a budget from
//! them, asks a hosted text generator for a day-by-day itinerary and renders
//! the Markdown it gets back, in a terminal UI or headless from the CLI.
//!
//! # Core Concepts
//!
//! - **Derived budget**: a custom budget wins; otherwise the travel style's
//!   base rate is scaled by trip length and group size
//! - **One session, two phases**: collecting input, then presenting a plan
//! - **Cosmetic backdrop**: image search failures silently fall back
//!
//! # Modules
//!
//! - [`trip`] - Trip parameters, budget derivation, date windows
//! - [`prompts`] - Itinerary prompt templates
//! - [`llm`] - Text generation clients (Gemini, OpenAI)
//! - [`background`] - Backdrop image search and contrast colors
//! - [`session`] - The collecting/presenting state machine
//! - [`export`] - PDF export
//! - [`tui`] - Terminal UI
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod background;
pub mod cli;
pub mod config;
pub mod export;
pub mod llm;
pub mod prompts;
pub mod session;
pub mod trip;
pub mod tui;

// Re-export commonly used types
pub use background::{Background, BackgroundQuery, BackgroundSelector, ImageSearch, contrast_text_color};
pub use config::{BackgroundConfig, Config, LlmConfig};
pub use export::{ExportError, export_pdf, render_pdf};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, create_client};
pub use prompts::{PromptContext, PromptLoader};
pub use session::{Itinerary, MISSING_DESTINATION, Phase, PreparedPrompt, Session, SubmitError, prepare};
pub use trip::{BudgetPlan, DateWindow, TravelStyle, TravelerType, TripRequest, derive_budget};
