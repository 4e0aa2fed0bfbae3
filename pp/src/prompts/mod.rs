//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files for itinerary generation.
//!
//! Template loading chain:
//! 1. `.pocketpath/prompts/{name}.pmt` (user override)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{ITINERARY_TEMPLATE, PromptContext, PromptLoader};
