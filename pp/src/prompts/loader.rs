//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use crate::trip::{BudgetPlan, ResolvedWindow, format_rupees};

/// Name of the itinerary template
pub const ITINERARY_TEMPLATE: &str = "itinerary";

/// Context for rendering the itinerary template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptContext {
    pub origin: String,
    pub destination: String,
    /// "Solo Traveler" or "Group Travel"
    pub travel_mode: String,
    pub group_size: u32,
    /// Budget already formatted as rupees
    pub budget: String,
    /// Travel window phrase from date resolution
    pub date_info: String,
    /// Style label or dynamic-budget directive
    pub tier: String,
    pub days: u32,
    /// Year the holiday hack searches when no dates are fixed
    pub year: i32,
}

impl PromptContext {
    /// Assemble the context from resolved trip parameters
    pub fn new(
        origin: &str,
        destination: &str,
        travel_mode: &str,
        group_size: u32,
        budget: &BudgetPlan,
        window: &ResolvedWindow,
        year: i32,
    ) -> Self {
        debug!(%origin, %destination, group_size, days = window.days, "PromptContext::new: called");
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            travel_mode: travel_mode.to_string(),
            group_size,
            budget: format_rupees(budget.actual_budget),
            date_info: window.descriptor.clone(),
            tier: budget.tier.to_string(),
            days: window.days,
            year,
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.pocketpath/prompts/`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at `root`
    ///
    /// Looks for overrides in `{root}/.pocketpath/prompts/`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let user_dir = root.as_ref().join(".pocketpath/prompts");
        let user_dir_exists = user_dir.exists();
        debug!(?user_dir, %user_dir_exists, "PromptLoader::new: called");

        Self {
            hbs: Self::engine(),
            user_dir: if user_dir_exists { Some(user_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            user_dir: None,
        }
    }

    /// Plain-text engine: no HTML escaping
    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `.pocketpath/prompts/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found in user override");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read user prompt {}: {}", path.display(), e));
            }
            debug!(?path, "PromptLoader::load_template: not found in user override");
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &PromptContext) -> Result<String> {
        let template = self.load_template(template_name)?;
        info!(
            "Rendering template '{}' for {} -> {} ({} days)",
            template_name, context.origin, context.destination, context.days
        );

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Render the itinerary prompt
    pub fn itinerary_prompt(&self, context: &PromptContext) -> Result<String> {
        self.render(ITINERARY_TEMPLATE, context)
    }
}
