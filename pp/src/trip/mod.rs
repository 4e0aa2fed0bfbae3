//! Trip parameters
//!
//! Everything the Input Collector gathers, plus the pure derivations that
//! turn it into a budget and a travel window.

mod budget;
mod dates;

pub use budget::{BudgetPlan, DYNAMIC_TIER, TierDescriptor, derive_budget, format_rupees, per_person_share};
pub use dates::{
    DateError, DateWindow, INCOMPLETE_DATES, MAX_DURATION_DAYS, MIN_DURATION_DAYS, ResolvedWindow, parse_date_field,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum travelers for a group trip
pub const MIN_GROUP_SIZE: u32 = 2;

/// Step used by the custom budget input
pub const BUDGET_STEP: u64 = 1000;

/// Travel style tier with its per-person base rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    /// Hostels, sleeper class, street food
    #[default]
    Backpacker,
    /// Budget hotels and the occasional splurge
    Explorer,
    /// Comfortable stays and AC travel
    Comfort,
}

impl TravelStyle {
    /// All tiers in display order
    pub const ALL: [TravelStyle; 3] = [Self::Backpacker, Self::Explorer, Self::Comfort];

    /// Base rate in rupees per person per three days
    pub fn base_rate(self) -> f64 {
        match self {
            Self::Backpacker => 3000.0,
            Self::Explorer => 6000.0,
            Self::Comfort => 12000.0,
        }
    }

    /// Label sent to the generator and shown on the style cards
    pub fn label(self) -> &'static str {
        match self {
            Self::Backpacker => "Tight (Backpacker)",
            Self::Explorer => "Mid (Explorer)",
            Self::Comfort => "Lux (Comfort)",
        }
    }

    /// Card icon
    pub fn icon(self) -> &'static str {
        match self {
            Self::Backpacker => "🎒",
            Self::Explorer => "📸",
            Self::Comfort => "🏨",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Backpacker => Self::Explorer,
            Self::Explorer => Self::Comfort,
            Self::Comfort => Self::Backpacker,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Backpacker => Self::Comfort,
            Self::Explorer => Self::Backpacker,
            Self::Comfort => Self::Explorer,
        }
    }
}

impl std::fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Solo or group travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TravelerType {
    #[default]
    Solo,
    Group,
}

impl TravelerType {
    /// Mode string used in the prompt
    pub fn label(self) -> &'static str {
        match self {
            Self::Solo => "Solo Traveler",
            Self::Group => "Group Travel",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Solo => Self::Group,
            Self::Group => Self::Solo,
        }
    }
}

impl std::fmt::Display for TravelerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Everything submitted from the Input Collector
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub traveler_type: TravelerType,
    /// Requested group size; only read for group travel
    pub group_size: u32,
    pub window: DateWindow,
    /// Zero lets the generator pick the style from the tier table
    pub custom_budget: u64,
    pub style: TravelStyle,
}

impl Default for TripRequest {
    fn default() -> Self {
        Self {
            origin: "Mumbai".to_string(),
            destination: String::new(),
            traveler_type: TravelerType::Solo,
            group_size: 4,
            window: DateWindow::Duration(4),
            custom_budget: 0,
            style: TravelStyle::Backpacker,
        }
    }
}

impl TripRequest {
    /// Travelers sharing the budget
    ///
    /// Solo is always 1; group travel never goes below [`MIN_GROUP_SIZE`].
    pub fn effective_group_size(&self) -> u32 {
        let size = match self.traveler_type {
            TravelerType::Solo => 1,
            TravelerType::Group => self.group_size.max(MIN_GROUP_SIZE),
        };
        debug!(?self.traveler_type, requested = self.group_size, size, "TripRequest::effective_group_size: called");
        size
    }

    /// Trimmed destination, or None when nothing usable was entered
    pub fn destination(&self) -> Option<&str> {
        let dest = self.destination.trim();
        if dest.is_empty() { None } else { Some(dest) }
    }

    /// Whether the budget is fixed by the traveler instead of the tier table
    pub fn uses_custom_budget(&self) -> bool {
        self.custom_budget > 0
    }
}
