//! Budget derivation

use tracing::debug;

use super::TravelStyle;

/// Tier directive used when the traveler fixes the budget themselves
pub const DYNAMIC_TIER: &str = "Dynamic (AI MUST decide the best travel style strictly based on this exact budget)";

/// What the generator is told about the travel style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierDescriptor {
    /// Generator picks the style to fit a custom budget
    Dynamic,
    /// Fixed style from the tier table
    Style(TravelStyle),
}

impl TierDescriptor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dynamic => DYNAMIC_TIER,
            Self::Style(style) => style.label(),
        }
    }
}

impl std::fmt::Display for TierDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of budget derivation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetPlan {
    /// Total trip budget in rupees, unrounded
    pub actual_budget: f64,
    pub tier: TierDescriptor,
}

/// Derive the trip budget
///
/// A positive `custom_budget` wins outright. Otherwise the style's base
/// rate (per person, per three days) is scaled by `days / 3` and the group
/// size, in real arithmetic.
pub fn derive_budget(style: TravelStyle, days: u32, group_size: u32, custom_budget: u64) -> BudgetPlan {
    debug!(?style, days, group_size, custom_budget, "derive_budget: called");
    if custom_budget > 0 {
        debug!("derive_budget: custom budget set, dynamic tier");
        return BudgetPlan {
            actual_budget: custom_budget as f64,
            tier: TierDescriptor::Dynamic,
        };
    }

    let actual_budget = style.base_rate() * (f64::from(days) / 3.0) * f64::from(group_size);
    debug!(actual_budget, "derive_budget: derived from tier table");
    BudgetPlan {
        actual_budget,
        tier: TierDescriptor::Style(style),
    }
}

/// Per-person share, rounded half-to-even
pub fn per_person_share(actual_budget: f64, group_size: u32) -> i64 {
    let share = (actual_budget / f64::from(group_size.max(1))).round_ties_even();
    debug!(actual_budget, group_size, share, "per_person_share: called");
    share as i64
}

/// Render an amount as rupees: whole amounts without decimals, others with two
pub fn format_rupees(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("₹{}", amount as i64)
    } else {
        format!("₹{:.2}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tier_table_four_day_solo_backpacker() {
        let plan = derive_budget(TravelStyle::Backpacker, 4, 1, 0);
        assert_eq!(plan.actual_budget, 3000.0 * (4.0 / 3.0));
        assert_eq!(plan.tier, TierDescriptor::Style(TravelStyle::Backpacker));
    }

    #[test]
    fn test_short_trips_scale_by_thirds() {
        let plan = derive_budget(TravelStyle::Explorer, 1, 1, 0);
        assert_eq!(plan.actual_budget, 2000.0);

        let plan = derive_budget(TravelStyle::Backpacker, 2, 1, 0);
        assert_eq!(plan.actual_budget, 3000.0 * (2.0 / 3.0));
        assert_eq!(plan.actual_budget, 2000.0);

        let plan = derive_budget(TravelStyle::Comfort, 5, 3, 0);
        assert_eq!(plan.actual_budget, 12000.0 * (5.0 / 3.0) * 3.0);
    }

    #[test]
    fn test_custom_budget_is_dynamic() {
        let plan = derive_budget(TravelStyle::Comfort, 9, 5, 25_000);
        assert_eq!(plan.actual_budget, 25_000.0);
        assert_eq!(plan.tier, TierDescriptor::Dynamic);
        assert!(plan.tier.as_str().starts_with("Dynamic"));
    }

    #[test]
    fn test_per_person_share_example() {
        assert_eq!(per_person_share(12_000.0, 4), 3000);
        assert_eq!(format!("₹{}", per_person_share(12_000.0, 4)), "₹3000");
    }

    #[test]
    fn test_per_person_share_ties_to_even() {
        assert_eq!(per_person_share(5.0, 2), 2);
        assert_eq!(per_person_share(7.0, 2), 4);
        assert_eq!(per_person_share(4000.0, 3), 1333);
    }

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(4000.0), "₹4000");
        assert_eq!(format_rupees(4000.5), "₹4000.50");
        assert_eq!(format_rupees(2000.0), "₹2000");
    }

    proptest! {
        #[test]
        fn prop_tier_formula_exact(days in 1u32..=14, group in 1u32..=50, idx in 0usize..3) {
            let style = TravelStyle::ALL[idx];
            let plan = derive_budget(style, days, group, 0);
            prop_assert_eq!(plan.actual_budget, style.base_rate() * (f64::from(days) / 3.0) * f64::from(group));
            prop_assert_eq!(plan.tier, TierDescriptor::Style(style));
        }

        #[test]
        fn prop_custom_budget_wins(custom in 1u64..10_000_000, days in 1u32..=14, group in 1u32..=50, idx in 0usize..3) {
            let plan = derive_budget(TravelStyle::ALL[idx], days, group, custom);
            prop_assert_eq!(plan.actual_budget, custom as f64);
            prop_assert_eq!(plan.tier, TierDescriptor::Dynamic);
        }
    }
}
