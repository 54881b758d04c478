//! Rule-based recommendation generation
//!
//! Each rule is a pure predicate→message function over the aggregate
//! analysis; rules are evaluated in a fixed order.

use crate::analytics::types::{Recommendation, RecommendationKind, Severity};

/// Stressed-mood annotations above this count trigger the stress rule
const STRESSED_COUNT_THRESHOLD: usize = 5;

/// Health scores below this trigger the financial-health rule
const LOW_HEALTH_THRESHOLD: u8 = 60;

/// Aggregate numbers the recommendation rules are evaluated against
#[derive(Debug, Clone, Default)]
pub struct RecommendationContext {
    pub stressed_count: usize,
    pub emotional_spending: f64,
    pub planned_spending: f64,
    pub financial_health_score: u8,
}

/// The rule set, in evaluation order
const RULES: &[fn(&RecommendationContext) -> Option<Recommendation>] = &[
    emotional_spending_rule,
    stress_management_rule,
    financial_health_rule,
];

/// Run every rule against the context and collect the advisories
pub fn generate_recommendations(ctx: &RecommendationContext) -> Vec<Recommendation> {
    RULES.iter().filter_map(|rule| rule(ctx)).collect()
}

/// Any emotional spending at all warrants a mindfulness nudge
pub fn emotional_spending_rule(ctx: &RecommendationContext) -> Option<Recommendation> {
    if ctx.emotional_spending <= 0.0 {
        return None;
    }
    Some(Recommendation {
        kind: RecommendationKind::EmotionalSpending,
        title: "Mindful Spending".to_string(),
        message: format!(
            "You've spent ${:.2} on emotionally-driven purchases recently. \
             Pausing before checkout can help these feel intentional.",
            ctx.emotional_spending
        ),
        priority: Severity::Medium,
    })
}

/// Repeated stressed annotations suggest the spending itself is a coping
/// mechanism
pub fn stress_management_rule(ctx: &RecommendationContext) -> Option<Recommendation> {
    if ctx.stressed_count <= STRESSED_COUNT_THRESHOLD {
        return None;
    }
    Some(Recommendation {
        kind: RecommendationKind::StressManagement,
        title: "Stress Check-In".to_string(),
        message: format!(
            "{} of your recent purchases were tagged as stressed. \
             Consider a no-spend buffer on hard days.",
            ctx.stressed_count
        ),
        priority: Severity::Medium,
    })
}

/// Low composite health deserves the loudest advisory
pub fn financial_health_rule(ctx: &RecommendationContext) -> Option<Recommendation> {
    if ctx.financial_health_score >= LOW_HEALTH_THRESHOLD {
        return None;
    }
    Some(Recommendation {
        kind: RecommendationKind::FinancialHealth,
        title: "Financial Health Needs Attention".to_string(),
        message: format!(
            "Your financial health score is {} out of 100. \
             Reviewing your savings rate and daily spending could lift it.",
            ctx.financial_health_score
        ),
        priority: Severity::High,
    })
}
