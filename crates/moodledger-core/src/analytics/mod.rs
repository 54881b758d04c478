//! Mood Analytics - spending/mood correlation and financial scoring
//!
//! The analytical heart of MoodLedger. Every function here is a pure,
//! synchronous transformation over in-memory record collections; the only
//! I/O lives in the `engine` orchestrator, which reads through the
//! injected storage collaborator before handing off to the pure passes.
//!
//! ## Analysis passes
//!
//! - **Pattern Aggregator** - per-mood / per-category counts and averages
//! - **Spending Correlator** - emotional vs planned buckets plus insights
//! - **Mood Scoring** - deterministic 0-100 score per transaction
//! - **Trend Analyzer** - recent-vs-prior mood score windows
//! - **Health Scorer** - savings/diversity/consistency composite
//! - **Recommendations** - ordered predicate→message rules
//!
//! ## Usage
//!
//! ```rust,ignore
//! use moodledger_core::analytics::AnalyticsEngine;
//!
//! let engine = AnalyticsEngine::new(db);
//! let analytics = engine.user_mood_analytics(user_id, Timeframe::Month)?;
//! let report = engine.mood_recommendations(user_id)?;
//! ```

pub mod correlation;
pub mod engine;
pub mod health;
pub mod patterns;
pub mod recommendations;
pub mod scoring;
pub mod trend;
pub mod types;

pub use correlation::correlate_spending;
pub use engine::AnalyticsEngine;
pub use health::{
    calculate_financial_health_score, expense_diversity, spending_consistency,
    NEUTRAL_HEALTH_SCORE,
};
pub use patterns::analyze_mood_patterns;
pub use recommendations::{generate_recommendations, RecommendationContext};
pub use scoring::calculate_mood_score;
pub use trend::analyze_mood_trend;
pub use types::{
    BudgetStatus, CategoryAggregate, Insight, InsightKind, MoodAggregate, MoodAnalytics,
    MoodCount, MoodPatterns, MoodScore, MoodSpend, MoodSummary, MoodTrend, Recommendation,
    RecommendationKind, RecommendationReport, RecommendationSummary, SavingsTrend, ScoreContext,
    ScorePoint, Severity, SpendingCorrelation, Trend,
};
