//! MoodLedger Core Library
//!
//! Shared functionality for the MoodLedger personal finance backend:
//! - Database access and migrations (the persistence collaborator)
//! - Mood record validation and create/upsert
//! - Mood pattern aggregation and spending/mood correlation
//! - Deterministic per-transaction mood scoring
//! - Mood trend analysis over score history
//! - Composite financial health scoring
//! - Rule-based recommendation generation
//!
//! The crate has no network, file, or CLI surface of its own; it is
//! invoked in-process by the collaborator-owned request layer.

pub mod analytics;
pub mod db;
pub mod error;
pub mod models;
pub mod tracker;

pub use analytics::{
    analyze_mood_patterns, analyze_mood_trend, calculate_financial_health_score,
    calculate_mood_score, correlate_spending, generate_recommendations, AnalyticsEngine,
    MoodAnalytics, MoodScore, MoodTrend, RecommendationReport, ScoreContext,
};
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    Account, Mood, MoodInput, MoodRecord, NewMoodRecord, NewTransaction, Timeframe, Transaction,
};
pub use tracker::MoodTracker;
