//! Analytics orchestration over the storage collaborator
//!
//! Fetches a user's mood records and transactions, runs the pure analysis
//! functions, and assembles the payloads returned to the request layer.
//! All computation is stateless given its inputs; the engine holds nothing
//! but the injected database handle.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use tracing::debug;

use crate::analytics::correlation::correlate_spending;
use crate::analytics::health::{calculate_financial_health_score, NEUTRAL_HEALTH_SCORE};
use crate::analytics::patterns::analyze_mood_patterns;
use crate::analytics::recommendations::{generate_recommendations, RecommendationContext};
use crate::analytics::scoring::calculate_mood_score;
use crate::analytics::trend::analyze_mood_trend;
use crate::analytics::types::{
    MoodAnalytics, MoodTrend, RecommendationReport, RecommendationSummary, ScoreContext,
    ScorePoint,
};
use crate::db::Database;
use crate::error::Result;
use crate::models::{Mood, MoodRecord, Timeframe, Transaction};

/// How many of the latest mood records feed the recommendation report
const RECENT_MOOD_LIMIT: i64 = 50;

/// Transaction lookback for the financial health component, in days
const HEALTH_LOOKBACK_DAYS: i64 = 30;

/// Stateless analytics facade over the persistence collaborator
pub struct AnalyticsEngine {
    db: Database,
}

impl AnalyticsEngine {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Full mood analytics for a user over the given timeframe
    pub fn user_mood_analytics(&self, user_id: i64, timeframe: Timeframe) -> Result<MoodAnalytics> {
        let cutoff = Utc::now() - Duration::days(timeframe.days());
        let moods = self.db.moods_since(user_id, cutoff)?;
        let transactions = self.db.transactions_for_moods(user_id)?;

        debug!(
            user_id,
            timeframe = %timeframe,
            moods = moods.len(),
            "Computing mood analytics"
        );

        Ok(self.assemble_analytics(&moods, &transactions))
    }

    /// Advisory report for a user, derived from their latest mood records
    /// and last-30-days transactions
    pub fn mood_recommendations(&self, user_id: i64) -> Result<RecommendationReport> {
        let moods = self.db.recent_moods(user_id, RECENT_MOOD_LIMIT)?;

        if moods.is_empty() {
            debug!(user_id, "No mood history; returning generic advisory");
            return Ok(RecommendationReport {
                summary: RecommendationSummary {
                    total_moods_tracked: 0,
                    emotional_spending: 0.0,
                    planned_spending: 0.0,
                    financial_health_score: NEUTRAL_HEALTH_SCORE,
                },
                recommendations: vec![],
                analysis: None,
            });
        }

        let annotated = self.db.transactions_for_moods(user_id)?;
        let today = Utc::now().date_naive();
        let recent_transactions = self
            .db
            .transactions_since(user_id, today - Duration::days(HEALTH_LOOKBACK_DAYS))?;

        let analysis = self.assemble_analytics(&moods, &annotated);
        let health_score = calculate_financial_health_score(&recent_transactions, today);
        let stressed_count = moods.iter().filter(|m| m.mood == Mood::Stressed).count();

        let ctx = RecommendationContext {
            stressed_count,
            emotional_spending: analysis.emotional_spending,
            planned_spending: analysis.planned_spending,
            financial_health_score: health_score,
        };
        let recommendations = generate_recommendations(&ctx);

        debug!(
            user_id,
            health_score,
            recommendations = recommendations.len(),
            "Recommendation report assembled"
        );

        Ok(RecommendationReport {
            summary: RecommendationSummary {
                total_moods_tracked: moods.len(),
                emotional_spending: analysis.emotional_spending,
                planned_spending: analysis.planned_spending,
                financial_health_score: health_score,
            },
            recommendations,
            analysis: Some(analysis),
        })
    }

    /// Run the pure analysis passes and merge their outputs
    fn assemble_analytics(
        &self,
        moods: &[MoodRecord],
        transactions: &[Transaction],
    ) -> MoodAnalytics {
        let patterns = analyze_mood_patterns(moods, transactions);
        let correlation = correlate_spending(moods, transactions);
        let trends = mood_score_trend(moods, transactions);

        MoodAnalytics {
            summary: patterns.summary,
            by_mood: patterns.by_mood,
            by_category: patterns.by_category,
            emotional_spending: correlation.emotional_spending,
            planned_spending: correlation.planned_spending,
            mood_correlation: correlation.by_mood,
            trends,
            insights: correlation.insights,
        }
    }
}

/// Derive a mood score history from annotated transactions and label its
/// trend
///
/// Each annotated transaction is scored without financial context and the
/// points are ordered by transaction date.
fn mood_score_trend(moods: &[MoodRecord], transactions: &[Transaction]) -> MoodTrend {
    let tx_by_id: HashMap<i64, &Transaction> =
        transactions.iter().map(|tx| (tx.id, tx)).collect();

    let mut history: Vec<ScorePoint> = moods
        .iter()
        .filter_map(|record| tx_by_id.get(&record.transaction_id))
        .map(|tx| ScorePoint {
            score: calculate_mood_score(tx, &ScoreContext::default()).score as f64,
            date: tx.date,
        })
        .collect();
    history.sort_by_key(|point| point.date);

    analyze_mood_trend(&history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::types::Trend;
    use crate::models::{MoodInput, NewTransaction};
    use crate::tracker::MoodTracker;
    use chrono::NaiveDate;

    fn seed_user(db: &Database, user_id: i64) -> i64 {
        db.upsert_account("Checking", user_id).unwrap()
    }

    fn seed_tx(db: &Database, account_id: i64, day: u32, amount: f64, category: &str) -> i64 {
        let tx = NewTransaction::new(
            NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            format!("TX day {} for {}", day, amount),
            amount,
            Some(category.to_string()),
        );
        db.insert_transaction(account_id, &tx).unwrap().unwrap()
    }

    fn annotate(db: &Database, tx_id: i64, user_id: i64, mood: &str, intensity: i64) {
        let tracker = MoodTracker::new(db.clone());
        tracker
            .upsert_transaction_mood(&MoodInput {
                transaction_id: tx_id,
                user_id,
                mood: mood.to_string(),
                intensity: Some(intensity),
                notes: None,
            })
            .unwrap();
    }

    #[test]
    fn test_analytics_for_user_without_moods() {
        let db = Database::in_memory().unwrap();
        seed_user(&db, 1);

        let engine = AnalyticsEngine::new(db);
        let analytics = engine.user_mood_analytics(1, Timeframe::Month).unwrap();

        assert_eq!(analytics.summary.total_moods, 0);
        assert!(analytics.by_mood.is_empty());
        assert_eq!(analytics.trends.trend, Trend::Stable);
        assert!(analytics.insights.is_empty());
    }

    #[test]
    fn test_analytics_merges_patterns_and_correlation() {
        let db = Database::in_memory().unwrap();
        let account_id = seed_user(&db, 1);

        let dining = seed_tx(&db, account_id, 10, -80.0, "Dining");
        let savings = seed_tx(&db, account_id, 12, -200.0, "Savings");
        annotate(&db, dining, 1, "stressed", 9);
        annotate(&db, savings, 1, "planned", 6);

        let engine = AnalyticsEngine::new(db);
        let analytics = engine.user_mood_analytics(1, Timeframe::Year).unwrap();

        assert_eq!(analytics.summary.total_moods, 2);
        assert!((analytics.emotional_spending - 80.0).abs() < 1e-9);
        assert!((analytics.planned_spending - 200.0).abs() < 1e-9);
        assert_eq!(analytics.by_category.len(), 2);
        // Pattern insight names the highest-average mood (planned, $200)
        assert!(analytics
            .insights
            .iter()
            .any(|i| i.message.contains("planned")));
    }

    #[test]
    fn test_recommendations_empty_history() {
        let db = Database::in_memory().unwrap();
        seed_user(&db, 1);

        let engine = AnalyticsEngine::new(db);
        let report = engine.mood_recommendations(1).unwrap();

        assert_eq!(report.summary.total_moods_tracked, 0);
        assert!(report.recommendations.is_empty());
        assert!(report.analysis.is_none());
    }

    #[test]
    fn test_recommendations_fire_on_emotional_spending() {
        let db = Database::in_memory().unwrap();
        let account_id = seed_user(&db, 1);

        // The annotated transaction drives the emotional bucket regardless
        // of how far in the past it falls
        let tx_id = seed_tx(&db, account_id, 1, -150.0, "Shopping");
        annotate(&db, tx_id, 1, "impulsive", 8);

        let engine = AnalyticsEngine::new(db);
        let report = engine.mood_recommendations(1).unwrap();

        assert_eq!(report.summary.total_moods_tracked, 1);
        assert!((report.summary.emotional_spending - 150.0).abs() < 1e-9);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.kind == crate::analytics::types::RecommendationKind::EmotionalSpending));
        assert!(report.analysis.is_some());
    }
}
