//! Result types for the analytics engine
//!
//! All of these are derived value objects: constructed fresh per call,
//! JSON-serializable, never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Mood;

/// Kinds of insights produced by the spending correlator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Emotional spending outweighs planned spending
    Behavioral,
    /// A recurring mood/spend association
    Pattern,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Behavioral => "behavioral",
            InsightKind::Pattern => "pattern",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level of an insight or recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// An advisory produced by the spending correlator's rule set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub recommendation: String,
}

/// Top-level counts over a set of mood records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSummary {
    pub total_moods: usize,
    pub average_intensity: f64,
    /// None when no records were analyzed
    pub most_common_mood: Option<Mood>,
}

impl MoodSummary {
    /// Summary for an empty record set
    pub fn empty() -> Self {
        Self {
            total_moods: 0,
            average_intensity: 0.0,
            most_common_mood: None,
        }
    }
}

/// Per-mood count and intensity aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodAggregate {
    pub mood: Mood,
    pub count: usize,
    pub average_intensity: f64,
}

/// Count of one mood within a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: usize,
}

/// Per-category aggregate with nested mood distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub category: String,
    pub count: usize,
    pub moods: Vec<MoodCount>,
}

/// Output of the pattern aggregator
///
/// `by_mood` and `by_category` preserve first-encountered order, which is
/// what makes the most-common-mood tie-break deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodPatterns {
    pub summary: MoodSummary,
    pub by_mood: Vec<MoodAggregate>,
    pub by_category: Vec<CategoryAggregate>,
}

/// Accumulated spend for one mood in the correlation table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSpend {
    pub mood: Mood,
    pub total: f64,
    pub count: usize,
    pub average: f64,
}

/// Output of the spending-mood correlator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingCorrelation {
    pub emotional_spending: f64,
    pub planned_spending: f64,
    pub by_mood: Vec<MoodSpend>,
    pub insights: Vec<Insight>,
}

/// Budget position supplied as scoring context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    UnderBudget,
    OverBudget,
}

/// Savings direction supplied as scoring context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsTrend {
    Increasing,
    Decreasing,
}

/// Optional financial context for mood scoring
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreContext {
    pub budget_status: Option<BudgetStatus>,
    pub savings_trend: Option<SavingsTrend>,
}

/// A scored transaction with the adjustments that produced the score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodScore {
    /// Bounded 0-100
    pub score: u8,
    /// Labels of applied adjustments, in application order
    pub factors: Vec<String>,
}

/// One point of mood score history
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScorePoint {
    pub score: f64,
    pub date: NaiveDate,
}

/// Direction label for a mood score trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    SlightlyImproving,
    Stable,
    SlightlyDeclining,
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::SlightlyImproving => "slightly_improving",
            Trend::Stable => "stable",
            Trend::SlightlyDeclining => "slightly_declining",
            Trend::Declining => "declining",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the trend analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodTrend {
    pub trend: Trend,
    /// Raw recent-minus-older average difference; sign carries the direction
    pub direction: f64,
    /// 0-100, scaled from the magnitude of the difference
    pub confidence: f64,
}

impl MoodTrend {
    /// Neutral result for insufficient history
    pub fn stable() -> Self {
        Self {
            trend: Trend::Stable,
            direction: 0.0,
            confidence: 0.0,
        }
    }
}

/// Merged analytics payload returned to the request layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodAnalytics {
    pub summary: MoodSummary,
    pub by_mood: Vec<MoodAggregate>,
    pub by_category: Vec<CategoryAggregate>,
    pub emotional_spending: f64,
    pub planned_spending: f64,
    pub mood_correlation: Vec<MoodSpend>,
    pub trends: MoodTrend,
    pub insights: Vec<Insight>,
}

/// Kinds of recommendations the generator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    EmotionalSpending,
    StressManagement,
    FinancialHealth,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::EmotionalSpending => "emotional_spending",
            RecommendationKind::StressManagement => "stress_management",
            RecommendationKind::FinancialHealth => "financial_health",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single advisory message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub message: String,
    pub priority: Severity,
}

/// Headline numbers for the recommendation report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub total_moods_tracked: usize,
    pub emotional_spending: f64,
    pub planned_spending: f64,
    pub financial_health_score: u8,
}

/// Full advisory payload for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub summary: RecommendationSummary,
    pub recommendations: Vec<Recommendation>,
    /// None when the user has no mood history yet
    pub analysis: Option<MoodAnalytics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_priority() {
        assert!(Severity::High.priority() > Severity::Medium.priority());
        assert!(Severity::Medium.priority() > Severity::Low.priority());
    }

    #[test]
    fn test_severity_roundtrip() {
        for s in [Severity::Low, Severity::Medium, Severity::High] {
            assert_eq!(Severity::from_str(s.as_str()).unwrap(), s);
        }
    }

    #[test]
    fn test_empty_summary_is_zeroed() {
        let summary = MoodSummary::empty();
        assert_eq!(summary.total_moods, 0);
        assert_eq!(summary.average_intensity, 0.0);
        assert!(summary.most_common_mood.is_none());
    }

    #[test]
    fn test_analytics_payload_serializes() {
        let analytics = MoodAnalytics {
            summary: MoodSummary::empty(),
            by_mood: vec![],
            by_category: vec![],
            emotional_spending: 0.0,
            planned_spending: 0.0,
            mood_correlation: vec![],
            trends: MoodTrend::stable(),
            insights: vec![],
        };
        let json = serde_json::to_value(&analytics).unwrap();
        assert_eq!(json["trends"]["trend"], "stable");
        assert_eq!(json["summary"]["most_common_mood"], serde_json::Value::Null);
    }
}
