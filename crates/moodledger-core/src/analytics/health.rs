//! Composite financial health scoring
//!
//! Weighs savings rate, expense category diversity, and day-to-day
//! spending consistency over the last 30 days into a single 0-100 score.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};

use crate::models::Transaction;

/// Analysis window in days
const WINDOW_DAYS: i64 = 30;

/// Score returned when there is no signal to score
pub const NEUTRAL_HEALTH_SCORE: u8 = 50;

const SAVINGS_WEIGHT: f64 = 0.5;
const DIVERSITY_WEIGHT: f64 = 0.3;
const CONSISTENCY_WEIGHT: f64 = 0.2;

/// Compute the composite financial health score over the 30 days before
/// `as_of`
///
/// Returns the neutral 50 when no transactions fall inside the window.
pub fn calculate_financial_health_score(transactions: &[Transaction], as_of: NaiveDate) -> u8 {
    let cutoff = as_of - Duration::days(WINDOW_DAYS);
    let recent: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| tx.date >= cutoff)
        .cloned()
        .collect();

    if recent.is_empty() {
        return NEUTRAL_HEALTH_SCORE;
    }

    let income: f64 = recent
        .iter()
        .filter(|tx| tx.amount > 0.0)
        .map(|tx| tx.amount)
        .sum();
    let expenses: f64 = recent
        .iter()
        .filter(|tx| tx.amount < 0.0)
        .map(|tx| tx.amount.abs())
        .sum();

    let savings_rate = if income > 0.0 {
        (income - expenses) / income
    } else {
        0.0
    };
    let savings_score = (savings_rate * 200.0).min(100.0);

    let diversity = expense_diversity(&recent);
    let consistency = spending_consistency(&recent);

    let composite = savings_score * SAVINGS_WEIGHT
        + diversity * 100.0 * DIVERSITY_WEIGHT
        + consistency * 100.0 * CONSISTENCY_WEIGHT;

    composite.clamp(0.0, 100.0).round() as u8
}

/// Category spread among expense transactions, in [0, 1]
///
/// Rewards spreading spending across categories without over-rewarding
/// pure fragmentation: full marks at one distinct category per three
/// expenses. Returns 0.5 when there are no expenses.
pub fn expense_diversity(transactions: &[Transaction]) -> f64 {
    let expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.amount < 0.0)
        .collect();
    if expenses.is_empty() {
        return 0.5;
    }

    let categories: HashSet<&str> = expenses
        .iter()
        .map(|tx| tx.category.as_deref().unwrap_or("Other"))
        .collect();

    let spread_target = (expenses.len() as f64 / 3.0).max(1.0);
    (categories.len() as f64 / spread_target).min(1.0)
}

/// Day-to-day spending consistency, in [0, 1]
///
/// Buckets expense magnitudes by calendar day and inverts the coefficient
/// of variation of the daily totals. Returns 0.5 with fewer than 2
/// distinct spending days.
pub fn spending_consistency(transactions: &[Transaction]) -> f64 {
    let mut daily_totals: HashMap<NaiveDate, f64> = HashMap::new();
    for tx in transactions.iter().filter(|tx| tx.amount < 0.0) {
        *daily_totals.entry(tx.date).or_insert(0.0) += tx.amount.abs();
    }

    if daily_totals.len() < 2 {
        return 0.5;
    }

    let totals: Vec<f64> = daily_totals.values().copied().collect();
    let mean = totals.iter().sum::<f64>() / totals.len() as f64;
    let variance = totals
        .iter()
        .map(|total| (total - mean).powi(2))
        .sum::<f64>()
        / totals.len() as f64;
    let cv = variance.sqrt() / mean;

    (1.0 - cv).max(0.0)
}
