//! Deterministic mood scoring for a single transaction
//!
//! The score starts from a neutral base and applies exclusive
//! amount-threshold adjustments, a fixed category adjustment, and optional
//! financial-context adjustments. Zero adjustments leave no factor label.

use crate::analytics::types::{BudgetStatus, MoodScore, SavingsTrend, ScoreContext};
use crate::models::Transaction;

const BASE_SCORE: i32 = 50;

/// Score a transaction's financial favorability on a 0-100 scale
///
/// `factors` lists the label of every applied adjustment in application
/// order: amount, category, budget status, savings trend.
pub fn calculate_mood_score(transaction: &Transaction, context: &ScoreContext) -> MoodScore {
    let mut score = BASE_SCORE;
    let mut factors: Vec<String> = Vec::new();

    if let Some((adjustment, label)) = amount_adjustment(transaction.amount) {
        score += adjustment;
        factors.push(label.to_string());
    }

    let (adjustment, label) = category_adjustment(transaction.category.as_deref().unwrap_or(""));
    if adjustment != 0 {
        score += adjustment;
        factors.push(label.to_string());
    }

    match context.budget_status {
        Some(BudgetStatus::UnderBudget) => {
            score += 10;
            factors.push("under-budget".to_string());
        }
        Some(BudgetStatus::OverBudget) => {
            score -= 15;
            factors.push("over-budget".to_string());
        }
        None => {}
    }

    match context.savings_trend {
        Some(SavingsTrend::Increasing) => {
            score += 8;
            factors.push("savings-increasing".to_string());
        }
        Some(SavingsTrend::Decreasing) => {
            score -= 12;
            factors.push("savings-decreasing".to_string());
        }
        None => {}
    }

    MoodScore {
        score: score.clamp(0, 100) as u8,
        factors,
    }
}

/// Amount-based adjustment; branches are exclusive, first match wins
///
/// Expense magnitudes in [10, 50] get no adjustment at all.
fn amount_adjustment(amount: f64) -> Option<(i32, &'static str)> {
    if amount > 0.0 {
        if amount > 1000.0 {
            Some((25, "large-income"))
        } else if amount > 500.0 {
            Some((15, "medium-income"))
        } else if amount > 100.0 {
            Some((8, "small-income"))
        } else {
            None
        }
    } else {
        let magnitude = amount.abs();
        if magnitude > 500.0 {
            Some((-30, "large-expense"))
        } else if magnitude > 200.0 {
            Some((-20, "medium-expense"))
        } else if magnitude > 50.0 {
            Some((-10, "small-expense"))
        } else if magnitude < 10.0 {
            Some((5, "micro-expense"))
        } else {
            None
        }
    }
}

/// Fixed category adjustment table; unknown categories map to (0, "other")
fn category_adjustment(category: &str) -> (i32, &'static str) {
    match category {
        "Savings" => (15, "savings"),
        "Investment" => (12, "investment"),
        "Education" => (8, "education"),
        "Healthcare" => (5, "healthcare"),
        "Groceries" => (0, "groceries"),
        "Utilities" => (-2, "utilities"),
        "Transportation" => (-3, "transportation"),
        "Dining" => (-8, "dining"),
        "Entertainment" => (-10, "entertainment"),
        "Shopping" => (-12, "shopping"),
        "Travel" => (-15, "travel"),
        _ => (0, "other"),
    }
}
