//! Spending-mood correlation
//!
//! Joins mood records to transaction amounts, splits spending into
//! emotional vs planned buckets, and derives insights from an ordered set
//! of rules. Each rule is a standalone function so it can be tested on its
//! own.

use std::collections::HashMap;

use crate::analytics::types::{Insight, InsightKind, MoodSpend, Severity, SpendingCorrelation};
use crate::models::{Mood, MoodRecord, Transaction};

/// Emotional spending must exceed planned spending by this factor before
/// the behavioral insight fires
const EMOTIONAL_SPEND_RATIO: f64 = 1.5;

/// Correlate mood records with transaction amounts
///
/// Records without a matching transaction are skipped. Moods outside the
/// emotional set and "planned" contribute to the correlation table only.
pub fn correlate_spending(moods: &[MoodRecord], transactions: &[Transaction]) -> SpendingCorrelation {
    let tx_by_id: HashMap<i64, &Transaction> =
        transactions.iter().map(|tx| (tx.id, tx)).collect();

    let mut emotional_spending = 0.0;
    let mut planned_spending = 0.0;
    let mut by_mood: Vec<MoodSpend> = Vec::new();

    for record in moods {
        let Some(tx) = tx_by_id.get(&record.transaction_id) else {
            continue;
        };
        let amount = tx.amount.abs();

        if record.mood.is_emotional() {
            emotional_spending += amount;
        } else if record.mood == Mood::Planned {
            planned_spending += amount;
        }

        match by_mood.iter().position(|entry| entry.mood == record.mood) {
            Some(idx) => {
                let entry = &mut by_mood[idx];
                entry.total += amount;
                entry.count += 1;
                entry.average = entry.total / entry.count as f64;
            }
            None => by_mood.push(MoodSpend {
                mood: record.mood,
                total: amount,
                count: 1,
                average: amount,
            }),
        }
    }

    // Rules evaluated in order
    let mut insights = Vec::new();
    if let Some(insight) = excessive_emotional_rule(emotional_spending, planned_spending) {
        insights.push(insight);
    }
    if let Some(insight) = top_spending_mood_rule(&by_mood) {
        insights.push(insight);
    }

    SpendingCorrelation {
        emotional_spending,
        planned_spending,
        by_mood,
        insights,
    }
}

/// Behavioral rule: emotional spending outweighs planned spending
pub fn excessive_emotional_rule(emotional: f64, planned: f64) -> Option<Insight> {
    if emotional <= planned * EMOTIONAL_SPEND_RATIO {
        return None;
    }
    Some(Insight {
        kind: InsightKind::Behavioral,
        title: "High Emotional Spending".to_string(),
        message: format!(
            "Your emotional spending (${:.2}) is significantly higher than your planned spending (${:.2})",
            emotional, planned
        ),
        severity: Severity::Medium,
        recommendation:
            "Try a 24-hour pause before purchases made while stressed, anxious, or bored"
                .to_string(),
    })
}

/// Pattern rule: the mood with the highest average spend
///
/// The left fold keeps the first-encountered mood on ties.
pub fn top_spending_mood_rule(by_mood: &[MoodSpend]) -> Option<Insight> {
    let top = by_mood
        .iter()
        .fold(None::<&MoodSpend>, |best, entry| match best {
            Some(b) if entry.average > b.average => Some(entry),
            None => Some(entry),
            other => other,
        })?;

    Some(Insight {
        kind: InsightKind::Pattern,
        title: "Spending Pattern Detected".to_string(),
        message: format!(
            "You spend the most (${:.2} on average) when feeling {}",
            top.average, top.mood
        ),
        severity: Severity::Low,
        recommendation: format!("Watch your purchases when feeling {}", top.mood),
    })
}
