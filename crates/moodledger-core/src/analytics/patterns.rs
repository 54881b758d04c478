//! Pattern aggregation over mood records
//!
//! Groups mood records by mood and by the joined transaction's category,
//! tracking counts and intensity averages. Aggregates are kept in
//! first-encountered order; the most-common-mood reduction keeps the
//! earlier entry on ties, so the order is load-bearing.

use std::collections::HashMap;

use crate::analytics::types::{
    CategoryAggregate, MoodAggregate, MoodCount, MoodPatterns, MoodSummary,
};
use crate::models::{Mood, MoodRecord, Transaction};

/// Category assigned to records whose transaction is missing or untagged
const UNCATEGORIZED: &str = "uncategorized";

/// Aggregate mood records into per-mood and per-category statistics
///
/// Transactions are joined by id to resolve each record's category. Empty
/// input yields a zeroed summary without error.
pub fn analyze_mood_patterns(moods: &[MoodRecord], transactions: &[Transaction]) -> MoodPatterns {
    if moods.is_empty() {
        return MoodPatterns {
            summary: MoodSummary::empty(),
            by_mood: vec![],
            by_category: vec![],
        };
    }

    let tx_by_id: HashMap<i64, &Transaction> =
        transactions.iter().map(|tx| (tx.id, tx)).collect();

    // (mood, count, total intensity) in first-encountered order
    let mut mood_totals: Vec<(Mood, usize, i64)> = Vec::new();
    // (category, count, per-mood counts) in first-encountered order
    let mut category_totals: Vec<(String, usize, Vec<MoodCount>)> = Vec::new();
    let mut intensity_sum: i64 = 0;

    for record in moods {
        intensity_sum += record.intensity;

        match mood_totals.iter().position(|(m, _, _)| *m == record.mood) {
            Some(idx) => {
                mood_totals[idx].1 += 1;
                mood_totals[idx].2 += record.intensity;
            }
            None => mood_totals.push((record.mood, 1, record.intensity)),
        }

        let category = tx_by_id
            .get(&record.transaction_id)
            .and_then(|tx| tx.category.as_deref())
            .unwrap_or(UNCATEGORIZED);

        let idx = match category_totals.iter().position(|(c, _, _)| c == category) {
            Some(idx) => idx,
            None => {
                category_totals.push((category.to_string(), 0, Vec::new()));
                category_totals.len() - 1
            }
        };
        let entry = &mut category_totals[idx];
        entry.1 += 1;
        match entry.2.iter().position(|mc| mc.mood == record.mood) {
            Some(mc_idx) => entry.2[mc_idx].count += 1,
            None => entry.2.push(MoodCount {
                mood: record.mood,
                count: 1,
            }),
        }
    }

    let by_mood: Vec<MoodAggregate> = mood_totals
        .into_iter()
        .map(|(mood, count, total)| MoodAggregate {
            mood,
            count,
            average_intensity: total as f64 / count as f64,
        })
        .collect();

    let by_category: Vec<CategoryAggregate> = category_totals
        .into_iter()
        .map(|(category, count, mood_counts)| CategoryAggregate {
            category,
            count,
            moods: mood_counts,
        })
        .collect();

    // Left fold keeps the first-encountered mood on ties
    let most_common_mood = by_mood
        .iter()
        .fold(None::<&MoodAggregate>, |best, agg| match best {
            Some(b) if agg.count > b.count => Some(agg),
            None => Some(agg),
            other => other,
        })
        .map(|agg| agg.mood);

    MoodPatterns {
        summary: MoodSummary {
            total_moods: moods.len(),
            average_intensity: intensity_sum as f64 / moods.len() as f64,
            most_common_mood,
        },
        by_mood,
        by_category,
    }
}
