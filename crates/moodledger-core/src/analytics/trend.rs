//! Mood score trend analysis
//!
//! Compares the average of the most recent window of mood scores against
//! the window preceding it and labels the direction.

use crate::analytics::types::{MoodTrend, ScorePoint, Trend};

/// Entries per comparison window
const WINDOW: usize = 7;

/// Label the trend across a chronologically ordered score history
///
/// Fewer than 2 points yields a stable result with zero confidence. When
/// there is no older window to compare against, the recent average is its
/// own baseline (also stable).
pub fn analyze_mood_trend(history: &[ScorePoint]) -> MoodTrend {
    if history.len() < 2 {
        return MoodTrend::stable();
    }

    let n = history.len();
    let recent = &history[n.saturating_sub(WINDOW)..];
    let older = &history[n.saturating_sub(WINDOW * 2)..n - recent.len()];

    let recent_avg = average(recent);
    let older_avg = if older.is_empty() {
        recent_avg
    } else {
        average(older)
    };

    let difference = recent_avg - older_avg;
    let trend = if difference > 10.0 {
        Trend::Improving
    } else if difference < -10.0 {
        Trend::Declining
    } else if difference > 5.0 {
        Trend::SlightlyImproving
    } else if difference < -5.0 {
        Trend::SlightlyDeclining
    } else {
        Trend::Stable
    };

    MoodTrend {
        trend,
        direction: difference,
        confidence: (difference.abs() * 2.0).min(100.0),
    }
}

fn average(points: &[ScorePoint]) -> f64 {
    points.iter().map(|p| p.score).sum::<f64>() / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn history(scores: &[f64]) -> Vec<ScorePoint> {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| ScorePoint {
                score,
                date: start + Duration::days(i as i64),
            })
            .collect()
    }

    #[test]
    fn test_insufficient_history_is_stable() {
        let empty = analyze_mood_trend(&[]);
        assert_eq!(empty.trend, Trend::Stable);
        assert_eq!(empty.direction, 0.0);
        assert_eq!(empty.confidence, 0.0);

        let single = analyze_mood_trend(&history(&[42.0]));
        assert_eq!(single.trend, Trend::Stable);
        assert_eq!(single.direction, 0.0);
        assert_eq!(single.confidence, 0.0);
    }

    #[test]
    fn test_declining_trend() {
        // 7 older scores at 60, 7 recent at 40
        let scores: Vec<f64> = std::iter::repeat(60.0)
            .take(7)
            .chain(std::iter::repeat(40.0).take(7))
            .collect();
        let result = analyze_mood_trend(&history(&scores));

        assert_eq!(result.trend, Trend::Declining);
        assert!((result.direction + 20.0).abs() < 1e-9);
        assert!((result.confidence - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_improving_trend() {
        let scores: Vec<f64> = std::iter::repeat(30.0)
            .take(7)
            .chain(std::iter::repeat(55.0).take(7))
            .collect();
        let result = analyze_mood_trend(&history(&scores));

        assert_eq!(result.trend, Trend::Improving);
        assert!((result.direction - 25.0).abs() < 1e-9);
        assert!((result.confidence - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_slight_movement() {
        let scores: Vec<f64> = std::iter::repeat(50.0)
            .take(7)
            .chain(std::iter::repeat(57.0).take(7))
            .collect();
        let result = analyze_mood_trend(&history(&scores));
        assert_eq!(result.trend, Trend::SlightlyImproving);

        let scores: Vec<f64> = std::iter::repeat(50.0)
            .take(7)
            .chain(std::iter::repeat(44.0).take(7))
            .collect();
        let result = analyze_mood_trend(&history(&scores));
        assert_eq!(result.trend, Trend::SlightlyDeclining);
    }

    #[test]
    fn test_boundary_difference_of_ten_is_slight() {
        let scores: Vec<f64> = std::iter::repeat(40.0)
            .take(7)
            .chain(std::iter::repeat(50.0).take(7))
            .collect();
        let result = analyze_mood_trend(&history(&scores));
        // Exactly 10 is not > 10
        assert_eq!(result.trend, Trend::SlightlyImproving);
        assert!((result.confidence - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_history_uses_neutral_baseline() {
        // 5 points: recent window covers everything, older window is empty,
        // so the baseline equals the recent average
        let result = analyze_mood_trend(&history(&[20.0, 30.0, 40.0, 50.0, 60.0]));
        assert_eq!(result.trend, Trend::Stable);
        assert_eq!(result.direction, 0.0);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_partial_older_window() {
        // 10 points: older window is only the 3 preceding the recent 7
        let scores = [80.0, 80.0, 80.0, 20.0, 20.0, 20.0, 20.0, 20.0, 20.0, 20.0];
        let result = analyze_mood_trend(&history(&scores));
        assert_eq!(result.trend, Trend::Declining);
        assert!((result.direction + 60.0).abs() < 1e-9);
        assert!((result.confidence - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_capped_at_100() {
        let scores: Vec<f64> = std::iter::repeat(100.0)
            .take(7)
            .chain(std::iter::repeat(0.0).take(7))
            .collect();
        let result = analyze_mood_trend(&history(&scores));
        assert_eq!(result.confidence, 100.0);
    }
}
