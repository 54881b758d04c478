//! Mood record validation and persistence
//!
//! The tracker is the single write path for mood annotations. Every write
//! goes through one composed validation step (mood label, intensity range,
//! transaction ownership) before touching storage, so no partial writes
//! can occur.

use tracing::debug;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Mood, MoodInput, MoodRecord, NewMoodRecord};

pub const MIN_INTENSITY: i64 = 1;
pub const MAX_INTENSITY: i64 = 10;
pub const DEFAULT_INTENSITY: i64 = 5;

/// Validating store adapter for mood annotations
pub struct MoodTracker {
    db: Database,
}

impl MoodTracker {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Validate a raw mood input into a persistable record
    ///
    /// Checks, in order: the mood label against the fixed set, the
    /// intensity range when supplied, and that the referenced transaction
    /// exists and belongs to the acting user.
    fn validate(&self, input: &MoodInput) -> Result<NewMoodRecord> {
        let mood: Mood = input.mood.parse().map_err(Error::Validation)?;

        if let Some(intensity) = input.intensity {
            if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity) {
                return Err(Error::Validation(format!(
                    "intensity must be between {} and {}, got {}",
                    MIN_INTENSITY, MAX_INTENSITY, intensity
                )));
            }
        }

        if !self
            .db
            .transaction_owned_by(input.transaction_id, input.user_id)?
        {
            return Err(Error::NotFound(
                "transaction not found or does not belong to user".to_string(),
            ));
        }

        Ok(NewMoodRecord {
            transaction_id: input.transaction_id,
            user_id: input.user_id,
            mood,
            intensity: input.intensity.unwrap_or(DEFAULT_INTENSITY),
            notes: input.notes.clone(),
        })
    }

    /// Create a new mood annotation for a transaction
    ///
    /// Fails if the (transaction, user) pair is already annotated.
    pub fn create_transaction_mood(&self, input: &MoodInput) -> Result<MoodRecord> {
        let record = self.validate(input)?;
        let created = self.db.create_mood_record(&record)?;

        debug!(
            transaction_id = created.transaction_id,
            user_id = created.user_id,
            mood = %created.mood,
            "Mood record created"
        );
        Ok(created)
    }

    /// Create or update the mood annotation for a transaction
    pub fn upsert_transaction_mood(&self, input: &MoodInput) -> Result<MoodRecord> {
        let record = self.validate(input)?;
        let stored = self.db.upsert_mood_record(&record)?;

        debug!(
            transaction_id = stored.transaction_id,
            user_id = stored.user_id,
            mood = %stored.mood,
            "Mood record upserted"
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use chrono::NaiveDate;

    fn setup() -> (Database, MoodTracker, i64) {
        let db = Database::in_memory().unwrap();
        let account_id = db.upsert_account("Checking", 1).unwrap();
        let tx = NewTransaction::new(
            NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            "FLOWER SHOP",
            -35.00,
            Some("Shopping".to_string()),
        );
        let tx_id = db.insert_transaction(account_id, &tx).unwrap().unwrap();
        let tracker = MoodTracker::new(db.clone());
        (db, tracker, tx_id)
    }

    fn input(transaction_id: i64, user_id: i64, mood: &str) -> MoodInput {
        MoodInput {
            transaction_id,
            user_id,
            mood: mood.to_string(),
            intensity: None,
            notes: None,
        }
    }

    #[test]
    fn test_create_defaults_intensity() {
        let (_db, tracker, tx_id) = setup();

        let record = tracker
            .create_transaction_mood(&input(tx_id, 1, "excited"))
            .unwrap();
        assert_eq!(record.mood, Mood::Excited);
        assert_eq!(record.intensity, DEFAULT_INTENSITY);
    }

    #[test]
    fn test_invalid_mood_label_rejected() {
        let (_db, tracker, tx_id) = setup();

        let err = tracker
            .create_transaction_mood(&input(tx_id, 1, "curious"))
            .unwrap_err();
        match err {
            Error::Validation(msg) => {
                assert!(msg.contains("curious"));
                // The error names the full valid set
                for mood in Mood::ALL {
                    assert!(msg.contains(mood.as_str()));
                }
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_intensity_out_of_range_rejected() {
        let (_db, tracker, tx_id) = setup();

        for intensity in [0, 11, -3] {
            let mut bad = input(tx_id, 1, "happy");
            bad.intensity = Some(intensity);
            let err = tracker.create_transaction_mood(&bad).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "intensity {}", intensity);
        }

        let mut ok = input(tx_id, 1, "happy");
        ok.intensity = Some(10);
        assert!(tracker.create_transaction_mood(&ok).is_ok());
    }

    #[test]
    fn test_missing_transaction_rejected() {
        let (_db, tracker, _tx_id) = setup();

        let err = tracker
            .create_transaction_mood(&input(9999, 1, "happy"))
            .unwrap_err();
        match err {
            Error::NotFound(msg) => {
                assert_eq!(msg, "transaction not found or does not belong to user")
            }
            other => panic!("expected not found error, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_transaction_rejected() {
        let (_db, tracker, tx_id) = setup();

        // User 2 does not own the account behind tx_id
        let err = tracker
            .create_transaction_mood(&input(tx_id, 2, "happy"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_upsert_replaces_existing_annotation() {
        let (db, tracker, tx_id) = setup();

        tracker
            .create_transaction_mood(&input(tx_id, 1, "impulsive"))
            .unwrap();

        let mut revised = input(tx_id, 1, "regretful");
        revised.intensity = Some(9);
        revised.notes = Some("buyer's remorse".to_string());
        let updated = tracker.upsert_transaction_mood(&revised).unwrap();

        assert_eq!(updated.mood, Mood::Regretful);
        assert_eq!(updated.intensity, 9);

        // Still exactly one record for the pair
        assert_eq!(db.recent_moods(1, 50).unwrap().len(), 1);
    }

    #[test]
    fn test_validation_happens_before_write() {
        let (db, tracker, tx_id) = setup();

        let mut bad = input(tx_id, 1, "stressed");
        bad.intensity = Some(99);
        tracker.upsert_transaction_mood(&bad).unwrap_err();

        // Nothing was persisted
        assert!(db.mood_for_transaction(tx_id, 1).unwrap().is_none());
    }
}
