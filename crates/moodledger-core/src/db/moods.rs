//! Mood record operations
//!
//! Mood records are keyed by the composite (transaction_id, user_id); the
//! upsert path leans on the table's UNIQUE constraint so concurrent writers
//! resolve to a single row on the SQLite side.

use chrono::{DateTime, Utc};
use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Mood, MoodRecord, NewMoodRecord};

impl Database {
    /// Insert a new mood record
    ///
    /// Fails if a record already exists for the (transaction_id, user_id)
    /// pair; use `upsert_mood_record` for insert-or-update semantics.
    pub fn create_mood_record(&self, record: &NewMoodRecord) -> Result<MoodRecord> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO mood_records (transaction_id, user_id, mood, intensity, notes)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                record.transaction_id,
                record.user_id,
                record.mood.as_str(),
                record.intensity,
                record.notes,
            ],
        )?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.get_mood_record(id)?
            .ok_or_else(|| Error::NotFound(format!("mood record {} after insert", id)))
    }

    /// Insert or update a mood record keyed by (transaction_id, user_id)
    ///
    /// On conflict, updates mood, notes, and intensity and bumps updated_at.
    /// Conflict resolution is atomic on the SQLite side.
    pub fn upsert_mood_record(&self, record: &NewMoodRecord) -> Result<MoodRecord> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO mood_records (transaction_id, user_id, mood, intensity, notes)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(transaction_id, user_id) DO UPDATE SET
                mood = excluded.mood,
                intensity = excluded.intensity,
                notes = excluded.notes,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![
                record.transaction_id,
                record.user_id,
                record.mood.as_str(),
                record.intensity,
                record.notes,
            ],
        )?;
        drop(conn);

        self.mood_for_transaction(record.transaction_id, record.user_id)?
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "mood record for transaction {} after upsert",
                    record.transaction_id
                ))
            })
    }

    /// Get a mood record by id
    pub fn get_mood_record(&self, id: i64) -> Result<Option<MoodRecord>> {
        let conn = self.conn()?;

        let result = conn.query_row(
            r#"
            SELECT id, transaction_id, user_id, mood, intensity, notes, created_at, updated_at
            FROM mood_records WHERE id = ?
            "#,
            params![id],
            row_to_mood_record,
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the mood record for a (transaction, user) pair
    pub fn mood_for_transaction(
        &self,
        transaction_id: i64,
        user_id: i64,
    ) -> Result<Option<MoodRecord>> {
        let conn = self.conn()?;

        let result = conn.query_row(
            r#"
            SELECT id, transaction_id, user_id, mood, intensity, notes, created_at, updated_at
            FROM mood_records WHERE transaction_id = ? AND user_id = ?
            "#,
            params![transaction_id, user_id],
            row_to_mood_record,
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's most recent mood records, newest first
    pub fn recent_moods(&self, user_id: i64, limit: i64) -> Result<Vec<MoodRecord>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, transaction_id, user_id, mood, intensity, notes, created_at, updated_at
            FROM mood_records WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(params![user_id, limit], row_to_mood_record)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// List a user's mood records created on or after the cutoff, oldest first
    pub fn moods_since(&self, user_id: i64, cutoff: DateTime<Utc>) -> Result<Vec<MoodRecord>> {
        let conn = self.conn()?;

        let cutoff_str = cutoff.format("%Y-%m-%d %H:%M:%S").to_string();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, transaction_id, user_id, mood, intensity, notes, created_at, updated_at
            FROM mood_records WHERE user_id = ? AND created_at >= ?
            ORDER BY created_at, id
            "#,
        )?;

        let rows = stmt.query_map(params![user_id, cutoff_str], row_to_mood_record)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

/// Helper to convert a row to MoodRecord
fn row_to_mood_record(row: &rusqlite::Row) -> rusqlite::Result<MoodRecord> {
    let mood_str: String = row.get(3)?;
    let created_at_str: String = row.get(6)?;
    let updated_at_str: String = row.get(7)?;

    Ok(MoodRecord {
        id: row.get(0)?,
        transaction_id: row.get(1)?,
        user_id: row.get(2)?,
        mood: mood_str.parse().unwrap_or(Mood::Happy),
        intensity: row.get(4)?,
        notes: row.get(5)?,
        created_at: parse_datetime(&created_at_str),
        updated_at: parse_datetime(&updated_at_str),
    })
}
