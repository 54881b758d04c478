//! Transaction operations

use chrono::NaiveDate;
use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewTransaction, Transaction};

impl Database {
    /// Insert a transaction (skips duplicates based on import_hash)
    ///
    /// Returns None when the transaction already exists.
    pub fn insert_transaction(&self, account_id: i64, tx: &NewTransaction) -> Result<Option<i64>> {
        let conn = self.conn()?;

        // Check for duplicate
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM transactions WHERE import_hash = ?",
                params![tx.import_hash],
                |row| row.get(0),
            )
            .ok();

        if existing.is_some() {
            return Ok(None); // Duplicate, skip
        }

        conn.execute(
            r#"
            INSERT INTO transactions (account_id, date, description, amount, category, import_hash)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                account_id,
                tx.date.to_string(),
                tx.description,
                tx.amount,
                tx.category,
                tx.import_hash,
            ],
        )?;

        Ok(Some(conn.last_insert_rowid()))
    }

    /// Get a transaction by id
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;

        let result = conn.query_row(
            r#"
            SELECT id, account_id, date, description, amount, category, created_at
            FROM transactions WHERE id = ?
            "#,
            params![id],
            row_to_transaction,
        );

        match result {
            Ok(tx) => Ok(Some(tx)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Check that a transaction exists and its account belongs to the user
    pub fn transaction_owned_by(&self, transaction_id: i64, user_id: i64) -> Result<bool> {
        let conn = self.conn()?;

        let count: i64 = conn.query_row(
            r#"
            SELECT COUNT(*) FROM transactions t
            JOIN accounts a ON t.account_id = a.id
            WHERE t.id = ? AND a.user_id = ?
            "#,
            params![transaction_id, user_id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    /// List transactions, optionally scoped to an account
    pub fn list_transactions(
        &self,
        account_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let transactions = if let Some(aid) = account_id {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, account_id, date, description, amount, category, created_at
                FROM transactions WHERE account_id = ?
                ORDER BY date DESC, id DESC LIMIT ? OFFSET ?
                "#,
            )?;
            let rows = stmt.query_map(params![aid, limit, offset], row_to_transaction)?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        } else {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, account_id, date, description, amount, category, created_at
                FROM transactions
                ORDER BY date DESC, id DESC LIMIT ? OFFSET ?
                "#,
            )?;
            let rows = stmt.query_map(params![limit, offset], row_to_transaction)?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        };

        Ok(transactions)
    }

    /// List a user's transactions dated on or after the cutoff, oldest first
    pub fn transactions_since(&self, user_id: i64, cutoff: NaiveDate) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT t.id, t.account_id, t.date, t.description, t.amount, t.category, t.created_at
            FROM transactions t
            JOIN accounts a ON t.account_id = a.id
            WHERE a.user_id = ? AND t.date >= ?
            ORDER BY t.date, t.id
            "#,
        )?;

        let rows = stmt.query_map(params![user_id, cutoff.to_string()], row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// List the transactions a user has annotated with moods, oldest first
    pub fn transactions_for_moods(&self, user_id: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT t.id, t.account_id, t.date, t.description, t.amount, t.category, t.created_at
            FROM transactions t
            JOIN mood_records m ON m.transaction_id = t.id
            WHERE m.user_id = ?
            ORDER BY t.date, t.id
            "#,
        )?;

        let rows = stmt.query_map(params![user_id], row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

/// Helper to convert a row to Transaction
fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(2)?;
    let created_at_str: String = row.get(6)?;

    Ok(Transaction {
        id: row.get(0)?,
        account_id: row.get(1)?,
        date: date_str
            .parse()
            .unwrap_or_else(|_| chrono::Utc::now().date_naive()),
        description: row.get(3)?,
        amount: row.get(4)?,
        category: row.get(5)?,
        created_at: parse_datetime(&created_at_str),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn seed_account(db: &Database, user_id: i64) -> i64 {
        db.upsert_account("Checking", user_id).unwrap()
    }

    #[test]
    fn test_insert_transaction_deduplicates() {
        let db = Database::in_memory().unwrap();
        let account_id = seed_account(&db, 1);

        let tx = NewTransaction::new(
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            "GROCERY STORE",
            -82.14,
            Some("Groceries".to_string()),
        );

        assert!(db.insert_transaction(account_id, &tx).unwrap().is_some());
        assert!(db.insert_transaction(account_id, &tx).unwrap().is_none());

        let stored = db.list_transactions(Some(account_id), 100, 0).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].category.as_deref(), Some("Groceries"));
    }

    #[test]
    fn test_transaction_ownership() {
        let db = Database::in_memory().unwrap();
        let owner_account = seed_account(&db, 1);

        let tx = NewTransaction::new(
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            "CINEMA",
            -24.00,
            Some("Entertainment".to_string()),
        );
        let tx_id = db.insert_transaction(owner_account, &tx).unwrap().unwrap();

        assert!(db.transaction_owned_by(tx_id, 1).unwrap());
        assert!(!db.transaction_owned_by(tx_id, 2).unwrap());
        assert!(!db.transaction_owned_by(9999, 1).unwrap());
    }

    #[test]
    fn test_transactions_since_filters_by_date() {
        let db = Database::in_memory().unwrap();
        let account_id = seed_account(&db, 1);

        let old = NewTransaction::new(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            "OLD PURCHASE",
            -10.00,
            None,
        );
        let recent = NewTransaction::new(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            "RECENT PURCHASE",
            -20.00,
            None,
        );
        db.insert_transaction(account_id, &old).unwrap();
        db.insert_transaction(account_id, &recent).unwrap();

        let cutoff = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let since = db.transactions_since(1, cutoff).unwrap();
        assert_eq!(since.len(), 1);
        assert_eq!(since[0].description, "RECENT PURCHASE");
    }
}
