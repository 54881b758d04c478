//! Account operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::Account;

impl Database {
    /// Create or get an account for a user
    pub fn upsert_account(&self, name: &str, user_id: i64) -> Result<i64> {
        let conn = self.conn()?;

        // Try to find existing account
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM accounts WHERE name = ? AND user_id = ?",
                params![name, user_id],
                |row| row.get(0),
            )
            .ok();

        if let Some(id) = existing {
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO accounts (name, user_id) VALUES (?, ?)",
            params![name, user_id],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get an account by id
    pub fn get_account(&self, id: i64) -> Result<Option<Account>> {
        let conn = self.conn()?;

        let result = conn.query_row(
            "SELECT id, name, user_id, created_at FROM accounts WHERE id = ?",
            params![id],
            |row| {
                let created_at_str: String = row.get(3)?;
                Ok(Account {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    user_id: row.get(2)?,
                    created_at: parse_datetime(&created_at_str),
                })
            },
        );

        match result {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all accounts for a user
    pub fn list_accounts(&self, user_id: i64) -> Result<Vec<Account>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, user_id, created_at FROM accounts WHERE user_id = ? ORDER BY name",
        )?;

        let accounts = stmt
            .query_map(params![user_id], |row| {
                let created_at_str: String = row.get(3)?;
                Ok(Account {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    user_id: row.get(2)?,
                    created_at: parse_datetime(&created_at_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(accounts)
    }
}
