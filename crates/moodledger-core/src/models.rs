//! Domain models for MoodLedger

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The fixed set of moods a transaction can be annotated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Stressed,
    Bored,
    Impulsive,
    Planned,
    Anxious,
    Excited,
    Regretful,
}

impl Mood {
    /// All valid moods, in canonical order
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Stressed,
        Mood::Bored,
        Mood::Impulsive,
        Mood::Planned,
        Mood::Anxious,
        Mood::Excited,
        Mood::Regretful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Stressed => "stressed",
            Self::Bored => "bored",
            Self::Impulsive => "impulsive",
            Self::Planned => "planned",
            Self::Anxious => "anxious",
            Self::Excited => "excited",
            Self::Regretful => "regretful",
        }
    }

    /// Moods counted toward emotional spending
    pub fn is_emotional(&self) -> bool {
        matches!(
            self,
            Self::Stressed | Self::Anxious | Self::Bored | Self::Impulsive
        )
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happy" => Ok(Self::Happy),
            "stressed" => Ok(Self::Stressed),
            "bored" => Ok(Self::Bored),
            "impulsive" => Ok(Self::Impulsive),
            "planned" => Ok(Self::Planned),
            "anxious" => Ok(Self::Anxious),
            "excited" => Ok(Self::Excited),
            "regretful" => Ok(Self::Regretful),
            _ => Err(format!(
                "Unknown mood: {} (valid moods: {})",
                s,
                Mood::ALL
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted mood annotation of a single transaction
///
/// At most one record exists per (transaction_id, user_id) pair; repeated
/// annotations go through the upsert path and bump `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodRecord {
    pub id: i64,
    pub transaction_id: i64,
    pub user_id: i64,
    pub mood: Mood,
    /// How strongly the mood was felt, 1-10
    pub intensity: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw mood annotation as supplied by the request layer
///
/// The mood label arrives untyped and is validated by the tracker before
/// any write. Intensity defaults to 5 when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodInput {
    pub transaction_id: i64,
    pub user_id: i64,
    pub mood: String,
    pub intensity: Option<i64>,
    pub notes: Option<String>,
}

/// A validated mood annotation ready for persistence
#[derive(Debug, Clone)]
pub struct NewMoodRecord {
    pub transaction_id: i64,
    pub user_id: i64,
    pub mood: Mood,
    pub intensity: i64,
    pub notes: Option<String>,
}

/// A bank transaction (read-only to the analytics core)
///
/// Positive amounts are income, negative amounts are expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A transaction to be inserted
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Option<String>,
    pub import_hash: String,
}

impl NewTransaction {
    /// Build a new transaction, deriving its dedup hash from date,
    /// description, and amount
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: Option<String>,
    ) -> Self {
        let description = description.into();
        let import_hash = generate_hash(&date, &description, amount);
        Self {
            date,
            description,
            amount,
            category,
            import_hash,
        }
    }
}

/// Generate a dedup hash for a transaction
fn generate_hash(date: &NaiveDate, description: &str, amount: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(description.as_bytes());
    hasher.update(amount.to_be_bytes());
    hex::encode(hasher.finalize())
}

/// A bank account, carrying the ownership link checked during mood validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    /// The user who owns this account
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Analysis window for mood analytics queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Window length in days
    pub fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            _ => Err(format!("Unknown timeframe: {}", s)),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
