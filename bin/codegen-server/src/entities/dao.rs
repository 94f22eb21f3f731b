use chrono::{DateTime, Utc};

/// A row in the `users` table.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The owner fields joined onto history rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A row in the `generations` table. Immutable once inserted.
#[derive(Debug, Clone)]
pub struct GenerationRecord {
    pub id: String,
    pub prompt: String,
    /// Canonical language name, e.g. `"C++"`.
    pub language: String,
    pub code: String,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A generation together with its owner, as returned by history queries.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub generation: GenerationRecord,
    pub owner: Option<UserSummary>,
}
