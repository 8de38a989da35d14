use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// TodoPage entity - a named container of todo items, owned by one user and
/// scoped to the calendar day of `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoPage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoPage {
    /// Create a new page. `created_at` is explicit because pages can be filed
    /// under a day other than "today" (the date comes from the URL).
    pub fn new(user_id: Uuid, title: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            created_at,
            updated_at: Utc::now(),
        }
    }
}
