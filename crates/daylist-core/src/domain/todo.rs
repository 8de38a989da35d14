use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Todo entity - a single content string with a completed flag, belonging to
/// one todo page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub todo_page_id: Uuid,
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new, not-yet-completed todo under a page.
    pub fn new(todo_page_id: Uuid, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            todo_page_id,
            content,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}
