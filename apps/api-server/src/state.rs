//! Application state - shared across all handlers.

use std::sync::Arc;

use daylist_core::ports::{TodoPageRepository, TodoRepository, UserRepository};
use daylist_infra::database::{
    DatabaseConfig, DatabaseConnections, PostgresTodoPageRepository, PostgresTodoRepository,
    PostgresUserRepository,
};
use daylist_infra::memory::{
    InMemoryTodoPageRepository, InMemoryTodoRepository, InMemoryUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub pages: Arc<dyn TodoPageRepository>,
    pub todos: Arc<dyn TodoRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let main = connections.main;
                    Self {
                        users: Arc::new(PostgresUserRepository::new(main.clone())),
                        pages: Arc::new(PostgresTodoPageRepository::new(main.clone())),
                        todos: Arc::new(PostgresTodoRepository::new(main)),
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        }
    }

    /// State backed entirely by in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            pages: Arc::new(InMemoryTodoPageRepository::new()),
            todos: Arc::new(InMemoryTodoRepository::new()),
        }
    }
}
