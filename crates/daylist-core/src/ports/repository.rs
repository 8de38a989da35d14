use async_trait::async_trait;
use uuid::Uuid;

use crate::day::DayWindow;
use crate::domain::{Todo, TodoPage, User};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user. A duplicate email surfaces as
    /// [`RepoError::Constraint`].
    async fn create(&self, user: User) -> Result<User, RepoError>;

    /// Delete a user by id. Only used by admin and test seeding.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Todo page repository. Every read and delete is scoped by the owning user's
/// id so one user can never see or touch another user's pages.
#[async_trait]
pub trait TodoPageRepository: Send + Sync {
    /// Pages owned by `user_id` whose `created_at` lies inside `window`,
    /// most recently updated first.
    async fn list_for_day(
        &self,
        user_id: Uuid,
        window: DayWindow,
    ) -> Result<Vec<TodoPage>, RepoError>;

    /// A single page, only if owned by `user_id` (and inside `window` when
    /// one is given). `None` means the caller should respond 404.
    async fn find_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
        window: Option<DayWindow>,
    ) -> Result<Option<TodoPage>, RepoError>;

    /// Insert a new page. The title must already be validated by the caller.
    async fn create(&self, page: TodoPage) -> Result<TodoPage, RepoError>;

    /// Delete at most one page matching both id and owner. Returns the number
    /// of rows affected; deleting a non-owned or unknown id affects zero rows
    /// and is not an error.
    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<u64, RepoError>;
}

/// Todo repository.
///
/// Ownership is not checked at this layer: callers must verify that the
/// containing page belongs to the requesting user (via
/// [`TodoPageRepository::find_owned`]) before every todo operation.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn list_for_page(&self, todo_page_id: Uuid) -> Result<Vec<Todo>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, RepoError>;

    /// Insert a new todo. Content must already be validated by the caller.
    async fn create(&self, todo: Todo) -> Result<Todo, RepoError>;

    /// Flip the completed flag. Returns the number of rows affected; an
    /// unknown id affects zero rows.
    async fn set_completed(&self, id: Uuid, completed: bool) -> Result<u64, RepoError>;

    /// Delete a todo by id. Returns the number of rows affected.
    async fn delete(&self, id: Uuid) -> Result<u64, RepoError>;
}
