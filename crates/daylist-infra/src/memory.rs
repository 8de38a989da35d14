//! In-memory repository implementations.
//!
//! Used as the fallback when no database is configured, and as the backend
//! for handler tests. Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use daylist_core::day::DayWindow;
use daylist_core::domain::{Todo, TodoPage, User};
use daylist_core::error::RepoError;
use daylist_core::ports::{TodoPageRepository, TodoRepository, UserRepository};

/// In-memory user store keyed by id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        // Same contract as the unique index on users.email
        if store.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

/// In-memory todo page store keyed by id.
#[derive(Default)]
pub struct InMemoryTodoPageRepository {
    store: RwLock<HashMap<Uuid, TodoPage>>,
}

impl InMemoryTodoPageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoPageRepository for InMemoryTodoPageRepository {
    async fn list_for_day(
        &self,
        user_id: Uuid,
        window: DayWindow,
    ) -> Result<Vec<TodoPage>, RepoError> {
        let store = self.store.read().await;
        let mut pages: Vec<TodoPage> = store
            .values()
            .filter(|p| p.user_id == user_id && window.contains(p.created_at))
            .cloned()
            .collect();
        pages.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(pages)
    }

    async fn find_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
        window: Option<DayWindow>,
    ) -> Result<Option<TodoPage>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .get(&id)
            .filter(|p| p.user_id == user_id)
            .filter(|p| window.is_none_or(|w| w.contains(p.created_at)))
            .cloned())
    }

    async fn create(&self, page: TodoPage) -> Result<TodoPage, RepoError> {
        self.store.write().await.insert(page.id, page.clone());
        Ok(page)
    }

    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        match store.get(&id) {
            Some(page) if page.user_id == user_id => {
                store.remove(&id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

/// In-memory todo store keyed by id.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    store: RwLock<HashMap<Uuid, Todo>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list_for_page(&self, todo_page_id: Uuid) -> Result<Vec<Todo>, RepoError> {
        let store = self.store.read().await;
        let mut todos: Vec<Todo> = store
            .values()
            .filter(|t| t.todo_page_id == todo_page_id)
            .cloned()
            .collect();
        todos.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(todos)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn create(&self, item: Todo) -> Result<Todo, RepoError> {
        self.store.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    async fn set_completed(&self, id: Uuid, completed: bool) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        match store.get_mut(&id) {
            Some(item) => {
                item.completed = completed;
                item.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepoError> {
        Ok(self.store.write().await.remove(&id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn window(date: &str) -> DayWindow {
        DayWindow::for_date(date.parse().unwrap())
    }

    fn page_on(user_id: Uuid, title: &str, date: &str) -> TodoPage {
        TodoPage::new(user_id, title.to_string(), window(date).start)
    }

    #[tokio::test]
    async fn listing_only_returns_pages_inside_the_day() {
        let repo = InMemoryTodoPageRepository::new();
        let user_id = Uuid::new_v4();

        let in_day = repo
            .create(page_on(user_id, "in day", "2023-01-01"))
            .await
            .unwrap();
        repo.create(page_on(user_id, "next day", "2023-01-02"))
            .await
            .unwrap();

        // ends the day just before midnight
        let late = TodoPage::new(
            user_id,
            "late".to_string(),
            window("2023-01-01").end - TimeDelta::milliseconds(1),
        );
        repo.create(late.clone()).await.unwrap();

        let listed = repo.list_for_day(user_id, window("2023-01-01")).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|p| p.id).collect();
        assert_eq!(listed.len(), 2);
        assert!(ids.contains(&in_day.id));
        assert!(ids.contains(&late.id));
    }

    #[tokio::test]
    async fn listing_excludes_other_users() {
        let repo = InMemoryTodoPageRepository::new();
        let user_id = Uuid::new_v4();
        repo.create(page_on(Uuid::new_v4(), "not mine", "2023-01-01"))
            .await
            .unwrap();

        let listed = repo.list_for_day(user_id, window("2023-01-01")).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn listing_orders_by_most_recently_updated() {
        let repo = InMemoryTodoPageRepository::new();
        let user_id = Uuid::new_v4();
        let w = window("2023-01-01");

        let mut first = page_on(user_id, "first", "2023-01-01");
        first.updated_at = w.start;
        let mut second = page_on(user_id, "second", "2023-01-01");
        second.updated_at = w.start + TimeDelta::hours(1);
        repo.create(first).await.unwrap();
        repo.create(second).await.unwrap();

        let listed = repo.list_for_day(user_id, w).await.unwrap();
        assert_eq!(listed[0].title, "second");
        assert_eq!(listed[1].title, "first");
    }

    #[tokio::test]
    async fn deleting_another_users_page_is_a_no_op() {
        let repo = InMemoryTodoPageRepository::new();
        let owner = Uuid::new_v4();
        let page = repo
            .create(page_on(owner, "mine", "2023-01-01"))
            .await
            .unwrap();

        let affected = repo.delete_owned(page.id, Uuid::new_v4()).await.unwrap();
        assert_eq!(affected, 0);
        assert!(repo.find_owned(page.id, owner, None).await.unwrap().is_some());

        let affected = repo.delete_owned(page.id, owner).await.unwrap();
        assert_eq!(affected, 1);
    }

    #[tokio::test]
    async fn find_owned_respects_the_window() {
        let repo = InMemoryTodoPageRepository::new();
        let user_id = Uuid::new_v4();
        let page = repo
            .create(page_on(user_id, "mine", "2023-01-01"))
            .await
            .unwrap();

        assert!(
            repo.find_owned(page.id, user_id, Some(window("2023-01-01")))
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            repo.find_owned(page.id, user_id, Some(window("2023-01-02")))
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            repo.find_owned(page.id, Uuid::new_v4(), None)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn duplicate_emails_are_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("sean@test.com".to_string(), "hash".to_string()))
            .await
            .unwrap();

        let result = repo
            .create(User::new("sean@test.com".to_string(), "hash2".to_string()))
            .await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn toggling_an_unknown_todo_affects_zero_rows() {
        let repo = InMemoryTodoRepository::new();
        assert_eq!(repo.set_completed(Uuid::new_v4(), true).await.unwrap(), 0);
        assert_eq!(repo.delete(Uuid::new_v4()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn toggling_flips_the_flag() {
        let repo = InMemoryTodoRepository::new();
        let todo = repo
            .create(Todo::new(Uuid::new_v4(), "Buy groceries".to_string()))
            .await
            .unwrap();
        assert!(!todo.completed);

        assert_eq!(repo.set_completed(todo.id, true).await.unwrap(), 1);
        assert!(repo.find_by_id(todo.id).await.unwrap().unwrap().completed);
    }
}
