//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, QueryTrait,
};
use uuid::Uuid;

use daylist_core::day::DayWindow;
use daylist_core::domain::{Todo, TodoPage, User};
use daylist_core::error::RepoError;
use daylist_core::ports::{TodoPageRepository, TodoRepository, UserRepository};

use super::entity::todo::{self, Entity as TodoEntity};
use super::entity::todo_page::{self, Entity as TodoPageEntity};
use super::entity::user::{self, Entity as UserEntity};

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

fn insert_err(e: sea_orm::DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

/// Mask the local part of an email so logs carry no PII.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.len() > 1 => format!("{}***@{}", &local[..1], domain),
        Some((_, domain)) => format!("***@{domain}"),
        None => "***".to_string(),
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(insert_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// PostgreSQL todo page repository.
pub struct PostgresTodoPageRepository {
    db: DbConn,
}

impl PostgresTodoPageRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoPageRepository for PostgresTodoPageRepository {
    async fn list_for_day(
        &self,
        user_id: Uuid,
        window: DayWindow,
    ) -> Result<Vec<TodoPage>, RepoError> {
        let result = TodoPageEntity::find()
            .filter(todo_page::Column::UserId.eq(user_id))
            .filter(todo_page::Column::CreatedAt.gte(window.start))
            .filter(todo_page::Column::CreatedAt.lt(window.end))
            .order_by_desc(todo_page::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
        window: Option<DayWindow>,
    ) -> Result<Option<TodoPage>, RepoError> {
        let result = TodoPageEntity::find_by_id(id)
            .filter(todo_page::Column::UserId.eq(user_id))
            .apply_if(window, |query, w| {
                query
                    .filter(todo_page::Column::CreatedAt.gte(w.start))
                    .filter(todo_page::Column::CreatedAt.lt(w.end))
            })
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, page: TodoPage) -> Result<TodoPage, RepoError> {
        let active: todo_page::ActiveModel = page.into();
        let model = active.insert(&self.db).await.map_err(insert_err)?;

        Ok(model.into())
    }

    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<u64, RepoError> {
        let result = TodoPageEntity::delete_many()
            .filter(todo_page::Column::Id.eq(id))
            .filter(todo_page::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected)
    }
}

/// PostgreSQL todo repository.
pub struct PostgresTodoRepository {
    db: DbConn,
}

impl PostgresTodoRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn list_for_page(&self, todo_page_id: Uuid) -> Result<Vec<Todo>, RepoError> {
        let result = TodoEntity::find()
            .filter(todo::Column::TodoPageId.eq(todo_page_id))
            .order_by_asc(todo::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, RepoError> {
        let result = TodoEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, item: Todo) -> Result<Todo, RepoError> {
        let active: todo::ActiveModel = item.into();
        let model = active.insert(&self.db).await.map_err(insert_err)?;

        Ok(model.into())
    }

    async fn set_completed(&self, id: Uuid, completed: bool) -> Result<u64, RepoError> {
        let result = TodoEntity::update_many()
            .col_expr(todo::Column::Completed, Expr::value(completed))
            .col_expr(
                todo::Column::UpdatedAt,
                Expr::value(chrono::Utc::now()),
            )
            .filter(todo::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepoError> {
        let result = TodoEntity::delete_many()
            .filter(todo::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected)
    }
}
