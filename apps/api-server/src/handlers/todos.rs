//! Todo item handlers.
//!
//! Every todo operation arrives as a form post against the containing page,
//! so ownership of that page is checked once, up front, before the intent is
//! dispatched.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use daylist_core::domain::Todo;
use daylist_core::validation::validate_todo_content;
use daylist_shared::dto::{StatusMessage, TodoActionForm, TodoContentError, TodoIntent};

use crate::handlers::{parse_date, redirect};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/todos/{date}/{page_id}
pub async fn todo_action(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(String, Uuid)>,
    form: web::Form<TodoActionForm>,
) -> AppResult<HttpResponse> {
    let (raw_date, page_id) = path.into_inner();
    let date = parse_date(&raw_date)?;
    let form = form.into_inner();

    // Todos carry no owner column; the page lookup is the authorization check.
    let page = state
        .pages
        .find_owned(page_id, identity.user_id, None)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo page not found".to_string()))?;

    let back_to_page = format!("/{}/{}", date.format("%Y-%m-%d"), page.id);

    match form.intent {
        TodoIntent::CreateTodo => {
            let content = form.todo_name.unwrap_or_default();
            if let Err(e) = validate_todo_content(&content) {
                return Ok(HttpResponse::BadRequest().json(TodoContentError {
                    todo_content_error: e.to_string(),
                }));
            }

            state.todos.create(Todo::new(page.id, content)).await?;
            Ok(redirect(back_to_page))
        }
        TodoIntent::ModifyTodoStatus => {
            let todo = owned_todo(&state, &form, page.id).await?;
            let checked = form.checked.unwrap_or(false);

            state.todos.set_completed(todo.id, checked).await?;
            Ok(HttpResponse::Ok().json(StatusMessage::success()))
        }
        TodoIntent::DeleteTodo => {
            let todo = owned_todo(&state, &form, page.id).await?;

            state.todos.delete(todo.id).await?;
            Ok(redirect(back_to_page))
        }
    }
}

/// Resolve the todo named in the form, requiring it to live under `page_id`.
/// A todo from some other page is reported exactly like a missing one.
async fn owned_todo(
    state: &web::Data<AppState>,
    form: &TodoActionForm,
    page_id: Uuid,
) -> Result<Todo, AppError> {
    let id = form
        .id
        .ok_or_else(|| AppError::BadRequest("Missing todo id".to_string()))?;

    state
        .todos
        .find_by_id(id)
        .await?
        .filter(|t| t.todo_page_id == page_id)
        .ok_or_else(|| AppError::NotFound("Todo not found".to_string()))
}
