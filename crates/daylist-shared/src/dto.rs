//! Data Transfer Objects - request/response types for the API.
//!
//! Field names follow the form-field and JSON contract the web client
//! already speaks, hence the camelCase renames.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Form body for creating a todo page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePageForm {
    pub title: String,
}

/// Form body for deleting a todo page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePageForm {
    pub id: Uuid,
}

/// What a todo-page action form asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TodoIntent {
    CreateTodo,
    ModifyTodoStatus,
    DeleteTodo,
}

/// Form body posted to a todo page. Which optional fields must be present
/// depends on the intent; handlers match on it and reject incomplete forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoActionForm {
    pub intent: TodoIntent,
    pub id: Option<Uuid>,
    pub todo_name: Option<String>,
    pub checked: Option<bool>,
}

/// One entry in a day's page listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoPageListItem {
    pub id: Uuid,
    pub title: String,
}

/// A day's worth of todo pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPageList {
    pub todo_page_list_items: Vec<TodoPageListItem>,
}

/// One todo item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: Uuid,
    pub content: String,
    pub completed: bool,
}

/// A page's todos plus its title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTodos {
    pub todos: Vec<TodoItem>,
    pub todo_page_name: String,
}

/// Simple acknowledgment body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn success() -> Self {
        Self {
            message: "success".to_string(),
        }
    }
}

/// 400 body for a rejected page title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNameError {
    pub todo_page_name_error: String,
}

/// 400 body for rejected todo content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoContentError {
    pub todo_content_error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_list_serializes_with_client_field_names() {
        let list = TodoPageList {
            todo_page_list_items: vec![TodoPageListItem {
                id: Uuid::nil(),
                title: "Groceries".to_string(),
            }],
        };
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.get("todoPageListItems").is_some());
    }

    #[test]
    fn todo_action_form_parses_from_urlencoded() {
        let form: TodoActionForm =
            serde_urlencoded::from_str("intent=modifyTodoStatus&id=00000000-0000-0000-0000-000000000000&checked=true")
                .unwrap();
        assert_eq!(form.intent, TodoIntent::ModifyTodoStatus);
        assert_eq!(form.checked, Some(true));
        assert!(form.todo_name.is_none());
    }

    #[test]
    fn field_errors_use_the_client_keys() {
        let err = PageNameError {
            todo_page_name_error: "bad".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"todoPageNameError":"bad"}"#
        );
        let err = TodoContentError {
            todo_content_error: "bad".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"todoContentError":"bad"}"#
        );
    }
}
