//! Input validation for user-supplied form fields.
//!
//! All functions here are pure and deterministic: no I/O, no side effects.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Why a submitted field was rejected. The `Display` text is shown to the
/// user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Page name must be between 1 and 30 characters")]
    PageNameLength,

    #[error("Page name must only contain letters, numbers, and spaces")]
    PageNameCharset,

    #[error("Todo content must be between 1 and 150 characters")]
    TodoContentLength,

    #[error("Todo content must only contain alphanumeric characters and basic special characters")]
    TodoContentCharset,
}

const PAGE_NAME_MAX: usize = 30;
const TODO_CONTENT_MAX: usize = 150;

/// A todo page title: 1 to 30 characters, ASCII only.
pub fn validate_page_name(name: &str) -> Result<(), ValidationError> {
    let length = name.chars().count();
    if length == 0 || length > PAGE_NAME_MAX {
        return Err(ValidationError::PageNameLength);
    }
    if !name.is_ascii() {
        return Err(ValidationError::PageNameCharset);
    }
    Ok(())
}

/// A todo item's content: 1 to 150 characters, ASCII only.
pub fn validate_todo_content(content: &str) -> Result<(), ValidationError> {
    let length = content.chars().count();
    if length == 0 || length > TODO_CONTENT_MAX {
        return Err(ValidationError::TodoContentLength);
    }
    if !content.is_ascii() {
        return Err(ValidationError::TodoContentCharset);
    }
    Ok(())
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*@([A-Za-z0-9-]+\.)+[A-Za-z]{2,}$"#)
        .expect("email pattern is valid")
});

/// Structural check for a single `local@domain` address shape.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// The display name for a user: everything before the first `@`, or the whole
/// string when there is no `@`.
pub fn extract_name_from_email(email: &str) -> &str {
    match email.split_once('@') {
        Some((name, _)) => name,
        None => email,
    }
}
