//! Shared fixtures for handler tests.

use std::sync::Arc;

use daylist_core::domain::User;
use daylist_core::ports::{PasswordService, TokenService, UserRepository};
use daylist_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};
use daylist_shared::dto::RegisterUserRequest;

use crate::state::AppState;

/// Everything a test app needs registered as app data.
pub(crate) struct TestServices {
    pub state: AppState,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl TestServices {
    pub fn new() -> Self {
        Self {
            state: AppState::in_memory(),
            tokens: Arc::new(JwtTokenService::new(JwtConfig {
                secret: "test-secret-key".to_string(),
                expiration_hours: 1,
                issuer: "test-issuer".to_string(),
            })),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    /// Insert a user directly and mint a Bearer header for them.
    pub async fn seed_user(&self, email: &str) -> (User, String) {
        let hash = self.passwords.hash("testing123").unwrap();
        let user = self
            .state
            .users
            .create(User::new(email.to_string(), hash))
            .await
            .unwrap();
        let token = self.tokens.generate_token(user.id, &user.email).unwrap();
        (user, format!("Bearer {token}"))
    }
}

/// Register/login request body. The two endpoints share the same shape.
pub(crate) fn register_body(email: &str, password: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}
