#![allow(dead_code)]

use adminplane::app::{AppState, build_state};
use adminplane::auth::AuthContext;
use adminplane::config::AdminPlaneConfig;
use adminplane::model::User;
use adminplane::seed::ensure_seed_data;

pub fn test_config() -> AdminPlaneConfig {
    AdminPlaneConfig {
        admin_email: "admin@example.com".to_string(),
        admin_country: "SE".to_string(),
        sync_dry_run: false,
    }
}

/// Seeded state plus a context acting as the administrator.
pub async fn admin_context() -> (AppState, AuthContext) {
    let state = build_state();
    let admin = ensure_seed_data(&state, &test_config()).await.expect("seed");
    (state, AuthContext::for_user(admin))
}

/// A user with no grants at all.
pub async fn plain_user(state: &AppState, first: &str, last: &str, email: &str) -> User {
    state
        .store
        .create_user(User::new(first, last, email))
        .await
        .expect("create user")
}

/// A user granted exactly the given seeded role labels, directly.
pub async fn user_with_roles(state: &AppState, email: &str, roles: &[&str]) -> User {
    let mut user = User::new("Test", "Operator", email);
    for label in roles {
        let role = state
            .store
            .find_role_by_name(label)
            .await
            .expect("find role")
            .expect("role seeded");
        user.roles.insert(role.id);
    }
    state.store.create_user(user).await.expect("create user")
}
