use crate::types::UserId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("user {user_id} is not authorized: requires one of [{}]", .allowed.join(", "))]
    NotAuthorized {
        user_id: UserId,
        allowed: Vec<String>,
    },
}

pub type AuthzResult<T> = Result<T, AuthzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_authorized_names_the_missing_roles() {
        let error = AuthzError::NotAuthorized {
            user_id: UserId::new(9),
            allowed: vec!["route:users#edit".to_string(), "admin".to_string()],
        };
        let rendered = error.to_string();
        assert!(rendered.contains("user 9"));
        assert!(rendered.contains("route:users#edit, admin"));
    }
}
