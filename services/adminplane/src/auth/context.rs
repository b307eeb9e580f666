use quill_ledger::Actor;

use crate::model::User;

/// The authenticated principal for one request.
///
/// During impersonation `user` is the effective user: permission checks
/// and change attribution follow it, while `original_user` keeps the
/// admin who started the session.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    pub original_user: Option<User>,
    pub is_impersonating: bool,
}

impl AuthContext {
    pub fn for_user(user: User) -> Self {
        Self {
            user,
            original_user: None,
            is_impersonating: false,
        }
    }

    /// Ledger actor for changes made in this context.
    pub fn actor(&self) -> Actor {
        Actor::Human {
            id: self.user.id.get(),
            display_name: self.user.full_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_context_is_not_impersonating() {
        let ctx = AuthContext::for_user(User::new("Ada", "Lovelace", "ada@example.com"));
        assert!(!ctx.is_impersonating);
        assert!(ctx.original_user.is_none());
    }

    #[test]
    fn actor_carries_the_effective_identity() {
        let ctx = AuthContext::for_user(User::new("Ada", "Lovelace", "ada@example.com"));
        let actor = ctx.actor();
        assert_eq!(actor.display_name(), "Ada Lovelace");
        assert_eq!(actor.actor_id(), Some(0));
    }
}
