use crate::model::{Country, Group, Position, Role, User};
use async_trait::async_trait;
use quill_authz::{CountryId, GroupId, PositionId, RoleId, UserId};
use thiserror::Error;

pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Authoritative storage for directory objects.
///
/// Create operations assign the id and both timestamps; whatever the
/// argument carries in those fields is ignored. Update operations
/// replace the stored record wholesale, keep `created_at`, and bump
/// `updated_at`. Listings are ordered by id.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn get_user(&self, user_id: UserId) -> StoreResult<User>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn create_user(&self, user: User) -> StoreResult<User>;
    async fn update_user(&self, user: User) -> StoreResult<User>;

    async fn get_group(&self, group_id: GroupId) -> StoreResult<Group>;
    async fn find_group_by_name(&self, name: &str) -> StoreResult<Option<Group>>;
    async fn list_groups(&self) -> StoreResult<Vec<Group>>;
    async fn create_group(&self, group: Group) -> StoreResult<Group>;
    async fn update_group(&self, group: Group) -> StoreResult<Group>;
    /// Deletes the group and scrubs its id from user memberships, user
    /// delegation scopes, and position grants.
    async fn delete_group(&self, group_id: GroupId) -> StoreResult<Group>;

    async fn get_position(&self, position_id: PositionId) -> StoreResult<Position>;
    async fn find_position_by_name(&self, name: &str) -> StoreResult<Option<Position>>;
    async fn list_positions(&self) -> StoreResult<Vec<Position>>;
    async fn create_position(&self, position: Position) -> StoreResult<Position>;
    async fn update_position(&self, position: Position) -> StoreResult<Position>;

    async fn get_role(&self, role_id: RoleId) -> StoreResult<Role>;
    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>>;
    async fn list_roles(&self) -> StoreResult<Vec<Role>>;
    async fn create_role(&self, role: Role) -> StoreResult<Role>;

    async fn get_country(&self, country_id: CountryId) -> StoreResult<Country>;
    async fn list_countries(&self) -> StoreResult<Vec<Country>>;
    async fn create_country(&self, country: Country) -> StoreResult<Country>;

    fn backend_name(&self) -> &'static str;
}
