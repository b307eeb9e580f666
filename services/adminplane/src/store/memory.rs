//! In-memory implementation of the directory store.
//!
//! # Purpose
//! Implements `DirectoryStore` with `HashMap`s guarded by
//! `tokio::sync::RwLock`. It exists for local development, tests, and
//! single-process deployments that accept losing state on restart.
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: uniqueness checks and inserts run
//!   under one write lock per map.
//! - Ids are process-local counters starting at 1.
//!
//! # Referential integrity
//! Deleting a group scrubs its id from user memberships, user delegation
//! scopes, and position grants by scanning those maps. Acceptable for
//! directory-sized data; a durable backend would use SQL cascades.
//!
//! # Metrics
//! User and group mutations update counters and gauges so dashboards
//! behave the same as with a durable backend.
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use quill_authz::{CountryId, GroupId, PositionId, RoleId, UserId};
use tokio::sync::RwLock;

use super::{DirectoryStore, StoreError, StoreResult};
use crate::model::{Country, Group, Position, Role, User};

pub struct InMemoryDirectory {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    groups: Arc<RwLock<HashMap<GroupId, Group>>>,
    positions: Arc<RwLock<HashMap<PositionId, Position>>>,
    roles: Arc<RwLock<HashMap<RoleId, Role>>>,
    countries: Arc<RwLock<HashMap<CountryId, Country>>>,
    next_user_id: AtomicI64,
    next_group_id: AtomicI64,
    next_position_id: AtomicI64,
    next_role_id: AtomicI64,
    next_country_id: AtomicI64,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            groups: Arc::new(RwLock::new(HashMap::new())),
            positions: Arc::new(RwLock::new(HashMap::new())),
            roles: Arc::new(RwLock::new(HashMap::new())),
            countries: Arc::new(RwLock::new(HashMap::new())),
            next_user_id: AtomicI64::new(1),
            next_group_id: AtomicI64::new(1),
            next_position_id: AtomicI64::new(1),
            next_role_id: AtomicI64::new(1),
            next_country_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectory {
    async fn get_user(&self, user_id: UserId) -> StoreResult<User> {
        let users = self.users.read().await;
        users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("user {user_id}")))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        let mut items: Vec<User> = users.values().cloned().collect();
        items.sort_by_key(|user| user.id);
        Ok(items)
    }

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "user with email {} already exists",
                user.email
            )));
        }
        let now = Utc::now();
        let user = User {
            id: UserId::new(self.next_user_id.fetch_add(1, Ordering::SeqCst)),
            created_at: now,
            updated_at: now,
            ..user
        };
        users.insert(user.id, user.clone());
        metrics::counter!("quill_user_changes_total", "op" => "created").increment(1);
        metrics::gauge!("quill_users_total").set(users.len() as f64);
        Ok(user)
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let Some(existing) = users.get(&user.id) else {
            return Err(StoreError::NotFound(format!("user {}", user.id)));
        };
        let created_at = existing.created_at;
        if users
            .values()
            .any(|other| other.id != user.id && other.email == user.email)
        {
            return Err(StoreError::Conflict(format!(
                "user with email {} already exists",
                user.email
            )));
        }
        let user = User {
            created_at,
            updated_at: Utc::now(),
            ..user
        };
        users.insert(user.id, user.clone());
        metrics::counter!("quill_user_changes_total", "op" => "updated").increment(1);
        Ok(user)
    }

    async fn get_group(&self, group_id: GroupId) -> StoreResult<Group> {
        let groups = self.groups.read().await;
        groups
            .get(&group_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("group {group_id}")))
    }

    async fn find_group_by_name(&self, name: &str) -> StoreResult<Option<Group>> {
        let groups = self.groups.read().await;
        Ok(groups.values().find(|group| group.name == name).cloned())
    }

    async fn list_groups(&self) -> StoreResult<Vec<Group>> {
        let groups = self.groups.read().await;
        let mut items: Vec<Group> = groups.values().cloned().collect();
        items.sort_by_key(|group| group.id);
        Ok(items)
    }

    async fn create_group(&self, group: Group) -> StoreResult<Group> {
        let mut groups = self.groups.write().await;
        if groups.values().any(|existing| existing.name == group.name) {
            return Err(StoreError::Conflict(format!(
                "group {} already exists",
                group.name
            )));
        }
        let now = Utc::now();
        let group = Group {
            id: GroupId::new(self.next_group_id.fetch_add(1, Ordering::SeqCst)),
            created_at: now,
            updated_at: now,
            ..group
        };
        groups.insert(group.id, group.clone());
        metrics::counter!("quill_group_changes_total", "op" => "created").increment(1);
        metrics::gauge!("quill_groups_total").set(groups.len() as f64);
        Ok(group)
    }

    async fn update_group(&self, group: Group) -> StoreResult<Group> {
        let mut groups = self.groups.write().await;
        let Some(existing) = groups.get(&group.id) else {
            return Err(StoreError::NotFound(format!("group {}", group.id)));
        };
        let created_at = existing.created_at;
        if groups
            .values()
            .any(|other| other.id != group.id && other.name == group.name)
        {
            return Err(StoreError::Conflict(format!(
                "group {} already exists",
                group.name
            )));
        }
        let group = Group {
            created_at,
            updated_at: Utc::now(),
            ..group
        };
        groups.insert(group.id, group.clone());
        metrics::counter!("quill_group_changes_total", "op" => "updated").increment(1);
        Ok(group)
    }

    async fn delete_group(&self, group_id: GroupId) -> StoreResult<Group> {
        let mut groups = self.groups.write().await;
        let Some(group) = groups.remove(&group_id) else {
            return Err(StoreError::NotFound(format!("group {group_id}")));
        };
        let remaining = groups.len();
        drop(groups);

        // Scrub the id so later reads never see a dangling reference.
        let mut users = self.users.write().await;
        for user in users.values_mut() {
            user.groups.remove(&group_id);
            user.assignable.groups.remove(&group_id);
        }
        drop(users);
        let mut positions = self.positions.write().await;
        for position in positions.values_mut() {
            position.groups.remove(&group_id);
        }
        drop(positions);

        metrics::counter!("quill_group_changes_total", "op" => "deleted").increment(1);
        metrics::gauge!("quill_groups_total").set(remaining as f64);
        Ok(group)
    }

    async fn get_position(&self, position_id: PositionId) -> StoreResult<Position> {
        let positions = self.positions.read().await;
        positions
            .get(&position_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("position {position_id}")))
    }

    async fn find_position_by_name(&self, name: &str) -> StoreResult<Option<Position>> {
        let positions = self.positions.read().await;
        Ok(positions
            .values()
            .find(|position| position.name == name)
            .cloned())
    }

    async fn list_positions(&self) -> StoreResult<Vec<Position>> {
        let positions = self.positions.read().await;
        let mut items: Vec<Position> = positions.values().cloned().collect();
        items.sort_by_key(|position| position.id);
        Ok(items)
    }

    async fn create_position(&self, position: Position) -> StoreResult<Position> {
        let mut positions = self.positions.write().await;
        if positions
            .values()
            .any(|existing| existing.name == position.name)
        {
            return Err(StoreError::Conflict(format!(
                "position {} already exists",
                position.name
            )));
        }
        let now = Utc::now();
        let position = Position {
            id: PositionId::new(self.next_position_id.fetch_add(1, Ordering::SeqCst)),
            created_at: now,
            updated_at: now,
            ..position
        };
        positions.insert(position.id, position.clone());
        Ok(position)
    }

    async fn update_position(&self, position: Position) -> StoreResult<Position> {
        let mut positions = self.positions.write().await;
        let Some(existing) = positions.get(&position.id) else {
            return Err(StoreError::NotFound(format!("position {}", position.id)));
        };
        let created_at = existing.created_at;
        if positions
            .values()
            .any(|other| other.id != position.id && other.name == position.name)
        {
            return Err(StoreError::Conflict(format!(
                "position {} already exists",
                position.name
            )));
        }
        let position = Position {
            created_at,
            updated_at: Utc::now(),
            ..position
        };
        positions.insert(position.id, position.clone());
        Ok(position)
    }

    async fn get_role(&self, role_id: RoleId) -> StoreResult<Role> {
        let roles = self.roles.read().await;
        roles
            .get(&role_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("role {role_id}")))
    }

    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.values().find(|role| role.name == name).cloned())
    }

    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        let roles = self.roles.read().await;
        let mut items: Vec<Role> = roles.values().cloned().collect();
        items.sort_by_key(|role| role.id);
        Ok(items)
    }

    async fn create_role(&self, role: Role) -> StoreResult<Role> {
        let mut roles = self.roles.write().await;
        if roles.values().any(|existing| existing.name == role.name) {
            return Err(StoreError::Conflict(format!(
                "role {} already exists",
                role.name
            )));
        }
        let role = Role {
            id: RoleId::new(self.next_role_id.fetch_add(1, Ordering::SeqCst)),
            created_at: Utc::now(),
            ..role
        };
        roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn get_country(&self, country_id: CountryId) -> StoreResult<Country> {
        let countries = self.countries.read().await;
        countries
            .get(&country_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("country {country_id}")))
    }

    async fn list_countries(&self) -> StoreResult<Vec<Country>> {
        let countries = self.countries.read().await;
        let mut items: Vec<Country> = countries.values().cloned().collect();
        items.sort_by_key(|country| country.id);
        Ok(items)
    }

    async fn create_country(&self, country: Country) -> StoreResult<Country> {
        let mut countries = self.countries.write().await;
        if countries
            .values()
            .any(|existing| existing.code == country.code)
        {
            return Err(StoreError::Conflict(format!(
                "country {} already exists",
                country.code
            )));
        }
        let country = Country {
            id: CountryId::new(self.next_country_id.fetch_add(1, Ordering::SeqCst)),
            ..country
        };
        countries.insert(country.id, country.clone());
        Ok(country)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_user_assigns_ids_and_rejects_duplicate_emails() {
        let store = InMemoryDirectory::new();
        let first = store
            .create_user(User::new("Ada", "Lovelace", "ada@example.com"))
            .await
            .expect("create");
        let second = store
            .create_user(User::new("Grace", "Hopper", "grace@example.com"))
            .await
            .expect("create");
        assert_eq!(first.id, UserId::new(1));
        assert_eq!(second.id, UserId::new(2));

        let duplicate = store
            .create_user(User::new("Ada", "Again", "ada@example.com"))
            .await;
        assert!(matches!(duplicate, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_user_keeps_created_at_and_rejects_email_collisions() {
        let store = InMemoryDirectory::new();
        let user = store
            .create_user(User::new("Ada", "Lovelace", "ada@example.com"))
            .await
            .expect("create");
        store
            .create_user(User::new("Grace", "Hopper", "grace@example.com"))
            .await
            .expect("create");

        let mut renamed = user.clone();
        renamed.first_name = "Augusta".to_string();
        let updated = store.update_user(renamed).await.expect("update");
        assert_eq!(updated.created_at, user.created_at);
        assert!(updated.updated_at >= user.updated_at);

        let mut stolen = updated.clone();
        stolen.email = "grace@example.com".to_string();
        assert!(matches!(
            store.update_user(stolen).await,
            Err(StoreError::Conflict(_))
        ));

        let mut ghost = updated;
        ghost.id = UserId::new(99);
        assert!(matches!(
            store.update_user(ghost).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_group_scrubs_every_reference() {
        let store = InMemoryDirectory::new();
        let group = store
            .create_group(Group::new("ops"))
            .await
            .expect("create group");

        let mut user = User::new("Ada", "Lovelace", "ada@example.com");
        user.groups.insert(group.id);
        user.assignable.groups.insert(group.id);
        let user = store.create_user(user).await.expect("create user");

        let mut position = Position::new("Lead");
        position.groups.insert(group.id);
        let position = store
            .create_position(position)
            .await
            .expect("create position");

        let deleted = store.delete_group(group.id).await.expect("delete");
        assert_eq!(deleted.name, "ops");

        let user = store.get_user(user.id).await.expect("get user");
        assert!(user.groups.is_empty());
        assert!(user.assignable.groups.is_empty());
        let position = store.get_position(position.id).await.expect("get position");
        assert!(position.groups.is_empty());

        assert!(matches!(
            store.delete_group(group.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn listings_are_ordered_by_id() {
        let store = InMemoryDirectory::new();
        for name in ["ops", "basic", "admin"] {
            store
                .create_group(Group::new(name))
                .await
                .expect("create group");
        }
        let names: Vec<String> = store
            .list_groups()
            .await
            .expect("list")
            .into_iter()
            .map(|group| group.name)
            .collect();
        assert_eq!(names, vec!["ops", "basic", "admin"]);
    }

    #[tokio::test]
    async fn role_and_country_uniqueness_is_enforced() {
        let store = InMemoryDirectory::new();
        store
            .create_role(Role::new("admin", "Full administrative access"))
            .await
            .expect("create role");
        assert!(matches!(
            store.create_role(Role::new("admin", "again")).await,
            Err(StoreError::Conflict(_))
        ));

        store
            .create_country(Country::new("SE", "Sweden"))
            .await
            .expect("create country");
        assert!(matches!(
            store.create_country(Country::new("SE", "Sweden")).await,
            Err(StoreError::Conflict(_))
        ));
    }
}
