//! Directory data model module.
//!
//! # Purpose
//! Re-exports the user, group, position, role, and country records used
//! by the store, auth, and workflow layers.
mod country;
mod group;
mod position;
mod role;
mod user;

pub use country::Country;
pub use group::Group;
pub use position::Position;
pub use role::Role;
pub use user::User;
