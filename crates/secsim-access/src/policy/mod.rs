//! Access-control models.
//!
//! Each model is an [`AccessPolicy`](crate::AccessPolicy) plugged into a
//! [`FileServer`](crate::FileServer). Models that need extra actions
//! (ownership changes, sessions, role assignment) contribute handlers.

pub mod abac;
pub mod dac;
pub mod mac;
pub mod rbac;

pub use abac::{AttributeBased, Environment, Movie, PolicyStore, Predicate, Rating, Subscriber};
pub use dac::Discretionary;
pub use mac::{BellLaPadula, Level};
pub use rbac::{Role, RoleBased, RoleId};
