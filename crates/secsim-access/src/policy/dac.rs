//! Discretionary access control.
//!
//! Every path has an owner. Owners implicitly read and write their paths and
//! decide which other users may do so through `change_permissions`. Writing a
//! path that does not exist yet creates it, owned by the writer.

use std::collections::{BTreeSet, HashMap};

use crate::message::{str_field, str_list, Action, JsonMessage, Status};
use crate::server::{AccessPolicy, FileServer, Handler};

/// Ownership and per-path access lists.
#[derive(Debug, Clone, Default)]
pub struct Discretionary {
    owners: HashMap<String, String>,
    grants: HashMap<String, HashMap<String, BTreeSet<Action>>>,
}

impl Discretionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(mut self, path: &str, owner: &str) -> Self {
        self.owners.insert(path.to_string(), owner.to_string());
        self
    }

    pub fn owner(&self, path: &str) -> Option<&str> {
        self.owners.get(path).map(String::as_str)
    }

    /// Explicitly granted actions of `user` on `path`. Excludes owner rights.
    pub fn permissions(&self, path: &str, user: &str) -> BTreeSet<Action> {
        self.grants
            .get(path)
            .and_then(|users| users.get(user))
            .cloned()
            .unwrap_or_default()
    }

    /// Replace `user`'s permission set on `path`. An empty set revokes.
    pub fn set_permissions(&mut self, path: &str, user: &str, permissions: BTreeSet<Action>) {
        let users = self.grants.entry(path.to_string()).or_default();
        if permissions.is_empty() {
            users.remove(user);
        } else {
            users.insert(user.to_string(), permissions);
        }
    }

    fn is_owner(&self, user: &str, path: &str) -> bool {
        self.owner(path) == Some(user)
    }
}

impl AccessPolicy for Discretionary {
    fn authorize(&self, user: &str, resource: &str, action: &Action) -> bool {
        match action {
            Action::Read | Action::Write if self.is_owner(user, resource) => true,
            Action::Read | Action::Write => self.permissions(resource, user).contains(action),
            Action::ChangePermissions => self.is_owner(user, resource),
            _ => false,
        }
    }

    fn creates_on_write(&self) -> bool {
        true
    }

    /// Anyone may create a missing path unless it is already claimed.
    fn authorize_create(&self, user: &str, path: &str) -> bool {
        self.owner(path).map_or(true, |owner| owner == user)
    }

    fn on_create(&mut self, user: &str, path: &str) {
        self.owners.insert(path.to_string(), user.to_string());
    }

    fn handlers() -> Vec<(Action, Handler<Self>)> {
        vec![(Action::ChangePermissions, change_permissions as Handler<Self>)]
    }
}

fn change_permissions(
    server: &mut FileServer<Discretionary>,
    request: &JsonMessage,
) -> JsonMessage {
    let (Some(path), Some(target), Some(names)) = (
        str_field(request, "path"),
        str_field(request, "target"),
        str_list(request, "permissions"),
    ) else {
        return Status::InvalidRequest.response();
    };

    let mut permissions = BTreeSet::new();
    for name in names {
        match Action::parse(name) {
            action @ (Action::Read | Action::Write) => {
                permissions.insert(action);
            }
            _ => return Status::InvalidRequest.response(),
        }
    }

    server.policy_mut().set_permissions(path, target, permissions);
    Status::Success.response()
}
