//! Role-based access control with role hierarchies and prerequisite roles.
//!
//! Roles live in an arena and refer to each other by [`RoleId`]. A role's
//! effective rights are its own plus those of every ancestor. Users are
//! assigned roles, and activate a subset of them in a session; only the
//! active session's rights count for authorization.
//!
//! Assignment is constrained by the hierarchy: a role can be assigned only
//! once all of its ancestors are, and unassigned only while none of its
//! descendants are.

use std::collections::{BTreeSet, HashMap};

use crate::error::{AccessError, Result};
use crate::message::{str_field, str_list, Action, JsonMessage, Status};
use crate::server::{AccessPolicy, FileServer, Handler};

/// Handle to a role in a [`RoleBased`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(usize);

/// A named bundle of rights.
#[derive(Debug, Clone)]
pub struct Role {
    name: String,
    rights: BTreeSet<Action>,
    parents: Vec<RoleId>,
    children: Vec<RoleId>,
}

impl Role {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rights granted directly, not inherited.
    pub fn own_rights(&self) -> &BTreeSet<Action> {
        &self.rights
    }

    /// Direct parents.
    pub fn parents(&self) -> &[RoleId] {
        &self.parents
    }

    /// Direct children.
    pub fn children(&self) -> &[RoleId] {
        &self.children
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Up,
    Down,
}

/// Roles, assignments and sessions.
#[derive(Debug, Clone, Default)]
pub struct RoleBased {
    roles: Vec<Role>,
    by_name: HashMap<String, RoleId>,
    assignments: HashMap<String, BTreeSet<RoleId>>,
    sessions: HashMap<String, BTreeSet<RoleId>>,
}

impl RoleBased {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Role Graph
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a role. Parents must already be registered, so the graph
    /// stays acyclic.
    pub fn add_role(
        &mut self,
        name: &str,
        rights: impl IntoIterator<Item = Action>,
        parents: &[&str],
    ) -> Result<RoleId> {
        if self.by_name.contains_key(name) {
            return Err(AccessError::DuplicateRole(name.to_string()));
        }
        let parents = parents
            .iter()
            .map(|parent| self.require(parent))
            .collect::<Result<Vec<_>>>()?;

        let id = RoleId(self.roles.len());
        for parent in &parents {
            self.roles[parent.0].children.push(id);
        }
        self.roles.push(Role {
            name: name.to_string(),
            rights: rights.into_iter().collect(),
            parents,
            children: Vec::new(),
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn role_id(&self, name: &str) -> Option<RoleId> {
        self.by_name.get(name).copied()
    }

    /// The role behind `id`.
    ///
    /// # Panics
    ///
    /// If `id` was issued by a different arena.
    pub fn role(&self, id: RoleId) -> &Role {
        &self.roles[id.0]
    }

    /// Every role `id` inherits from, transitively. Excludes `id`.
    pub fn ancestors(&self, id: RoleId) -> BTreeSet<RoleId> {
        self.closure(id, Edge::Up)
    }

    /// Every role inheriting from `id`, transitively. Excludes `id`.
    pub fn descendants(&self, id: RoleId) -> BTreeSet<RoleId> {
        self.closure(id, Edge::Down)
    }

    /// Own rights plus every ancestor's.
    pub fn rights(&self, id: RoleId) -> BTreeSet<Action> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .flat_map(|role| self.role(role).rights.iter().cloned())
            .collect()
    }

    fn closure(&self, start: RoleId, edge: Edge) -> BTreeSet<RoleId> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let role = self.role(id);
            let next = match edge {
                Edge::Up => &role.parents,
                Edge::Down => &role.children,
            };
            for &neighbour in next {
                if seen.insert(neighbour) {
                    stack.push(neighbour);
                }
            }
        }
        seen
    }

    fn require(&self, name: &str) -> Result<RoleId> {
        self.role_id(name)
            .ok_or_else(|| AccessError::UnknownRole(name.to_string()))
    }

    fn resolve(&self, names: &[&str]) -> Option<BTreeSet<RoleId>> {
        names.iter().map(|name| self.role_id(name)).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Assignments and Sessions
    // ─────────────────────────────────────────────────────────────────────────

    /// Assign `role` to `user` without prerequisite checks. For initial setup.
    pub fn assign(&mut self, user: &str, role: &str) -> Result<()> {
        let id = self.require(role)?;
        self.assignments.entry(user.to_string()).or_default().insert(id);
        Ok(())
    }

    /// Roles assigned to `user`.
    pub fn assigned(&self, user: &str) -> BTreeSet<RoleId> {
        self.assignments.get(user).cloned().unwrap_or_default()
    }

    /// Roles active in `user`'s session, if one is open.
    pub fn session(&self, user: &str) -> Option<&BTreeSet<RoleId>> {
        self.sessions.get(user)
    }

    /// Union of the effective rights of `user`'s active roles.
    pub fn session_rights(&self, user: &str) -> BTreeSet<Action> {
        self.sessions
            .get(user)
            .into_iter()
            .flatten()
            .flat_map(|&id| self.rights(id))
            .collect()
    }
}

impl AccessPolicy for RoleBased {
    fn authorize(&self, user: &str, _resource: &str, action: &Action) -> bool {
        match action {
            Action::StartSession | Action::EndSession => true,
            _ => self.session_rights(user).contains(action),
        }
    }

    fn handlers() -> Vec<(Action, Handler<Self>)> {
        vec![
            (Action::StartSession, start_session as Handler<Self>),
            (Action::EndSession, end_session as Handler<Self>),
            (Action::AssignRole, assign_role as Handler<Self>),
            (Action::UnassignRole, unassign_role as Handler<Self>),
        ]
    }
}

fn start_session(server: &mut FileServer<RoleBased>, request: &JsonMessage) -> JsonMessage {
    let (Some(user), Some(names)) = (str_field(request, "user"), str_list(request, "roles"))
    else {
        return Status::InvalidRequest.response();
    };
    let policy = server.policy_mut();
    let Some(requested) = policy.resolve(&names) else {
        return Status::InvalidRequest.response();
    };

    let assigned = policy.assigned(user);
    if !requested.is_subset(&assigned) {
        return Status::AuthorizationFailure.response();
    }

    policy.sessions.insert(user.to_string(), requested);
    Status::Success.response()
}

fn end_session(server: &mut FileServer<RoleBased>, request: &JsonMessage) -> JsonMessage {
    let Some(user) = str_field(request, "user") else {
        return Status::InvalidRequest.response();
    };
    server.policy_mut().sessions.remove(user);
    Status::Success.response()
}

fn assign_role(server: &mut FileServer<RoleBased>, request: &JsonMessage) -> JsonMessage {
    let (Some(target), Some(name)) = (str_field(request, "target"), str_field(request, "role"))
    else {
        return Status::InvalidRequest.response();
    };
    let policy = server.policy_mut();
    let Some(role) = policy.role_id(name) else {
        return Status::InvalidRequest.response();
    };

    let assigned = policy.assigned(target);
    if !policy.ancestors(role).is_subset(&assigned) {
        return Status::PrerequisiteFailure.response();
    }

    policy.assignments.entry(target.to_string()).or_default().insert(role);
    Status::Success.response()
}

fn unassign_role(server: &mut FileServer<RoleBased>, request: &JsonMessage) -> JsonMessage {
    let (Some(target), Some(name)) = (str_field(request, "target"), str_field(request, "role"))
    else {
        return Status::InvalidRequest.response();
    };
    let policy = server.policy_mut();
    let Some(role) = policy.role_id(name) else {
        return Status::InvalidRequest.response();
    };

    let assigned = policy.assigned(target);
    if !policy.descendants(role).is_disjoint(&assigned) {
        return Status::PrerequisiteFailure.response();
    }

    if let Some(roles) = policy.assignments.get_mut(target) {
        roles.remove(&role);
    }
    // Revocation reaches an open session too.
    if let Some(active) = policy.sessions.get_mut(target) {
        active.remove(&role);
    }
    Status::Success.response()
}
