//! The file-server wire vocabulary.
//!
//! Requests and responses are flat JSON objects. Request keys: `user`,
//! `action`, `path`, `data`, `roles`, `role`, `target`, `permissions`.
//! Every response carries a `status`.

use std::fmt;

use serde_json::Value;

/// A request or response body.
pub type JsonMessage = serde_json::Map<String, Value>;

/// Every action the server understands, plus a catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Read,
    Write,
    StartSession,
    EndSession,
    AssignRole,
    UnassignRole,
    ChangePermissions,
    Unknown(String),
}

impl Action {
    /// Parse a wire name. Unrecognized names become [`Action::Unknown`].
    pub fn parse(name: &str) -> Self {
        match name {
            "read" => Action::Read,
            "write" => Action::Write,
            "start_session" => Action::StartSession,
            "end_session" => Action::EndSession,
            "assign_role" => Action::AssignRole,
            "unassign_role" => Action::UnassignRole,
            "change_permissions" => Action::ChangePermissions,
            other => Action::Unknown(other.to_string()),
        }
    }

    /// The wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::StartSession => "start_session",
            Action::EndSession => "end_session",
            Action::AssignRole => "assign_role",
            Action::UnassignRole => "unassign_role",
            Action::ChangePermissions => "change_permissions",
            Action::Unknown(name) => name,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    AuthorizationFailure,
    PrerequisiteFailure,
    NotFound,
    InvalidRequest,
    UnknownAction,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::AuthorizationFailure => "authorization failure",
            Status::PrerequisiteFailure => "prerequisite failure",
            Status::NotFound => "not found",
            Status::InvalidRequest => "invalid request",
            Status::UnknownAction => "unknown action",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "success" => Status::Success,
            "authorization failure" => Status::AuthorizationFailure,
            "prerequisite failure" => Status::PrerequisiteFailure,
            "not found" => Status::NotFound,
            "invalid request" => Status::InvalidRequest,
            "unknown action" => Status::UnknownAction,
            _ => return None,
        })
    }

    /// A response carrying only this status.
    pub fn response(self) -> JsonMessage {
        let mut message = JsonMessage::new();
        message.insert("status".into(), Value::from(self.as_str()));
        message
    }

    /// The status of a response, if it has a recognized one.
    pub fn of(response: &JsonMessage) -> Option<Self> {
        response.get("status").and_then(Value::as_str).and_then(Self::parse)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string-valued field.
pub(crate) fn str_field<'m>(message: &'m JsonMessage, key: &str) -> Option<&'m str> {
    message.get(key).and_then(Value::as_str)
}

/// A field holding an array of strings. Any non-string element fails the whole field.
pub(crate) fn str_list<'m>(message: &'m JsonMessage, key: &str) -> Option<Vec<&'m str>> {
    message
        .get(key)?
        .as_array()?
        .iter()
        .map(Value::as_str)
        .collect()
}

/// Builder for request messages.
///
/// ```rust
/// use secsim_access::{Action, Request};
///
/// let request = Request::new("Alice", Action::Read).path("public.txt").build();
/// assert_eq!(request["action"], "read");
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    message: JsonMessage,
}

impl Request {
    pub fn new(user: &str, action: Action) -> Self {
        let mut message = JsonMessage::new();
        message.insert("user".into(), Value::from(user));
        message.insert("action".into(), Value::from(action.as_str()));
        Self { message }
    }

    pub fn path(self, path: &str) -> Self {
        self.field("path", Value::from(path))
    }

    pub fn data(self, data: &str) -> Self {
        self.field("data", Value::from(data))
    }

    pub fn target(self, target: &str) -> Self {
        self.field("target", Value::from(target))
    }

    pub fn role(self, role: &str) -> Self {
        self.field("role", Value::from(role))
    }

    pub fn roles<'a>(self, roles: impl IntoIterator<Item = &'a str>) -> Self {
        self.field("roles", roles.into_iter().collect())
    }

    pub fn permissions<'a>(self, permissions: impl IntoIterator<Item = &'a str>) -> Self {
        self.field("permissions", permissions.into_iter().collect())
    }

    /// Set an arbitrary field.
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.message.insert(key.into(), value);
        self
    }

    pub fn build(self) -> JsonMessage {
        self.message
    }
}
