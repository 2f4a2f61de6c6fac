//! Request/response file server.
//!
//! The server owns a resource table and one access-control policy. Every
//! request goes through the same pipeline:
//!
//! 1. Parse `user` and `action`
//! 2. Look up the action's handler
//! 3. Ask the policy to authorize `(user, path, action)`, or to authorize
//!    creating `path` when a write targets a missing one
//! 4. Run the handler
//!
//! Policies add behaviour in two ways: by overriding [`AccessPolicy::authorize`]
//! and by contributing handlers for extra actions.

use std::collections::HashMap;

use serde_json::Value;

use secsim_link::{Actor, Transport};

use crate::error::Result;
use crate::message::{str_field, Action, JsonMessage, Status};
use crate::store::ResourceTable;

/// A request handler. Runs only after authorization succeeded.
pub type Handler<P> = fn(&mut FileServer<P>, &JsonMessage) -> JsonMessage;

/// The access-control seam.
pub trait AccessPolicy: Sized {
    /// Decide whether `user` may perform `action` on `resource`.
    ///
    /// `resource` is the request's `path`, or empty when the request has none.
    fn authorize(&self, user: &str, resource: &str, action: &Action) -> bool {
        let _ = (user, resource, action);
        false
    }

    /// Whether writing a missing path creates it.
    fn creates_on_write(&self) -> bool {
        false
    }

    /// Decide whether `user` may create the missing `path`.
    ///
    /// Consulted instead of [`AccessPolicy::authorize`] for a write to a path
    /// the resource table does not hold, when [`AccessPolicy::creates_on_write`]
    /// is true.
    fn authorize_create(&self, user: &str, path: &str) -> bool {
        let _ = (user, path);
        false
    }

    /// Called after a write created `path`.
    fn on_create(&mut self, user: &str, path: &str) {
        let _ = (user, path);
    }

    /// Handlers for actions beyond `read` and `write`.
    fn handlers() -> Vec<(Action, Handler<Self>)> {
        Vec::new()
    }
}

/// Denies every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl AccessPolicy for DenyAll {}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Name of the server's actor.
    pub name: String,

    /// Suppress the server actor's traffic reports.
    pub quiet: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Server".to_string(),
            quiet: false,
        }
    }
}

/// A file server enforcing policy `P`.
pub struct FileServer<P: AccessPolicy> {
    actor: Actor,
    resources: ResourceTable,
    policy: P,
    handlers: HashMap<Action, Handler<P>>,
}

impl<P: AccessPolicy> FileServer<P> {
    /// Server with default configuration.
    pub fn new(policy: P) -> Self {
        Self::with_config(ServerConfig::default(), policy)
    }

    /// Server with explicit configuration.
    pub fn with_config(config: ServerConfig, policy: P) -> Self {
        let mut handlers: HashMap<Action, Handler<P>> = HashMap::new();
        handlers.insert(Action::Read, read);
        handlers.insert(Action::Write, write);
        handlers.extend(P::handlers());

        Self {
            actor: Actor::new(config.name).quiet(config.quiet),
            resources: ResourceTable::new(),
            policy,
            handlers,
        }
    }

    /// Replace the server's actor, e.g. to attach a different sink.
    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = actor;
        self
    }

    /// Seed a file.
    pub fn with_resource(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.resources.insert(path, contents);
        self
    }

    /// Register or replace the handler for `action`.
    pub fn register(&mut self, action: Action, handler: Handler<P>) {
        self.handlers.insert(action, handler);
    }

    pub fn name(&self) -> &str {
        self.actor.name()
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn resources(&self) -> &ResourceTable {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceTable {
        &mut self.resources
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Process one request and produce its response.
    pub fn handle(&mut self, request: &JsonMessage) -> JsonMessage {
        let (Some(user), Some(action)) = (str_field(request, "user"), str_field(request, "action"))
        else {
            return Status::InvalidRequest.response();
        };
        let action = Action::parse(action);

        let Some(handler) = self.handlers.get(&action).copied() else {
            tracing::info!(server = %self.name(), user, %action, "unknown action");
            return Status::UnknownAction.response();
        };

        let resource = str_field(request, "path").unwrap_or("");
        let creating = action == Action::Write
            && !resource.is_empty()
            && !self.resources.contains(resource)
            && self.policy.creates_on_write();
        let allowed = if creating {
            self.policy.authorize_create(user, resource)
        } else {
            self.policy.authorize(user, resource, &action)
        };
        if !allowed {
            tracing::info!(server = %self.name(), user, %action, resource, "authorization failure");
            return Status::AuthorizationFailure.response();
        }

        let response = handler(self, request);
        tracing::debug!(
            server = %self.name(),
            user,
            %action,
            status = Status::of(&response).map(|s| s.as_str()).unwrap_or("?"),
            "handled"
        );
        response
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transport
    // ─────────────────────────────────────────────────────────────────────────

    /// Receive one request from `transport`, handle it, and send the response.
    pub fn serve(&mut self, transport: &dyn Transport) -> Result<()> {
        let raw = self.actor.receive(transport)?;
        let request: JsonMessage = serde_json::from_slice(&raw)?;
        let response = self.handle(&request);
        self.actor.send(transport, &serde_json::to_vec(&response)?)?;
        Ok(())
    }

    /// Full round trip: `client` sends `request`, the server answers, the
    /// client receives the parsed response.
    pub fn exchange(
        &mut self,
        transport: &dyn Transport,
        client: &Actor,
        request: &JsonMessage,
    ) -> Result<JsonMessage> {
        client.send(transport, &serde_json::to_vec(request)?)?;
        self.serve(transport)?;
        let raw = client.receive(transport)?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

fn read<P: AccessPolicy>(server: &mut FileServer<P>, request: &JsonMessage) -> JsonMessage {
    let Some(path) = str_field(request, "path") else {
        return Status::InvalidRequest.response();
    };
    match server.resources.get(path) {
        Some(contents) => {
            let mut response = Status::Success.response();
            response.insert(
                "data".into(),
                Value::from(String::from_utf8_lossy(contents).into_owned()),
            );
            response
        }
        None => Status::NotFound.response(),
    }
}

fn write<P: AccessPolicy>(server: &mut FileServer<P>, request: &JsonMessage) -> JsonMessage {
    let (Some(user), Some(path), Some(data)) = (
        str_field(request, "user"),
        str_field(request, "path"),
        str_field(request, "data"),
    ) else {
        return Status::InvalidRequest.response();
    };

    if server.resources.append(path, data.as_bytes()) {
        return Status::Success.response();
    }
    if !server.policy.creates_on_write() {
        return Status::NotFound.response();
    }

    server.resources.insert(path, data);
    server.policy.on_create(user, path);
    tracing::debug!(server = %server.name(), user, path, "created");
    Status::Success.response()
}
