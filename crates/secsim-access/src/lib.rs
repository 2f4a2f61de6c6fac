//! # secsim access
//!
//! A JSON request/response file server with a pluggable access-control
//! policy.
//!
//! The server is generic over an [`AccessPolicy`]. The policy decides every
//! request before any handler runs, and may contribute handlers for actions
//! of its own. Four classic models ship in [`policy`]:
//!
//! - [`BellLaPadula`] - mandatory access control over sensitivity levels
//! - [`Discretionary`] - owner-managed access lists
//! - [`RoleBased`] - roles with a hierarchy, sessions and prerequisites
//! - [`AttributeBased`] - predicates over subject, object and environment
//!
//! ```rust
//! use secsim_access::{Action, BellLaPadula, FileServer, Request, Status};
//! use secsim_link::{Actor, Channel};
//!
//! let policy = BellLaPadula::new()
//!     .with_label("public.txt", 0)
//!     .with_clearance("Bob", 1);
//! let mut server = FileServer::new(policy).with_resource("public.txt", "hello");
//!
//! let channel = Channel::new();
//! let bob = Actor::new("Bob");
//! let request = Request::new("Bob", Action::Read).path("public.txt").build();
//! let response = server.exchange(&channel, &bob, &request).unwrap();
//!
//! assert_eq!(Status::of(&response), Some(Status::Success));
//! ```

pub mod error;
pub mod message;
pub mod policy;
pub mod server;
pub mod store;

pub use error::{AccessError, Result};
pub use message::{Action, JsonMessage, Request, Status};
pub use policy::{AttributeBased, BellLaPadula, Discretionary, RoleBased};
pub use server::{AccessPolicy, DenyAll, FileServer, Handler, ServerConfig};
pub use store::ResourceTable;
