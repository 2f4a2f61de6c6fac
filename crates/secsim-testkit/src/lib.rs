//! # secsim testkit
//!
//! Testing utilities for secsim.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a cast of actors over one channel, and seeded file servers
//!   for every access-control model
//! - **Generators**: Proptest strategies for property-based testing
//! - **Vectors**: known-answer tests for the digests and MACs
//!
//! ## Fixtures
//!
//! ```rust
//! use secsim_testkit::fixtures::{mac_server, Cast};
//! use secsim_access::{Action, Request, Status};
//!
//! let cast = Cast::new();
//! let mut server = mac_server();
//! let request = Request::new("Alice", Action::Read).path("secret.txt").build();
//! let response = server.exchange(&cast.channel, &cast.alice, &request).unwrap();
//! assert_eq!(Status::of(&response), Some(Status::AuthorizationFailure));
//! ```
//!
//! ## Known Answers
//!
//! ```rust
//! use secsim_testkit::vectors::verify_all_vectors;
//!
//! assert!(verify_all_vectors().is_empty());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    abac_server, dac_server, init_tracing, mac_server, rbac0_server, rbac3_server, Cast,
};
pub use vectors::{all_vectors, verify_all_vectors, KnownAnswer};
