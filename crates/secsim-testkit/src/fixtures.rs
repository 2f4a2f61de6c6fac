//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a cast of actors sharing one
//! channel, and file servers seeded for each access-control model.

use chrono::NaiveDate;
use tracing_subscriber::filter::LevelFilter;

use secsim_access::policy::{AttributeBased, Environment, Rating};
use secsim_access::{Action, BellLaPadula, Discretionary, FileServer, RoleBased};
use secsim_link::{Actor, Channel, Transcript};

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::DEBUG)
        .try_init();
}

/// Alice, Bob and Mallory over one channel, all reporting to one transcript.
pub struct Cast {
    pub channel: Channel,
    pub transcript: Transcript,
    pub alice: Actor,
    pub bob: Actor,
    pub mallory: Actor,
}

impl Cast {
    pub fn new() -> Self {
        let transcript = Transcript::new();
        let actor = |name: &str| Actor::new(name).with_sink(transcript.clone());
        Self {
            channel: Channel::new(),
            alice: actor("Alice"),
            bob: actor("Bob"),
            mallory: actor("Mallory"),
            transcript,
        }
    }

    /// Another actor reporting to the shared transcript.
    pub fn actor(&self, name: &str) -> Actor {
        Actor::new(name).with_sink(self.transcript.clone())
    }
}

impl Default for Cast {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Seeded Servers
// ─────────────────────────────────────────────────────────────────────────────

/// Bell-LaPadula: three labelled files; Bob cleared for confidential, Carl
/// for secret, Alice without clearance.
pub fn mac_server() -> FileServer<BellLaPadula> {
    let policy = BellLaPadula::new()
        .with_label("public.txt", 0)
        .with_label("confidential.txt", 1)
        .with_label("secret.txt", 2)
        .with_clearance("Bob", 1)
        .with_clearance("Carl", 2);

    FileServer::new(policy)
        .with_resource("public.txt", "This is a public file.")
        .with_resource("confidential.txt", "This is a confidential file.")
        .with_resource("secret.txt", "This is a secret file.")
}

/// Discretionary: Alice, Bob and Carl each own one file.
pub fn dac_server() -> FileServer<Discretionary> {
    let policy = Discretionary::new()
        .with_owner("file_a.txt", "Alice")
        .with_owner("file_b.txt", "Bob")
        .with_owner("file_c.txt", "Carl");

    FileServer::new(policy)
        .with_resource("file_a.txt", "This file belongs to Alice.")
        .with_resource("file_b.txt", "This file belongs to Bob.")
        .with_resource("file_c.txt", "This file belongs to Carl.")
}

/// Flat roles: reader, writer, admin.
pub fn rbac0_server() -> FileServer<RoleBased> {
    let mut policy = RoleBased::new();
    for (name, rights) in [
        ("reader", vec![Action::Read]),
        ("writer", vec![Action::Write]),
        ("admin", vec![Action::AssignRole, Action::UnassignRole]),
    ] {
        policy.add_role(name, rights, &[]).expect("static role graph");
    }

    assign(&mut policy, "Admin", &["admin", "writer", "reader"]);
    assign(&mut policy, "Service A", &["writer", "reader"]);
    assign(&mut policy, "Service B", &["reader"]);

    FileServer::new(policy).with_resource("logfile.txt", "This is the log file.")
}

/// Hierarchical roles: editor inherits reader and writer, admin inherits editor.
pub fn rbac3_server() -> FileServer<RoleBased> {
    let mut policy = RoleBased::new();
    for (name, rights, parents) in [
        ("reader", vec![Action::Read], vec![]),
        ("writer", vec![Action::Write], vec![]),
        ("editor", vec![], vec!["reader", "writer"]),
        (
            "admin",
            vec![Action::AssignRole, Action::UnassignRole],
            vec!["editor"],
        ),
    ] {
        policy
            .add_role(name, rights, &parents)
            .expect("static role graph");
    }

    assign(&mut policy, "Admin", &["admin", "editor", "writer", "reader"]);
    assign(&mut policy, "Service A", &["writer"]);
    assign(&mut policy, "Service B", &["reader"]);

    FileServer::new(policy).with_resource("logfile.txt", "This is the log file.")
}

/// Movie catalogue evaluated on `today`.
pub fn abac_server(today: NaiveDate) -> FileServer<AttributeBased> {
    let policy = AttributeBased::new(Environment::on(today))
        .with_subject("Alice", 12, false)
        .with_subject("Bob", 11, true)
        .with_subject("Carl", 14, false)
        .with_subject("Diana", 15, true)
        .with_subject("Evan", 18, false)
        .with_subject("Frank", 25, true)
        .with_object("toy_story.mov", Rating::G, 1995)
        .with_object("elemental.mov", Rating::G, 2023)
        .with_object("interstellar.mov", Rating::Pg13, 2014)
        .with_object("dune_2.mov", Rating::Pg13, 2024)
        .with_object("ex_machina.mov", Rating::R, 2014)
        .with_object("oppenheimer.mov", Rating::R, 2023);

    FileServer::new(policy)
        .with_resource("toy_story.mov", "This is a G-rated old movie.")
        .with_resource("elemental.mov", "This is a G-rated new movie.")
        .with_resource("interstellar.mov", "This is a PG-13-rated old movie.")
        .with_resource("dune_2.mov", "This is a PG-13-rated new movie.")
        .with_resource("ex_machina.mov", "This is an R-rated old movie.")
        .with_resource("oppenheimer.mov", "This is an R-rated new movie.")
}

fn assign(policy: &mut RoleBased, user: &str, roles: &[&str]) {
    for role in roles {
        policy.assign(user, role).expect("role is registered");
    }
}
