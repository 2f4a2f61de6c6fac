//! Access-control models driven over a channel.
//!
//! Clients and servers talk JSON through `FileServer::exchange`; every
//! response is checked by status, and by contents where a read succeeds.

use chrono::NaiveDate;
use proptest::prelude::*;

use secsim::access::policy::BellLaPadula;
use secsim::access::AccessPolicy;
use secsim::crypto::{ChaChaPoly, KeyedCipher};
use secsim::{
    Action, Actor, Adversary, Channel, EncryptionLayer, FileServer, JsonMessage, Request, Status,
};
use secsim_testkit::fixtures::{
    abac_server, dac_server, init_tracing, mac_server, rbac0_server, rbac3_server, Cast,
};
use secsim_testkit::generators::level;

fn status(response: &JsonMessage) -> Status {
    Status::of(response).unwrap()
}

/// One client talking to one server over a fresh channel.
struct Session<P: AccessPolicy> {
    channel: Channel,
    server: FileServer<P>,
}

impl<P: AccessPolicy> Session<P> {
    fn new(server: FileServer<P>) -> Self {
        Self {
            channel: Channel::new(),
            server,
        }
    }

    fn send(&mut self, request: Request) -> JsonMessage {
        let user = request.clone().build()["user"].as_str().unwrap().to_string();
        let client = Actor::new(user).quiet(true);
        self.server
            .exchange(&self.channel, &client, &request.build())
            .unwrap()
    }

    fn status(&mut self, request: Request) -> Status {
        status(&self.send(request))
    }
}

fn read(user: &str, path: &str) -> Request {
    Request::new(user, Action::Read).path(path)
}

fn write(user: &str, path: &str, data: &str) -> Request {
    Request::new(user, Action::Write).path(path).data(data)
}

// ─────────────────────────────────────────────────────────────────────────────
// Bell-LaPadula
// ─────────────────────────────────────────────────────────────────────────────

const FILES: [&str; 3] = ["public.txt", "confidential.txt", "secret.txt"];

fn readable(session: &mut Session<BellLaPadula>, user: &str) -> Vec<&'static str> {
    FILES
        .into_iter()
        .filter(|file| session.status(read(user, file)) == Status::Success)
        .collect()
}

fn writable(session: &mut Session<BellLaPadula>, user: &str) -> Vec<&'static str> {
    FILES
        .into_iter()
        .filter(|file| session.status(write(user, file, " x")) == Status::Success)
        .collect()
}

#[test]
fn blp_read_matrix() {
    init_tracing();
    let mut session = Session::new(mac_server());

    assert_eq!(readable(&mut session, "Alice"), ["public.txt"]);
    assert_eq!(readable(&mut session, "Bob"), ["public.txt", "confidential.txt"]);
    assert_eq!(readable(&mut session, "Carl"), FILES);
}

#[test]
fn blp_write_matrix() {
    let mut session = Session::new(mac_server());

    assert_eq!(writable(&mut session, "Alice"), FILES);
    assert_eq!(writable(&mut session, "Bob"), ["confidential.txt", "secret.txt"]);
    assert_eq!(writable(&mut session, "Carl"), ["secret.txt"]);

    // Alice wrote blind into the secret file.
    let response = session.send(read("Carl", "secret.txt"));
    assert_eq!(response["data"], "This is a secret file. x x x");
}

proptest! {
    #[test]
    fn blp_read_and_write_only_at_equal_levels(label in level(), clearance in level()) {
        let policy = BellLaPadula::new()
            .with_label("f", label)
            .with_clearance("u", clearance);

        let both = policy.authorize("u", "f", &Action::Read)
            && policy.authorize("u", "f", &Action::Write);
        prop_assert_eq!(both, label == clearance);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Discretionary
// ─────────────────────────────────────────────────────────────────────────────

fn grant(owner: &str, path: &str, target: &str, permissions: &[&str]) -> Request {
    Request::new(owner, Action::ChangePermissions)
        .path(path)
        .target(target)
        .permissions(permissions.iter().copied())
}

#[test]
fn dac_owner_delegates_access() {
    let mut session = Session::new(dac_server());

    assert_eq!(session.status(read("Bob", "file_a.txt")), Status::AuthorizationFailure);
    assert_eq!(
        session.status(grant("Alice", "file_b.txt", "Alice", &["write"])),
        Status::AuthorizationFailure
    );

    assert_eq!(session.status(grant("Alice", "file_a.txt", "Bob", &["write"])), Status::Success);
    assert_eq!(session.status(grant("Alice", "file_a.txt", "Carl", &["read"])), Status::Success);

    assert_eq!(session.status(write("Bob", "file_a.txt", " Written by Bob.")), Status::Success);
    assert_eq!(session.status(read("Bob", "file_a.txt")), Status::AuthorizationFailure);

    let response = session.send(read("Carl", "file_a.txt"));
    assert_eq!(status(&response), Status::Success);
    assert_eq!(response["data"], "This file belongs to Alice. Written by Bob.");

    assert_eq!(session.status(write("Carl", "file_a.txt", "!")), Status::AuthorizationFailure);
}

#[test]
fn dac_creator_owns_new_file() {
    let mut session = Session::new(dac_server());

    assert_eq!(session.status(write("Bob", "notes.txt", "draft")), Status::Success);
    assert_eq!(session.server.policy().owner("notes.txt"), Some("Bob"));
    assert_eq!(session.status(read("Carl", "notes.txt")), Status::AuthorizationFailure);
    assert_eq!(session.status(grant("Carl", "notes.txt", "Carl", &["read"])), Status::AuthorizationFailure);
}

// ─────────────────────────────────────────────────────────────────────────────
// Role-Based
// ─────────────────────────────────────────────────────────────────────────────

fn start(user: &str, roles: &[&str]) -> Request {
    Request::new(user, Action::StartSession).roles(roles.iter().copied())
}

fn assign(user: &str, target: &str, role: &str) -> Request {
    Request::new(user, Action::AssignRole).target(target).role(role)
}

#[test]
fn rbac0_admin_grants_writer() {
    let mut session = Session::new(rbac0_server());

    assert_eq!(session.status(start("Service A", &["writer", "reader"])), Status::Success);
    assert_eq!(session.status(write("Service A", "logfile.txt", " A")), Status::Success);

    assert_eq!(session.status(start("Service B", &["writer"])), Status::AuthorizationFailure);
    assert_eq!(
        session.status(assign("Service B", "Service B", "writer")),
        Status::AuthorizationFailure
    );

    assert_eq!(session.status(start("Admin", &["admin"])), Status::Success);
    assert_eq!(session.status(assign("Admin", "Service B", "writer")), Status::Success);
    assert_eq!(session.status(start("Service B", &["writer"])), Status::Success);
    assert_eq!(session.status(write("Service B", "logfile.txt", " B")), Status::Success);

    // Admin's session holds only `admin`.
    assert_eq!(session.status(read("Admin", "logfile.txt")), Status::AuthorizationFailure);
    assert_eq!(session.status(start("Admin", &["reader"])), Status::Success);
    let response = session.send(read("Admin", "logfile.txt"));
    assert_eq!(response["data"], "This is the log file. A B");
}

#[test]
fn rbac3_hierarchy_and_prerequisites() {
    let mut session = Session::new(rbac3_server());

    assert_eq!(session.status(start("Admin", &["admin"])), Status::Success);
    assert_eq!(session.status(start("Service A", &["editor"])), Status::AuthorizationFailure);
    assert_eq!(session.status(start("Service A", &["writer"])), Status::Success);
    assert_eq!(session.status(start("Service B", &["reader"])), Status::Success);

    assert_eq!(
        session.status(assign("Service A", "Service B", "editor")),
        Status::AuthorizationFailure
    );
    assert_eq!(
        session.status(assign("Admin", "Service B", "editor")),
        Status::PrerequisiteFailure
    );
    assert_eq!(session.status(assign("Admin", "Service B", "writer")), Status::Success);
    assert_eq!(session.status(assign("Admin", "Service B", "editor")), Status::Success);

    // Dropping to `editor` gives up the right to assign.
    assert_eq!(session.status(start("Admin", &["editor"])), Status::Success);
    assert_eq!(
        session.status(assign("Admin", "Service A", "editor")),
        Status::AuthorizationFailure
    );

    assert_eq!(session.status(write("Admin", "logfile.txt", " admin")), Status::Success);
    assert_eq!(session.status(write("Service A", "logfile.txt", " A")), Status::Success);
    assert_eq!(session.status(write("Service B", "logfile.txt", " B")), Status::AuthorizationFailure);

    assert_eq!(session.status(read("Admin", "logfile.txt")), Status::Success);
    assert_eq!(session.status(read("Service A", "logfile.txt")), Status::AuthorizationFailure);
    let response = session.send(read("Service B", "logfile.txt"));
    assert_eq!(response["data"], "This is the log file. admin A");
}

// ─────────────────────────────────────────────────────────────────────────────
// Attribute-Based
// ─────────────────────────────────────────────────────────────────────────────

const VIEWERS: [&str; 6] = ["Alice", "Bob", "Carl", "Diana", "Evan", "Frank"];

fn viewers<P: AccessPolicy>(session: &mut Session<P>, movie: &str) -> Vec<&'static str> {
    VIEWERS
        .into_iter()
        .filter(|user| session.status(read(user, movie)) == Status::Success)
        .collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn abac_catalogue_over_the_year() {
    let mut session = Session::new(abac_server(date(2024, 6, 1)));

    assert_eq!(viewers(&mut session, "toy_story.mov"), VIEWERS);
    assert_eq!(viewers(&mut session, "dune_2.mov"), ["Diana", "Frank"]);
    assert_eq!(viewers(&mut session, "oppenheimer.mov"), ["Frank"]);

    session.server.policy_mut().set_date(date(2024, 12, 25));
    assert_eq!(viewers(&mut session, "dune_2.mov"), ["Carl", "Diana", "Evan", "Frank"]);
    assert_eq!(viewers(&mut session, "oppenheimer.mov"), ["Evan", "Frank"]);

    let response = session.send(read("Frank", "oppenheimer.mov"));
    assert_eq!(response["data"], "This is an R-rated new movie.");
    assert_eq!(
        session.status(write("Frank", "oppenheimer.mov", "spoilers")),
        Status::AuthorizationFailure
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Transport
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn unknown_action_over_the_wire() {
    let mut session = Session::new(mac_server());
    let request = Request::new("Carl", Action::parse("delete")).path("secret.txt");
    assert_eq!(session.status(request), Status::UnknownAction);
}

#[test]
fn server_behind_an_encryption_layer() {
    let cast = Cast::new();
    let layer = EncryptionLayer::new(&cast.channel, ChaChaPoly::generate());
    let mut server = mac_server();

    let response = server
        .exchange(&layer, &cast.bob, &read("Bob", "confidential.txt").build())
        .unwrap();

    assert_eq!(response["data"], "This is a confidential file.");
    assert!(cast.channel.is_empty());
}

#[test]
fn unauthenticated_requests_can_be_rewritten() {
    let cast = Cast::new();
    let mallory = Adversary::new(cast.mallory.clone());
    let mut server = mac_server();

    let request = serde_json::to_vec(&read("Alice", "secret.txt").build()).unwrap();
    cast.alice.send(&cast.channel, &request).unwrap();
    mallory
        .tamper(&cast.channel, |raw| {
            String::from_utf8_lossy(raw)
                .replace("\"Alice\"", "\"Carl\"")
                .into_bytes()
        })
        .unwrap();
    server.serve(&cast.channel).unwrap();

    let stolen: JsonMessage = serde_json::from_slice(&mallory.intercept(&cast.channel).unwrap()).unwrap();
    assert_eq!(status(&stolen), Status::Success);
    assert_eq!(stolen["data"], "This is a secret file.");
}
