//! Proptest generators for property-based testing.

use proptest::prelude::*;

use secsim_access::policy::Level;
use secsim_access::Action;

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Printable ASCII text, for payloads that should read well in logs.
pub fn text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(0x20u8..0x7f, 0..=max_len)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

/// Generate a 256-bit key.
pub fn key() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>()
}

/// Generate a Bell-LaPadula level in the standard 0..=2 range.
pub fn level() -> impl Strategy<Value = Level> {
    0u8..=2
}

/// One of the cast's user names.
pub fn user() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["Alice", "Bob", "Carl", "Diana", "Evan", "Frank"])
}

/// Generate an Action, including an unknown one.
pub fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Read),
        Just(Action::Write),
        Just(Action::StartSession),
        Just(Action::EndSession),
        Just(Action::AssignRole),
        Just(Action::UnassignRole),
        Just(Action::ChangePermissions),
        "[a-z_]{1,12}".prop_map(|name| Action::parse(&name)),
    ]
}
