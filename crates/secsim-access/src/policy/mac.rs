//! Mandatory access control: the Bell-LaPadula model.
//!
//! Paths carry a sensitivity label, users a clearance. Reads may not go up
//! (simple-security property) and writes may not go down (star property).
//! Unlabelled paths are treated as the most sensitive level and users without
//! a clearance as the least trusted.

use std::collections::HashMap;

use crate::message::Action;
use crate::server::AccessPolicy;

/// A sensitivity level. Higher is more sensitive.
pub type Level = u8;

/// Label of a path with no explicit label.
pub const DEFAULT_LABEL: Level = 2;

/// Clearance of a user with no explicit clearance.
pub const DEFAULT_CLEARANCE: Level = 0;

/// Labels and clearances.
#[derive(Debug, Clone, Default)]
pub struct BellLaPadula {
    labels: HashMap<String, Level>,
    clearances: HashMap<String, Level>,
}

impl BellLaPadula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, path: &str, label: Level) -> Self {
        self.labels.insert(path.to_string(), label);
        self
    }

    pub fn with_clearance(mut self, user: &str, clearance: Level) -> Self {
        self.clearances.insert(user.to_string(), clearance);
        self
    }

    pub fn label(&self, path: &str) -> Level {
        self.labels.get(path).copied().unwrap_or(DEFAULT_LABEL)
    }

    pub fn clearance(&self, user: &str) -> Level {
        self.clearances.get(user).copied().unwrap_or(DEFAULT_CLEARANCE)
    }
}

impl AccessPolicy for BellLaPadula {
    fn authorize(&self, user: &str, resource: &str, action: &Action) -> bool {
        let label = self.label(resource);
        let clearance = self.clearance(user);
        match action {
            // No read up.
            Action::Read => label <= clearance,
            // No write down.
            Action::Write => label >= clearance,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> BellLaPadula {
        BellLaPadula::new()
            .with_label("public.txt", 0)
            .with_label("confidential.txt", 1)
            .with_label("secret.txt", 2)
            .with_clearance("Bob", 1)
            .with_clearance("Carl", 2)
    }

    #[test]
    fn test_defaults() {
        let policy = policy();
        assert_eq!(policy.label("unlabelled.txt"), DEFAULT_LABEL);
        assert_eq!(policy.clearance("Alice"), DEFAULT_CLEARANCE);
    }

    #[test]
    fn test_no_read_up() {
        let policy = policy();
        assert!(policy.authorize("Bob", "public.txt", &Action::Read));
        assert!(policy.authorize("Bob", "confidential.txt", &Action::Read));
        assert!(!policy.authorize("Bob", "secret.txt", &Action::Read));
        assert!(!policy.authorize("Alice", "confidential.txt", &Action::Read));
    }

    #[test]
    fn test_no_write_down() {
        let policy = policy();
        assert!(!policy.authorize("Carl", "public.txt", &Action::Write));
        assert!(!policy.authorize("Carl", "confidential.txt", &Action::Write));
        assert!(policy.authorize("Carl", "secret.txt", &Action::Write));
        assert!(policy.authorize("Alice", "public.txt", &Action::Write));
    }

    #[test]
    fn test_other_actions_denied() {
        let policy = policy();
        assert!(!policy.authorize("Carl", "public.txt", &Action::ChangePermissions));
        assert!(!policy.authorize("Carl", "", &Action::StartSession));
    }
}
