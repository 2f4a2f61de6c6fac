//! Attribute-based access control for a movie catalogue.
//!
//! Decisions combine subject attributes (age, premium subscription), object
//! attributes (rating, release year) and environment attributes (today's
//! date) through named predicates kept in a [`PolicyStore`]. The server asks
//! the store's `watch` predicate; `watch` is composed from the others:
//!
//! ```text
//! watch = rating && (release || promo)
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};

use crate::message::Action;
use crate::server::AccessPolicy;

/// Movies released in or after this year are premium-only.
pub const NEW_RELEASE_YEAR: i32 = 2023;

/// Age rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    G,
    Pg13,
    R,
}

impl Rating {
    /// Youngest age allowed to watch.
    pub fn minimum_age(&self) -> u32 {
        match self {
            Rating::G => 0,
            Rating::Pg13 => 13,
            Rating::R => 17,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "G" => Some(Rating::G),
            "PG-13" => Some(Rating::Pg13),
            "R" => Some(Rating::R),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::G => "G",
            Rating::Pg13 => "PG-13",
            Rating::R => "R",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscriber {
    pub age: u32,
    pub premium: bool,
}

/// Object attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movie {
    pub rating: Rating,
    pub year: i32,
}

/// Environment attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    pub date: NaiveDate,
}

impl Environment {
    pub fn on(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Today, in UTC.
    pub fn now() -> Self {
        Self::on(Utc::now().date_naive())
    }
}

/// A named access rule.
pub type Predicate = fn(&Subscriber, &Movie, &Environment) -> bool;

/// Old enough for the rating.
pub fn rating_policy(subject: &Subscriber, object: &Movie, _: &Environment) -> bool {
    subject.age >= object.rating.minimum_age()
}

/// Not a new release, or a premium subscriber.
pub fn release_policy(subject: &Subscriber, object: &Movie, _: &Environment) -> bool {
    object.year < NEW_RELEASE_YEAR || subject.premium
}

/// December 25 through 31, inclusive.
pub fn promo_policy(_: &Subscriber, _: &Movie, environment: &Environment) -> bool {
    let date = environment.date;
    date.month() == 12 && (25..=31).contains(&date.day())
}

pub fn watch_policy(subject: &Subscriber, object: &Movie, environment: &Environment) -> bool {
    rating_policy(subject, object, environment)
        && (release_policy(subject, object, environment)
            || promo_policy(subject, object, environment))
}

/// Predicates by name.
#[derive(Clone, Default)]
pub struct PolicyStore {
    predicates: BTreeMap<String, Predicate>,
}

impl fmt::Debug for PolicyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl PolicyStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The `rating`, `release`, `promo` and `watch` predicates.
    pub fn standard() -> Self {
        let mut store = Self::new();
        store.insert("rating", rating_policy);
        store.insert("release", release_policy);
        store.insert("promo", promo_policy);
        store.insert("watch", watch_policy);
        store
    }

    pub fn insert(&mut self, name: &str, predicate: Predicate) {
        self.predicates.insert(name.to_string(), predicate);
    }

    pub fn get(&self, name: &str) -> Option<Predicate> {
        self.predicates.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    /// Evaluate `name`. A missing predicate denies.
    pub fn evaluate(
        &self,
        name: &str,
        subject: &Subscriber,
        object: &Movie,
        environment: &Environment,
    ) -> bool {
        self.get(name)
            .is_some_and(|predicate| predicate(subject, object, environment))
    }
}

/// Attribute tables plus a policy store.
#[derive(Debug, Clone)]
pub struct AttributeBased {
    subjects: HashMap<String, Subscriber>,
    objects: HashMap<String, Movie>,
    environment: Environment,
    store: PolicyStore,
}

impl AttributeBased {
    /// Standard policies, evaluated in `environment`.
    pub fn new(environment: Environment) -> Self {
        Self {
            subjects: HashMap::new(),
            objects: HashMap::new(),
            environment,
            store: PolicyStore::standard(),
        }
    }

    pub fn with_subject(mut self, user: &str, age: u32, premium: bool) -> Self {
        self.subjects
            .insert(user.to_string(), Subscriber { age, premium });
        self
    }

    pub fn with_object(mut self, path: &str, rating: Rating, year: i32) -> Self {
        self.objects.insert(path.to_string(), Movie { rating, year });
        self
    }

    pub fn subject(&self, user: &str) -> Option<&Subscriber> {
        self.subjects.get(user)
    }

    pub fn object(&self, path: &str) -> Option<&Movie> {
        self.objects.get(path)
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Move the clock.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.environment.date = date;
    }

    pub fn store(&self) -> &PolicyStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PolicyStore {
        &mut self.store
    }
}

impl Default for AttributeBased {
    fn default() -> Self {
        Self::new(Environment::now())
    }
}

impl AccessPolicy for AttributeBased {
    fn authorize(&self, user: &str, resource: &str, action: &Action) -> bool {
        if *action != Action::Read {
            return false;
        }
        let (Some(subject), Some(object)) = (self.subject(user), self.object(resource)) else {
            return false;
        };
        self.store
            .evaluate("watch", subject, object, &self.environment)
    }
}
