//! Resource suite interfaces
//!
//! Each resource group (movies, shows, comments, ...) contributes a
//! [`Suite`]: a named table of path descriptors registered on the
//! client for dotted-name routing, plus a typed interface struct whose
//! methods prepare a `CallContext` and call the executor.

pub mod calendars;
pub mod checkin;
pub mod comments;
pub mod episodes;
pub mod misc;
pub mod movies;
pub mod people;
pub mod recommendations;
pub mod scrobble;
pub mod search;
pub mod seasons;
pub mod shows;

pub use calendars::CalendarsInterface;
pub use checkin::{CheckinInterface, CheckinOptions};
pub use comments::CommentsInterface;
pub use episodes::EpisodesInterface;
pub use misc::{
    CertificationsInterface, CountriesInterface, GenresInterface, LanguagesInterface,
    ListsInterface, NetworksInterface,
};
pub use movies::MoviesInterface;
pub use people::PeopleInterface;
pub use recommendations::RecommendationsInterface;
pub use scrobble::ScrobbleInterface;
pub use search::SearchInterface;
pub use seasons::SeasonsInterface;
pub use shows::ShowsInterface;

use serde_json::{json, Value};

use crate::models::{Comment, Episode, Movie, Person, Season, Show, TraktList};
use crate::paths::Path;

/// Named table of path descriptors for one resource group.
pub struct Suite {
    name: &'static str,
    paths: Vec<(&'static str, Path)>,
}

impl Suite {
    pub fn new(name: &'static str) -> Self {
        Suite {
            name,
            paths: Vec::new(),
        }
    }

    /// Register a descriptor under a table key; the key doubles as a
    /// routable alias.
    pub fn path(mut self, key: &'static str, path: Path) -> Self {
        self.paths.push((key, path));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Descriptor registered under a table key.
    pub fn get(&self, key: &str) -> Option<&Path> {
        self.paths
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, path)| path)
    }

    /// Descriptors matching a dotted call name. The name is matched
    /// as-is and, when prefixed by this suite's name, with the prefix
    /// stripped; a candidate matches a descriptor's alias list or its
    /// table key.
    pub fn find_matching(&self, name: &str) -> Vec<&Path> {
        let mut candidates: Vec<&str> = vec![name];

        if name == self.name {
            candidates.push("");
        } else if let Some(rest) = name.strip_prefix(self.name).and_then(|r| r.strip_prefix('.')) {
            candidates.push(rest);
        }

        self.paths
            .iter()
            .filter(|(key, path)| {
                candidates
                    .iter()
                    .any(|c| path.does_match(c) || c == key)
            })
            .map(|(_, path)| path)
            .collect()
    }
}

/// Build the registry with every resource group installed.
pub fn default_registry() -> Vec<Suite> {
    vec![
        calendars::suite(),
        checkin::suite(),
        comments::suite(),
        episodes::suite(),
        misc::countries_suite(),
        misc::certifications_suite(),
        misc::genres_suite(),
        misc::languages_suite(),
        misc::lists_suite(),
        misc::networks_suite(),
        movies::suite(),
        people::suite(),
        recommendations::suite(),
        scrobble::suite(),
        search::suite(),
        seasons::suite(),
        shows::suite(),
    ]
}

/// Media reference accepted wherever an endpoint takes an id: raw
/// trakt ids, slugs, or the typed records themselves.
pub trait ToId {
    fn to_id(&self) -> Value;
}

impl ToId for u64 {
    fn to_id(&self) -> Value {
        json!(*self)
    }
}

impl ToId for u32 {
    fn to_id(&self) -> Value {
        json!(*self)
    }
}

impl ToId for &str {
    fn to_id(&self) -> Value {
        json!(*self)
    }
}

impl ToId for String {
    fn to_id(&self) -> Value {
        json!(self)
    }
}

impl ToId for Movie {
    fn to_id(&self) -> Value {
        json!(self.ids.trakt)
    }
}

impl ToId for Show {
    fn to_id(&self) -> Value {
        json!(self.ids.trakt)
    }
}

impl ToId for Episode {
    fn to_id(&self) -> Value {
        json!(self.ids.trakt)
    }
}

impl ToId for Season {
    fn to_id(&self) -> Value {
        json!(self.ids.trakt)
    }
}

impl ToId for Person {
    fn to_id(&self) -> Value {
        json!(self.ids.trakt)
    }
}

impl ToId for TraktList {
    fn to_id(&self) -> Value {
        json!(self.ids.trakt)
    }
}

impl ToId for Comment {
    fn to_id(&self) -> Value {
        json!(self.id)
    }
}
