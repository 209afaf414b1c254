//! Typed records for API responses
//!
//! Core media records live here; endpoint-specific wrappers are split
//! into [`common`], [`movie`] and [`show`]. All records are produced by
//! the response parser: optional fields absent from the payload (or sent
//! as the `{}` null sentinel) deserialize to `None`, and the API's
//! `type` key is exposed as `item_type` (see the parser module).

pub mod common;
pub mod movie;
pub mod show;

pub use common::*;
pub use movie::*;
pub use show::*;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// External identifiers of a media item. `trakt` is always present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ids {
    pub trakt: u64,
    pub slug: Option<String>,
    pub imdb: Option<String>,
    pub tmdb: Option<u64>,
    pub tvdb: Option<u64>,
    pub tvrage: Option<u64>,
}

/// Slug-only identifier used by user records.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlugId {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: Option<u32>,
    pub ids: Ids,

    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub released: Option<NaiveDate>,
    pub runtime: Option<u32>,
    pub country: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub trailer: Option<String>,
    pub homepage: Option<String>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub comment_count: Option<u64>,
    pub language: Option<String>,
    pub available_translations: Option<Vec<String>>,
    pub genres: Option<Vec<String>>,
    pub certification: Option<String>,
}

/// Broadcast schedule of a show.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Airs {
    pub day: Option<String>,
    pub time: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Show {
    pub title: String,
    pub year: Option<u32>,
    pub ids: Ids,

    pub overview: Option<String>,
    pub first_aired: Option<DateTime<Utc>>,
    pub airs: Option<Airs>,
    pub runtime: Option<u32>,
    pub certification: Option<String>,
    pub network: Option<String>,
    pub country: Option<String>,
    pub trailer: Option<String>,
    pub homepage: Option<String>,
    pub status: Option<String>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub comment_count: Option<u64>,
    pub updated_at: Option<DateTime<Utc>>,
    pub language: Option<String>,
    pub available_translations: Option<Vec<String>>,
    pub genres: Option<Vec<String>>,
    pub aired_episodes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Episode {
    pub season: u32,
    pub number: u32,
    pub title: Option<String>,
    pub ids: Ids,

    pub number_abs: Option<u32>,
    pub overview: Option<String>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub comment_count: Option<u64>,
    pub first_aired: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub available_translations: Option<Vec<String>>,
    pub runtime: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Season {
    pub number: u32,
    pub ids: Ids,

    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub episode_count: Option<u32>,
    pub aired_episodes: Option<u32>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub first_aired: Option<DateTime<Utc>>,
    pub network: Option<String>,

    pub episodes: Option<Vec<Episode>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub name: String,
    pub ids: Ids,

    pub biography: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub death: Option<NaiveDate>,
    pub birthplace: Option<String>,
    pub homepage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub username: String,
    pub private: bool,
    pub name: Option<String>,
    pub vip: Option<bool>,
    pub vip_ep: Option<bool>,
    pub ids: SlugId,

    pub joined_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub images: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TraktList {
    pub name: String,
    pub description: Option<String>,
    pub privacy: String,
    pub display_numbers: bool,
    pub allow_comments: bool,
    pub sort_by: String,
    pub sort_how: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub item_count: u64,
    pub comment_count: u64,
    pub likes: u64,
    pub ids: Ids,
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub parent_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub comment: String,
    pub spoiler: bool,
    pub review: bool,
    pub replies: u64,
    pub likes: u64,
    pub user_rating: Option<f64>,
    pub user: User,
}

/// Social networks a checkin or scrobble may be shared to. Sent in
/// request bodies as well as returned in responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sharing {
    #[serde(default)]
    pub twitter: bool,
    #[serde(default)]
    pub tumblr: bool,
    #[serde(default)]
    pub medium: bool,
}
