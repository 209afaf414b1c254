//! Response records shared across resource groups

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::{Comment, Episode, Movie, Person, Season, Sharing, Show, TraktList, User};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Country {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Certification {
    pub name: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Genre {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Language {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Network {
    pub name: String,
}

/// Entry of the trending/popular lists feeds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListResponse {
    pub like_count: u64,
    pub comment_count: u64,
    pub list: TraktList,
    pub user: Option<User>,
}

/// Alternative title of a movie or show in one country.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Alias {
    pub title: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CastMember {
    pub character: String,
    pub person: Person,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrewMember {
    pub job: String,
    pub person: Person,
}

/// Crew grouped by department. Departments absent from the payload
/// default to empty.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CrewList {
    #[serde(default)]
    pub production: Vec<CrewMember>,
    #[serde(default)]
    pub art: Vec<CrewMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
    #[serde(default, rename = "costume & make-up")]
    pub costume_make_up: Vec<CrewMember>,
    #[serde(default)]
    pub directing: Vec<CrewMember>,
    #[serde(default)]
    pub writing: Vec<CrewMember>,
    #[serde(default)]
    pub sound: Vec<CrewMember>,
    #[serde(default)]
    pub camera: Vec<CrewMember>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CastCrewList {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: CrewList,
}

/// Rating average plus the 1-10 vote distribution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RatingsSummary {
    pub rating: f64,
    pub votes: u64,
    pub distribution: Value,
}

/// Body returned when a comment or reply is posted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentResponse {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub comment: String,
    pub spoiler: bool,
    pub review: bool,
    pub replies: u64,
    pub likes: u64,
    pub user: User,
    pub parent_id: Option<u64>,
    pub user_rating: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
    pub sharing: Option<Sharing>,
}

/// The item a comment was left on; exactly one item field is set. The
/// wire key `type` is exposed as `item_type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentItemOnly {
    pub item_type: String,
    pub list: Option<TraktList>,
    pub movie: Option<Movie>,
    pub episode: Option<Episode>,
    pub show: Option<Show>,
    pub season: Option<Season>,
}

/// Comment feed entry: the comment plus the item it was left on. The
/// wire key `type` is exposed as `item_type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentAndItem {
    pub item_type: String,
    pub comment: Comment,
    pub list: Option<TraktList>,
    pub movie: Option<Movie>,
    pub episode: Option<Episode>,
    pub show: Option<Show>,
    pub season: Option<Season>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentLiker {
    pub liked_at: DateTime<Utc>,
    pub user: User,
}

/// One search hit; exactly one of the item fields is populated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    pub item_type: String,
    pub score: Option<f64>,
    pub movie: Option<Movie>,
    pub list: Option<TraktList>,
    pub person: Option<Person>,
    pub episode: Option<Episode>,
    pub show: Option<Show>,
}

/// Calendar entry for an episode premiere.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodePremiere {
    pub first_aired: DateTime<Utc>,
    pub episode: Episode,
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeasonEpisodeStats {
    pub watchers: u64,
    pub plays: u64,
    pub collectors: u64,
    pub collected_episodes: Option<u64>,
    pub comments: u64,
    pub lists: u64,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeTranslation {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeCheckin {
    pub id: u64,
    pub watched_at: DateTime<Utc>,
    pub sharing: Option<Sharing>,
    pub episode: Episode,
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeScrobble {
    pub id: u64,
    pub action: String,
    pub progress: f64,
    pub sharing: Option<Sharing>,
    pub episode: Episode,
    pub show: Show,
}

/// Device-code issuance response for the device OAuth flow.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceCode {
    pub device_code: String,
    pub user_code: String,
    pub verification_url: String,
    pub expires_in: u64,
    pub interval: u64,
}
