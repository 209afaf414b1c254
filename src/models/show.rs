//! Show-specific response records

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Episode, Season, Show};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendingShow {
    pub watchers: u64,
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowCastCredit {
    pub character: String,
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowCrewCredit {
    pub job: String,
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ShowCrewCredits {
    #[serde(default)]
    pub production: Vec<ShowCrewCredit>,
    #[serde(default)]
    pub art: Vec<ShowCrewCredit>,
    #[serde(default)]
    pub crew: Vec<ShowCrewCredit>,
    #[serde(default, rename = "costume & make-up")]
    pub costume_make_up: Vec<ShowCrewCredit>,
    #[serde(default)]
    pub directing: Vec<ShowCrewCredit>,
    #[serde(default)]
    pub writing: Vec<ShowCrewCredit>,
    #[serde(default)]
    pub sound: Vec<ShowCrewCredit>,
    #[serde(default)]
    pub camera: Vec<ShowCrewCredit>,
}

/// A person's show credits, acting and crew.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowCredits {
    #[serde(default)]
    pub cast: Vec<ShowCastCredit>,
    #[serde(default)]
    pub crew: ShowCrewCredits,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowWithStats {
    pub watcher_count: u64,
    pub play_count: u64,
    pub collected_count: u64,
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnticipatedShow {
    pub list_count: u64,
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdatedShow {
    pub updated_at: DateTime<Utc>,
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowTranslation {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowStats {
    pub watchers: u64,
    pub plays: u64,
    pub collectors: u64,
    pub collected_episodes: u64,
    pub comments: u64,
    pub lists: u64,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeCollectionProgress {
    pub number: u32,
    pub completed: bool,
    pub collected_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeasonCollectionProgress {
    pub number: u32,
    pub aired: u32,
    pub completed: u32,
    #[serde(default)]
    pub episodes: Vec<EpisodeCollectionProgress>,
}

/// Collection progress tree for a whole show.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowCollectionProgress {
    pub aired: u32,
    pub completed: u32,
    pub last_collected_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub seasons: Vec<SeasonCollectionProgress>,
    #[serde(default)]
    pub hidden_seasons: Vec<Season>,
    pub last_episode: Option<Episode>,
    pub next_episode: Option<Episode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeWatchedProgress {
    pub number: u32,
    pub completed: bool,
    pub last_watched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeasonWatchedProgress {
    pub number: u32,
    pub aired: u32,
    pub completed: u32,
    #[serde(default)]
    pub episodes: Vec<EpisodeWatchedProgress>,
}

/// Watched progress tree for a whole show.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowWatchedProgress {
    pub aired: u32,
    pub completed: u32,
    #[serde(default)]
    pub seasons: Vec<SeasonWatchedProgress>,
    #[serde(default)]
    pub hidden_seasons: Vec<Season>,
    pub last_episode: Option<Episode>,
    pub last_watched_at: Option<DateTime<Utc>>,
    pub next_episode: Option<Episode>,
    pub reset_at: Option<DateTime<Utc>>,
}
