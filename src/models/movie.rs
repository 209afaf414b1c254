//! Movie-specific response records

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::{Movie, Sharing};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendingMovie {
    pub watchers: u64,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoviePremiere {
    pub released: NaiveDate,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieCheckin {
    pub id: u64,
    pub watched_at: DateTime<Utc>,
    pub sharing: Option<Sharing>,
    pub movie: Movie,
}

/// Movie plus its played/watched/collected counters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieWithStats {
    pub watcher_count: u64,
    pub play_count: u64,
    pub collected_count: u64,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieStats {
    pub watchers: u64,
    pub plays: u64,
    pub collectors: u64,
    pub comments: u64,
    pub lists: u64,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnticipatedMovie {
    pub list_count: u64,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoxOffice {
    pub revenue: u64,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdatedMovie {
    pub updated_at: DateTime<Utc>,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieRelease {
    pub country: String,
    pub certification: String,
    pub release_date: NaiveDate,
    pub release_type: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieTranslation {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieCastCredit {
    pub character: String,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieCrewCredit {
    pub job: String,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MovieCrewCredits {
    #[serde(default)]
    pub production: Vec<MovieCrewCredit>,
    #[serde(default)]
    pub art: Vec<MovieCrewCredit>,
    #[serde(default)]
    pub crew: Vec<MovieCrewCredit>,
    #[serde(default, rename = "costume & make-up")]
    pub costume_make_up: Vec<MovieCrewCredit>,
    #[serde(default)]
    pub directing: Vec<MovieCrewCredit>,
    #[serde(default)]
    pub writing: Vec<MovieCrewCredit>,
    #[serde(default)]
    pub sound: Vec<MovieCrewCredit>,
    #[serde(default)]
    pub camera: Vec<MovieCrewCredit>,
}

/// A person's movie credits, acting and crew.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieCredits {
    #[serde(default)]
    pub cast: Vec<MovieCastCredit>,
    #[serde(default)]
    pub crew: MovieCrewCredits,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieScrobble {
    pub id: u64,
    pub action: String,
    pub progress: f64,
    pub sharing: Option<Sharing>,
    pub movie: Movie,
}
