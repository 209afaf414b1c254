//! Scrobble suite (requires authentication)
//!
//! Scrobbling mirrors a media player: start when playback starts,
//! pause on pause, stop when playback ends. `progress` is a percentage
//! in `[0, 100]`.

use serde_json::json;

use super::{Suite, ToId};
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::{EpisodeScrobble, MovieScrobble};
use crate::parser::Shape;
use crate::paths::{CallContext, Path, PerArgValidator, Validator};
use reqwest::Method;

fn progress_validator() -> Validator {
    Validator::PerArg(PerArgValidator::new(
        "progress",
        "must be a percentage in [0, 100]",
        |v| v.as_f64().map(|p| (0.0..=100.0).contains(&p)).unwrap_or(false),
    ))
}

fn scrobble_path(template: &'static str) -> Path {
    Path::new(template, Shape::Leaf)
        .method(Method::POST)
        .validator(Validator::AuthRequired)
        .validator(progress_validator())
}

pub fn suite() -> Suite {
    Suite::new("scrobble")
        .path("start_scrobble_movie", scrobble_path("scrobble/start"))
        .path("start_scrobble_episode", scrobble_path("scrobble/start"))
        .path("pause_scrobble_movie", scrobble_path("scrobble/pause"))
        .path("pause_scrobble_episode", scrobble_path("scrobble/pause"))
        .path("stop_scrobble_movie", scrobble_path("scrobble/stop"))
        .path("stop_scrobble_episode", scrobble_path("scrobble/stop"))
}

pub struct ScrobbleInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> ScrobbleInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        ScrobbleInterface { client }
    }

    fn scrobble_movie(
        &self,
        key: &str,
        movie: &impl ToId,
        progress: f64,
    ) -> Result<MovieScrobble, Error> {
        let body = json!({
            "movie": {"ids": {"trakt": movie.to_id()}},
            "progress": progress,
        });
        let ctx = CallContext::new().arg("progress", progress).body(body);

        let path = self.client.suite_path("scrobble", key)?;
        self.client.executor().call_path(&path, ctx)
    }

    fn scrobble_episode(
        &self,
        key: &str,
        episode: &impl ToId,
        progress: f64,
    ) -> Result<EpisodeScrobble, Error> {
        let body = json!({
            "episode": {"ids": {"trakt": episode.to_id()}},
            "progress": progress,
        });
        let ctx = CallContext::new().arg("progress", progress).body(body);

        let path = self.client.suite_path("scrobble", key)?;
        self.client.executor().call_path(&path, ctx)
    }

    pub fn start_scrobble_movie(
        &self,
        movie: &impl ToId,
        progress: f64,
    ) -> Result<MovieScrobble, Error> {
        self.scrobble_movie("start_scrobble_movie", movie, progress)
    }

    pub fn pause_scrobble_movie(
        &self,
        movie: &impl ToId,
        progress: f64,
    ) -> Result<MovieScrobble, Error> {
        self.scrobble_movie("pause_scrobble_movie", movie, progress)
    }

    pub fn stop_scrobble_movie(
        &self,
        movie: &impl ToId,
        progress: f64,
    ) -> Result<MovieScrobble, Error> {
        self.scrobble_movie("stop_scrobble_movie", movie, progress)
    }

    pub fn start_scrobble_episode(
        &self,
        episode: &impl ToId,
        progress: f64,
    ) -> Result<EpisodeScrobble, Error> {
        self.scrobble_episode("start_scrobble_episode", episode, progress)
    }

    pub fn pause_scrobble_episode(
        &self,
        episode: &impl ToId,
        progress: f64,
    ) -> Result<EpisodeScrobble, Error> {
        self.scrobble_episode("pause_scrobble_episode", episode, progress)
    }

    pub fn stop_scrobble_episode(
        &self,
        episode: &impl ToId,
        progress: f64,
    ) -> Result<EpisodeScrobble, Error> {
        self.scrobble_episode("stop_scrobble_episode", episode, progress)
    }
}
