//! Checkin suite (requires authentication)
//!
//! Checking in tells the API what is being watched right now. The API
//! allows one active checkin at a time; a 409 response carries the
//! expiry of the conflicting one.

use serde_json::{json, Value};

use super::{Suite, ToId};
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::{EpisodeCheckin, MovieCheckin, Sharing};
use crate::parser::Shape;
use crate::paths::{CallContext, Path, Validator};
use reqwest::Method;

/// Optional checkin metadata shared by movie and episode checkins.
#[derive(Debug, Clone, Default)]
pub struct CheckinOptions {
    pub message: Option<String>,
    pub sharing: Option<Sharing>,
    pub venue_id: Option<String>,
    pub venue_name: Option<String>,
    pub app_version: Option<String>,
    pub app_date: Option<String>,
}

impl CheckinOptions {
    fn apply(&self, body: &mut Value) {
        if let Some(sharing) = &self.sharing {
            body["sharing"] = json!(sharing);
        }

        let fields = [
            ("message", &self.message),
            ("venue_id", &self.venue_id),
            ("venue_name", &self.venue_name),
            ("app_version", &self.app_version),
            ("app_date", &self.app_date),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                body[key] = json!(value);
            }
        }
    }
}

pub fn suite() -> Suite {
    Suite::new("checkin")
        .path(
            "delete_active_checkins",
            Path::new("checkin", Shape::Any)
                .method(Method::DELETE)
                .validator(Validator::AuthRequired),
        )
        .path(
            "check_into_episode",
            Path::new("checkin", Shape::Leaf)
                .method(Method::POST)
                .validator(Validator::AuthRequired),
        )
        .path(
            "check_into_movie",
            Path::new("checkin", Shape::Leaf)
                .method(Method::POST)
                .validator(Validator::AuthRequired),
        )
}

pub struct CheckinInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> CheckinInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        CheckinInterface { client }
    }

    pub fn check_into_movie(
        &self,
        movie: &impl ToId,
        options: &CheckinOptions,
    ) -> Result<MovieCheckin, Error> {
        let mut body = json!({"movie": {"ids": {"trakt": movie.to_id()}}});
        options.apply(&mut body);

        let path = self.client.suite_path("checkin", "check_into_movie")?;
        self.client
            .executor()
            .call_path(&path, CallContext::new().body(body))
    }

    /// Check into an episode; passing the show helps the API resolve
    /// ambiguous episode numbering.
    pub fn check_into_episode(
        &self,
        episode: &impl ToId,
        show: Option<&dyn ToId>,
        options: &CheckinOptions,
    ) -> Result<EpisodeCheckin, Error> {
        let mut body = json!({"episode": {"ids": {"trakt": episode.to_id()}}});
        if let Some(show) = show {
            body["show"] = json!({"ids": {"trakt": show.to_id()}});
        }
        options.apply(&mut body);

        let path = self.client.suite_path("checkin", "check_into_episode")?;
        self.client
            .executor()
            .call_path(&path, CallContext::new().body(body))
    }

    /// Remove any active checkin.
    pub fn delete_active_checkins(&self) -> Result<(), Error> {
        let path = self.client.suite_path("checkin", "delete_active_checkins")?;
        let _: Value = self
            .client
            .executor()
            .call_path(&path, CallContext::new())?;
        Ok(())
    }
}
