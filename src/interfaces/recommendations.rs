//! Recommendations suite (requires authentication)

use super::movies::id_validator;
use super::{Suite, ToId};
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::{Movie, Show};
use crate::parser::Shape;
use crate::paths::{CallContext, Path, PerArgValidator, Validator};
use reqwest::Method;

fn ignore_collected_validator() -> Validator {
    Validator::PerArg(PerArgValidator::new(
        "ignore_collected",
        "must be a boolean",
        |v| v.is_boolean(),
    ))
}

pub fn suite() -> Suite {
    Suite::new("recommendations")
        .path(
            "get_movie_recommendations",
            Path::new("recommendations/movies", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .validator(Validator::AuthRequired)
                .validator(ignore_collected_validator())
                .qargs(&["ignore_collected"]),
        )
        .path(
            "hide_movie",
            Path::new("recommendations/movies/!id", Shape::Any)
                .method(Method::DELETE)
                .validator(Validator::AuthRequired)
                .validator(id_validator("id")),
        )
        .path(
            "get_show_recommendations",
            Path::new("recommendations/shows", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .validator(Validator::AuthRequired)
                .validator(ignore_collected_validator())
                .qargs(&["ignore_collected"]),
        )
        .path(
            "hide_show",
            Path::new("recommendations/shows/!id", Shape::Any)
                .method(Method::DELETE)
                .validator(Validator::AuthRequired)
                .validator(id_validator("id")),
        )
}

pub struct RecommendationsInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> RecommendationsInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        RecommendationsInterface { client }
    }

    pub fn get_movie_recommendations(&self, ignore_collected: bool) -> Result<Vec<Movie>, Error> {
        let path = self
            .client
            .suite_path("recommendations", "get_movie_recommendations")?;
        let ctx = CallContext::new().arg("ignore_collected", ignore_collected);
        self.client.executor().call_path(&path, ctx)
    }

    /// Stop recommending a movie.
    pub fn hide_movie(&self, movie: &impl ToId) -> Result<(), Error> {
        let path = self.client.suite_path("recommendations", "hide_movie")?;
        let ctx = CallContext::new().arg("id", movie.to_id());
        let _: serde_json::Value = self.client.executor().call_path(&path, ctx)?;
        Ok(())
    }

    pub fn get_show_recommendations(&self, ignore_collected: bool) -> Result<Vec<Show>, Error> {
        let path = self
            .client
            .suite_path("recommendations", "get_show_recommendations")?;
        let ctx = CallContext::new().arg("ignore_collected", ignore_collected);
        self.client.executor().call_path(&path, ctx)
    }

    /// Stop recommending a show.
    pub fn hide_show(&self, show: &impl ToId) -> Result<(), Error> {
        let path = self.client.suite_path("recommendations", "hide_show")?;
        let ctx = CallContext::new().arg("id", show.to_id());
        let _: serde_json::Value = self.client.executor().call_path(&path, ctx)?;
        Ok(())
    }
}
