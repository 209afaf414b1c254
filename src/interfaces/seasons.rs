//! Seasons suite
//!
//! Seasons are addressed through their show: `shows/!id/seasons/...`
//! with the season number as a second placeholder.

use super::movies::{
    comment_sort_validator, id_validator, list_sort_validator, list_type_validator,
};
use super::{Suite, ToId};
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::{Comment, Episode, RatingsSummary, Season, SeasonEpisodeStats, TraktList, User};
use crate::pagination::PaginationIterator;
use crate::parser::Shape;
use crate::paths::{CallContext, Path, PerArgValidator, Validator};

fn season_number_validator() -> Validator {
    Validator::PerArg(PerArgValidator::new("season", "must be a season number", |v| {
        v.is_u64()
    }))
}

/// `translations` takes `all` or a two-letter language code.
fn translations_validator() -> Validator {
    Validator::PerArg(PerArgValidator::new(
        "translations",
        "must be `all` or a two-letter language code",
        |v| v.as_str().map(|s| s == "all" || s.len() == 2).unwrap_or(false),
    ))
}

pub fn suite() -> Suite {
    Suite::new("seasons")
        .path(
            "get_all_seasons",
            Path::new("shows/!id/seasons", Shape::list(Shape::Leaf))
                .extended(&["full", "episodes"])
                .validator(id_validator("id")),
        )
        .path(
            "get_season",
            Path::new("shows/!id/seasons/!season", Shape::list(Shape::Leaf))
                .extended(&["full", "episodes"])
                .validator(id_validator("id"))
                .validator(season_number_validator())
                .validator(translations_validator())
                .qargs(&["translations"]),
        )
        .path(
            "get_comments",
            Path::new(
                "shows/!id/seasons/!season/comments/?sort",
                Shape::list(Shape::Leaf),
            )
            .paginated()
            .validator(id_validator("id"))
            .validator(season_number_validator())
            .validator(comment_sort_validator()),
        )
        .path(
            "get_lists",
            Path::new(
                "shows/!id/seasons/!season/lists/?type/?sort",
                Shape::list(Shape::Leaf),
            )
            .paginated()
            .validator(id_validator("id"))
            .validator(season_number_validator())
            .validator(list_type_validator())
            .validator(list_sort_validator()),
        )
        .path(
            "get_ratings",
            Path::new("shows/!id/seasons/!season/ratings", Shape::Leaf)
                .validator(id_validator("id"))
                .validator(season_number_validator()),
        )
        .path(
            "get_stats",
            Path::new("shows/!id/seasons/!season/stats", Shape::Leaf)
                .validator(id_validator("id"))
                .validator(season_number_validator()),
        )
        .path(
            "get_users_watching",
            Path::new("shows/!id/seasons/!season/watching", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .validator(id_validator("id"))
                .validator(season_number_validator()),
        )
}

pub struct SeasonsInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> SeasonsInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        SeasonsInterface { client }
    }

    fn paginate<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        ctx: CallContext,
    ) -> Result<PaginationIterator<'a, T>, Error> {
        let path = self.client.suite_path("seasons", key)?;
        self.client.executor().paginate(path, ctx)
    }

    fn call<T: serde::de::DeserializeOwned>(&self, key: &str, ctx: CallContext) -> Result<T, Error> {
        let path = self.client.suite_path("seasons", key)?;
        self.client.executor().call_path(&path, ctx)
    }

    pub fn get_all_seasons(&self, show: &impl ToId) -> Result<Vec<Season>, Error> {
        self.call("get_all_seasons", CallContext::new().arg("id", show.to_id()))
    }

    /// Episodes of one season; `translations` adds translated titles.
    pub fn get_season(
        &self,
        show: &impl ToId,
        season: u32,
        translations: Option<&str>,
    ) -> Result<Vec<Episode>, Error> {
        let mut ctx = CallContext::new().arg("id", show.to_id()).arg("season", season);
        if let Some(translations) = translations {
            ctx = ctx.arg("translations", translations);
        }
        self.call("get_season", ctx)
    }

    pub fn get_comments(
        &self,
        show: &impl ToId,
        season: u32,
        sort: Option<&str>,
    ) -> Result<PaginationIterator<'a, Comment>, Error> {
        let ctx = CallContext::new()
            .arg("id", show.to_id())
            .arg("season", season)
            .arg("sort", sort.unwrap_or("newest"));
        self.paginate("get_comments", ctx)
    }

    pub fn get_lists(
        &self,
        show: &impl ToId,
        season: u32,
        list_type: Option<&str>,
        sort: Option<&str>,
    ) -> Result<PaginationIterator<'a, TraktList>, Error> {
        let ctx = CallContext::new()
            .arg("id", show.to_id())
            .arg("season", season)
            .arg("type", list_type.unwrap_or("personal"))
            .arg("sort", sort.unwrap_or("popular"));
        self.paginate("get_lists", ctx)
    }

    pub fn get_ratings(&self, show: &impl ToId, season: u32) -> Result<RatingsSummary, Error> {
        let ctx = CallContext::new().arg("id", show.to_id()).arg("season", season);
        self.call("get_ratings", ctx)
    }

    pub fn get_stats(&self, show: &impl ToId, season: u32) -> Result<SeasonEpisodeStats, Error> {
        let ctx = CallContext::new().arg("id", show.to_id()).arg("season", season);
        self.call("get_stats", ctx)
    }

    pub fn get_users_watching(&self, show: &impl ToId, season: u32) -> Result<Vec<User>, Error> {
        let ctx = CallContext::new().arg("id", show.to_id()).arg("season", season);
        self.call("get_users_watching", ctx)
    }
}
