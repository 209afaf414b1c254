//! Episodes suite
//!
//! Episodes are addressed through their show and season:
//! `shows/!id/seasons/!season/episodes/!episode/...`.

use super::movies::{
    comment_sort_validator, id_validator, list_sort_validator, list_type_validator,
    two_letter_code_validator,
};
use super::{Suite, ToId};
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::{
    Comment, Episode, EpisodeTranslation, RatingsSummary, SeasonEpisodeStats, TraktList, User,
};
use crate::pagination::PaginationIterator;
use crate::parser::Shape;
use crate::paths::{CallContext, Path, PerArgValidator, Validator};

fn number_validator(name: &'static str) -> Validator {
    Validator::PerArg(PerArgValidator::new(name, "must be a number", |v| v.is_u64()))
}

fn episode_validators() -> Vec<Validator> {
    vec![
        id_validator("id"),
        number_validator("season"),
        number_validator("episode"),
    ]
}

pub fn suite() -> Suite {
    Suite::new("episodes")
        .path(
            "get_episode",
            Path::new(
                "shows/!id/seasons/!season/episodes/!episode",
                Shape::Leaf,
            )
            .extended(&["full"])
            .validators(episode_validators()),
        )
        .path(
            "get_translations",
            Path::new(
                "shows/!id/seasons/!season/episodes/!episode/translations/?language",
                Shape::list(Shape::Leaf),
            )
            .validators(episode_validators())
            .validator(two_letter_code_validator("language")),
        )
        .path(
            "get_comments",
            Path::new(
                "shows/!id/seasons/!season/episodes/!episode/comments/?sort",
                Shape::list(Shape::Leaf),
            )
            .paginated()
            .validators(episode_validators())
            .validator(comment_sort_validator()),
        )
        .path(
            "get_lists",
            Path::new(
                "shows/!id/seasons/!season/episodes/!episode/lists/?type/?sort",
                Shape::list(Shape::Leaf),
            )
            .paginated()
            .validators(episode_validators())
            .validator(list_type_validator())
            .validator(list_sort_validator()),
        )
        .path(
            "get_ratings",
            Path::new(
                "shows/!id/seasons/!season/episodes/!episode/ratings",
                Shape::Leaf,
            )
            .validators(episode_validators()),
        )
        .path(
            "get_stats",
            Path::new(
                "shows/!id/seasons/!season/episodes/!episode/stats",
                Shape::Leaf,
            )
            .validators(episode_validators()),
        )
        .path(
            "get_users_watching",
            Path::new(
                "shows/!id/seasons/!season/episodes/!episode/watching",
                Shape::list(Shape::Leaf),
            )
            .extended(&["full"])
            .validators(episode_validators()),
        )
}

pub struct EpisodesInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> EpisodesInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        EpisodesInterface { client }
    }

    fn ctx(show: &impl ToId, season: u32, episode: u32) -> CallContext {
        CallContext::new()
            .arg("id", show.to_id())
            .arg("season", season)
            .arg("episode", episode)
    }

    fn paginate<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        ctx: CallContext,
    ) -> Result<PaginationIterator<'a, T>, Error> {
        let path = self.client.suite_path("episodes", key)?;
        self.client.executor().paginate(path, ctx)
    }

    fn call<T: serde::de::DeserializeOwned>(&self, key: &str, ctx: CallContext) -> Result<T, Error> {
        let path = self.client.suite_path("episodes", key)?;
        self.client.executor().call_path(&path, ctx)
    }

    pub fn get_episode(
        &self,
        show: &impl ToId,
        season: u32,
        episode: u32,
    ) -> Result<Episode, Error> {
        self.call("get_episode", Self::ctx(show, season, episode))
    }

    pub fn get_translations(
        &self,
        show: &impl ToId,
        season: u32,
        episode: u32,
        language: Option<&str>,
    ) -> Result<Vec<EpisodeTranslation>, Error> {
        let mut ctx = Self::ctx(show, season, episode);
        if let Some(language) = language {
            ctx = ctx.arg("language", language);
        }
        self.call("get_translations", ctx)
    }

    pub fn get_comments(
        &self,
        show: &impl ToId,
        season: u32,
        episode: u32,
        sort: Option<&str>,
    ) -> Result<PaginationIterator<'a, Comment>, Error> {
        let ctx = Self::ctx(show, season, episode).arg("sort", sort.unwrap_or("newest"));
        self.paginate("get_comments", ctx)
    }

    pub fn get_lists(
        &self,
        show: &impl ToId,
        season: u32,
        episode: u32,
        list_type: Option<&str>,
        sort: Option<&str>,
    ) -> Result<PaginationIterator<'a, TraktList>, Error> {
        let ctx = Self::ctx(show, season, episode)
            .arg("type", list_type.unwrap_or("personal"))
            .arg("sort", sort.unwrap_or("popular"));
        self.paginate("get_lists", ctx)
    }

    pub fn get_ratings(
        &self,
        show: &impl ToId,
        season: u32,
        episode: u32,
    ) -> Result<RatingsSummary, Error> {
        self.call("get_ratings", Self::ctx(show, season, episode))
    }

    pub fn get_stats(
        &self,
        show: &impl ToId,
        season: u32,
        episode: u32,
    ) -> Result<SeasonEpisodeStats, Error> {
        self.call("get_stats", Self::ctx(show, season, episode))
    }

    pub fn get_users_watching(
        &self,
        show: &impl ToId,
        season: u32,
        episode: u32,
    ) -> Result<Vec<User>, Error> {
        self.call("get_users_watching", Self::ctx(show, season, episode))
    }
}
