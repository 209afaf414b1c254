//! Shows suite

use super::movies::{
    comment_sort_validator, id_validator, list_sort_validator, list_type_validator,
    period_validator, two_letter_code_validator,
};
use super::{Suite, ToId};
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::{
    Alias, AnticipatedShow, CastCrewList, Comment, Episode, RatingsSummary, Show,
    ShowCollectionProgress, ShowStats, ShowTranslation, ShowWatchedProgress, ShowWithStats,
    TraktList, TrendingShow, UpdatedShow, User,
};
use crate::pagination::PaginationIterator;
use crate::parser::Shape;
use crate::paths::{
    is_date, CallContext, Path, PerArgValidator, Validator, COMMON_FILTERS, SHOWS_FILTERS,
};

fn bool_validator(name: &'static str) -> Validator {
    Validator::PerArg(PerArgValidator::new(name, "must be a boolean", |v| {
        v.is_boolean()
    }))
}

/// Validators shared by the two progress endpoints.
fn progress_validators() -> Vec<Validator> {
    vec![
        Validator::AuthRequired,
        id_validator("id"),
        bool_validator("hidden"),
        bool_validator("specials"),
        bool_validator("count_specials"),
        super::movies::one_of(
            "last_activity",
            "must be one of: collected, watched",
            &["collected", "watched"],
        ),
    ]
}

const PROGRESS_QARGS: &[&str] = &["hidden", "specials", "count_specials", "last_activity"];

/// Trending-style collection endpoint with the show filter set.
fn collection_path(template: &'static str, has_period: bool) -> Path {
    let mut path = Path::new(template, Shape::list(Shape::Leaf))
        .extended(&["full"])
        .filters(&[COMMON_FILTERS, SHOWS_FILTERS])
        .paginated();

    if has_period {
        path = path.validator(period_validator());
    }

    path
}

pub fn suite() -> Suite {
    Suite::new("shows")
        .path("get_trending", collection_path("shows/trending", false))
        .path("get_popular", collection_path("shows/popular", false))
        .path("get_most_played", collection_path("shows/played/?period", true))
        .path("get_most_watched", collection_path("shows/watched/?period", true))
        .path(
            "get_most_collected",
            collection_path("shows/collected/?period", true),
        )
        .path(
            "get_most_anticipated",
            collection_path("shows/anticipated", false),
        )
        .path(
            "get_recently_updated",
            Path::new("shows/updates/?start_date", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .paginated()
                .validator(Validator::PerArg(PerArgValidator::new(
                    "start_date",
                    "must be a YYYY-MM-DD date",
                    is_date,
                ))),
        )
        .path(
            "get_summary",
            Path::new("shows/!id", Shape::Leaf)
                .extended(&["full"])
                .validator(id_validator("id")),
        )
        .path(
            "get_aliases",
            Path::new("shows/!id/aliases", Shape::list(Shape::Leaf)).validator(id_validator("id")),
        )
        .path(
            "get_translations",
            Path::new("shows/!id/translations/?language", Shape::list(Shape::Leaf))
                .validator(id_validator("id"))
                .validator(two_letter_code_validator("language")),
        )
        .path(
            "get_comments",
            Path::new("shows/!id/comments/?sort", Shape::list(Shape::Leaf))
                .paginated()
                .validator(id_validator("id"))
                .validator(comment_sort_validator()),
        )
        .path(
            "get_lists",
            Path::new("shows/!id/lists/?type/?sort", Shape::list(Shape::Leaf))
                .paginated()
                .validator(id_validator("id"))
                .validator(list_type_validator())
                .validator(list_sort_validator()),
        )
        .path(
            "get_collection_progress",
            Path::new("shows/!id/progress/collection", Shape::Leaf)
                .validators(progress_validators())
                .qargs(PROGRESS_QARGS),
        )
        .path(
            "get_watched_progress",
            Path::new("shows/!id/progress/watched", Shape::Leaf)
                .validators(progress_validators())
                .qargs(PROGRESS_QARGS),
        )
        .path(
            "get_people",
            Path::new("shows/!id/people", Shape::Leaf)
                .extended(&["full"])
                .validator(id_validator("id")),
        )
        .path(
            "get_ratings",
            Path::new("shows/!id/ratings", Shape::Leaf).validator(id_validator("id")),
        )
        .path(
            "get_related",
            Path::new("shows/!id/related", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .paginated()
                .validator(id_validator("id")),
        )
        .path(
            "get_stats",
            Path::new("shows/!id/stats", Shape::Leaf).validator(id_validator("id")),
        )
        .path(
            "get_users_watching",
            Path::new("shows/!id/watching", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .validator(id_validator("id")),
        )
        .path(
            "get_next_episode",
            Path::new("shows/!id/next_episode", Shape::Leaf)
                .extended(&["full"])
                .validator(id_validator("id")),
        )
        .path(
            "get_last_episode",
            Path::new("shows/!id/last_episode", Shape::Leaf)
                .extended(&["full"])
                .validator(id_validator("id")),
        )
}

pub struct ShowsInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> ShowsInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        ShowsInterface { client }
    }

    fn paginate<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        ctx: CallContext,
    ) -> Result<PaginationIterator<'a, T>, Error> {
        let path = self.client.suite_path("shows", key)?;
        self.client.executor().paginate(path, ctx)
    }

    fn call<T: serde::de::DeserializeOwned>(&self, key: &str, ctx: CallContext) -> Result<T, Error> {
        let path = self.client.suite_path("shows", key)?;
        self.client.executor().call_path(&path, ctx)
    }

    /// Episode endpoints respond 204 when nothing is scheduled.
    fn call_nullable_episode(&self, key: &str, ctx: CallContext) -> Result<Option<Episode>, Error> {
        let path = self.client.suite_path("shows", key)?;
        let (episode, response) = self
            .client
            .executor()
            .call_path_with_response::<Option<Episode>>(&path, ctx)?;

        if response.status == 204 {
            Ok(None)
        } else {
            Ok(episode)
        }
    }

    pub fn get_trending(&self) -> Result<PaginationIterator<'a, TrendingShow>, Error> {
        self.paginate("get_trending", CallContext::new())
    }

    pub fn get_popular(&self) -> Result<PaginationIterator<'a, Show>, Error> {
        self.paginate("get_popular", CallContext::new())
    }

    pub fn get_most_played(
        &self,
        period: Option<&str>,
    ) -> Result<PaginationIterator<'a, ShowWithStats>, Error> {
        let ctx = CallContext::new().arg("period", period.unwrap_or("weekly"));
        self.paginate("get_most_played", ctx)
    }

    pub fn get_most_watched(
        &self,
        period: Option<&str>,
    ) -> Result<PaginationIterator<'a, ShowWithStats>, Error> {
        let ctx = CallContext::new().arg("period", period.unwrap_or("weekly"));
        self.paginate("get_most_watched", ctx)
    }

    pub fn get_most_collected(
        &self,
        period: Option<&str>,
    ) -> Result<PaginationIterator<'a, ShowWithStats>, Error> {
        let ctx = CallContext::new().arg("period", period.unwrap_or("weekly"));
        self.paginate("get_most_collected", ctx)
    }

    pub fn get_most_anticipated(&self) -> Result<PaginationIterator<'a, AnticipatedShow>, Error> {
        self.paginate("get_most_anticipated", CallContext::new())
    }

    pub fn get_recently_updated(
        &self,
        start_date: Option<&str>,
    ) -> Result<PaginationIterator<'a, UpdatedShow>, Error> {
        let mut ctx = CallContext::new();
        if let Some(start_date) = start_date {
            ctx = ctx.arg("start_date", start_date);
        }
        self.paginate("get_recently_updated", ctx)
    }

    pub fn get_summary(&self, show: &impl ToId) -> Result<Show, Error> {
        self.call("get_summary", CallContext::new().arg("id", show.to_id()))
    }

    pub fn get_aliases(&self, show: &impl ToId) -> Result<Vec<Alias>, Error> {
        self.call("get_aliases", CallContext::new().arg("id", show.to_id()))
    }

    pub fn get_translations(
        &self,
        show: &impl ToId,
        language: Option<&str>,
    ) -> Result<Vec<ShowTranslation>, Error> {
        let mut ctx = CallContext::new().arg("id", show.to_id());
        if let Some(language) = language {
            ctx = ctx.arg("language", language);
        }
        self.call("get_translations", ctx)
    }

    pub fn get_comments(
        &self,
        show: &impl ToId,
        sort: Option<&str>,
    ) -> Result<PaginationIterator<'a, Comment>, Error> {
        let ctx = CallContext::new()
            .arg("id", show.to_id())
            .arg("sort", sort.unwrap_or("newest"));
        self.paginate("get_comments", ctx)
    }

    pub fn get_lists(
        &self,
        show: &impl ToId,
        list_type: Option<&str>,
        sort: Option<&str>,
    ) -> Result<PaginationIterator<'a, TraktList>, Error> {
        let ctx = CallContext::new()
            .arg("id", show.to_id())
            .arg("type", list_type.unwrap_or("personal"))
            .arg("sort", sort.unwrap_or("popular"));
        self.paginate("get_lists", ctx)
    }

    pub fn get_collection_progress(
        &self,
        show: &impl ToId,
        hidden: bool,
        specials: bool,
        count_specials: bool,
    ) -> Result<ShowCollectionProgress, Error> {
        let ctx = CallContext::new()
            .arg("id", show.to_id())
            .arg("hidden", hidden)
            .arg("specials", specials)
            .arg("count_specials", count_specials);
        self.call("get_collection_progress", ctx)
    }

    pub fn get_watched_progress(
        &self,
        show: &impl ToId,
        hidden: bool,
        specials: bool,
        count_specials: bool,
    ) -> Result<ShowWatchedProgress, Error> {
        let ctx = CallContext::new()
            .arg("id", show.to_id())
            .arg("hidden", hidden)
            .arg("specials", specials)
            .arg("count_specials", count_specials);
        self.call("get_watched_progress", ctx)
    }

    pub fn get_people(&self, show: &impl ToId) -> Result<CastCrewList, Error> {
        self.call("get_people", CallContext::new().arg("id", show.to_id()))
    }

    pub fn get_ratings(&self, show: &impl ToId) -> Result<RatingsSummary, Error> {
        self.call("get_ratings", CallContext::new().arg("id", show.to_id()))
    }

    pub fn get_related(&self, show: &impl ToId) -> Result<PaginationIterator<'a, Show>, Error> {
        self.paginate("get_related", CallContext::new().arg("id", show.to_id()))
    }

    pub fn get_stats(&self, show: &impl ToId) -> Result<ShowStats, Error> {
        self.call("get_stats", CallContext::new().arg("id", show.to_id()))
    }

    pub fn get_users_watching(&self, show: &impl ToId) -> Result<Vec<User>, Error> {
        self.call("get_users_watching", CallContext::new().arg("id", show.to_id()))
    }

    pub fn get_next_episode(&self, show: &impl ToId) -> Result<Option<Episode>, Error> {
        self.call_nullable_episode("get_next_episode", CallContext::new().arg("id", show.to_id()))
    }

    pub fn get_last_episode(&self, show: &impl ToId) -> Result<Option<Episode>, Error> {
        self.call_nullable_episode("get_last_episode", CallContext::new().arg("id", show.to_id()))
    }
}
