//! Movies suite

use super::{Suite, ToId};
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::{
    Alias, AnticipatedMovie, BoxOffice, CastCrewList, Comment, Movie, MovieRelease, MovieStats,
    MovieTranslation, MovieWithStats, RatingsSummary, TraktList, TrendingMovie, UpdatedMovie,
    User,
};
use crate::pagination::PaginationIterator;
use crate::parser::Shape;
use crate::paths::{is_date, CallContext, Path, PerArgValidator, Validator, COMMON_FILTERS};

pub(crate) const PERIOD_VALUES: &[&str] = &["weekly", "monthly", "yearly", "all"];
pub(crate) const COMMENT_SORT_VALUES: &[&str] = &["newest", "oldest", "likes", "replies"];
pub(crate) const LIST_TYPE_VALUES: &[&str] = &["personal", "all", "official", "watchlist"];
pub(crate) const LIST_SORT_VALUES: &[&str] =
    &["popular", "likes", "comments", "items", "added", "updated"];

/// Enum-valued string argument check.
pub(crate) fn one_of(
    name: &'static str,
    message: &'static str,
    values: &'static [&'static str],
) -> Validator {
    Validator::PerArg(PerArgValidator::new(name, message, move |v| {
        v.as_str().map(|s| values.contains(&s)).unwrap_or(false)
    }))
}

/// Ids may be numeric trakt ids or slugs.
pub(crate) fn id_validator(name: &'static str) -> Validator {
    Validator::PerArg(PerArgValidator::new(
        name,
        "must be a trakt id or slug",
        |v| v.is_u64() || v.is_string(),
    ))
}

pub(crate) fn period_validator() -> Validator {
    one_of(
        "period",
        "must be one of: weekly, monthly, yearly, all",
        PERIOD_VALUES,
    )
}

pub(crate) fn comment_sort_validator() -> Validator {
    one_of(
        "sort",
        "must be one of: newest, oldest, likes, replies",
        COMMENT_SORT_VALUES,
    )
}

pub(crate) fn list_type_validator() -> Validator {
    one_of(
        "type",
        "must be one of: personal, all, official, watchlist",
        LIST_TYPE_VALUES,
    )
}

pub(crate) fn list_sort_validator() -> Validator {
    one_of(
        "sort",
        "must be one of: popular, likes, comments, items, added, updated",
        LIST_SORT_VALUES,
    )
}

pub(crate) fn two_letter_code_validator(name: &'static str) -> Validator {
    Validator::PerArg(PerArgValidator::new(
        name,
        "must be a two-letter code",
        |v| v.as_str().map(|s| s.len() == 2).unwrap_or(false),
    ))
}

/// Trending-style collection endpoint: extended, filterable, paginated.
fn collection_path(template: &'static str, has_period: bool) -> Path {
    let mut path = Path::new(template, Shape::list(Shape::Leaf))
        .extended(&["full"])
        .filters(&[COMMON_FILTERS])
        .paginated();

    if has_period {
        path = path.validator(period_validator());
    }

    path
}

pub fn suite() -> Suite {
    Suite::new("movies")
        .path("get_trending", collection_path("movies/trending", false))
        .path("get_popular", collection_path("movies/popular", false))
        .path("get_most_played", collection_path("movies/played/?period", true))
        .path("get_most_watched", collection_path("movies/watched/?period", true))
        .path(
            "get_most_collected",
            collection_path("movies/collected/?period", true),
        )
        .path(
            "get_most_anticipated",
            collection_path("movies/anticipated", false),
        )
        .path(
            "get_box_office",
            Path::new("movies/boxoffice", Shape::list(Shape::Leaf)).extended(&["full"]),
        )
        .path(
            "get_recently_updated",
            Path::new("movies/updates/?start_date", Shape::list(Shape::Leaf))
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
            Path::new("movies/!id", Shape::Leaf)
                .extended(&["full"])
                .validator(id_validator("id")),
        )
        .path(
            "get_aliases",
            Path::new("movies/!id/aliases", Shape::list(Shape::Leaf)).validator(id_validator("id")),
        )
        .path(
            "get_releases",
            Path::new("movies/!id/releases/?country", Shape::list(Shape::Leaf))
                .validator(id_validator("id"))
                .validator(two_letter_code_validator("country")),
        )
        .path(
            "get_translations",
            Path::new("movies/!id/translations/?language", Shape::list(Shape::Leaf))
                .validator(id_validator("id"))
                .validator(two_letter_code_validator("language")),
        )
        .path(
            "get_comments",
            Path::new("movies/!id/comments/?sort", Shape::list(Shape::Leaf))
                .paginated()
                .validator(id_validator("id"))
                .validator(comment_sort_validator()),
        )
        .path(
            "get_lists",
            Path::new("movies/!id/lists/?type/?sort", Shape::list(Shape::Leaf))
                .paginated()
                .validator(id_validator("id"))
                .validator(list_type_validator())
                .validator(list_sort_validator()),
        )
        .path(
            "get_people",
            Path::new("movies/!id/people", Shape::Leaf)
                .extended(&["full"])
                .validator(id_validator("id")),
        )
        .path(
            "get_ratings",
            Path::new("movies/!id/ratings", Shape::Leaf).validator(id_validator("id")),
        )
        .path(
            "get_related",
            Path::new("movies/!id/related", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .paginated()
                .validator(id_validator("id")),
        )
        .path(
            "get_stats",
            Path::new("movies/!id/stats", Shape::Leaf).validator(id_validator("id")),
        )
        .path(
            "get_users_watching",
            Path::new("movies/!id/watching", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .validator(id_validator("id")),
        )
}

pub struct MoviesInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> MoviesInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        MoviesInterface { client }
    }

    fn paginate<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        ctx: CallContext,
    ) -> Result<PaginationIterator<'a, T>, Error> {
        let path = self.client.suite_path("movies", key)?;
        self.client.executor().paginate(path, ctx)
    }

    fn call<T: serde::de::DeserializeOwned>(&self, key: &str, ctx: CallContext) -> Result<T, Error> {
        let path = self.client.suite_path("movies", key)?;
        self.client.executor().call_path(&path, ctx)
    }

    pub fn get_trending(&self) -> Result<PaginationIterator<'a, TrendingMovie>, Error> {
        self.paginate("get_trending", CallContext::new())
    }

    pub fn get_popular(&self) -> Result<PaginationIterator<'a, Movie>, Error> {
        self.paginate("get_popular", CallContext::new())
    }

    pub fn get_most_played(
        &self,
        period: Option<&str>,
    ) -> Result<PaginationIterator<'a, MovieWithStats>, Error> {
        let ctx = CallContext::new().arg("period", period.unwrap_or("weekly"));
        self.paginate("get_most_played", ctx)
    }

    pub fn get_most_watched(
        &self,
        period: Option<&str>,
    ) -> Result<PaginationIterator<'a, MovieWithStats>, Error> {
        let ctx = CallContext::new().arg("period", period.unwrap_or("weekly"));
        self.paginate("get_most_watched", ctx)
    }

    pub fn get_most_collected(
        &self,
        period: Option<&str>,
    ) -> Result<PaginationIterator<'a, MovieWithStats>, Error> {
        let ctx = CallContext::new().arg("period", period.unwrap_or("weekly"));
        self.paginate("get_most_collected", ctx)
    }

    pub fn get_most_anticipated(&self) -> Result<PaginationIterator<'a, AnticipatedMovie>, Error> {
        self.paginate("get_most_anticipated", CallContext::new())
    }

    pub fn get_box_office(&self) -> Result<Vec<BoxOffice>, Error> {
        self.call("get_box_office", CallContext::new())
    }

    pub fn get_recently_updated(
        &self,
        start_date: Option<&str>,
    ) -> Result<PaginationIterator<'a, UpdatedMovie>, Error> {
        let mut ctx = CallContext::new();
        if let Some(start_date) = start_date {
            ctx = ctx.arg("start_date", start_date);
        }
        self.paginate("get_recently_updated", ctx)
    }

    pub fn get_summary(&self, movie: &impl ToId) -> Result<Movie, Error> {
        self.call("get_summary", CallContext::new().arg("id", movie.to_id()))
    }

    pub fn get_aliases(&self, movie: &impl ToId) -> Result<Vec<Alias>, Error> {
        self.call("get_aliases", CallContext::new().arg("id", movie.to_id()))
    }

    pub fn get_releases(
        &self,
        movie: &impl ToId,
        country: Option<&str>,
    ) -> Result<Vec<MovieRelease>, Error> {
        let mut ctx = CallContext::new().arg("id", movie.to_id());
        if let Some(country) = country {
            ctx = ctx.arg("country", country);
        }
        self.call("get_releases", ctx)
    }

    pub fn get_translations(
        &self,
        movie: &impl ToId,
        language: Option<&str>,
    ) -> Result<Vec<MovieTranslation>, Error> {
        let mut ctx = CallContext::new().arg("id", movie.to_id());
        if let Some(language) = language {
            ctx = ctx.arg("language", language);
        }
        self.call("get_translations", ctx)
    }

    pub fn get_comments(
        &self,
        movie: &impl ToId,
        sort: Option<&str>,
    ) -> Result<PaginationIterator<'a, Comment>, Error> {
        let ctx = CallContext::new()
            .arg("id", movie.to_id())
            .arg("sort", sort.unwrap_or("newest"));
        self.paginate("get_comments", ctx)
    }

    pub fn get_lists(
        &self,
        movie: &impl ToId,
        list_type: Option<&str>,
        sort: Option<&str>,
    ) -> Result<PaginationIterator<'a, TraktList>, Error> {
        let ctx = CallContext::new()
            .arg("id", movie.to_id())
            .arg("type", list_type.unwrap_or("personal"))
            .arg("sort", sort.unwrap_or("popular"));
        self.paginate("get_lists", ctx)
    }

    pub fn get_people(&self, movie: &impl ToId) -> Result<CastCrewList, Error> {
        self.call("get_people", CallContext::new().arg("id", movie.to_id()))
    }

    pub fn get_ratings(&self, movie: &impl ToId) -> Result<RatingsSummary, Error> {
        self.call("get_ratings", CallContext::new().arg("id", movie.to_id()))
    }

    pub fn get_related(&self, movie: &impl ToId) -> Result<PaginationIterator<'a, Movie>, Error> {
        self.paginate("get_related", CallContext::new().arg("id", movie.to_id()))
    }

    pub fn get_stats(&self, movie: &impl ToId) -> Result<MovieStats, Error> {
        self.call("get_stats", CallContext::new().arg("id", movie.to_id()))
    }

    pub fn get_users_watching(&self, movie: &impl ToId) -> Result<Vec<User>, Error> {
        self.call("get_users_watching", CallContext::new().arg("id", movie.to_id()))
    }
}
