//! Search suite
//!
//! Two entry points: full-text queries (`search/!type`) and external-id
//! lookups (`search/!id_type/!id`). The query text travels as the
//! `query` filter; media types may be passed comma-joined.

use super::Suite;
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::SearchResult;
use crate::pagination::PaginationIterator;
use crate::parser::Shape;
use crate::paths::{CallContext, Path, PerArgValidator, Validator, ALL_FILTERS};

const MEDIA_TYPES: &[&str] = &["movie", "show", "episode", "person", "list"];
const ID_TYPES: &[&str] = &["trakt", "imdb", "tmdb", "tvdb"];
const POSSIBLE_FIELDS: &[&str] = &[
    "title",
    "tagline",
    "overview",
    "people",
    "translations",
    "aliases",
    "name",
    "biography",
    "description",
];

/// Comma-joined list where every element must be a known value.
fn all_in(name: &'static str, message: &'static str, values: &'static [&'static str]) -> Validator {
    Validator::PerArg(PerArgValidator::new(name, message, move |v| {
        v.as_str()
            .map(|s| s.split(',').all(|x| values.contains(&x)))
            .unwrap_or(false)
    }))
}

pub fn suite() -> Suite {
    Suite::new("search")
        .path(
            "text_query",
            Path::new("search/!type", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .filters(&[ALL_FILTERS])
                .paginated()
                .validator(all_in(
                    "type",
                    "must be media types: movie, show, episode, person, list",
                    MEDIA_TYPES,
                ))
                .validator(all_in(
                    "fields",
                    "must be known search fields",
                    POSSIBLE_FIELDS,
                ))
                .qargs(&["fields"]),
        )
        .path(
            "id_lookup",
            Path::new("search/!id_type/!id", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .filters(&[ALL_FILTERS])
                .paginated()
                .validator(super::movies::id_validator("id"))
                .validator(super::movies::one_of(
                    "id_type",
                    "must be one of: trakt, imdb, tmdb, tvdb",
                    ID_TYPES,
                ))
                .validator(all_in(
                    "type",
                    "must be media types: movie, show, episode, person, list",
                    MEDIA_TYPES,
                ))
                .qargs(&["type"]),
        )
}

pub struct SearchInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> SearchInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        SearchInterface { client }
    }

    /// Full-text search over one or more media types.
    pub fn text_query(
        &self,
        media_types: &[&str],
        query: &str,
        fields: Option<&[&str]>,
    ) -> Result<PaginationIterator<'a, SearchResult>, Error> {
        let mut ctx = CallContext::new()
            .arg("type", media_types.join(","))
            .filter("query", query);

        if let Some(fields) = fields {
            ctx = ctx.arg("fields", fields.join(","));
        }

        let path = self.client.suite_path("search", "text_query")?;
        self.client.executor().paginate(path, ctx)
    }

    /// Look an item up by an external id (imdb, tmdb, ...).
    pub fn id_lookup(
        &self,
        id_type: &str,
        id: &str,
        media_types: Option<&[&str]>,
    ) -> Result<PaginationIterator<'a, SearchResult>, Error> {
        let mut ctx = CallContext::new().arg("id_type", id_type).arg("id", id);

        if let Some(media_types) = media_types {
            ctx = ctx.arg("type", media_types.join(","));
        }

        let path = self.client.suite_path("search", "id_lookup")?;
        self.client.executor().paginate(path, ctx)
    }
}
