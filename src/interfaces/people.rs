//! People suite

use super::movies::{id_validator, list_sort_validator, list_type_validator};
use super::{Suite, ToId};
use crate::cache::CacheLevel;
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::{MovieCredits, Person, ShowCredits, TraktList};
use crate::parser::Shape;
use crate::paths::{CallContext, Path};

pub fn suite() -> Suite {
    Suite::new("people")
        .path(
            "get_person",
            Path::new("people/!id", Shape::Leaf)
                .extended(&["full"])
                .validator(id_validator("id"))
                .cache_level(CacheLevel::Basic),
        )
        .path(
            "get_movie_credits",
            Path::new("people/!id/movies", Shape::Leaf)
                .extended(&["full"])
                .validator(id_validator("id"))
                .cache_level(CacheLevel::Basic),
        )
        .path(
            "get_show_credits",
            Path::new("people/!id/shows", Shape::Leaf)
                .extended(&["full"])
                .validator(id_validator("id"))
                .cache_level(CacheLevel::Basic),
        )
        .path(
            "get_lists",
            Path::new("people/!id/lists/?type/?sort", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .validator(id_validator("id"))
                .validator(list_type_validator())
                .validator(list_sort_validator())
                .cache_level(CacheLevel::Basic),
        )
}

pub struct PeopleInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> PeopleInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        PeopleInterface { client }
    }

    fn call<T: serde::de::DeserializeOwned>(&self, key: &str, ctx: CallContext) -> Result<T, Error> {
        let path = self.client.suite_path("people", key)?;
        self.client.executor().call_path(&path, ctx)
    }

    pub fn get_person(&self, person: &impl ToId) -> Result<Person, Error> {
        self.call("get_person", CallContext::new().arg("id", person.to_id()))
    }

    pub fn get_movie_credits(&self, person: &impl ToId) -> Result<MovieCredits, Error> {
        self.call("get_movie_credits", CallContext::new().arg("id", person.to_id()))
    }

    pub fn get_show_credits(&self, person: &impl ToId) -> Result<ShowCredits, Error> {
        self.call("get_show_credits", CallContext::new().arg("id", person.to_id()))
    }

    pub fn get_lists(
        &self,
        person: &impl ToId,
        list_type: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Vec<TraktList>, Error> {
        let mut ctx = CallContext::new().arg("id", person.to_id());
        if let Some(list_type) = list_type {
            ctx = ctx.arg("type", list_type);
        }
        if let Some(sort) = sort {
            ctx = ctx.arg("sort", sort);
        }
        self.call("get_lists", ctx)
    }
}
