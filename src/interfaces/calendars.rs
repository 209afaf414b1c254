//! Calendars suite
//!
//! All calendar feeds take an optional `?start_date/?days` window. The
//! `my/` variants require a logged-in user.

use super::Suite;
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::{EpisodePremiere, MoviePremiere};
use crate::parser::Shape;
use crate::paths::{
    is_date, CallContext, Path, PerArgValidator, Validator, COMMON_FILTERS, SHOWS_FILTERS,
};

fn calendar_path(template: &'static str) -> Path {
    let mut path = Path::new(template, Shape::list(Shape::Leaf))
        .extended(&["full"])
        .filters(&[COMMON_FILTERS, SHOWS_FILTERS])
        .validator(Validator::PerArg(PerArgValidator::new(
            "start_date",
            "must be a YYYY-MM-DD date",
            is_date,
        )))
        .validator(Validator::PerArg(PerArgValidator::new(
            "days",
            "must be a number of days",
            |v| v.is_u64(),
        )));

    if template.starts_with("calendars/my/") {
        path = path.validator(Validator::AuthRequired);
    }

    path
}

pub fn suite() -> Suite {
    Suite::new("calendars")
        .path(
            "get_shows",
            calendar_path("calendars/all/shows/?start_date/?days"),
        )
        .path(
            "get_my_shows",
            calendar_path("calendars/my/shows/?start_date/?days"),
        )
        .path(
            "get_new_shows",
            calendar_path("calendars/all/shows/new/?start_date/?days"),
        )
        .path(
            "get_my_new_shows",
            calendar_path("calendars/my/shows/new/?start_date/?days"),
        )
        .path(
            "get_season_premieres",
            calendar_path("calendars/all/shows/premieres/?start_date/?days"),
        )
        .path(
            "get_my_season_premieres",
            calendar_path("calendars/my/shows/premieres/?start_date/?days"),
        )
        .path(
            "get_movies",
            calendar_path("calendars/all/movies/?start_date/?days"),
        )
        .path(
            "get_my_movies",
            calendar_path("calendars/my/movies/?start_date/?days"),
        )
        .path(
            "get_dvd_releases",
            calendar_path("calendars/all/dvd/?start_date/?days"),
        )
        .path(
            "get_my_dvd_releases",
            calendar_path("calendars/my/dvd/?start_date/?days"),
        )
}

pub struct CalendarsInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> CalendarsInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        CalendarsInterface { client }
    }

    fn call<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> Result<T, Error> {
        let mut ctx = CallContext::new();
        if let Some(start_date) = start_date {
            ctx = ctx.arg("start_date", start_date);
        }
        if let Some(days) = days {
            ctx = ctx.arg("days", days);
        }

        let path = self.client.suite_path("calendars", key)?;
        self.client.executor().call_path(&path, ctx)
    }

    pub fn get_shows(
        &self,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> Result<Vec<EpisodePremiere>, Error> {
        self.call("get_shows", start_date, days)
    }

    pub fn get_my_shows(
        &self,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> Result<Vec<EpisodePremiere>, Error> {
        self.call("get_my_shows", start_date, days)
    }

    pub fn get_new_shows(
        &self,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> Result<Vec<EpisodePremiere>, Error> {
        self.call("get_new_shows", start_date, days)
    }

    pub fn get_my_new_shows(
        &self,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> Result<Vec<EpisodePremiere>, Error> {
        self.call("get_my_new_shows", start_date, days)
    }

    pub fn get_season_premieres(
        &self,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> Result<Vec<EpisodePremiere>, Error> {
        self.call("get_season_premieres", start_date, days)
    }

    pub fn get_my_season_premieres(
        &self,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> Result<Vec<EpisodePremiere>, Error> {
        self.call("get_my_season_premieres", start_date, days)
    }

    pub fn get_movies(
        &self,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> Result<Vec<MoviePremiere>, Error> {
        self.call("get_movies", start_date, days)
    }

    pub fn get_my_movies(
        &self,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> Result<Vec<MoviePremiere>, Error> {
        self.call("get_my_movies", start_date, days)
    }

    pub fn get_dvd_releases(
        &self,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> Result<Vec<MoviePremiere>, Error> {
        self.call("get_dvd_releases", start_date, days)
    }

    pub fn get_my_dvd_releases(
        &self,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> Result<Vec<MoviePremiere>, Error> {
        self.call("get_my_dvd_releases", start_date, days)
    }
}
