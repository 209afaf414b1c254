//! Lookup suites: countries, certifications, genres, languages,
//! networks and the lists feeds
//!
//! Small static vocabularies; everything except the lists feeds is
//! cacheable at the `basic` level.

use super::Suite;
use crate::cache::CacheLevel;
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::{Certification, Country, Genre, Language, ListResponse, Network};
use crate::pagination::PaginationIterator;
use crate::parser::{MapShape, Shape};
use crate::paths::{CallContext, Path, PerArgValidator, Validator};

/// The `!type` placeholder of the lookup endpoints.
fn media_type_validator() -> Validator {
    Validator::PerArg(PerArgValidator::new(
        "type",
        "must be one of: movies, shows",
        |t| {
            t.as_str()
                .map(|s| matches!(s, "movies" | "shows"))
                .unwrap_or(false)
        },
    ))
}

pub fn countries_suite() -> Suite {
    Suite::new("countries").path(
        "get_countries",
        Path::new("countries/!type", Shape::list(Shape::Leaf))
            .aliases(&["get_countries", ""])
            .validator(media_type_validator())
            .cache_level(CacheLevel::Basic),
    )
}

pub fn certifications_suite() -> Suite {
    Suite::new("certifications").path(
        "get_certifications",
        Path::new(
            "certifications/!type",
            Shape::map(MapShape::new().field("us", Shape::list(Shape::Leaf))),
        )
        .validator(media_type_validator())
        .cache_level(CacheLevel::Basic),
    )
}

pub fn genres_suite() -> Suite {
    Suite::new("genres").path(
        "get_genres",
        Path::new("genres/!type", Shape::list(Shape::Leaf))
            .validator(media_type_validator())
            .cache_level(CacheLevel::Basic),
    )
}

pub fn languages_suite() -> Suite {
    Suite::new("languages").path(
        "get_languages",
        Path::new("languages/!type", Shape::list(Shape::Leaf))
            .validator(media_type_validator())
            .cache_level(CacheLevel::Basic),
    )
}

pub fn lists_suite() -> Suite {
    Suite::new("lists")
        .path(
            "get_trending",
            Path::new("lists/trending", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .paginated(),
        )
        .path(
            "get_popular",
            Path::new("lists/popular", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .paginated(),
        )
}

pub fn networks_suite() -> Suite {
    Suite::new("networks").path(
        "get_networks",
        Path::new("networks", Shape::list(Shape::Leaf)).cache_level(CacheLevel::Basic),
    )
}

pub struct CountriesInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> CountriesInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        CountriesInterface { client }
    }

    pub fn get_countries(&self, media_type: &str) -> Result<Vec<Country>, Error> {
        let path = self.client.suite_path("countries", "get_countries")?;
        self.client
            .executor()
            .call_path(&path, CallContext::new().arg("type", media_type))
    }
}

/// The API nests certifications under a country key.
#[derive(serde::Deserialize)]
struct CertificationsEnvelope {
    us: Vec<Certification>,
}

pub struct CertificationsInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> CertificationsInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        CertificationsInterface { client }
    }

    pub fn get_certifications(&self, media_type: &str) -> Result<Vec<Certification>, Error> {
        let path = self.client.suite_path("certifications", "get_certifications")?;
        let envelope: CertificationsEnvelope = self
            .client
            .executor()
            .call_path(&path, CallContext::new().arg("type", media_type))?;

        Ok(envelope.us)
    }
}

pub struct GenresInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> GenresInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        GenresInterface { client }
    }

    pub fn get_genres(&self, media_type: &str) -> Result<Vec<Genre>, Error> {
        let path = self.client.suite_path("genres", "get_genres")?;
        self.client
            .executor()
            .call_path(&path, CallContext::new().arg("type", media_type))
    }
}

pub struct LanguagesInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> LanguagesInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        LanguagesInterface { client }
    }

    pub fn get_languages(&self, media_type: &str) -> Result<Vec<Language>, Error> {
        let path = self.client.suite_path("languages", "get_languages")?;
        self.client
            .executor()
            .call_path(&path, CallContext::new().arg("type", media_type))
    }
}

pub struct ListsInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> ListsInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        ListsInterface { client }
    }

    pub fn get_trending(&self) -> Result<PaginationIterator<'a, ListResponse>, Error> {
        let path = self.client.suite_path("lists", "get_trending")?;
        self.client.executor().paginate(path, CallContext::new())
    }

    pub fn get_popular(&self) -> Result<PaginationIterator<'a, ListResponse>, Error> {
        let path = self.client.suite_path("lists", "get_popular")?;
        self.client.executor().paginate(path, CallContext::new())
    }
}

pub struct NetworksInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> NetworksInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        NetworksInterface { client }
    }

    pub fn get_networks(&self) -> Result<Vec<Network>, Error> {
        let path = self.client.suite_path("networks", "get_networks")?;
        self.client.executor().call_path(&path, CallContext::new())
    }
}
