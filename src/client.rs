//! Top-level client
//!
//! [`TraktClient`] wires the components together by explicit dependency
//! injection: configuration, the HTTP component (over an injectable
//! transport), the response cache, the OAuth component, the single
//! credentials slot and the suite registry. Typed access goes through
//! the suite accessors (`client.movies()...`); dynamic access through
//! [`run`](TraktClient::run) with a dotted call name.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;

use crate::cache::CacheManager;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::executor::{Executed, Executor};
use crate::http::{HttpComponent, HttpTransport, ReqwestTransport};
use crate::interfaces::{
    CalendarsInterface, CertificationsInterface, CheckinInterface, CommentsInterface,
    CountriesInterface, EpisodesInterface, GenresInterface, LanguagesInterface, ListsInterface,
    MoviesInterface, NetworksInterface, PeopleInterface, RecommendationsInterface,
    ScrobbleInterface, SearchInterface, SeasonsInterface, ShowsInterface, Suite,
};
use crate::oauth::{Credentials, CredentialsSlot, OauthComponent, SleepFn};
use crate::paths::{CallContext, Path};

/// Client for the Trakt.tv REST API.
pub struct TraktClient {
    config: ClientConfig,
    client_id: String,
    http: Arc<HttpComponent>,
    cache: CacheManager,
    oauth: OauthComponent,
    credentials: CredentialsSlot,
    registry: Vec<Suite>,
}

impl TraktClient {
    /// Client with default configuration and the reqwest transport.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, Error> {
        TraktClient::builder(client_id, client_secret).build()
    }

    pub fn builder(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> TraktClientBuilder {
        TraktClientBuilder {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            config: ClientConfig::default(),
            transport: None,
            user: None,
            sleep: None,
        }
    }

    // ---- credentials ------------------------------------------------

    /// Whether a user is currently logged in.
    pub fn authenticated(&self) -> bool {
        self.credentials.read().is_some()
    }

    /// Replace the stored user credentials wholesale.
    pub fn set_credentials(&self, user: Credentials) {
        *self.credentials.write() = Some(user);
    }

    /// Drop the stored user credentials.
    pub fn clear_credentials(&self) {
        *self.credentials.write() = None;
    }

    /// Snapshot of the stored credentials.
    pub fn user(&self) -> Option<Credentials> {
        self.credentials.read().clone()
    }

    pub(crate) fn access_token(&self) -> Option<String> {
        self.credentials.read().as_ref().map(|c| c.access_token.clone())
    }

    // ---- components -------------------------------------------------

    pub fn oauth(&self) -> &OauthComponent {
        &self.oauth
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn http(&self) -> &HttpComponent {
        &self.http
    }

    pub(crate) fn cache(&self) -> &CacheManager {
        &self.cache
    }

    pub(crate) fn credentials(&self) -> &CredentialsSlot {
        &self.credentials
    }

    pub(crate) fn registry(&self) -> &[Suite] {
        &self.registry
    }

    /// Descriptor registered under a suite name and table key.
    pub(crate) fn suite_path(&self, suite: &str, key: &str) -> Result<Path, Error> {
        self.registry
            .iter()
            .find(|s| s.name() == suite)
            .and_then(|s| s.get(key))
            .cloned()
            .ok_or_else(|| Error::client(format!("unknown endpoint {}.{}", suite, key)))
    }

    pub(crate) fn executor(&self) -> Executor<'_> {
        Executor::new(self)
    }

    // ---- dynamic entry point ---------------------------------------

    /// Route a dotted call name (`"movies.get_trending"`) through the
    /// executor. Exactly one descriptor must match.
    pub fn run<T: DeserializeOwned>(
        &self,
        name: &str,
        ctx: CallContext,
    ) -> Result<Executed<'_, T>, Error> {
        self.executor().run(name, ctx)
    }

    // ---- suite accessors -------------------------------------------

    pub fn calendars(&self) -> CalendarsInterface<'_> {
        CalendarsInterface::new(self)
    }

    pub fn checkin(&self) -> CheckinInterface<'_> {
        CheckinInterface::new(self)
    }

    pub fn comments(&self) -> CommentsInterface<'_> {
        CommentsInterface::new(self)
    }

    pub fn countries(&self) -> CountriesInterface<'_> {
        CountriesInterface::new(self)
    }

    pub fn certifications(&self) -> CertificationsInterface<'_> {
        CertificationsInterface::new(self)
    }

    pub fn episodes(&self) -> EpisodesInterface<'_> {
        EpisodesInterface::new(self)
    }

    pub fn genres(&self) -> GenresInterface<'_> {
        GenresInterface::new(self)
    }

    pub fn languages(&self) -> LanguagesInterface<'_> {
        LanguagesInterface::new(self)
    }

    pub fn lists(&self) -> ListsInterface<'_> {
        ListsInterface::new(self)
    }

    pub fn movies(&self) -> MoviesInterface<'_> {
        MoviesInterface::new(self)
    }

    pub fn networks(&self) -> NetworksInterface<'_> {
        NetworksInterface::new(self)
    }

    pub fn people(&self) -> PeopleInterface<'_> {
        PeopleInterface::new(self)
    }

    pub fn recommendations(&self) -> RecommendationsInterface<'_> {
        RecommendationsInterface::new(self)
    }

    pub fn scrobble(&self) -> ScrobbleInterface<'_> {
        ScrobbleInterface::new(self)
    }

    pub fn search(&self) -> SearchInterface<'_> {
        SearchInterface::new(self)
    }

    pub fn seasons(&self) -> SeasonsInterface<'_> {
        SeasonsInterface::new(self)
    }

    pub fn shows(&self) -> ShowsInterface<'_> {
        ShowsInterface::new(self)
    }
}

/// Builder for [`TraktClient`]: configuration, transport and sleep
/// injection, initial credentials.
pub struct TraktClientBuilder {
    client_id: String,
    client_secret: String,
    config: ClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    user: Option<Credentials>,
    sleep: Option<SleepFn>,
}

impl TraktClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Substitute the HTTP transport (tests use a scripted one).
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Start with stored credentials.
    pub fn user(mut self, user: Credentials) -> Self {
        self.user = Some(user);
        self
    }

    /// Substitute the sleep function used by device-flow polling.
    pub fn sleep_fn(mut self, sleep: SleepFn) -> Self {
        self.sleep = Some(sleep);
        self
    }

    pub fn build(self) -> Result<TraktClient, Error> {
        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.config.http_timeout_secs)?),
        };

        let http = Arc::new(HttpComponent::new(
            transport,
            self.config.base_url.clone(),
            self.config.max_retries,
        ));

        let credentials: CredentialsSlot = Arc::new(RwLock::new(self.user));

        let sleep: SleepFn = self
            .sleep
            .unwrap_or_else(|| Arc::new(|d: Duration| std::thread::sleep(d)));

        let oauth = OauthComponent::new(
            Arc::clone(&http),
            self.config.oauth.clone(),
            self.client_id.clone(),
            self.client_secret,
            Arc::clone(&credentials),
            sleep,
        );

        Ok(TraktClient {
            cache: CacheManager::new(&self.config.cache),
            oauth,
            credentials,
            registry: crate::interfaces::default_registry(),
            http,
            client_id: self.client_id,
            config: self.config,
        })
    }
}
