//! Call executor
//!
//! The executor resolves a dotted call name to exactly one path
//! descriptor across the installed suites, refreshes near-expiry
//! credentials when configured to, runs the descriptor's validators,
//! and either performs a single HTTP round-trip (parse + cache) or
//! hands back a lazy [`PaginationIterator`] for paginated endpoints.

use serde::de::DeserializeOwned;

use crate::cache::FrozenRequest;
use crate::client::TraktClient;
use crate::error::Error;
use crate::http::{default_headers, ApiResponse};
use crate::pagination::PaginationIterator;
use crate::parser::parse_tree;
use crate::paths::{CallContext, Path};

/// Result of a dynamic (dotted-name) call: paginated endpoints return
/// an iterator, everything else a single parsed value.
pub enum Executed<'a, T> {
    Single(T),
    Paginated(PaginationIterator<'a, T>),
}

impl<'a, T> Executed<'a, T> {
    /// Unwrap a non-paginated result.
    pub fn single(self) -> Result<T, Error> {
        match self {
            Executed::Single(value) => Ok(value),
            Executed::Paginated(_) => Err(Error::client(
                "endpoint is paginated, consume the iterator instead",
            )),
        }
    }

    /// Unwrap a pagination iterator.
    pub fn paginated(self) -> Result<PaginationIterator<'a, T>, Error> {
        match self {
            Executed::Paginated(iterator) => Ok(iterator),
            Executed::Single(_) => Err(Error::client("endpoint is not paginated")),
        }
    }
}

/// Per-call executor borrowing the client's components.
#[derive(Clone, Copy)]
pub struct Executor<'a> {
    client: &'a TraktClient,
}

impl<'a> Executor<'a> {
    pub fn new(client: &'a TraktClient) -> Self {
        Executor { client }
    }

    /// Resolve a dotted name to exactly one descriptor.
    pub fn find_path(&self, name: &str) -> Result<Path, Error> {
        let matches: Vec<&Path> = self
            .client
            .registry()
            .iter()
            .flat_map(|suite| suite.find_matching(name))
            .collect();

        match matches.len() {
            1 => Ok(matches[0].clone()),
            0 => Err(Error::client(format!("no endpoint matches {:?}", name))),
            n => Err(Error::client(format!(
                "ambiguous call: {:?} matches {} endpoints",
                name, n
            ))),
        }
    }

    /// Dynamic entry point: route by dotted name, then execute.
    pub fn run<T: DeserializeOwned>(
        &self,
        name: &str,
        ctx: CallContext,
    ) -> Result<Executed<'a, T>, Error> {
        let path = self.find_path(name)?;

        if path.is_paginated() {
            Ok(Executed::Paginated(self.paginate(path, ctx)?))
        } else {
            Ok(Executed::Single(self.call_path(&path, ctx)?))
        }
    }

    /// Validate and execute a non-paginated descriptor.
    pub fn call_path<T: DeserializeOwned>(&self, path: &Path, ctx: CallContext) -> Result<T, Error> {
        let (value, _) = self.call_path_with_response(path, ctx)?;
        Ok(value)
    }

    /// Like [`call_path`](Self::call_path) but also returns the raw
    /// response so callers can inspect the status code (204 handling)
    /// or pagination headers.
    pub fn call_path_with_response<T: DeserializeOwned>(
        &self,
        path: &Path,
        ctx: CallContext,
    ) -> Result<(T, ApiResponse), Error> {
        self.maybe_refresh_token()?;
        path.validate(&ctx, self.client.authenticated())?;

        let response = self.execute(path, &ctx, None)?;
        let value = parse_tree(&response.json, path.response_shape())?;

        Ok((value, response))
    }

    /// Validate a paginated descriptor and hand back a lazy iterator;
    /// no network traffic happens until iteration starts.
    pub fn paginate<T: DeserializeOwned>(
        &self,
        path: Path,
        ctx: CallContext,
    ) -> Result<PaginationIterator<'a, T>, Error> {
        self.maybe_refresh_token()?;
        path.validate(&ctx, self.client.authenticated())?;

        Ok(PaginationIterator::new(*self, path, ctx))
    }

    /// One HTTP round-trip for a validated call, consulting the cache
    /// when the endpoint and configuration both allow it.
    pub(crate) fn execute(
        &self,
        path: &Path,
        ctx: &CallContext,
        page_window: Option<(u32, u32)>,
    ) -> Result<ApiResponse, Error> {
        let (api_path, mut qargs) = path.resolve(ctx)?;

        if let Some((page, limit)) = page_window {
            qargs.insert("page".to_string(), page.to_string());
            qargs.insert("limit".to_string(), limit.to_string());
        }

        let headers = default_headers(self.client.client_id(), self.client.access_token().as_deref());
        let cacheable = self
            .client
            .cache()
            .accepted_level(path.effective_cache_level());

        let key = FrozenRequest::new(api_path.clone(), &qargs, &headers);

        if cacheable {
            if let Some(cached) = self.client.cache().get(&key) {
                tracing::debug!(path = %api_path, "serving response from cache");
                return Ok(cached);
            }
        }

        let response = self.client.http().request(
            path.primary_method().clone(),
            &api_path,
            &qargs,
            ctx.request_body(),
            &headers,
            false,
        )?;

        if cacheable {
            self.client.cache().set(key, response.clone());
        }

        Ok(response)
    }

    /// Refresh stored credentials when automatic refresh is on and the
    /// token expires within the configured safety window.
    fn maybe_refresh_token(&self) -> Result<(), Error> {
        if !self.client.config().auto_refresh_token {
            return Ok(());
        }

        let window = self.client.config().oauth.refresh_window_secs;
        let needs_refresh = self
            .client
            .credentials()
            .read()
            .as_ref()
            .map(|c| c.expires_within(window))
            .unwrap_or(false);

        if needs_refresh {
            tracing::debug!("stored token is near expiry, refreshing");
            self.client.oauth().refresh_token()?;
        }

        Ok(())
    }
}
