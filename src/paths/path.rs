//! Path descriptors
//!
//! A [`Path`] is the declarative definition of one REST endpoint: URL
//! template with typed placeholders, HTTP method(s), validators, alias
//! names, allowed extended modes and filters, pagination flag, cache
//! level and the declared response shape. Descriptors are immutable
//! static configuration; per-call state lives in a
//! [`CallContext`](super::context::CallContext).
//!
//! Template syntax: segments are separated by `/`; a segment starting
//! with `!` is a required placeholder, `?` an optional one. The default
//! dotted alias joins the literal segments, so
//! `movies/!id/comments/?sort` routes as `movies.comments`.

use std::collections::HashMap;

use reqwest::Method;

use super::context::{is_empty_value, stringify, CallContext, Extended};
use super::validators::Validator;
use crate::cache::CacheLevel;
use crate::error::Error;
use crate::parser::Shape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Required(&'static str),
    Optional(&'static str),
}

/// Declarative description of one API endpoint.
#[derive(Debug, Clone)]
pub struct Path {
    template: &'static str,
    segments: Vec<Segment>,
    req_args: Vec<&'static str>,
    opt_args: Vec<&'static str>,
    methods: Vec<Method>,
    validators: Vec<Validator>,
    aliases: Vec<String>,
    qargs: Vec<&'static str>,
    extended_modes: Vec<&'static str>,
    filters: Vec<&'static str>,
    paginated: bool,
    declared_cache_level: Option<CacheLevel>,
    shape: Shape,
}

impl Path {
    pub fn new(template: &'static str, shape: Shape) -> Self {
        let mut segments = Vec::new();
        let mut req_args = Vec::new();
        let mut opt_args = Vec::new();
        let mut literals = Vec::new();

        for part in template.split('/') {
            if let Some(name) = part.strip_prefix('!') {
                segments.push(Segment::Required(name));
                req_args.push(name);
            } else if let Some(name) = part.strip_prefix('?') {
                segments.push(Segment::Optional(name));
                opt_args.push(name);
            } else {
                segments.push(Segment::Literal(part));
                literals.push(part);
            }
        }

        let default_alias = literals.join(".");

        Path {
            template,
            segments,
            req_args,
            opt_args,
            methods: vec![Method::GET],
            validators: vec![
                Validator::RequiredArgs,
                Validator::OptionalArgs,
                Validator::Extended,
                Validator::Filters,
            ],
            aliases: vec![default_alias],
            qargs: Vec::new(),
            extended_modes: Vec::new(),
            filters: Vec::new(),
            paginated: false,
            declared_cache_level: None,
            shape,
        }
    }

    // ---- builder ----------------------------------------------------

    /// Replace the method list; the first entry is the primary method
    /// used for dispatch.
    pub fn method(mut self, method: Method) -> Self {
        self.methods = vec![method];
        self
    }

    pub fn methods(mut self, methods: Vec<Method>) -> Self {
        if !methods.is_empty() {
            self.methods = methods;
        }
        self
    }

    /// Append endpoint-specific validators after the built-in ones.
    pub fn validators(mut self, validators: Vec<Validator>) -> Self {
        self.validators.extend(validators);
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Register extra aliases next to the default dotted one.
    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    /// Named non-positional query arguments forwarded when bound.
    pub fn qargs(mut self, qargs: &[&'static str]) -> Self {
        self.qargs.extend_from_slice(qargs);
        self
    }

    /// Extended-detail modes this endpoint supports.
    pub fn extended(mut self, modes: &[&'static str]) -> Self {
        self.extended_modes.extend_from_slice(modes);
        self
    }

    /// Filter names this endpoint accepts (slices are concatenated).
    pub fn filters(mut self, groups: &[&[&'static str]]) -> Self {
        for group in groups {
            self.filters.extend_from_slice(group);
        }
        self
    }

    pub fn paginated(mut self) -> Self {
        self.paginated = true;
        self
    }

    /// Explicit cache level; `basic` and a forced `no` must be declared,
    /// GET endpoints default to `full`.
    pub fn cache_level(mut self, level: CacheLevel) -> Self {
        self.declared_cache_level = Some(level);
        self
    }

    // ---- accessors --------------------------------------------------

    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn required_args(&self) -> &[&'static str] {
        &self.req_args
    }

    pub fn optional_args(&self) -> &[&'static str] {
        &self.opt_args
    }

    /// Primary HTTP method.
    pub fn primary_method(&self) -> &Method {
        &self.methods[0]
    }

    pub fn extended_modes(&self) -> &[&'static str] {
        &self.extended_modes
    }

    pub fn allowed_filters(&self) -> &[&'static str] {
        &self.filters
    }

    pub fn is_paginated(&self) -> bool {
        self.paginated
    }

    pub fn response_shape(&self) -> &Shape {
        &self.shape
    }

    pub fn does_match(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }

    pub fn alias_list(&self) -> &[String] {
        &self.aliases
    }

    /// Cache level in effect: mutating endpoints are never cacheable,
    /// GET endpoints default to `Full` unless declared otherwise.
    pub fn effective_cache_level(&self) -> CacheLevel {
        let mutating = self
            .methods
            .iter()
            .any(|m| *m == Method::POST || *m == Method::PUT || *m == Method::DELETE);

        if mutating {
            CacheLevel::No
        } else {
            self.declared_cache_level.unwrap_or(CacheLevel::Full)
        }
    }

    // ---- per-call operations ---------------------------------------

    /// Run every validator in order against the bound arguments.
    pub fn validate(&self, ctx: &CallContext, authenticated: bool) -> Result<(), Error> {
        for validator in &self.validators {
            validator.validate(self, ctx, authenticated)?;
        }
        Ok(())
    }

    /// Build the literal request path and the query-argument map from
    /// validated bound arguments. Unbound trailing optional segments
    /// are omitted.
    pub fn resolve(&self, ctx: &CallContext) -> Result<(String, HashMap<String, String>), Error> {
        let mut parts: Vec<String> = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => parts.push((*s).to_string()),
                Segment::Required(name) => match ctx.get(name) {
                    Some(value) if !is_empty_value(value) => parts.push(stringify(value)),
                    _ => {
                        return Err(Error::client(format!(
                            "cannot build {}: argument {} is not bound (validate first)",
                            self.template, name
                        )))
                    }
                },
                Segment::Optional(name) => {
                    if let Some(value) = ctx.get(name) {
                        if !is_empty_value(value) {
                            parts.push(stringify(value));
                        }
                    }
                }
            }
        }

        let mut qargs = HashMap::new();

        for name in &self.qargs {
            if let Some(value) = ctx.get(name) {
                if !is_empty_value(value) {
                    qargs.insert((*name).to_string(), stringify(value));
                }
            }
        }

        for (name, value) in ctx.filters() {
            qargs.insert(name.clone(), stringify(value));
        }

        if let Some(extended) = ctx.extended_mode() {
            let mode = match extended {
                Extended::Mode(mode) => mode.clone(),
                Extended::Enabled => self
                    .extended_modes
                    .first()
                    .ok_or_else(|| {
                        Error::client(format!(
                            "cannot build {}: no extended mode declared",
                            self.template
                        ))
                    })?
                    .to_string(),
            };
            qargs.insert("extended".to_string(), mode);
        }

        Ok((parts.join("/"), qargs))
    }
}
