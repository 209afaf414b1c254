//! Call validators
//!
//! Every path descriptor runs its validator list before any network
//! traffic. Validators are pure predicates over the descriptor and the
//! per-call [`CallContext`]; a failure raises a typed error with a
//! human-readable message and nothing partial executes.

use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::context::{CallContext, Extended};
use super::path::Path;
use crate::error::Error;

/// Filters accepted by most collection endpoints.
pub const COMMON_FILTERS: &[&str] = &[
    "query",
    "years",
    "genres",
    "languages",
    "countries",
    "runtimes",
    "ratings",
];

/// Extra filters accepted by show collection endpoints.
pub const SHOWS_FILTERS: &[&str] = &["certifications", "networks", "status"];

/// Extra filters accepted by movie collection endpoints.
pub const MOVIES_FILTERS: &[&str] = &["certifications"];

/// Every known filter (used by search endpoints).
pub const ALL_FILTERS: &[&str] = &[
    "query",
    "years",
    "genres",
    "languages",
    "countries",
    "runtimes",
    "ratings",
    "certifications",
    "networks",
    "status",
];

/// Filters that accept a comma-joined list of values.
pub const MULTI_FILTERS: &[&str] = &[
    "genres",
    "languages",
    "countries",
    "certifications",
    "networks",
    "status",
];

const YEAR_MIN: i64 = 1800;
const YEAR_MAX: i64 = 2100;

/// `YYYY-MM-DD` date literal check used by calendar and update feeds.
pub fn is_date(value: &Value) -> bool {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    let re = DATE_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("static regex"));

    value.as_str().map(|s| re.is_match(s)).unwrap_or(false)
}

/// Per-endpoint predicate over one named argument. Skipped when the
/// argument is not bound; required-presence is a separate validator.
#[derive(Clone)]
pub struct PerArgValidator {
    name: &'static str,
    message: &'static str,
    check: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl PerArgValidator {
    pub fn new(
        name: &'static str,
        message: &'static str,
        check: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        PerArgValidator {
            name,
            message,
            check: Arc::new(check),
        }
    }

    fn validate(&self, ctx: &CallContext) -> Result<(), Error> {
        match ctx.get(self.name) {
            Some(value) if ctx.has(self.name) => {
                if (self.check)(value) {
                    Ok(())
                } else {
                    Err(Error::Argument(format!("{}: {}", self.name, self.message)))
                }
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for PerArgValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerArgValidator")
            .field("name", &self.name)
            .finish()
    }
}

/// One validation rule attached to a path descriptor.
#[derive(Debug, Clone)]
pub enum Validator {
    /// All `!name` placeholders must be bound.
    RequiredArgs,
    /// `?name` placeholders must be bound in trailing-contiguous order.
    OptionalArgs,
    /// Endpoint needs a logged-in user.
    AuthRequired,
    /// Requested extended mode must be declared by the endpoint.
    Extended,
    /// Applied filters must be declared and well-formed.
    Filters,
    /// Endpoint-specific argument predicate.
    PerArg(PerArgValidator),
}

impl Validator {
    pub fn validate(&self, path: &Path, ctx: &CallContext, authenticated: bool) -> Result<(), Error> {
        match self {
            Validator::RequiredArgs => validate_required(path, ctx),
            Validator::OptionalArgs => validate_optional(path, ctx),
            Validator::AuthRequired => {
                if authenticated {
                    Ok(())
                } else {
                    Err(Error::NotAuthenticated)
                }
            }
            Validator::Extended => validate_extended(path, ctx),
            Validator::Filters => validate_filters(path, ctx),
            Validator::PerArg(v) => v.validate(ctx),
        }
    }
}

fn validate_required(path: &Path, ctx: &CallContext) -> Result<(), Error> {
    for name in path.required_args() {
        if !ctx.has(name) {
            return Err(Error::Argument(format!("missing required argument: {}", name)));
        }
    }
    Ok(())
}

/// With a template `a/?b/?c`, binding `c` demands that `b` is bound too.
fn validate_optional(path: &Path, ctx: &CallContext) -> Result<(), Error> {
    let mut require_previous = false;

    for name in path.optional_args().iter().rev() {
        if require_previous {
            if !ctx.has(name) {
                return Err(Error::Argument(format!(
                    "optional argument {} must be set when a later optional argument is",
                    name
                )));
            }
        } else if ctx.has(name) {
            require_previous = true;
        }
    }
    Ok(())
}

fn validate_extended(path: &Path, ctx: &CallContext) -> Result<(), Error> {
    let declared = path.extended_modes();

    match ctx.extended_mode() {
        None => Ok(()),
        Some(Extended::Mode(mode)) => {
            if declared.contains(&mode.as_str()) {
                Ok(())
            } else {
                Err(Error::Argument(format!(
                    "extended: mode {:?} is not supported by this endpoint",
                    mode
                )))
            }
        }
        Some(Extended::Enabled) => match declared.len() {
            1 => Ok(()),
            0 => Err(Error::argument(
                "extended: this endpoint has no extended mode",
            )),
            _ => Err(Error::argument(
                "extended: endpoint supports multiple modes, name one explicitly",
            )),
        },
    }
}

fn validate_filters(path: &Path, ctx: &CallContext) -> Result<(), Error> {
    for (name, value) in ctx.filters() {
        if !path.allowed_filters().contains(&name.as_str()) {
            return Err(Error::Argument(format!(
                "filters: {} is not supported by this endpoint",
                name
            )));
        }

        if value.is_array() && !MULTI_FILTERS.contains(&name.as_str()) {
            return Err(Error::Argument(format!(
                "filters: {} accepts a single value",
                name
            )));
        }

        if name == "years" {
            validate_years(value)?;
        }
    }
    Ok(())
}

/// A `years` filter is a single year or a `start-end` range, both
/// within 1800-2100.
fn validate_years(value: &Value) -> Result<(), Error> {
    let in_range = |y: i64| (YEAR_MIN..=YEAR_MAX).contains(&y);

    let ok = match value {
        Value::Number(n) => n.as_i64().map(in_range).unwrap_or(false),
        Value::String(s) => match s.split_once('-') {
            Some((start, end)) => {
                let start = start.parse::<i64>();
                let end = end.parse::<i64>();
                matches!((start, end), (Ok(a), Ok(b)) if in_range(a) && in_range(b) && a <= b)
            }
            None => s.parse::<i64>().map(in_range).unwrap_or(false),
        },
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(Error::Argument(format!(
            "filters: years must be a year or a start-end range within {}-{}, got {}",
            YEAR_MIN, YEAR_MAX, value
        )))
    }
}
