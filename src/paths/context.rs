//! Per-call argument binding
//!
//! A [`CallContext`] carries everything a caller supplies for one
//! invocation: placeholder/query arguments, filters, the extended mode,
//! pagination parameters and an optional request body. It is a plain
//! value passed alongside the immutable path descriptor, so a single
//! descriptor can serve concurrent calls.

use std::collections::BTreeMap;

use serde_json::Value;

/// Extended-detail request: either the endpoint's sole declared mode
/// (the bare-boolean shorthand) or an explicitly named mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extended {
    /// Shorthand for "the endpoint's only mode"; rejected when the
    /// endpoint declares more than one.
    Enabled,
    Mode(String),
}

impl From<&str> for Extended {
    fn from(mode: &str) -> Self {
        Extended::Mode(mode.to_string())
    }
}

impl From<String> for Extended {
    fn from(mode: String) -> Self {
        Extended::Mode(mode)
    }
}

/// Arguments bound for a single call.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    args: BTreeMap<String, Value>,
    filters: BTreeMap<String, Value>,
    extended: Option<Extended>,
    page: Option<u32>,
    per_page: Option<u32>,
    body: Option<Value>,
}

impl CallContext {
    pub fn new() -> Self {
        CallContext::default()
    }

    /// Bind a placeholder or query argument.
    pub fn arg(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.args.insert(name.to_string(), value.into());
        self
    }

    /// Apply a collection filter.
    pub fn filter(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.filters.insert(name.to_string(), value.into());
        self
    }

    /// Request an extended-detail response.
    pub fn extended(mut self, mode: impl Into<Extended>) -> Self {
        self.extended = Some(mode.into());
        self
    }

    /// Start pagination at the given page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Page size for paginated endpoints.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// JSON body for mutating endpoints.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value bound for a name, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Whether a usable value is bound: the API treats null, `[]` and
    /// `{}` as absent.
    pub fn has(&self, name: &str) -> bool {
        self.args.get(name).map(|v| !is_empty_value(v)).unwrap_or(false)
    }

    pub fn filters(&self) -> &BTreeMap<String, Value> {
        &self.filters
    }

    pub fn extended_mode(&self) -> Option<&Extended> {
        self.extended.as_ref()
    }

    pub fn page_or(&self, default: u32) -> u32 {
        self.page.unwrap_or(default)
    }

    pub fn per_page_or(&self, default: u32) -> u32 {
        self.per_page.unwrap_or(default)
    }

    pub fn request_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// The API's "no value" representations.
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Render an argument the way it appears in a query string: bare
/// booleans, comma-joined sequences, plain scalars otherwise.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
