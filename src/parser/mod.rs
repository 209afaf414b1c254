//! Shape-driven response parser
//!
//! Endpoints declare the structure of their response as a [`Shape`]
//! (containers described explicitly, typed leaves finished by serde).
//! Parsing runs in three steps:
//!
//! 1. preprocess the raw JSON: rename keys the API uses that are not
//!    usable as Rust field names (`type` is a keyword) and replace the
//!    API's empty-object null sentinel `{}` with real JSON null;
//! 2. walk the shape: map lists through their item shape, process
//!    declared map fields, route undeclared keys through the wildcard,
//!    fill absent fields from declared defaults;
//! 3. hand the normalized tree to `serde_json::from_value`, which does
//!    all leaf typing including chrono date/time parsing.
//!
//! Every failure in steps 2-3 is rewrapped as [`Error::Response`]; this
//! module is the only place structural parsing failures surface.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, ResponseError};

/// Keys renamed before shaping. `type` is a Rust keyword; models expose
/// it as `item_type`.
const RENAMED_KEYS: &[(&str, &str)] = &[("type", "item_type")];

/// Declarative description of an expected JSON structure.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Pass the subtree through untouched.
    Any,
    /// Typed subtree (scalar or record) finished by the deserializer.
    Leaf,
    /// Homogeneous list of the item shape.
    List(Box<Shape>),
    /// Object with declared fields and an optional wildcard.
    Map(MapShape),
}

/// Kind of object key a map wildcard matches. JSON keys are always
/// strings; `Numeric` matches keys that parse as numbers (e.g. the
/// `"1"`..`"10"` buckets of a ratings distribution).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    String,
    Numeric,
}

impl KeyKind {
    fn matches(self, key: &str) -> bool {
        match self {
            KeyKind::String => true,
            KeyKind::Numeric => key.parse::<f64>().is_ok(),
        }
    }
}

/// One declared field of a map shape.
#[derive(Debug, Clone)]
pub struct FieldShape {
    pub key: &'static str,
    pub shape: Shape,
    /// Value filled in when the key is absent from the response.
    pub default: Option<Value>,
}

/// Object shape: declared fields plus an optional wildcard routing
/// undeclared keys by key kind. Keys matching neither are dropped.
#[derive(Debug, Clone, Default)]
pub struct MapShape {
    pub fields: Vec<FieldShape>,
    pub wildcard: Option<(KeyKind, Box<Shape>)>,
}

impl MapShape {
    pub fn new() -> Self {
        MapShape::default()
    }

    pub fn field(mut self, key: &'static str, shape: Shape) -> Self {
        self.fields.push(FieldShape {
            key,
            shape,
            default: None,
        });
        self
    }

    /// Declare a field by its default value alone; the shape is a leaf
    /// typed like the literal.
    pub fn field_with_default(mut self, key: &'static str, default: Value) -> Self {
        self.fields.push(FieldShape {
            key,
            shape: Shape::Leaf,
            default: Some(default),
        });
        self
    }

    pub fn wildcard(mut self, kind: KeyKind, shape: Shape) -> Self {
        self.wildcard = Some((kind, Box::new(shape)));
        self
    }
}

impl Shape {
    /// Shorthand for a list of typed records.
    pub fn list(item: Shape) -> Shape {
        Shape::List(Box::new(item))
    }

    pub fn map(map: MapShape) -> Shape {
        Shape::Map(map)
    }

    /// Walk a preprocessed value, returning the normalized tree.
    fn apply(&self, data: Value) -> Result<Value, ResponseError> {
        match self {
            Shape::Any | Shape::Leaf => Ok(data),
            Shape::List(item) => match data {
                // Absent lists normalize to empty ones
                Value::Null => Ok(Value::Array(Vec::new())),
                Value::Array(elements) => {
                    let mut result = Vec::with_capacity(elements.len());
                    for element in elements {
                        result.push(item.apply(element)?);
                    }
                    Ok(Value::Array(result))
                }
                other => Err(ResponseError::Structure(format!(
                    "expected a list, got {}",
                    json_type_name(&other)
                ))),
            },
            Shape::Map(map_shape) => {
                let source = match data {
                    Value::Null => Map::new(),
                    Value::Object(object) => object,
                    other => {
                        return Err(ResponseError::Structure(format!(
                            "expected an object, got {}",
                            json_type_name(&other)
                        )))
                    }
                };

                let mut result = Map::new();

                for (key, value) in source {
                    if let Some(field) = map_shape.fields.iter().find(|f| f.key == key) {
                        result.insert(key, field.shape.apply(value)?);
                    } else if let Some((kind, shape)) = &map_shape.wildcard {
                        if kind.matches(&key) {
                            result.insert(key, shape.apply(value)?);
                        }
                    }
                    // undeclared, non-wildcard keys are dropped
                }

                for field in &map_shape.fields {
                    if !result.contains_key(field.key) {
                        if let Some(default) = &field.default {
                            result.insert(field.key.to_string(), default.clone());
                        }
                    }
                }

                Ok(Value::Object(result))
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Recursively rename unsafe keys and replace the `{}` null sentinel.
fn preprocess(data: &Value) -> Value {
    match data {
        Value::Object(object) if object.is_empty() => Value::Null,
        Value::Object(object) => {
            let mut result = Map::with_capacity(object.len());
            for (key, value) in object {
                let key = RENAMED_KEYS
                    .iter()
                    .find(|(from, _)| from == key)
                    .map(|(_, to)| to.to_string())
                    .unwrap_or_else(|| key.clone());
                result.insert(key, preprocess(value));
            }
            Value::Object(result)
        }
        Value::Array(elements) => Value::Array(elements.iter().map(preprocess).collect()),
        other => other.clone(),
    }
}

/// Parse a raw JSON value against a declared shape into a typed result.
pub fn parse_tree<T: DeserializeOwned>(data: &Value, shape: &Shape) -> Result<T, Error> {
    let prepared = preprocess(data);
    let shaped = shape.apply(prepared).map_err(Error::Response)?;

    serde_json::from_value(shaped).map_err(|e| Error::Response(ResponseError::Deserialize(e)))
}
