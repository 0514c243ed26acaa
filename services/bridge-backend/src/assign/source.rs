use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

use super::Entries;
use crate::error::Error;
use common::err_context::ErrorContextExt;

/// Something that exposes a set of named values.
pub trait FieldSource {
    /// The (name, value) pairs of the source.
    fn entries(&self) -> Result<Entries, Error>;
}

impl FieldSource for Map<String, Value> {
    fn entries(&self) -> Result<Entries, Error> {
        Ok(self
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

impl FieldSource for Value {
    fn entries(&self) -> Result<Entries, Error> {
        match self {
            Value::Object(map) => map.entries(),
            other => Err(not_an_object("Source", other)),
        }
    }
}

impl<V: Serialize> FieldSource for HashMap<String, V> {
    fn entries(&self) -> Result<Entries, Error> {
        self.iter().map(serialize_entry).collect()
    }
}

impl<V: Serialize> FieldSource for BTreeMap<String, V> {
    fn entries(&self) -> Result<Entries, Error> {
        self.iter().map(serialize_entry).collect()
    }
}

/// Exposes the fields of a struct, as seen by its `Serialize` implementation.
///
/// ```
/// use bridge::{assign, Fields};
/// use serde::Serialize;
/// use serde_json::{json, Map, Value};
///
/// #[derive(Serialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let mut dst = Map::new();
/// assign(&mut dst, &[&Fields(&Point { x: 1, y: 2 })]).unwrap();
/// assert_eq!(Value::Object(dst), json!({"x": 1, "y": 2}));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a, T: ?Sized>(pub &'a T);

impl<T: Serialize + ?Sized> FieldSource for Fields<'_, T> {
    fn entries(&self) -> Result<Entries, Error> {
        let value = serde_json::to_value(self.0).context("Could not read source fields")?;
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(not_an_object("Source", &other)),
        }
    }
}

fn serialize_entry<V: Serialize>((key, value): (&String, &V)) -> Result<(String, Value), Error> {
    let value = serde_json::to_value(value)
        .with_context(|| format!("Could not serialize the value of '{key}'"))?;
    Ok((key.clone(), value))
}

pub(super) fn not_an_object(role: &str, value: &Value) -> Error {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    Error::Assign {
        context: format!("{role} must have named fields"),
        source: format!("found {kind}"),
    }
}
