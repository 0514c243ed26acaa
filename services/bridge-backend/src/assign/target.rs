use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

use super::source::not_an_object;
use super::Entries;
use crate::error::Error;
use common::err_context::ErrorContextExt;

/// Something that accepts named values, overwriting the values already held under the same
/// name.
///
/// Maps get an implementation here. Structs get one with [`field_target!`](crate::field_target),
/// which only ever writes the fields named by an entry.
pub trait FieldTarget {
    fn assign_entries(&mut self, entries: Entries) -> Result<(), Error>;
}

impl FieldTarget for Map<String, Value> {
    fn assign_entries(&mut self, entries: Entries) -> Result<(), Error> {
        self.extend(entries);
        Ok(())
    }
}

impl FieldTarget for Value {
    fn assign_entries(&mut self, entries: Entries) -> Result<(), Error> {
        match self {
            Value::Object(map) => map.assign_entries(entries),
            other => Err(not_an_object("Destination", other)),
        }
    }
}

impl FieldTarget for HashMap<String, Value> {
    fn assign_entries(&mut self, entries: Entries) -> Result<(), Error> {
        self.extend(entries);
        Ok(())
    }
}

impl FieldTarget for BTreeMap<String, Value> {
    fn assign_entries(&mut self, entries: Entries) -> Result<(), Error> {
        self.extend(entries);
        Ok(())
    }
}

/// Converts `value` into the type of the field currently holding `_current`.
#[doc(hidden)]
pub fn field_value<F: DeserializeOwned>(
    _current: &F,
    name: &str,
    value: Value,
) -> Result<F, Error> {
    Ok(serde_json::from_value(value).with_context(|| format!("Could not assign field '{name}'"))?)
}

#[doc(hidden)]
pub fn unknown_field(target: &str, name: &str) -> Error {
    Error::Assign {
        context: format!("{target} does not accept unknown fields"),
        source: format!("unknown field '{name}'"),
    }
}

/// Implements [`FieldTarget`] for a struct, over the listed fields.
///
/// An entry naming a listed field is deserialized into the type of that field. Entries naming
/// anything else are ignored, or rejected when the struct is marked `strict`. Fields are only
/// written once every entry has been converted, so on error the struct is left as it was.
/// Fields that no entry names are never touched.
///
/// ```
/// use bridge::{assign, field_target};
/// use serde_json::json;
///
/// struct Point {
///     x: i32,
///     y: i32,
///     label: String,
/// }
///
/// field_target!(Point { x, y });
///
/// let mut point = Point { x: 1, y: 2, label: "origin".to_string() };
/// assign(&mut point, &[&json!({"y": 5, "label": "ignored"})]).unwrap();
/// assert_eq!((point.x, point.y, point.label.as_str()), (1, 5, "origin"));
/// ```
#[macro_export]
macro_rules! field_target {
    (@impl $ty:ty, $strict:expr, { $($field:ident),* }) => {
        impl $crate::assign::FieldTarget for $ty {
            fn assign_entries(
                &mut self,
                entries: $crate::assign::Entries,
            ) -> ::std::result::Result<(), $crate::Error> {
                $( let mut $field = ::std::option::Option::None; )*
                for (name, value) in entries {
                    match name.as_str() {
                        $(
                            stringify!($field) => {
                                $field = ::std::option::Option::Some(
                                    $crate::assign::field_value(&self.$field, &name, value)?,
                                );
                            }
                        )*
                        _ if $strict => {
                            return ::std::result::Result::Err(
                                $crate::assign::unknown_field(stringify!($ty), &name),
                            );
                        }
                        _ => {}
                    }
                }
                $(
                    if let ::std::option::Option::Some(value) = $field {
                        self.$field = value;
                    }
                )*
                ::std::result::Result::Ok(())
            }
        }
    };
    (strict $ty:ty { $($field:ident),* $(,)? }) => {
        $crate::field_target!(@impl $ty, true, { $($field),* });
    };
    ($ty:ty { $($field:ident),* $(,)? }) => {
        $crate::field_target!(@impl $ty, false, { $($field),* });
    };
}
