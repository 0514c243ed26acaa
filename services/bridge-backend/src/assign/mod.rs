//! Copies named values from one or more sources onto a destination.
//!
//! Sources are applied in order, so when two sources hold the same name, the last one wins.
//! The destination is updated in place and handed back. When anything fails, the destination
//! is left as it was.

mod source;
mod target;

pub use source::{FieldSource, Fields};
#[doc(hidden)]
pub use target::{field_value, unknown_field};
pub use target::FieldTarget;

use serde_json::Value;
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::Error;

/// Named values, in the order they are assigned.
pub type Entries = Vec<(String, Value)>;

/// Assigns the entries of every source onto a destination.
///
/// The destination is a map, or a struct whose fields were declared with
/// [`field_target!`](crate::field_target).
pub fn assign<'d, D: FieldTarget + ?Sized>(
    dst: &'d mut D,
    sources: &[&dyn FieldSource],
) -> Result<&'d mut D, Error> {
    let entries = collect_entries(sources)?;
    dst.assign_entries(entries)?;
    Ok(dst)
}

/// Merges maps of the same type, without going through serde. Values are cloned, so sources
/// holding `Arc`s share them with the destination.
pub fn merge_maps<'d, K, V>(
    dst: &'d mut HashMap<K, V>,
    sources: &[&HashMap<K, V>],
) -> &'d mut HashMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    for source in sources {
        dst.extend(source.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    dst
}

fn collect_entries(sources: &[&dyn FieldSource]) -> Result<Entries, Error> {
    sources
        .iter()
        .try_fold(Vec::new(), |mut entries, source| -> Result<_, Error> {
            entries.extend(source.entries()?);
            Ok(entries)
        })
}
