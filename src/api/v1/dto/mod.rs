pub mod actors;
pub mod movies;

use serde::{Deserialize, Deserializer};

/// Tri-state for PATCH bodies:
/// - field missing → `None` (do not update)
/// - `null` → `Some(None)` (clear)
/// - value → `Some(Some(v))`
///
/// Use with `#[serde(default, deserialize_with = "nullable")]`.
pub(crate) fn nullable<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
