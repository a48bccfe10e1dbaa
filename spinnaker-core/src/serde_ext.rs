//! Serde helpers shared by the envelopes

use serde::{Deserialize, Deserializer};

/// Deserialize an explicit `null` as the type's default
///
/// Pipeline YAML leaves a key with no value as `null`; `#[serde(default)]`
/// alone only covers a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
