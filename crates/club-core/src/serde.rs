use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, treating blank values as `None`.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// Patch form of [`deserialize_optional_string`] for `Option<Option<String>>`
/// with `#[serde(default)]`: a missing field stays `None`, while `null` or a
/// blank string becomes `Some(None)` and clears the stored value.
pub fn deserialize_clearable_string<'de, D>(
    deserializer: D,
) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_string(deserializer).map(Some)
}

/// Distinguishes an explicit `null` from a missing field.
///
/// Use on `Option<Option<T>>` with `#[serde(default)]`: a missing field stays
/// `None`, `null` becomes `Some(None)`, and a value becomes `Some(Some(v))`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
