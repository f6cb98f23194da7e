use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Status text used for a format whose legality upstream left empty.
pub const UNKNOWN_STATUS: &str = "None";

/// Format name -> status text. Never holds a missing status.
pub type Legalities = BTreeMap<String, String>;

/// Replace every missing status with [`UNKNOWN_STATUS`].
pub fn fill_unknown<I>(entries: I) -> Legalities
where
    I: IntoIterator<Item = (String, Option<String>)>,
{
    entries
        .into_iter()
        .map(|(format, status)| (format, status.unwrap_or_else(|| UNKNOWN_STATUS.to_string())))
        .collect()
}

/// Deserialize a legality mapping whose values (or the mapping itself) may be `null`.
pub(crate) fn deserialize_legalities<'de, D>(deserializer: D) -> Result<Legalities, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<String>>> = Option::deserialize(deserializer)?;
    Ok(fill_unknown(raw.unwrap_or_default()))
}

/// Treat an explicit `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Case-insensitive `"legal"` check, matching how upstream spells it (`"Legal"`).
pub fn is_legal(legalities: &Legalities, format: &str) -> bool {
    legalities
        .get(format)
        .is_some_and(|status| status.eq_ignore_ascii_case("legal"))
}
