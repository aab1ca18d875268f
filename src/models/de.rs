//! Lenient deserializers for the loosely-typed wire data the remote
//! store delivers: booleans arrive as `true` or `"true"`, money as
//! numbers or numeric strings.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrText {
    Flag(bool),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

pub(crate) fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BoolOrText>::deserialize(deserializer)?;
    Ok(match raw {
        Some(BoolOrText::Flag(flag)) => flag,
        Some(BoolOrText::Text(text)) => text.trim().eq_ignore_ascii_case("true"),
        None => false,
    })
}

pub(crate) fn flexible_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Number(value)) => Some(value),
        Some(NumberOrText::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    })
}

/// Trims an optional string field, mapping blank values to `None`.
pub(crate) fn trimmed_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty()))
}
