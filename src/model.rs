use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One user's plant/profile state as served by `/api/<username>/plant.json`.
///
/// Roll entries use the same shape; fields the roll endpoint omits stay at
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub identity_domain: Option<String>,
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub me_url: String,
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub plant_svg_url: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub pick_count: u64,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub has_picked: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub login_to_pick_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub profile_url: Option<String>,
    /// ISO-8601 timestamp; only present on roll entries.
    #[serde(default, deserialize_with = "lenient::text")]
    pub picked_at: Option<String>,
}

impl EntityRecord {
    /// `display_name` when set and non-empty, otherwise `username`.
    pub fn display_label(&self) -> &str {
        non_empty(self.display_name.as_deref()).unwrap_or(&self.username)
    }

    /// `identity_domain` when set and non-empty, otherwise `username`.
    pub fn domain_label(&self) -> &str {
        non_empty(self.identity_domain.as_deref()).unwrap_or(&self.username)
    }
}

/// The list of users picked by `username`, newest first as served by
/// `/api/<username>/roll.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollPayload {
    #[serde(default, deserialize_with = "lenient::text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "roll_entries")]
    pub roll: Vec<EntityRecord>,
}

impl RollPayload {
    pub fn is_empty(&self) -> bool {
        self.roll.is_empty()
    }
}

/// Decode a response body that must be a JSON object.
///
/// Arrays are rejected up front because derived struct impls would
/// otherwise accept them positionally.
pub fn decode_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(serde_json::Error::custom("expected a JSON object"));
    }
    T::deserialize(value)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Missing or null is an empty roll; anything but an array of objects is an error.
fn roll_entries<'de, D>(deserializer: D) -> Result<Vec<EntityRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                if !item.is_object() {
                    return Err(D::Error::custom(format!("roll[{}] is not an object", i)));
                }
                EntityRecord::deserialize(item).map_err(D::Error::custom)
            })
            .collect(),
        _ => Err(D::Error::custom("roll must be an array")),
    }
}

/// Field decoders that coerce instead of failing, so a payload that parses
/// always renders.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            // Falsy values are absent, as with `||` in the widget script.
            Value::Number(n) if n.as_f64().map_or(true, |f| f == 0.0 || f.is_nan()) => None,
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        })
    }

    pub fn required_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        text(d).map(Option::unwrap_or_default)
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_u64().unwrap_or(0),
            _ => 0,
        })
    }

    /// JavaScript truthiness.
    pub fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => false,
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        })
    }
}
