use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

/// Reserved key, not read or written by the notifier
pub const CART_TIMERS_KEY: &str = "cart_timers";
/// Key holding the `ThrottleState` as epoch millis
pub const LAST_NOTIFICATION_TIME_KEY: &str = "last_notification_time";
/// Key holding the JSON encoded cart snapshot read by the background task
pub const CART_ITEMS_KEY: &str = "cartItems";

/// A `CartLineItem` is a product entry the user has added to the cart.
/// It is owned by the cart data source and only read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Opaque identifier, clients may store it as a string or a number
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name used verbatim in notification bodies
    pub title: String,
    /// Wall clock time the item entered the cart, formatted as
    /// `YYYY-MM-DD HH:MM:SS` without any timezone offset.
    /// Items where this is missing or malformed are never scheduled.
    #[serde(default, deserialize_with = "deserialize_added_at")]
    pub added_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Integer(id) => id.to_string(),
        RawId::Float(id) => id.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAddedAt {
    Text(String),
    Other(IgnoredAny),
}

// Anything but a string can never be parsed, so it is treated as missing
fn deserialize_added_at<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match RawAddedAt::deserialize(deserializer)? {
        RawAddedAt::Text(added_at) => Some(added_at),
        RawAddedAt::Other(_) => None,
    })
}

impl CartLineItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, added_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            added_at: Some(added_at.into()),
        }
    }
}
