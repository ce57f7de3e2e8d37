use crate::expiration::{HOUR, MINUTE, SECOND};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// Time remains before the item expires
    Reminder,
    /// The item has expired and is removed from the cart
    Expiration,
}

/// Structured data attached to a notification so that the app can
/// react when the user taps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Number of items a batched notification is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub data: NotificationPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationTrigger {
    /// Delay from submission until the notification fires. Always at least 1.
    pub seconds: i64,
}

impl NotificationTrigger {
    pub fn at(fire_at: i64, now: i64) -> Self {
        Self {
            seconds: std::cmp::max(1, (fire_at - now).div_euclid(SECOND)),
        }
    }
}

/// A notification ready to be handed to the local notification scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub content: NotificationContent,
    pub trigger: NotificationTrigger,
}

impl NotificationRequest {
    pub fn notification_type(&self) -> NotificationType {
        self.content.data.notification_type
    }
}

/// A `NotificationRequest` that has been accepted by the scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledNotification {
    /// Identifier assigned by the scheduler
    pub identifier: String,
    pub request: NotificationRequest,
}

fn plural(amount: i64, unit: &str) -> String {
    if amount == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", amount, unit)
    }
}

/// Human readable rendering of a remaining duration in millis
pub fn format_time_left(millis: i64) -> String {
    let hours = millis / HOUR;
    let minutes = (millis % HOUR) / MINUTE;
    match (hours, minutes) {
        (h, m) if h <= 0 && m <= 0 => "less than a minute".into(),
        (h, m) if h <= 0 => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{} {}", plural(h, "hour"), plural(m, "minute")),
    }
}
