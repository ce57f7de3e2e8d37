use crate::{
    cart_item::CartLineItem,
    date::{parse_cart_item_date, CartTimezone},
    expiration::ExpirationPolicy,
    notification::{
        format_time_left, NotificationContent, NotificationPayload, NotificationRequest,
        NotificationTrigger, NotificationType,
    },
    throttle::ThrottleState,
};

/// A `CartLineItem` with a valid `added_at`
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCartItem<'a> {
    pub item: &'a CartLineItem,
    pub added_at: i64,
    pub expires_at: i64,
}

/// The schedulable items of a cart. Items with a malformed `added_at` and
/// items that have already expired are left out.
#[derive(Debug, Default, PartialEq)]
pub struct CartPartition<'a> {
    /// Items about to expire, each gets a single expiration notification
    pub expiring: Vec<ParsedCartItem<'a>>,
    /// Items that still have time left
    pub active: Vec<ParsedCartItem<'a>>,
}

#[derive(Debug, PartialEq)]
pub enum NotificationPlan {
    /// The previous run is too recent and no item is about to expire
    Throttled,
    Scheduled(Vec<NotificationRequest>),
}

pub fn partition_cart_items<'a>(
    items: &'a [CartLineItem],
    now: i64,
    policy: &ExpirationPolicy,
    timezone: &CartTimezone,
) -> CartPartition<'a> {
    let mut partition = CartPartition::default();
    for item in items {
        let added_at = match item
            .added_at
            .as_deref()
            .and_then(|added_at| parse_cart_item_date(added_at, timezone))
        {
            Some(added_at) => added_at,
            None => continue,
        };
        if policy.is_expired(added_at, now) {
            continue;
        }
        let parsed = ParsedCartItem {
            item,
            added_at,
            expires_at: policy.expires_at(added_at),
        };
        if policy.is_about_to_expire(added_at, now) {
            partition.expiring.push(parsed);
        } else {
            partition.active.push(parsed);
        }
    }
    partition
}

pub fn has_expiring_items(
    items: &[CartLineItem],
    now: i64,
    policy: &ExpirationPolicy,
    timezone: &CartTimezone,
) -> bool {
    !partition_cart_items(items, now, policy, timezone)
        .expiring
        .is_empty()
}

fn single_item_notification(item: &ParsedCartItem, fire_at: i64, now: i64) -> NotificationRequest {
    let title = &item.item.title;
    let (notification_type, heading, body) = if fire_at == item.expires_at {
        (
            NotificationType::Expiration,
            "Cart item expired",
            format!("\"{}\" has been removed from your cart.", title),
        )
    } else {
        (
            NotificationType::Reminder,
            "Items in your cart",
            format!(
                "\"{}\" expires from your cart in {}.",
                title,
                format_time_left(item.expires_at - fire_at)
            ),
        )
    };

    NotificationRequest {
        content: NotificationContent {
            title: heading.into(),
            body,
            data: NotificationPayload {
                notification_type,
                item_id: Some(item.item.id.clone()),
                title: Some(title.clone()),
                count: None,
            },
        },
        trigger: NotificationTrigger::at(fire_at, now),
    }
}

fn batched_notification(
    earliest: &ParsedCartItem,
    count: usize,
    fire_at: i64,
    now: i64,
) -> NotificationRequest {
    let (notification_type, heading, body) = if fire_at == earliest.expires_at {
        (
            NotificationType::Expiration,
            "Cart items expired",
            format!(
                "Items in your cart have expired. Check your cart for {} items.",
                count
            ),
        )
    } else {
        (
            NotificationType::Reminder,
            "Items in your cart",
            format!(
                "You have {} items in your cart. The first one expires in {}.",
                count,
                format_time_left(earliest.expires_at - fire_at)
            ),
        )
    };

    NotificationRequest {
        content: NotificationContent {
            title: heading.into(),
            body,
            data: NotificationPayload {
                notification_type,
                item_id: None,
                title: None,
                count: Some(count),
            },
        },
        trigger: NotificationTrigger::at(fire_at, now),
    }
}

fn expiring_soon_notification(item: &ParsedCartItem, now: i64) -> NotificationRequest {
    let title = &item.item.title;
    NotificationRequest {
        content: NotificationContent {
            title: "Cart item expiring soon".into(),
            body: format!(
                "\"{}\" will be removed from your cart in {}.",
                title,
                format_time_left(item.expires_at - now)
            ),
            data: NotificationPayload {
                notification_type: NotificationType::Expiration,
                item_id: Some(item.item.id.clone()),
                title: Some(title.clone()),
                count: None,
            },
        },
        trigger: NotificationTrigger::at(item.expires_at, now),
    }
}

fn active_item_notifications(
    active: &[ParsedCartItem],
    now: i64,
    policy: &ExpirationPolicy,
) -> Vec<NotificationRequest> {
    match active {
        [] => Vec::new(),
        [item] => policy
            .compute_timeline(item.added_at, item.expires_at, now)
            .into_iter()
            .map(|fire_at| single_item_notification(item, fire_at, now))
            .collect(),
        _ => {
            // Batch all items into the timeline of the one expiring first
            let earliest = match active.iter().min_by_key(|item| item.expires_at) {
                Some(item) => item,
                None => return Vec::new(),
            };
            policy
                .compute_timeline(earliest.added_at, earliest.expires_at, now)
                .into_iter()
                .map(|fire_at| batched_notification(earliest, active.len(), fire_at, now))
                .collect()
        }
    }
}

/// Decides which notifications should be scheduled for the given cart.
///
/// The throttle only applies when no item is about to expire. Items about
/// to expire always get their expiration notification, independently of
/// the reminders planned for the active items.
pub fn plan_cart_notifications(
    items: &[CartLineItem],
    now: i64,
    throttle: &ThrottleState,
    policy: &ExpirationPolicy,
    timezone: &CartTimezone,
) -> NotificationPlan {
    let partition = partition_cart_items(items, now, policy, timezone);
    if partition.expiring.is_empty() && throttle.is_throttled(now, policy.throttle_window) {
        return NotificationPlan::Throttled;
    }

    let mut requests = active_item_notifications(&partition.active, now, policy);
    requests.extend(
        partition
            .expiring
            .iter()
            .map(|item| expiring_soon_notification(item, now)),
    );

    NotificationPlan::Scheduled(requests)
}
