mod cart_item;
mod date;
mod expiration;
mod notification;
mod plan;
mod throttle;
mod timeline;

pub use cart_item::{CartLineItem, CART_ITEMS_KEY, CART_TIMERS_KEY, LAST_NOTIFICATION_TIME_KEY};
pub use date::{format_cart_item_date, parse_cart_item_date, CartTimezone};
pub use expiration::{ExpirationPolicy, HOUR, MINUTE, SECOND};
pub use notification::{
    format_time_left, NotificationContent, NotificationPayload, NotificationRequest,
    NotificationTrigger, NotificationType, ScheduledNotification,
};
pub use plan::{
    has_expiring_items, partition_cart_items, plan_cart_notifications, CartPartition,
    NotificationPlan, ParsedCartItem,
};
pub use throttle::{InvalidThrottleStateError, ThrottleState};
