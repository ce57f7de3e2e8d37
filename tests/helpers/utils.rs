use super::setup::UTC;
use cart_reminder_domain::{format_cart_item_date, CartLineItem, ScheduledNotification};
use cart_reminder_infra::CartReminderContext;

pub fn cart_item(id: &str, title: &str, added_at: i64) -> CartLineItem {
    CartLineItem::new(
        id,
        title,
        format_cart_item_date(added_at, &UTC).expect("Valid timestamp"),
    )
}

pub async fn scheduled(ctx: &CartReminderContext) -> Vec<ScheduledNotification> {
    ctx.notifications
        .get_all_scheduled()
        .await
        .expect("To list scheduled notifications")
}

pub fn fire_delays(notifications: &[ScheduledNotification]) -> Vec<i64> {
    notifications
        .iter()
        .map(|n| n.request.trigger.seconds)
        .collect()
}
