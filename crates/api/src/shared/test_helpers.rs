use cart_reminder_domain::{
    format_cart_item_date, CartLineItem, CartTimezone, NotificationRequest, ScheduledNotification,
};
use cart_reminder_infra::{CartReminderContext, INotificationScheduler, ISys};
use std::sync::{Arc, Mutex};

/// Sun Feb 21 2021 00:00:00 UTC
pub const T: i64 = 1613865600000;
pub const UTC: CartTimezone = CartTimezone::Named(chrono_tz::UTC);

pub struct StaticTimeSys(pub i64);
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

pub fn setup_context(now: i64) -> CartReminderContext {
    let mut ctx = CartReminderContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(now));
    ctx.config.cart_timezone = UTC;
    ctx
}

pub fn set_time(ctx: &mut CartReminderContext, now: i64) {
    ctx.sys = Arc::new(StaticTimeSys(now));
}

pub fn cart_item(id: &str, added_at: i64) -> CartLineItem {
    CartLineItem::new(
        id,
        format!("Product {}", id),
        format_cart_item_date(added_at, &UTC).expect("Valid timestamp"),
    )
}

pub async fn pending(ctx: &CartReminderContext) -> Vec<ScheduledNotification> {
    ctx.notifications
        .get_all_scheduled()
        .await
        .expect("To list scheduled notifications")
}

/// Scheduler that rejects every submission but still tracks cancellations
#[derive(Default)]
pub struct FailingNotificationScheduler {
    pub cancellations: Mutex<usize>,
}

#[async_trait::async_trait]
impl INotificationScheduler for FailingNotificationScheduler {
    async fn schedule(&self, _request: &NotificationRequest) -> anyhow::Result<String> {
        Err(anyhow::Error::msg("Notification permissions denied"))
    }

    async fn cancel_all(&self) -> anyhow::Result<()> {
        *self.cancellations.lock().unwrap() += 1;
        Ok(())
    }

    async fn get_all_scheduled(&self) -> anyhow::Result<Vec<ScheduledNotification>> {
        Ok(Vec::new())
    }
}
