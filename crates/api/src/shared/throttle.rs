use cart_reminder_domain::{has_expiring_items, CartLineItem, ThrottleState};
use cart_reminder_infra::CartReminderContext;
use tracing::{error, warn};

/// The throttle gate shared by every entry point that reschedules
/// cart notifications. Storage failures fail open.
pub struct NotificationThrottle<'a> {
    ctx: &'a CartReminderContext,
}

impl<'a> NotificationThrottle<'a> {
    pub fn new(ctx: &'a CartReminderContext) -> Self {
        Self { ctx }
    }

    pub async fn load(&self) -> ThrottleState {
        match self.ctx.repos.throttle_repo.find().await {
            Ok(state) => state,
            Err(e) => {
                warn!("Unable to read throttle state, ignoring it. Err: {:?}", e);
                ThrottleState::default()
            }
        }
    }

    /// Whether a reschedule for `items` may happen at `now`
    pub async fn allows(&self, items: &[CartLineItem], now: i64) -> bool {
        let config = &self.ctx.config;
        let has_expiring = has_expiring_items(
            items,
            now,
            &config.expiration_policy,
            &config.cart_timezone,
        );
        self.load()
            .await
            .allows(now, config.expiration_policy.throttle_window, has_expiring)
    }

    pub async fn record(&self, now: i64) {
        if let Err(e) = self
            .ctx
            .repos
            .throttle_repo
            .save(&ThrottleState::new(now))
            .await
        {
            error!("Unable to store throttle state. Err: {:?}", e);
        }
    }
}
