use super::schedule_cart_notifications::{
    ScheduleCartNotificationsUseCase, ScheduleOutcome, UseCaseError as ScheduleError,
};
use crate::shared::{throttle::NotificationThrottle, usecase::UseCase};
use cart_reminder_domain::CartLineItem;
use cart_reminder_infra::CartReminderContext;
use thiserror::Error;
use tracing::debug;

/// Reacts to a change of the cart contents
#[derive(Debug)]
pub struct UpdateCartNotificationsUseCase {
    pub items: Vec<CartLineItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The cart is empty and every scheduled notification was cancelled
    Cleared,
    /// Gated before anything was cancelled
    Throttled,
    Rescheduled(ScheduleOutcome),
}

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("Unable to cancel scheduled notifications: {0}")]
    SchedulerError(String),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

#[async_trait::async_trait]
impl UseCase for UpdateCartNotificationsUseCase {
    type Response = UpdateOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateCartNotifications";

    async fn execute(&mut self, ctx: &CartReminderContext) -> Result<Self::Response, Self::Error> {
        if self.items.is_empty() {
            ctx.notifications
                .cancel_all()
                .await
                .map_err(|e| UseCaseError::SchedulerError(e.to_string()))?;
            return Ok(UpdateOutcome::Cleared);
        }

        let now = ctx.sys.get_timestamp_millis();
        if !NotificationThrottle::new(ctx).allows(&self.items, now).await {
            debug!("Cart changed inside the throttle window, keeping scheduled notifications");
            return Ok(UpdateOutcome::Throttled);
        }

        let mut usecase = ScheduleCartNotificationsUseCase {
            items: std::mem::take(&mut self.items),
        };
        let outcome = usecase.execute(ctx).await?;
        Ok(UpdateOutcome::Rescheduled(outcome))
    }
}
