use super::schedule_cart_notifications::ScheduleCartNotificationsUseCase;
use crate::shared::{throttle::NotificationThrottle, usecase::UseCase};
use cart_reminder_infra::CartReminderContext;
use tracing::{error, info};

/// Run by the periodic background task. Reloads the cart from storage
/// and reschedules its notifications.
#[derive(Debug)]
pub struct ReconcileCartNotificationsUseCase;

/// What the background task reports back to its runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundFetchResult {
    NoData,
    NewData,
    Failed,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait]
impl UseCase for ReconcileCartNotificationsUseCase {
    type Response = BackgroundFetchResult;

    type Error = UseCaseError;

    const NAME: &'static str = "ReconcileCartNotifications";

    async fn execute(&mut self, ctx: &CartReminderContext) -> Result<Self::Response, Self::Error> {
        let items = match ctx.repos.cart_repo.find_all().await {
            Ok(items) => items,
            Err(e) => {
                error!("Unable to load cart for background task. Err: {:?}", e);
                Vec::new()
            }
        };
        if items.is_empty() {
            return Ok(BackgroundFetchResult::NoData);
        }

        let now = ctx.sys.get_timestamp_millis();
        let throttle = NotificationThrottle::new(ctx);
        if !throttle.allows(&items, now).await {
            return Ok(BackgroundFetchResult::NoData);
        }

        let mut usecase = ScheduleCartNotificationsUseCase { items };
        match usecase.execute(ctx).await {
            Ok(outcome) => {
                info!("Background cart reconciliation finished: {:?}", outcome);
                Ok(BackgroundFetchResult::NewData)
            }
            Err(e) => {
                error!("Background cart reconciliation failed. Err: {:?}", e);
                Ok(BackgroundFetchResult::Failed)
            }
        }
    }
}
