use crate::shared::usecase::UseCase;
use cart_reminder_domain::ScheduledNotification;
use cart_reminder_infra::CartReminderContext;
use thiserror::Error;

/// Lists the notifications currently pending in the scheduler
#[derive(Debug)]
pub struct GetPendingCartNotificationsUseCase;

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("Unable to list scheduled notifications: {0}")]
    SchedulerError(String),
}

#[async_trait::async_trait]
impl UseCase for GetPendingCartNotificationsUseCase {
    type Response = Vec<ScheduledNotification>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPendingCartNotifications";

    async fn execute(&mut self, ctx: &CartReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.notifications
            .get_all_scheduled()
            .await
            .map_err(|e| UseCaseError::SchedulerError(e.to_string()))
    }
}
