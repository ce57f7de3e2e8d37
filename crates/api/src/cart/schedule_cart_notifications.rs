use crate::shared::{throttle::NotificationThrottle, usecase::UseCase};
use cart_reminder_domain::{plan_cart_notifications, CartLineItem, NotificationPlan};
use cart_reminder_infra::CartReminderContext;
use futures::future::try_join_all;
use thiserror::Error;
use tracing::info;

/// Replaces all scheduled notifications with the reminders and expiration
/// notifications for the given cart
#[derive(Debug)]
pub struct ScheduleCartNotificationsUseCase {
    pub items: Vec<CartLineItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// The cart was empty, nothing was touched
    Skipped,
    /// Pending notifications were cancelled but the previous run is too recent
    /// to schedule new ones
    Throttled,
    /// Number of notifications submitted
    Scheduled(usize),
}

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("Unable to submit notifications to the scheduler: {0}")]
    SchedulerError(String),
}

#[async_trait::async_trait]
impl UseCase for ScheduleCartNotificationsUseCase {
    type Response = ScheduleOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "ScheduleCartNotifications";

    async fn execute(&mut self, ctx: &CartReminderContext) -> Result<Self::Response, Self::Error> {
        if self.items.is_empty() {
            return Ok(ScheduleOutcome::Skipped);
        }

        // Always start from a clean slate, even when the throttle stops this run
        ctx.notifications
            .cancel_all()
            .await
            .map_err(|e| UseCaseError::SchedulerError(e.to_string()))?;

        let now = ctx.sys.get_timestamp_millis();
        let throttle = NotificationThrottle::new(ctx);
        let plan = plan_cart_notifications(
            &self.items,
            now,
            &throttle.load().await,
            &ctx.config.expiration_policy,
            &ctx.config.cart_timezone,
        );

        let requests = match plan {
            NotificationPlan::Throttled => {
                info!("Skipping cart notifications, the last run was too recent");
                return Ok(ScheduleOutcome::Throttled);
            }
            NotificationPlan::Scheduled(requests) => requests,
        };
        if requests.is_empty() {
            return Ok(ScheduleOutcome::Scheduled(0));
        }

        try_join_all(
            requests
                .iter()
                .map(|request| ctx.notifications.schedule(request)),
        )
        .await
        .map_err(|e| UseCaseError::SchedulerError(e.to_string()))?;

        throttle.record(now).await;
        info!(
            "Scheduled {} notifications for {} cart items",
            requests.len(),
            self.items.len()
        );

        Ok(ScheduleOutcome::Scheduled(requests.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{
        test_helpers::{
            cart_item, pending, set_time, setup_context, FailingNotificationScheduler, T,
        },
        usecase::execute,
    };
    use cart_reminder_domain::{NotificationType, ThrottleState, HOUR, MINUTE};
    use std::sync::Arc;

    async fn schedule(
        items: Vec<CartLineItem>,
        ctx: &CartReminderContext,
    ) -> Result<ScheduleOutcome, UseCaseError> {
        execute(ScheduleCartNotificationsUseCase { items }, ctx).await
    }

    async fn throttle_state(ctx: &CartReminderContext) -> ThrottleState {
        ctx.repos.throttle_repo.find().await.expect("To read throttle")
    }

    #[tokio::test]
    async fn empty_cart_touches_nothing() {
        let ctx = setup_context(T);
        schedule(vec![cart_item("1", T)], &ctx)
            .await
            .expect("To schedule");
        let before = pending(&ctx).await;
        ctx.repos
            .throttle_repo
            .save(&ThrottleState::default())
            .await
            .expect("To reset throttle");

        let outcome = schedule(Vec::new(), &ctx).await.expect("To run");
        assert_eq!(outcome, ScheduleOutcome::Skipped);
        assert_eq!(pending(&ctx).await, before);
        assert_eq!(throttle_state(&ctx).await, ThrottleState::default());
    }

    #[tokio::test]
    async fn schedules_timeline_for_new_item() {
        let ctx = setup_context(T);
        let outcome = schedule(vec![cart_item("1", T)], &ctx)
            .await
            .expect("To schedule");
        assert_eq!(outcome, ScheduleOutcome::Scheduled(6));

        let delays = pending(&ctx)
            .await
            .iter()
            .map(|n| n.request.trigger.seconds)
            .collect::<Vec<_>>();
        assert_eq!(
            delays,
            vec![6 * 3600, 12 * 3600, 18 * 3600, 23 * 3600, 23 * 3600 + 1800, 24 * 3600]
        );
        assert_eq!(throttle_state(&ctx).await, ThrottleState::new(T));
    }

    #[tokio::test]
    async fn batches_multiple_items() {
        let ctx = setup_context(T);
        let items = vec![cart_item("1", T), cart_item("2", T - 3 * HOUR)];
        schedule(items, &ctx).await.expect("To schedule");

        let scheduled = pending(&ctx).await;
        assert!(scheduled
            .iter()
            .all(|n| n.request.content.data.count == Some(2)));
        // Timeline of the item added 3 hours ago, expiring in 21 hours
        let last = scheduled.last().expect("To have notifications");
        assert_eq!(last.request.trigger.seconds, 21 * 3600);
        assert_eq!(last.request.notification_type(), NotificationType::Expiration);
    }

    #[tokio::test]
    async fn throttled_run_still_cancels_pending_notifications() {
        let mut ctx = setup_context(T);
        schedule(vec![cart_item("1", T)], &ctx)
            .await
            .expect("To schedule");
        assert_eq!(pending(&ctx).await.len(), 6);

        set_time(&mut ctx, T + 5 * MINUTE);
        let outcome = schedule(vec![cart_item("1", T)], &ctx)
            .await
            .expect("To run");
        assert_eq!(outcome, ScheduleOutcome::Throttled);
        // The cancel happens before the throttle check, leaving nothing scheduled
        assert!(pending(&ctx).await.is_empty());
        assert_eq!(throttle_state(&ctx).await, ThrottleState::new(T));
    }

    #[tokio::test]
    async fn expiring_item_bypasses_throttle() {
        let mut ctx = setup_context(T);
        schedule(vec![cart_item("1", T)], &ctx)
            .await
            .expect("To schedule");

        let now = T + 5 * MINUTE;
        set_time(&mut ctx, now);
        let soon = cart_item("soon", now - 24 * HOUR + 10 * MINUTE);
        let outcome = schedule(vec![soon], &ctx).await.expect("To schedule");
        assert_eq!(outcome, ScheduleOutcome::Scheduled(1));

        let scheduled = pending(&ctx).await;
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].request.trigger.seconds, 10 * 60);
        assert_eq!(
            scheduled[0].request.notification_type(),
            NotificationType::Expiration
        );
        assert_eq!(throttle_state(&ctx).await, ThrottleState::new(now));
    }

    #[tokio::test]
    async fn only_unschedulable_items_does_not_record_run() {
        let ctx = setup_context(T);
        let items = vec![
            cart_item("expired", T - 48 * HOUR),
            CartLineItem::new("malformed", "Malformed", "21.02.2021"),
        ];
        let outcome = schedule(items, &ctx).await.expect("To run");
        assert_eq!(outcome, ScheduleOutcome::Scheduled(0));
        assert_eq!(throttle_state(&ctx).await, ThrottleState::default());
    }

    #[tokio::test]
    async fn scheduler_failure_propagates_and_skips_throttle_write() {
        let mut ctx = setup_context(T);
        let scheduler = Arc::new(FailingNotificationScheduler::default());
        ctx.notifications = scheduler.clone();

        let res = schedule(vec![cart_item("1", T)], &ctx).await;
        assert!(matches!(res, Err(UseCaseError::SchedulerError(_))));
        assert_eq!(*scheduler.cancellations.lock().unwrap(), 1);
        assert_eq!(throttle_state(&ctx).await, ThrottleState::default());
    }
}
