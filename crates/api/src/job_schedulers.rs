use crate::{
    cart::{
        get_pending_cart_notifications::GetPendingCartNotificationsUseCase,
        reconcile_cart_notifications::{
            BackgroundFetchResult, ReconcileCartNotificationsUseCase,
        },
    },
    shared::usecase::execute,
};
use cart_reminder_infra::CartReminderContext;
use tokio::{task::JoinHandle, time::interval};
use tracing::{info, info_span, warn};
use tracing_futures::Instrument;

/// Runs one background reconciliation and reports the result
pub async fn run_cart_reconciliation(ctx: &CartReminderContext) -> BackgroundFetchResult {
    let result = match execute(ReconcileCartNotificationsUseCase, ctx).await {
        Ok(result) => result,
        Err(e) => match e {},
    };

    match execute(GetPendingCartNotificationsUseCase, ctx).await {
        Ok(pending) => info!(
            "Background task finished with {:?}, {} notifications pending",
            result,
            pending.len()
        ),
        Err(_) => warn!("Background task finished with {:?}", result),
    }
    result
}

pub fn start_cart_reconciliation_job(ctx: CartReminderContext) -> JoinHandle<()> {
    let options = ctx.config.background_task.clone();
    info!("Registering cart reconciliation background task: {:?}", options);

    tokio::spawn(
        async move {
            // The first tick completes immediately so the cart is reconciled on startup
            let mut interval = interval(options.minimum_interval);
            loop {
                interval.tick().await;
                run_cart_reconciliation(&ctx).await;
            }
        }
        .instrument(info_span!("cart_reconciliation_job")),
    )
}
