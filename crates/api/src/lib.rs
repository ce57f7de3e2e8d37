mod cart;
mod job_schedulers;
mod shared;

pub use cart::{
    get_pending_cart_notifications::GetPendingCartNotificationsUseCase,
    reconcile_cart_notifications::{BackgroundFetchResult, ReconcileCartNotificationsUseCase},
    schedule_cart_notifications::{ScheduleCartNotificationsUseCase, ScheduleOutcome},
    update_cart_notifications::{UpdateCartNotificationsUseCase, UpdateOutcome},
};
pub use job_schedulers::{run_cart_reconciliation, start_cart_reconciliation_job};
pub use shared::usecase::{execute, UseCase};

use cart_reminder_infra::CartReminderContext;
use tokio::task::JoinHandle;

pub struct Application {
    context: CartReminderContext,
}

impl Application {
    pub fn new(context: CartReminderContext) -> Self {
        Self { context }
    }

    /// Starts the background jobs. They run until the returned handles are aborted.
    pub fn start_job_schedulers(&self) -> Vec<JoinHandle<()>> {
        vec![start_cart_reconciliation_job(self.context.clone())]
    }
}
