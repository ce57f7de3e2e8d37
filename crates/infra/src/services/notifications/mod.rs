mod inmemory;

use cart_reminder_domain::{NotificationRequest, ScheduledNotification};
pub use inmemory::InMemoryNotificationScheduler;

/// The local notification scheduler of the device. Once a
/// `NotificationRequest` is submitted the scheduler owns it.
#[async_trait::async_trait]
pub trait INotificationScheduler: Send + Sync {
    /// Submits a notification and returns the identifier assigned to it
    async fn schedule(&self, request: &NotificationRequest) -> anyhow::Result<String>;
    async fn cancel_all(&self) -> anyhow::Result<()>;
    async fn get_all_scheduled(&self) -> anyhow::Result<Vec<ScheduledNotification>>;
}
