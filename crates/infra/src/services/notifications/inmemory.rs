use super::INotificationScheduler;
use cart_reminder_domain::{NotificationRequest, ScheduledNotification};
use tracing::{debug, info};
use uuid::Uuid;

/// Keeps pending notifications in process memory and logs them
/// as they are scheduled
pub struct InMemoryNotificationScheduler {
    scheduled: std::sync::Mutex<Vec<ScheduledNotification>>,
}

impl InMemoryNotificationScheduler {
    pub fn new() -> Self {
        Self {
            scheduled: std::sync::Mutex::new(vec![]),
        }
    }
}

impl Default for InMemoryNotificationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotificationScheduler for InMemoryNotificationScheduler {
    async fn schedule(&self, request: &NotificationRequest) -> anyhow::Result<String> {
        let identifier = Uuid::new_v4().to_string();
        info!(
            "Scheduled {:?} notification {} in {} seconds: {}",
            request.notification_type(),
            identifier,
            request.trigger.seconds,
            request.content.body
        );
        let mut scheduled = self.scheduled.lock().unwrap();
        scheduled.push(ScheduledNotification {
            identifier: identifier.clone(),
            request: request.clone(),
        });
        Ok(identifier)
    }

    async fn cancel_all(&self) -> anyhow::Result<()> {
        let mut scheduled = self.scheduled.lock().unwrap();
        debug!("Cancelling {} scheduled notifications", scheduled.len());
        scheduled.clear();
        Ok(())
    }

    async fn get_all_scheduled(&self) -> anyhow::Result<Vec<ScheduledNotification>> {
        let scheduled = self.scheduled.lock().unwrap();
        Ok(scheduled.clone())
    }
}
