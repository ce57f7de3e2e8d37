mod notifications;

pub use notifications::{INotificationScheduler, InMemoryNotificationScheduler};
