pub mod get_pending_cart_notifications;
pub mod reconcile_cart_notifications;
pub mod schedule_cart_notifications;
pub mod update_cart_notifications;
