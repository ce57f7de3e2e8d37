pub const SECOND: i64 = 1000;
pub const MINUTE: i64 = 60 * SECOND;
pub const HOUR: i64 = 60 * MINUTE;

/// Lifetimes and reminder offsets for items in the cart.
/// All durations are in millis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpirationPolicy {
    /// How long an item stays in the cart after it was added
    pub cart_timeout: i64,
    /// Cadence of the periodic reminders, anchored at the time the item was added
    pub reminder_interval: i64,
    /// A reminder is always sent this long before expiry
    pub final_warning_offset: i64,
    /// The last reminder before expiry
    pub last_call_offset: i64,
    /// Items expiring within this window bypass the throttle
    pub soon_threshold: i64,
    /// Minimum spacing between two scheduling runs
    pub throttle_window: i64,
    /// Periodic reminders closer to now than this are skipped so that
    /// a reminder is never due while it is being scheduled
    pub min_lead_time: i64,
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        Self {
            cart_timeout: 24 * HOUR,
            reminder_interval: 6 * HOUR,
            final_warning_offset: HOUR,
            last_call_offset: 30 * MINUTE,
            soon_threshold: 15 * MINUTE,
            throttle_window: 30 * MINUTE,
            min_lead_time: MINUTE,
        }
    }
}

impl ExpirationPolicy {
    pub fn expires_at(&self, added_at: i64) -> i64 {
        added_at + self.cart_timeout
    }

    pub fn is_expired(&self, added_at: i64, now: i64) -> bool {
        now - added_at >= self.cart_timeout
    }

    pub fn is_about_to_expire(&self, added_at: i64, now: i64) -> bool {
        let time_left = self.expires_at(added_at) - now;
        time_left > 0 && time_left <= self.soon_threshold
    }
}
