use crate::expiration::ExpirationPolicy;

impl ExpirationPolicy {
    /// Computes the instants at which notifications should fire for an item
    /// added at `added_at` and expiring at `expires_at`.
    ///
    /// The periodic reminders are aligned to `added_at` and followed by the
    /// final warning, the last call and the expiration itself. The result is
    /// sorted ascending and the last element is always `expires_at`. Callers
    /// are expected to only pass items that have not expired yet.
    pub fn compute_timeline(&self, added_at: i64, expires_at: i64, now: i64) -> Vec<i64> {
        let mut timeline = Vec::new();
        let final_warning = expires_at - self.final_warning_offset;

        if self.reminder_interval > 0 {
            let earliest = now + self.min_lead_time;
            let intervals_passed = if earliest < added_at {
                0
            } else {
                (earliest - added_at).div_euclid(self.reminder_interval) + 1
            };

            let mut remind_at = added_at + intervals_passed * self.reminder_interval;
            while remind_at < final_warning {
                timeline.push(remind_at);
                remind_at += self.reminder_interval;
            }
        }

        if final_warning > now {
            timeline.push(final_warning);
        }
        let last_call = expires_at - self.last_call_offset;
        if last_call > now {
            timeline.push(last_call);
        }
        timeline.push(expires_at);

        timeline
    }
}
