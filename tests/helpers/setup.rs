use cart_reminder_domain::CartTimezone;
use cart_reminder_infra::{CartReminderContext, ISys};
use std::sync::Arc;

pub const UTC: CartTimezone = CartTimezone::Named(chrono_tz::UTC);

pub struct StaticTimeSys(pub i64);
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

/// In memory context with a frozen clock at `now`
pub fn setup_app(now: i64) -> CartReminderContext {
    let mut ctx = CartReminderContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(now));
    ctx.config.cart_timezone = UTC;
    ctx
}

pub fn travel_to(ctx: &mut CartReminderContext, now: i64) {
    ctx.sys = Arc::new(StaticTimeSys(now));
}
