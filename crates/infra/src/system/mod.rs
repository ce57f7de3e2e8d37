use chrono::Utc;

/// Clock behind every expiry, timeline and throttle decision. Tests swap in a
/// frozen clock so a whole cart scenario can be replayed at a fixed instant.
pub trait ISys: Send + Sync {
    /// Milliseconds since the unix epoch, the unit cart timestamps are stored in
    fn get_timestamp_millis(&self) -> i64;
}

/// Wall clock used by the binary and the background job
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
