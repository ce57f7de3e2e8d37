use std::str::FromStr;
use thiserror::Error;

/// Time of the last scheduling run that submitted notifications.
/// Used to keep scheduling runs at least a throttle window apart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrottleState {
    /// Millis since epoch
    pub last_run: Option<i64>,
}

#[derive(Error, Debug)]
pub enum InvalidThrottleStateError {
    #[error("Throttle state: {0} is not a timestamp")]
    Malformed(String),
}

impl ThrottleState {
    pub fn new(last_run: i64) -> Self {
        Self {
            last_run: Some(last_run),
        }
    }

    pub fn is_throttled(&self, now: i64, window: i64) -> bool {
        matches!(self.last_run, Some(last_run) if now - last_run < window)
    }

    /// Items about to expire always get through, otherwise the
    /// window has to have elapsed since the last run.
    pub fn allows(&self, now: i64, window: i64, has_expiring_items: bool) -> bool {
        has_expiring_items || !self.is_throttled(now, window)
    }
}

impl FromStr for ThrottleState {
    type Err = InvalidThrottleStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self::new)
            .map_err(|_| InvalidThrottleStateError::Malformed(s.to_string()))
    }
}
