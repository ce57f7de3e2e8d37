use cart_reminder_domain::{CartTimezone, ExpirationPolicy};
use chrono_tz::Tz;
use std::{path::PathBuf, time::Duration};
use tracing::{info, warn};

const MIN_BACKGROUND_TASK_INTERVAL_SECS: u64 = 30 * 60;

/// Registration parameters for the periodic background task
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundTaskOptions {
    /// The task is never run more often than this. The runner decides
    /// when it actually runs.
    pub minimum_interval: Duration,
    /// Keep running after the app process is terminated
    pub stop_on_terminate: bool,
    /// Register again after a device reboot
    pub start_on_boot: bool,
}

impl Default for BackgroundTaskOptions {
    fn default() -> Self {
        Self {
            minimum_interval: Duration::from_secs(MIN_BACKGROUND_TASK_INTERVAL_SECS),
            stop_on_terminate: false,
            start_on_boot: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Timezone the `addedAt` timestamps of cart items are interpreted in.
    /// Falls back to the timezone of the process.
    pub cart_timezone: CartTimezone,
    /// File backing the key value store. Values are only kept in
    /// memory when this is not set.
    pub store_path: Option<PathBuf>,
    pub background_task: BackgroundTaskOptions,
    pub expiration_policy: ExpirationPolicy,
}

fn parse_cart_timezone(value: Option<String>) -> CartTimezone {
    match value {
        None => CartTimezone::Local,
        Some(name) => match name.parse::<Tz>() {
            Ok(tz) => CartTimezone::Named(tz),
            Err(_) => {
                warn!(
                    "The given CART_TIMEZONE: {} is not a valid timezone, falling back to local time.",
                    name
                );
                CartTimezone::Local
            }
        },
    }
}

fn parse_background_task_interval(value: Option<String>) -> Duration {
    let secs = match value {
        None => MIN_BACKGROUND_TASK_INTERVAL_SECS,
        Some(value) => match value.parse::<u64>() {
            Ok(secs) if secs < MIN_BACKGROUND_TASK_INTERVAL_SECS => {
                warn!(
                    "The given BACKGROUND_TASK_INTERVAL_SECS: {} is below the minimum, using {} instead.",
                    secs, MIN_BACKGROUND_TASK_INTERVAL_SECS
                );
                MIN_BACKGROUND_TASK_INTERVAL_SECS
            }
            Ok(secs) => secs,
            Err(_) => {
                warn!(
                    "The given BACKGROUND_TASK_INTERVAL_SECS: {} is not valid, falling back to the default: {}.",
                    value, MIN_BACKGROUND_TASK_INTERVAL_SECS
                );
                MIN_BACKGROUND_TASK_INTERVAL_SECS
            }
        },
    };
    Duration::from_secs(secs)
}

impl Config {
    pub fn new() -> Self {
        let cart_timezone = parse_cart_timezone(std::env::var("CART_TIMEZONE").ok());
        let store_path = std::env::var("CART_REMINDER_STORE_PATH")
            .ok()
            .map(PathBuf::from);
        if store_path.is_none() {
            info!("Did not find CART_REMINDER_STORE_PATH environment variable. Storage will not survive restarts.");
        }
        let minimum_interval =
            parse_background_task_interval(std::env::var("BACKGROUND_TASK_INTERVAL_SECS").ok());

        Self {
            cart_timezone,
            store_path,
            background_task: BackgroundTaskOptions {
                minimum_interval,
                ..Default::default()
            },
            expiration_policy: ExpirationPolicy::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
