mod config;
mod repos;
mod services;
mod system;

pub use config::{BackgroundTaskOptions, Config};
pub use repos::{
    FileKVRepo, ICartRepo, IKVRepo, IThrottleRepo, InMemoryKVRepo, KVCartRepo, KVThrottleRepo,
    Repos,
};
pub use services::*;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct CartReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifications: Arc<dyn INotificationScheduler>,
}

impl CartReminderContext {
    fn create(repos: Repos, config: Config) -> Self {
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifications: Arc::new(InMemoryNotificationScheduler::new()),
        }
    }

    pub fn create_inmemory() -> Self {
        Self::create(Repos::create_inmemory(), Config::new())
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> CartReminderContext {
    let config = Config::new();
    let repos = match &config.store_path {
        Some(path) => Repos::create_file(path),
        None => Repos::create_inmemory(),
    };
    CartReminderContext::create(repos, config)
}
