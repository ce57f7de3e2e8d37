mod cart;
mod kv;
mod throttle;

pub use cart::{ICartRepo, KVCartRepo};
pub use kv::{FileKVRepo, IKVRepo, InMemoryKVRepo};
use std::{path::Path, sync::Arc};
pub use throttle::{IThrottleRepo, KVThrottleRepo};

#[derive(Clone)]
pub struct Repos {
    pub key_value_repo: Arc<dyn IKVRepo>,
    pub cart_repo: Arc<dyn ICartRepo>,
    pub throttle_repo: Arc<dyn IThrottleRepo>,
}

impl Repos {
    pub fn create_file(path: &Path) -> Self {
        Self::create_with_kv(Arc::new(FileKVRepo::new(path)))
    }

    pub fn create_inmemory() -> Self {
        Self::create_with_kv(Arc::new(InMemoryKVRepo::new()))
    }

    /// All repos share the same key value store
    pub fn create_with_kv(key_value_repo: Arc<dyn IKVRepo>) -> Self {
        Self {
            cart_repo: Arc::new(KVCartRepo::new(key_value_repo.clone())),
            throttle_repo: Arc::new(KVThrottleRepo::new(key_value_repo.clone())),
            key_value_repo,
        }
    }
}
