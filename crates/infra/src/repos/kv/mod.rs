mod file;
mod inmemory;

pub use file::FileKVRepo;
pub use inmemory::InMemoryKVRepo;

/// String keyed and string valued persistent store
#[async_trait::async_trait]
pub trait IKVRepo: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}
