use super::kv::IKVRepo;
use anyhow::Context;
use cart_reminder_domain::{CartLineItem, CART_ITEMS_KEY};
use std::sync::Arc;
use tracing::warn;

/// Read access to the cart snapshot the app keeps in storage
#[async_trait::async_trait]
pub trait ICartRepo: Send + Sync {
    async fn find_all(&self) -> anyhow::Result<Vec<CartLineItem>>;
    async fn save_all(&self, items: &[CartLineItem]) -> anyhow::Result<()>;
}

/// Stores the cart as a JSON array under the `cartItems` key.
/// Entries that are not valid cart items are skipped when reading.
pub struct KVCartRepo {
    key_value_repo: Arc<dyn IKVRepo>,
}

impl KVCartRepo {
    pub fn new(key_value_repo: Arc<dyn IKVRepo>) -> Self {
        Self { key_value_repo }
    }
}

#[async_trait::async_trait]
impl ICartRepo for KVCartRepo {
    async fn find_all(&self) -> anyhow::Result<Vec<CartLineItem>> {
        let json = match self.key_value_repo.get(CART_ITEMS_KEY).await? {
            Some(json) => json,
            None => return Ok(Vec::new()),
        };
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&json).context("Malformed cart snapshot")?;

        let items: Vec<CartLineItem> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry.clone()) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!("Skipping cart entry {}. Err: {}", entry, e);
                    None
                }
            })
            .collect();
        Ok(items)
    }

    async fn save_all(&self, items: &[CartLineItem]) -> anyhow::Result<()> {
        let json = serde_json::to_string(items)?;
        self.key_value_repo.set(CART_ITEMS_KEY, &json).await
    }
}
