use super::IKVRepo;
use std::collections::HashMap;

pub struct InMemoryKVRepo {
    values: std::sync::Mutex<HashMap<String, String>>,
}

impl InMemoryKVRepo {
    pub fn new() -> Self {
        Self {
            values: std::sync::Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryKVRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IKVRepo for InMemoryKVRepo {
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self.values.lock().unwrap();
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let values = self.values.lock().unwrap();
        Ok(values.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let mut values = self.values.lock().unwrap();
        values.remove(key);
        Ok(())
    }
}
