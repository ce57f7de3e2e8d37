use super::kv::IKVRepo;
use cart_reminder_domain::{ThrottleState, LAST_NOTIFICATION_TIME_KEY};
use std::sync::Arc;
use tracing::warn;

#[async_trait::async_trait]
pub trait IThrottleRepo: Send + Sync {
    async fn find(&self) -> anyhow::Result<ThrottleState>;
    async fn save(&self, state: &ThrottleState) -> anyhow::Result<()>;
}

/// Keeps the `ThrottleState` as epoch millis under `last_notification_time`
pub struct KVThrottleRepo {
    key_value_repo: Arc<dyn IKVRepo>,
}

impl KVThrottleRepo {
    pub fn new(key_value_repo: Arc<dyn IKVRepo>) -> Self {
        Self { key_value_repo }
    }
}

#[async_trait::async_trait]
impl IThrottleRepo for KVThrottleRepo {
    async fn find(&self) -> anyhow::Result<ThrottleState> {
        let value = match self.key_value_repo.get(LAST_NOTIFICATION_TIME_KEY).await? {
            Some(value) => value,
            None => return Ok(ThrottleState::default()),
        };
        match value.parse() {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!("Ignoring stored throttle state. Err: {}", e);
                Ok(ThrottleState::default())
            }
        }
    }

    async fn save(&self, state: &ThrottleState) -> anyhow::Result<()> {
        match state.last_run {
            Some(last_run) => {
                self.key_value_repo
                    .set(LAST_NOTIFICATION_TIME_KEY, &last_run.to_string())
                    .await
            }
            None => self.key_value_repo.delete(LAST_NOTIFICATION_TIME_KEY).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::kv::InMemoryKVRepo;

    #[tokio::test]
    async fn it_stores_throttle_state_as_millis() {
        let kv = Arc::new(InMemoryKVRepo::new());
        let repo = KVThrottleRepo::new(kv.clone());
        assert_eq!(repo.find().await.expect("To read"), ThrottleState::default());

        repo.save(&ThrottleState::new(1613865600000))
            .await
            .expect("To save");
        assert_eq!(
            kv.get(LAST_NOTIFICATION_TIME_KEY).await.expect("To read"),
            Some("1613865600000".into())
        );
        assert_eq!(
            repo.find().await.expect("To read"),
            ThrottleState::new(1613865600000)
        );

        repo.save(&ThrottleState::default()).await.expect("To save");
        assert_eq!(kv.get(LAST_NOTIFICATION_TIME_KEY).await.expect("To read"), None);
    }

    #[tokio::test]
    async fn malformed_state_is_treated_as_absent() {
        let kv = Arc::new(InMemoryKVRepo::new());
        kv.set(LAST_NOTIFICATION_TIME_KEY, "NaN")
            .await
            .expect("To write");
        let repo = KVThrottleRepo::new(kv);
        assert_eq!(repo.find().await.expect("To read"), ThrottleState::default());
    }
}
