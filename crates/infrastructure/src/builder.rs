use std::sync::Arc;

use config::{AppConfig, StorageBackend};
use domain::{MessageRepository, ParticipantRepository};
use thiserror::Error;

use crate::{
    memory::MemoryStorage,
    repository::{create_pg_pool, PgStorage},
    schema::bootstrap_schema,
};

#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// 按配置装配好的存储实现。
#[derive(Clone)]
pub struct Infrastructure {
    pub participant_repository: Arc<dyn ParticipantRepository>,
    pub message_repository: Arc<dyn MessageRepository>,
}

impl Infrastructure {
    pub async fn connect(config: &AppConfig) -> Result<Self, InfrastructureError> {
        match config.storage {
            StorageBackend::Postgres => {
                tracing::info!(database = %config.database.redacted_url(), "connecting to postgres");
                let pool = create_pg_pool(&config.database).await?;
                bootstrap_schema(&pool).await?;
                Ok(Self::from_postgres(PgStorage::new(pool)))
            }
            StorageBackend::Memory => {
                tracing::warn!("using in-memory storage, data is lost on shutdown");
                Ok(Self::in_memory())
            }
        }
    }

    pub fn from_postgres(storage: PgStorage) -> Self {
        Self {
            participant_repository: storage.participant_repository,
            message_repository: storage.message_repository,
        }
    }

    pub fn in_memory() -> Self {
        let storage = MemoryStorage::new();
        Self {
            participant_repository: Arc::new(storage.clone()),
            message_repository: Arc::new(storage),
        }
    }
}
