use std::{sync::Arc, time::Duration};

use config::DatabaseConfig;
use domain::{
    Message, MessageRepository, MessageText, MessageType, Participant, ParticipantName,
    ParticipantRepository, Recipient, RepositoryError, RepositoryFuture, WallTime,
};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

pub(crate) fn map_sqlx_err(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => RepositoryError::Conflict,
        _ => RepositoryError::storage(err.to_string()),
    }
}

fn invalid_data(message: impl Into<String>) -> RepositoryError {
    RepositoryError::storage(message)
}

#[derive(Debug, FromRow)]
struct ParticipantRecord {
    name: String,
    last_status: i64,
}

impl TryFrom<ParticipantRecord> for Participant {
    type Error = RepositoryError;

    fn try_from(value: ParticipantRecord) -> Result<Self, Self::Error> {
        let name = ParticipantName::parse(value.name).map_err(|err| invalid_data(err.to_string()))?;
        Ok(Participant {
            name,
            last_status: value.last_status,
        })
    }
}

#[derive(Debug, FromRow)]
struct MessageRecord {
    sender: String,
    recipient: String,
    body: String,
    message_type: String,
    sent_time: String,
}

impl TryFrom<MessageRecord> for Message {
    type Error = RepositoryError;

    fn try_from(value: MessageRecord) -> Result<Self, Self::Error> {
        let from = ParticipantName::parse(value.sender).map_err(|err| invalid_data(err.to_string()))?;
        let to = Recipient::parse(value.recipient).map_err(|err| invalid_data(err.to_string()))?;
        let text = MessageText::new(value.body).map_err(|err| invalid_data(err.to_string()))?;
        let message_type = value
            .message_type
            .parse::<MessageType>()
            .map_err(|err| invalid_data(err.to_string()))?;
        let time = WallTime::parse(value.sent_time).map_err(|err| invalid_data(err.to_string()))?;

        Ok(Message {
            from,
            to,
            text,
            message_type,
            time,
        })
    }
}

const INSERT_MESSAGE: &str = r#"
    INSERT INTO messages (sender, recipient, body, message_type, sent_time)
    VALUES ($1, $2, $3, $4, $5)
"#;

#[derive(Clone)]
pub struct PgParticipantRepository {
    pool: PgPool,
}

impl PgParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ParticipantRepository for PgParticipantRepository {
    fn register(
        &self,
        participant: Participant,
        join_notice: Message,
    ) -> RepositoryFuture<Participant> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let mut tx = pool.begin().await.map_err(map_sqlx_err)?;

            // 主键冲突在这里被映射为 Conflict，事务随 tx 丢弃而回滚
            let record = sqlx::query_as::<_, ParticipantRecord>(
                r#"
                INSERT INTO participants (name, last_status)
                VALUES ($1, $2)
                RETURNING name, last_status
                "#,
            )
            .bind(participant.name.as_str())
            .bind(participant.last_status)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

            sqlx::query(INSERT_MESSAGE)
                .bind(join_notice.from.as_str())
                .bind(join_notice.to.as_str())
                .bind(join_notice.text.as_str())
                .bind(join_notice.message_type.as_str())
                .bind(join_notice.time.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_err)?;

            tx.commit().await.map_err(map_sqlx_err)?;

            Participant::try_from(record)
        })
    }

    fn list(&self) -> RepositoryFuture<Vec<Participant>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let records = sqlx::query_as::<_, ParticipantRecord>(
                r#"SELECT name, last_status FROM participants ORDER BY seq"#,
            )
            .fetch_all(&pool)
            .await
            .map_err(map_sqlx_err)?;

            records.into_iter().map(Participant::try_from).collect()
        })
    }

    fn find_by_name(&self, name: ParticipantName) -> RepositoryFuture<Option<Participant>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let record = sqlx::query_as::<_, ParticipantRecord>(
                r#"SELECT name, last_status FROM participants WHERE name = $1"#,
            )
            .bind(name.as_str())
            .fetch_optional(&pool)
            .await
            .map_err(map_sqlx_err)?;

            record.map(Participant::try_from).transpose()
        })
    }

    fn touch(&self, name: ParticipantName, last_status: i64) -> RepositoryFuture<bool> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let result = sqlx::query("UPDATE participants SET last_status = $2 WHERE name = $1")
                .bind(name.as_str())
                .bind(last_status)
                .execute(&pool)
                .await
                .map_err(map_sqlx_err)?;

            Ok(result.rows_affected() > 0)
        })
    }
}

#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl MessageRepository for PgMessageRepository {
    fn append(&self, message: Message) -> RepositoryFuture<Message> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query(INSERT_MESSAGE)
                .bind(message.from.as_str())
                .bind(message.to.as_str())
                .bind(message.text.as_str())
                .bind(message.message_type.as_str())
                .bind(message.time.as_str())
                .execute(&pool)
                .await
                .map_err(map_sqlx_err)?;

            Ok(message)
        })
    }

    fn list_chronological(&self) -> RepositoryFuture<Vec<Message>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let records = sqlx::query_as::<_, MessageRecord>(
                r#"
                SELECT sender, recipient, body, message_type, sent_time
                FROM messages
                ORDER BY seq
                "#,
            )
            .fetch_all(&pool)
            .await
            .map_err(map_sqlx_err)?;

            records.into_iter().map(Message::try_from).collect()
        })
    }
}

pub struct PgStorage {
    pub pool: PgPool,
    pub participant_repository: Arc<PgParticipantRepository>,
    pub message_repository: Arc<PgMessageRepository>,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self {
            participant_repository: Arc::new(PgParticipantRepository::new(pool.clone())),
            message_repository: Arc::new(PgMessageRepository::new(pool.clone())),
            pool,
        }
    }
}

pub async fn create_pg_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect(&config.url)
        .await
}
