//! 进程内存储，用于本地运行和测试。

use std::sync::Arc;

use domain::{
    Message, MessageRepository, Participant, ParticipantName, ParticipantRepository,
    RepositoryError, RepositoryFuture,
};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    participants: Vec<Participant>,
    messages: Vec<Message>,
}

/// 同时实现参与者和消息仓储；两者共享一把锁，注册写入因此是原子的。
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParticipantRepository for MemoryStorage {
    fn register(
        &self,
        participant: Participant,
        join_notice: Message,
    ) -> RepositoryFuture<Participant> {
        let state = self.state.clone();
        Box::pin(async move {
            let mut guard = state.write().await;
            if guard
                .participants
                .iter()
                .any(|existing| existing.name == participant.name)
            {
                return Err(RepositoryError::Conflict);
            }
            guard.participants.push(participant.clone());
            guard.messages.push(join_notice);
            Ok(participant)
        })
    }

    fn list(&self) -> RepositoryFuture<Vec<Participant>> {
        let state = self.state.clone();
        Box::pin(async move { Ok(state.read().await.participants.clone()) })
    }

    fn find_by_name(&self, name: ParticipantName) -> RepositoryFuture<Option<Participant>> {
        let state = self.state.clone();
        Box::pin(async move {
            let guard = state.read().await;
            Ok(guard
                .participants
                .iter()
                .find(|participant| participant.name == name)
                .cloned())
        })
    }

    fn touch(&self, name: ParticipantName, last_status: i64) -> RepositoryFuture<bool> {
        let state = self.state.clone();
        Box::pin(async move {
            let mut guard = state.write().await;
            match guard
                .participants
                .iter_mut()
                .find(|participant| participant.name == name)
            {
                Some(participant) => {
                    participant.last_status = last_status;
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }
}

impl MessageRepository for MemoryStorage {
    fn append(&self, message: Message) -> RepositoryFuture<Message> {
        let state = self.state.clone();
        Box::pin(async move {
            state.write().await.messages.push(message.clone());
            Ok(message)
        })
    }

    fn list_chronological(&self) -> RepositoryFuture<Vec<Message>> {
        let state = self.state.clone();
        Box::pin(async move { Ok(state.read().await.messages.clone()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use domain::{MessageType, Timestamp};

    fn now() -> Timestamp {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 2, 2, 10, 0, 0)
            .unwrap()
    }

    fn name(value: &str) -> ParticipantName {
        ParticipantName::parse(value).unwrap()
    }

    async fn register(storage: &MemoryStorage, value: &str) -> Result<Participant, RepositoryError> {
        storage
            .register(
                Participant::register(name(value), now()),
                Message::join_notice(name(value), now()),
            )
            .await
    }

    #[tokio::test]
    async fn register_writes_participant_and_notice() {
        let storage = MemoryStorage::new();
        register(&storage, "Alice").await.unwrap();

        let participants = ParticipantRepository::list(&storage).await.unwrap();
        assert_eq!(participants.len(), 1);
        let messages = storage.list_chronological().await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message_type, MessageType::Status);
    }

    #[tokio::test]
    async fn duplicate_register_writes_nothing() {
        let storage = MemoryStorage::new();
        register(&storage, "Alice").await.unwrap();

        assert_eq!(
            register(&storage, "Alice").await.unwrap_err(),
            RepositoryError::Conflict
        );
        assert_eq!(ParticipantRepository::list(&storage).await.unwrap().len(), 1);
        assert_eq!(storage.list_chronological().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn touch_reports_missing_participant() {
        let storage = MemoryStorage::new();
        register(&storage, "Alice").await.unwrap();

        assert!(storage.touch(name("Alice"), 42).await.unwrap());
        assert!(!storage.touch(name("Ghost"), 42).await.unwrap());
        let alice = storage.find_by_name(name("Alice")).await.unwrap().unwrap();
        assert_eq!(alice.last_status, 42);
    }

    #[tokio::test]
    async fn messages_keep_insertion_order() {
        let storage = MemoryStorage::new();
        for text in ["one", "two", "three"] {
            let message = Message::post(
                name("Alice"),
                domain::Recipient::everyone(),
                domain::MessageText::new(text).unwrap(),
                MessageType::Broadcast,
                now(),
            )
            .unwrap();
            storage.append(message).await.unwrap();
        }
        let texts: Vec<_> = storage
            .list_chronological()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.text.to_string())
            .collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }
}
