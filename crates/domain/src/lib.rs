//! 聊天中继核心领域模型
//!
//! 包含参与者、消息等核心实体，消息可见性规则，以及仓储接口。

pub mod errors;
pub mod history;
pub mod message;
pub mod participant;
pub mod repository;
pub mod value_objects;

pub use errors::{DomainError, RepositoryError};
pub use history::{visible_history, HistoryLimit};
pub use message::{Message, MessageType};
pub use participant::Participant;
pub use repository::{MessageRepository, ParticipantRepository, RepositoryFuture, RepositoryResult};
pub use value_objects::{MessageText, ParticipantName, Recipient, Timestamp, WallTime};

#[cfg(feature = "testing")]
pub use repository::{MockMessageRepository, MockParticipantRepository};
