use std::sync::Arc;

use domain::{
    visible_history, DomainError, HistoryLimit, Message, MessageRepository, MessageText,
    MessageType, ParticipantName, Recipient,
};

use crate::{
    clock::Clock, dto::MessageDto, error::ApplicationError, services::ParticipantService,
};

#[derive(Debug, Clone)]
pub struct PostMessageRequest {
    pub from: String,
    pub to: String,
    pub text: String,
    pub message_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct RetrieveMessagesRequest {
    /// 未提供身份时只返回公共消息。
    pub requester: Option<String>,
    pub limit: Option<i64>,
}

pub struct MessageServiceDependencies {
    pub message_repository: Arc<dyn MessageRepository>,
    pub registry: Arc<ParticipantService>,
    pub clock: Arc<dyn Clock>,
}

/// 只追加的消息日志，读取时按请求者过滤可见性。
pub struct MessageService {
    deps: MessageServiceDependencies,
}

impl MessageService {
    pub fn new(deps: MessageServiceDependencies) -> Self {
        Self { deps }
    }

    pub async fn post(&self, request: PostMessageRequest) -> Result<MessageDto, ApplicationError> {
        let from = ParticipantName::parse_as("user", request.from)?;
        let to = Recipient::parse(request.to)?;
        let text = MessageText::new(request.text)?;
        let message_type: MessageType = request.message_type.parse()?;
        let message = Message::post(from, to, text, message_type, self.deps.clock.now())?;

        if !self.deps.registry.exists(&message.from).await? {
            return Err(DomainError::unknown_sender(message.from.as_str()).into());
        }

        let stored = self.deps.message_repository.append(message).await?;
        tracing::debug!(
            from = %stored.from,
            to = %stored.to,
            message_type = %stored.message_type,
            "message appended"
        );
        Ok(MessageDto::from(&stored))
    }

    pub async fn retrieve(
        &self,
        request: RetrieveMessagesRequest,
    ) -> Result<Vec<MessageDto>, ApplicationError> {
        let limit = request.limit.map(HistoryLimit::new).transpose()?;
        let messages = self.deps.message_repository.list_chronological().await?;

        let visible = visible_history(messages, request.requester.as_deref(), limit);
        Ok(visible.iter().map(MessageDto::from).collect())
    }
}
