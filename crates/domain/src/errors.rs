//! 领域模型错误定义
//!
//! 领域层只区分两类错误：业务规则错误（`DomainError`）和持久化协作方的错误
//! （`RepositoryError`）。

use thiserror::Error;

/// 领域模型错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 输入字段缺失或格式错误
    #[error("invalid argument {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// 参与者名称已被占用
    #[error("participant already exists: {name}")]
    ParticipantAlreadyExists { name: String },

    /// 参与者不存在
    #[error("participant not found: {name}")]
    ParticipantNotFound { name: String },

    /// 消息发送者未注册
    #[error("unknown sender: {name}")]
    UnknownSender { name: String },
}

impl DomainError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn participant_already_exists(name: impl Into<String>) -> Self {
        Self::ParticipantAlreadyExists { name: name.into() }
    }

    pub fn participant_not_found(name: impl Into<String>) -> Self {
        Self::ParticipantNotFound { name: name.into() }
    }

    pub fn unknown_sender(name: impl Into<String>) -> Self {
        Self::UnknownSender { name: name.into() }
    }
}

/// 持久化协作方返回的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// 违反唯一约束
    #[error("entity already exists")]
    Conflict,
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl RepositoryError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
