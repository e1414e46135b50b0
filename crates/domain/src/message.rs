use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{MessageText, ParticipantName, Recipient, Timestamp, WallTime};

/// 参与者加入时系统写入的状态消息正文。
pub const JOIN_NOTICE_TEXT: &str = "entra na sala...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[serde(alias = "message")]
    Broadcast,
    #[serde(alias = "private_message")]
    Private,
    Status,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Broadcast => "broadcast",
            MessageType::Private => "private",
            MessageType::Status => "status",
        }
    }

    /// 参与者可以直接发送的类型；`status` 只由注册流程产生。
    pub fn is_postable(self) -> bool {
        matches!(self, MessageType::Broadcast | MessageType::Private)
    }
}

impl FromStr for MessageType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "broadcast" | "message" => Ok(MessageType::Broadcast),
            "private" | "private_message" => Ok(MessageType::Private),
            "status" => Ok(MessageType::Status),
            other => Err(DomainError::invalid_argument(
                "type",
                format!("unsupported message type `{other}`"),
            )),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 不可变的聊天记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub from: ParticipantName,
    pub to: Recipient,
    pub text: MessageText,
    pub message_type: MessageType,
    pub time: WallTime,
}

impl Message {
    /// 构造一条由参与者发送的消息，拒绝 `status` 类型。
    pub fn post(
        from: ParticipantName,
        to: Recipient,
        text: MessageText,
        message_type: MessageType,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        if !message_type.is_postable() {
            return Err(DomainError::invalid_argument(
                "type",
                "must be one of broadcast, private",
            ));
        }
        Ok(Self {
            from,
            to,
            text,
            message_type,
            time: WallTime::at(&now),
        })
    }

    /// 注册成功时写入的加入通知。
    pub fn join_notice(name: ParticipantName, now: Timestamp) -> Self {
        Self {
            from: name,
            to: Recipient::everyone(),
            text: MessageText::trusted(JOIN_NOTICE_TEXT),
            message_type: MessageType::Status,
            time: WallTime::at(&now),
        }
    }

    /// 公共消息对所有人可见；私聊消息只对收发双方可见。
    /// 未提供请求者身份时只能看到公共消息。
    pub fn is_visible_to(&self, requester: Option<&str>) -> bool {
        match self.message_type {
            MessageType::Broadcast | MessageType::Status => true,
            MessageType::Private => requester
                .is_some_and(|name| self.to.is(name) || self.from.as_str() == name),
        }
    }
}
