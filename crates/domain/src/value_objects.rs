use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// 统一的时间戳类型，保留服务器本地时区偏移以便格式化墙上时间。
pub type Timestamp = DateTime<FixedOffset>;

const WALL_TIME_FORMAT: &str = "%H:%M:%S";

fn non_empty(field: &str, value: String) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_argument(field, "cannot be empty"));
    }
    Ok(value)
}

/// 经过验证的参与者名称。
///
/// 名称区分大小写、按原样保存；仅由空白组成的名称视为空。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        Self::parse_as("name", value)
    }

    /// 与 [`ParticipantName::parse`] 相同，但错误中使用调用方给出的字段名。
    pub fn parse_as(field: &str, value: impl Into<String>) -> Result<Self, DomainError> {
        non_empty(field, value.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 消息接收方：某个参与者的名称，或表示"所有人"的哨兵值。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipient(String);

impl Recipient {
    pub const EVERYONE: &'static str = "Todos";

    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        non_empty("to", value.into()).map(Self)
    }

    pub fn everyone() -> Self {
        Self(Self::EVERYONE.to_owned())
    }

    /// 接收方是否就是给定的参与者。
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 非空的消息正文。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        non_empty("text", value.into()).map(Self)
    }

    pub(crate) fn trusted(value: &str) -> Self {
        Self(value.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `HH:mm:ss` 格式的墙上时间，不含日期和时区。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallTime(String);

impl WallTime {
    pub fn at(timestamp: &Timestamp) -> Self {
        Self(timestamp.format(WALL_TIME_FORMAT).to_string())
    }

    /// 解析存储中读出的墙上时间。
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        NaiveTime::parse_from_str(&value, WALL_TIME_FORMAT)
            .map_err(|err| DomainError::invalid_argument("time", err.to_string()))?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
