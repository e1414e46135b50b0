//! 消息历史的可见性过滤与截取。

use std::num::NonZeroUsize;

use crate::errors::DomainError;
use crate::message::Message;

/// 正整数的历史条数上限。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimit(NonZeroUsize);

impl HistoryLimit {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or_else(|| DomainError::invalid_argument("limit", "must be a positive integer"))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// 从按插入顺序排列的消息中取出请求者可见的部分，最新的在前。
///
/// 指定 `limit` 时只保留最近的 `limit` 条可见消息。
pub fn visible_history(
    messages: Vec<Message>,
    requester: Option<&str>,
    limit: Option<HistoryLimit>,
) -> Vec<Message> {
    let take = limit.map_or(usize::MAX, HistoryLimit::get);
    messages
        .into_iter()
        .rev()
        .filter(|message| message.is_visible_to(requester))
        .take(take)
        .collect()
}
