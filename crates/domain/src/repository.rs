use futures::future::BoxFuture;

use crate::errors::RepositoryError;
use crate::message::Message;
use crate::participant::Participant;
use crate::value_objects::ParticipantName;

pub type RepositoryResult<T> = Result<T, RepositoryError>;
pub type RepositoryFuture<T> = BoxFuture<'static, RepositoryResult<T>>;

#[cfg_attr(feature = "testing", mockall::automock)]
pub trait ParticipantRepository: Send + Sync {
    /// 在同一个存储单元内写入参与者和它的加入通知。
    ///
    /// 名称已存在时返回 [`RepositoryError::Conflict`]，且两条记录都不写入。
    fn register(
        &self,
        participant: Participant,
        join_notice: Message,
    ) -> RepositoryFuture<Participant>;
    fn list(&self) -> RepositoryFuture<Vec<Participant>>;
    fn find_by_name(&self, name: ParticipantName) -> RepositoryFuture<Option<Participant>>;
    /// 更新存活时间，返回是否匹配到参与者。
    fn touch(&self, name: ParticipantName, last_status: i64) -> RepositoryFuture<bool>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
pub trait MessageRepository: Send + Sync {
    fn append(&self, message: Message) -> RepositoryFuture<Message>;
    /// 按插入顺序返回全部消息。
    fn list_chronological(&self) -> RepositoryFuture<Vec<Message>>;
}
