//! 应用层实现。
//!
//! 这里提供参与者注册表和消息日志两个用例服务，负责输入校验、
//! 调用仓储接口，以及把领域对象转换成对外的 DTO。

pub mod clock;
pub mod dto;
pub mod error;
pub mod services;

pub use clock::{Clock, SystemClock};
pub use dto::{MessageDto, ParticipantDto};
pub use error::ApplicationError;
pub use services::{
    MessageService, MessageServiceDependencies, ParticipantService,
    ParticipantServiceDependencies, PostMessageRequest, RegisterParticipantRequest,
    RetrieveMessagesRequest,
};
