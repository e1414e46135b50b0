use std::sync::Arc;

use domain::{
    DomainError, Message, Participant, ParticipantName, ParticipantRepository, RepositoryError,
};

use crate::{clock::Clock, dto::ParticipantDto, error::ApplicationError};

#[derive(Debug, Clone)]
pub struct RegisterParticipantRequest {
    pub name: String,
}

pub struct ParticipantServiceDependencies {
    pub participant_repository: Arc<dyn ParticipantRepository>,
    pub clock: Arc<dyn Clock>,
}

/// 参与者注册表：注册、列出参与者，以及刷新存活时间。
pub struct ParticipantService {
    deps: ParticipantServiceDependencies,
}

impl ParticipantService {
    pub fn new(deps: ParticipantServiceDependencies) -> Self {
        Self { deps }
    }

    /// 注册参与者，并在同一存储单元内写入加入通知。
    pub async fn register(
        &self,
        request: RegisterParticipantRequest,
    ) -> Result<ParticipantDto, ApplicationError> {
        let name = ParticipantName::parse(request.name)?;
        let now = self.deps.clock.now();

        let participant = Participant::register(name.clone(), now);
        let join_notice = Message::join_notice(name.clone(), now);

        let stored = self
            .deps
            .participant_repository
            .register(participant, join_notice)
            .await
            .map_err(|err| match err {
                RepositoryError::Conflict => {
                    ApplicationError::from(DomainError::participant_already_exists(name.as_str()))
                }
                other => ApplicationError::from(other),
            })?;

        tracing::info!(participant = %stored.name, "participant joined");
        Ok(ParticipantDto::from(&stored))
    }

    pub async fn list(&self) -> Result<Vec<ParticipantDto>, ApplicationError> {
        let participants = self.deps.participant_repository.list().await?;
        Ok(participants.iter().map(ParticipantDto::from).collect())
    }

    /// 刷新存活时间；名称为空或未注册时返回 `ParticipantNotFound`。
    pub async fn refresh_liveness(&self, name: &str) -> Result<(), ApplicationError> {
        let Ok(participant) = ParticipantName::parse_as("user", name) else {
            return Err(DomainError::participant_not_found(name).into());
        };

        let now = self.deps.clock.now();
        let matched = self
            .deps
            .participant_repository
            .touch(participant.clone(), now.timestamp_millis())
            .await?;
        if !matched {
            return Err(DomainError::participant_not_found(participant.as_str()).into());
        }

        tracing::debug!(participant = %participant, "liveness refreshed");
        Ok(())
    }

    pub async fn exists(&self, name: &ParticipantName) -> Result<bool, ApplicationError> {
        let found = self
            .deps
            .participant_repository
            .find_by_name(name.clone())
            .await?;
        Ok(found.is_some())
    }
}
