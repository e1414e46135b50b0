use std::sync::Arc;

use application::{
    Clock, MessageService, MessageServiceDependencies, ParticipantService,
    ParticipantServiceDependencies,
};
use domain::{MessageRepository, ParticipantRepository};

#[derive(Clone)]
pub struct AppState {
    pub participant_service: Arc<ParticipantService>,
    pub message_service: Arc<MessageService>,
}

impl AppState {
    pub fn new(
        participant_service: Arc<ParticipantService>,
        message_service: Arc<MessageService>,
    ) -> Self {
        Self {
            participant_service,
            message_service,
        }
    }

    /// 由仓储实现和时钟装配两个服务。
    pub fn from_repositories(
        participant_repository: Arc<dyn ParticipantRepository>,
        message_repository: Arc<dyn MessageRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let participant_service = Arc::new(ParticipantService::new(
            ParticipantServiceDependencies {
                participant_repository,
                clock: clock.clone(),
            },
        ));
        let message_service = Arc::new(MessageService::new(MessageServiceDependencies {
            message_repository,
            registry: participant_service.clone(),
            clock,
        }));

        Self::new(participant_service, message_service)
    }
}
