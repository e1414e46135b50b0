mod message_service;
mod participant_service;

pub use message_service::{
    MessageService, MessageServiceDependencies, PostMessageRequest, RetrieveMessagesRequest,
};
pub use participant_service::{
    ParticipantService, ParticipantServiceDependencies, RegisterParticipantRequest,
};
