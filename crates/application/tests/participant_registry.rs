mod common;

use std::sync::Arc;

use application::{ApplicationError, RegisterParticipantRequest};
use common::{services, ManualClock, START};
use domain::{
    DomainError, MessageRepository, MessageType, MockMessageRepository,
    MockParticipantRepository, ParticipantName, ParticipantRepository, RepositoryError,
};
use infrastructure::MemoryStorage;

fn request(name: &str) -> RegisterParticipantRequest {
    RegisterParticipantRequest {
        name: name.to_owned(),
    }
}

#[tokio::test]
async fn register_creates_participant_and_join_notice() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::starting_at(START);
    let (registry, _) = services(Arc::new(storage.clone()), Arc::new(storage.clone()), clock);

    let created = registry.register(request("Alice")).await.unwrap();
    assert_eq!(created.name, "Alice");
    assert_eq!(created.last_status, START);

    let listed = registry.list().await.unwrap();
    assert_eq!(listed, vec![created]);

    let log = storage.list_chronological().await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].message_type, MessageType::Status);
    assert_eq!(log[0].from.as_str(), "Alice");
    assert_eq!(log[0].time.as_str(), "09:30:00");
}

#[tokio::test]
async fn duplicate_name_is_a_conflict() {
    let storage = MemoryStorage::new();
    let (registry, _) = services(
        Arc::new(storage.clone()),
        Arc::new(storage.clone()),
        ManualClock::starting_at(START),
    );

    registry.register(request("Alice")).await.unwrap();
    let err = registry.register(request("Alice")).await.unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::ParticipantAlreadyExists { ref name }) if name == "Alice"
    ));

    assert_eq!(registry.list().await.unwrap().len(), 1);
    assert_eq!(storage.list_chronological().await.unwrap().len(), 1);
}

#[tokio::test]
async fn empty_name_is_rejected_without_writes() {
    let storage = MemoryStorage::new();
    let (registry, _) = services(
        Arc::new(storage.clone()),
        Arc::new(storage.clone()),
        ManualClock::starting_at(START),
    );

    for name in ["", "  "] {
        let err = registry.register(request(name)).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidArgument { .. })
        ));
    }

    assert!(registry.list().await.unwrap().is_empty());
    assert!(storage.list_chronological().await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_duplicate_registration_has_single_winner() {
    let storage = MemoryStorage::new();
    let (registry, _) = services(
        Arc::new(storage.clone()),
        Arc::new(storage.clone()),
        ManualClock::starting_at(START),
    );

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            tokio::spawn(async move { registry.register(request("Alice")).await })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => created += 1,
            Err(ApplicationError::Domain(DomainError::ParticipantAlreadyExists { .. })) => {
                conflicts += 1
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(storage.list_chronological().await.unwrap().len(), 1);
}

#[tokio::test]
async fn refresh_liveness_updates_last_status() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::starting_at(START);
    let (registry, _) = services(
        Arc::new(storage.clone()),
        Arc::new(storage.clone()),
        clock.clone(),
    );
    registry.register(request("Alice")).await.unwrap();

    clock.advance(15_000);
    registry.refresh_liveness("Alice").await.unwrap();

    let alice = storage
        .find_by_name(ParticipantName::parse("Alice").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alice.last_status, START + 15_000);
}

#[tokio::test]
async fn refresh_liveness_of_unknown_participant_is_not_found() {
    let storage = MemoryStorage::new();
    let (registry, _) = services(
        Arc::new(storage.clone()),
        Arc::new(storage),
        ManualClock::starting_at(START),
    );

    for name in ["Ghost", ""] {
        let err = registry.refresh_liveness(name).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::ParticipantNotFound { .. })
        ));
    }
}

#[tokio::test]
async fn exists_reflects_registration() {
    let storage = MemoryStorage::new();
    let (registry, _) = services(
        Arc::new(storage.clone()),
        Arc::new(storage),
        ManualClock::starting_at(START),
    );
    let alice = ParticipantName::parse("Alice").unwrap();

    assert!(!registry.exists(&alice).await.unwrap());
    registry.register(request("Alice")).await.unwrap();
    assert!(registry.exists(&alice).await.unwrap());
}

#[tokio::test]
async fn store_failure_during_registration_is_reported() {
    let mut participants = MockParticipantRepository::new();
    participants.expect_register().times(1).returning(|_, _| {
        Box::pin(async { Err(RepositoryError::storage("connection reset by peer")) })
    });

    let (registry, _) = services(
        Arc::new(participants),
        Arc::new(MockMessageRepository::new()),
        ManualClock::starting_at(START),
    );

    let err = registry.register(request("Alice")).await.unwrap_err();
    match err {
        ApplicationError::Repository(RepositoryError::Storage { message }) => {
            assert_eq!(message, "connection reset by peer");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn store_failure_during_listing_is_reported() {
    let mut participants = MockParticipantRepository::new();
    participants
        .expect_list()
        .returning(|| Box::pin(async { Err(RepositoryError::storage("database is down")) }));

    let (registry, _) = services(
        Arc::new(participants),
        Arc::new(MockMessageRepository::new()),
        ManualClock::starting_at(START),
    );

    assert!(matches!(
        registry.list().await,
        Err(ApplicationError::Repository(RepositoryError::Storage { .. }))
    ));
}

#[tokio::test]
async fn listing_twice_is_stable() {
    let storage = MemoryStorage::new();
    let (registry, _) = services(
        Arc::new(storage.clone()),
        Arc::new(storage),
        ManualClock::starting_at(START),
    );
    registry.register(request("Alice")).await.unwrap();
    registry.register(request("Bob")).await.unwrap();

    assert_eq!(registry.list().await.unwrap(), registry.list().await.unwrap());
}
