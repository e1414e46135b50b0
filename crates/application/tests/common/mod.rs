#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use application::{
    Clock, MessageService, MessageServiceDependencies, ParticipantService,
    ParticipantServiceDependencies,
};
use chrono::{FixedOffset, TimeZone};
use domain::{MessageRepository, ParticipantRepository, Timestamp};

/// 手动推进的 UTC 时钟。
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn starting_at(millis: i64) -> Arc<Self> {
        Arc::new(Self {
            millis: AtomicI64::new(millis),
        })
    }

    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        FixedOffset::east_opt(0)
            .and_then(|utc| utc.timestamp_millis_opt(self.millis()).single())
            .expect("valid timestamp")
    }
}

/// 2024-01-01T09:30:00Z
pub const START: i64 = 1_704_101_400_000;

pub fn services(
    participant_repository: Arc<dyn ParticipantRepository>,
    message_repository: Arc<dyn MessageRepository>,
    clock: Arc<dyn Clock>,
) -> (Arc<ParticipantService>, MessageService) {
    let registry = Arc::new(ParticipantService::new(ParticipantServiceDependencies {
        participant_repository,
        clock: clock.clone(),
    }));
    let log = MessageService::new(MessageServiceDependencies {
        message_repository,
        registry: registry.clone(),
        clock,
    });
    (registry, log)
}
