//! 基础设施层实现。
//!
//! 提供 PostgreSQL 与内存两种仓储实现，以及按配置装配存储的构建器。

pub mod builder;
pub mod memory;
pub mod repository;
pub mod schema;

pub use builder::{Infrastructure, InfrastructureError};
pub use memory::MemoryStorage;
pub use repository::{create_pg_pool, PgMessageRepository, PgParticipantRepository, PgStorage};
pub use schema::bootstrap_schema;
