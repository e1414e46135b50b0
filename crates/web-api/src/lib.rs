//! Web API 层。
//!
//! 提供 Axum 路由，将 HTTP 请求委托给应用层的参与者注册表和消息日志服务。

mod error;
mod requester;
mod routes;
mod state;

pub use error::{ApiError, ErrorBody};
pub use requester::{Requester, USER_HEADER};
pub use routes::{cors_layer, router};
pub use state::AppState;
