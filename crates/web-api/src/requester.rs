use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// 调用方身份所在的请求头。
pub const USER_HEADER: &str = "user";

/// 请求头中携带的参与者名称，未提供时为 `None`。
#[derive(Debug, Clone, Default)]
pub struct Requester(pub Option<String>);

impl Requester {
    pub fn into_name(self) -> String {
        self.0.unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(USER_HEADER)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        Ok(Self(name))
    }
}
