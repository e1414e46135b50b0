use application::ApplicationError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, RepositoryError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.to_owned(),
                message: message.into(),
            },
        }
    }

    pub fn unprocessable(code: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, code, message)
    }
}

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::Domain(DomainError::InvalidArgument { field, reason }) => {
                ApiError::unprocessable("INVALID_ARGUMENT", format!("{field}: {reason}"))
            }
            ApplicationError::Domain(DomainError::ParticipantAlreadyExists { name }) => {
                ApiError::new(
                    StatusCode::CONFLICT,
                    "PARTICIPANT_EXISTS",
                    format!("participant `{name}` already exists"),
                )
            }
            ApplicationError::Domain(DomainError::ParticipantNotFound { name }) => ApiError::new(
                StatusCode::NOT_FOUND,
                "PARTICIPANT_NOT_FOUND",
                format!("participant `{name}` not found"),
            ),
            ApplicationError::Domain(DomainError::UnknownSender { name }) => {
                ApiError::unprocessable("UNKNOWN_SENDER", format!("sender `{name}` is not registered"))
            }
            ApplicationError::Repository(repo_err) => match repo_err {
                RepositoryError::Conflict => {
                    ApiError::new(StatusCode::CONFLICT, "CONFLICT", "resource already exists")
                }
                RepositoryError::Storage { message } => {
                    tracing::error!(error = %message, "storage failure");
                    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", message)
                }
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // 读取请求体失败（例如超出大小限制）时保留原状态码
            JsonRejection::BytesRejection(_) => {
                ApiError::new(rejection.status(), "INVALID_BODY", rejection.body_text())
            }
            _ => ApiError::unprocessable("INVALID_BODY", rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
