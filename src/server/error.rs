use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    MethodNotAllowed,
    Unprocessable(String),
    DataBaseError(sqlx::Error),
}

pub type ApiResponse<T> = Result<T, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::DataBaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad request",
            ApiError::NotFound => "resource not found",
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::Unprocessable(_) => "unprocessable",
            ApiError::DataBaseError(_) => "internal server error",
        }
    }
}

// details stay in the logs, clients get the short message only
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BadRequest(reason) => tracing::info!("Bad request: {reason}"),
            ApiError::Unprocessable(reason) => tracing::info!("Unprocessable request: {reason}"),
            ApiError::DataBaseError(error) => tracing::error!("Database error: {error}"),
            ApiError::NotFound | ApiError::MethodNotAllowed => {}
        }
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.message(),
        }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> ApiError {
        match error {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                ApiError::Unprocessable(db_error.to_string())
            }
            sqlx::Error::Database(db_error)
                if db_error.is_foreign_key_violation() || db_error.is_check_violation() =>
            {
                ApiError::Unprocessable(db_error.to_string())
            }
            error => ApiError::DataBaseError(error),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> ApiError {
        match rejection {
            JsonRejection::JsonDataError(error) => ApiError::Unprocessable(error.body_text()),
            rejection => ApiError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> ApiError {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> ApiError {
        ApiError::BadRequest(rejection.body_text())
    }
}
