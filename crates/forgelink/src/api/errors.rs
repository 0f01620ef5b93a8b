use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use libforgelink::prelude::*;
use serde_json::json;
use tracing::error;

pub(crate) struct ApiError(pub StatusCode, pub String, pub Option<Vec<String>>);

#[derive(Debug, thiserror::Error)]
#[allow(dead_code)]
pub enum AppError {
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("missing resource")]
  ResourceNotFound,
  #[error("server error, please check your logs for more information")]
  ServerError,
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),

  #[error("invalid configuration: {0}")]
  ConfigError(String),
  #[error("error from the manufacturer directory: {0}")]
  DirectoryError(String),

  #[error("invalid query parameter")]
  InvalidQuery(#[from] axum_extra::extract::QueryRejection),
}

impl From<MatchError> for AppError {
  fn from(value: MatchError) -> Self {
    match value {
      MatchError::InvalidOrder(err) => AppError::BadRequest(err),
      MatchError::Directory(err) => AppError::DirectoryError(err),
      MatchError::QuoteLookup(err) => AppError::DirectoryError(err),
      MatchError::OtherError(err) => AppError::OtherError(err),
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    error!(error = ?self, "{}", self.to_string());

    ApiError::from(&self).into_response()
  }
}

impl From<&AppError> for ApiError {
  fn from(value: &AppError) -> Self {
    match value {
      AppError::BadRequest(_) => ApiError(StatusCode::BAD_REQUEST, value.to_string(), None),
      AppError::ResourceNotFound => ApiError(StatusCode::NOT_FOUND, value.to_string(), None),
      AppError::DirectoryError(_) => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), None),
      AppError::InvalidQuery(err) => ApiError(StatusCode::BAD_REQUEST, value.to_string(), Some(vec![err.to_string()])),
      _ => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), None),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let payload = match self.2 {
      Some(details) => json!({
          "message": self.1,
          "details": details,
      }),
      None => json!({
          "message": self.1,
      }),
    };

    (self.0, Json(payload)).into_response()
  }
}
