use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use formats::LoadError;
use serde_json::json;
use tracing::{error, warn};
use viewport::ViewportError;

#[derive(Debug)]
pub enum AppError {
    UnknownCenter(String),
    InvalidViewport(ViewportError),
    Load(LoadError),
    NoCenters,
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownCenter(_) => StatusCode::NOT_FOUND,
            AppError::InvalidViewport(_) => StatusCode::BAD_REQUEST,
            AppError::Load(_) | AppError::NoCenters | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::UnknownCenter(name) => write!(f, "unknown center: {name}"),
            AppError::InvalidViewport(err) => write!(f, "invalid viewport: {err}"),
            AppError::Load(err) => write!(f, "{err}"),
            AppError::NoCenters => write!(f, "no centers configured"),
            AppError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::InvalidViewport(err) => Some(err),
            AppError::Load(err) => Some(err),
            AppError::UnknownCenter(_) | AppError::NoCenters | AppError::Internal(_) => None,
        }
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::Load(err)
    }
}

impl From<ViewportError> for AppError {
    fn from(err: ViewportError) -> Self {
        AppError::InvalidViewport(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{self}");
        } else {
            warn!("{self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use formats::LoadError;
    use viewport::ViewportError;

    use super::AppError;

    #[test]
    fn statuses() {
        assert_eq!(
            AppError::UnknownCenter("Nowhere".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ViewportError::ZoomOutOfRange(99.0)).status(),
            StatusCode::BAD_REQUEST
        );
        let missing = LoadError::io("scuola1.geojson", io::Error::from(io::ErrorKind::NotFound));
        let err = AppError::from(missing);
        assert!(err.to_string().contains("scuola1.geojson"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("load task failed".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
