use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pokedex_library::error::{Error as LibraryError, ErrorKind as LibraryErrorKind};
use serde_json::json;

/// A failed request, rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        let status = match &*err {
            LibraryErrorKind::CreatureNotFound(_) | LibraryErrorKind::FavoriteNotFound(_) => StatusCode::NOT_FOUND,
            LibraryErrorKind::DuplicateFavorite(_) => StatusCode::BAD_REQUEST,
            LibraryErrorKind::Store | LibraryErrorKind::InvalidRange(..) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = ?err, "Request failed");
        }
        Self {
            status,
            message: (*err).to_string(),
        }
    }
}

/// Bodies that are not JSON, or JSON of the wrong shape, are a 400. A missing
/// `Content-Type` keeps axum's 415.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => StatusCode::BAD_REQUEST,
            _ => rejection.status(),
        };
        Self {
            status,
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LibraryErrorKind::CreatureNotFound(3), StatusCode::NOT_FOUND)]
    #[case(LibraryErrorKind::FavoriteNotFound(3), StatusCode::NOT_FOUND)]
    #[case(LibraryErrorKind::DuplicateFavorite("pidgey".to_string()), StatusCode::BAD_REQUEST)]
    #[case(LibraryErrorKind::Store, StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_mapping(#[case] kind: LibraryErrorKind, #[case] expected: StatusCode) {
        let message = kind.to_string();
        let err = ApiError::from(exn::Exn::from(kind));
        assert_eq!(err.status, expected);
        assert_eq!(err.message, message);
    }
}
