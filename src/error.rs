use gotham::helpers::http::response::create_response;
use gotham::state::State;
use hyper::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Family tree not found: {0}")]
    TreeNotFound(String),
    #[error("Module not found: {0}")]
    ModuleNotFound(String),
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Access denied")]
    AccessDenied,
    #[error("Invalid form data")]
    InvalidForm(#[from] serde_urlencoded::de::Error),
    #[error("Configuration error")]
    Config(#[from] config::ConfigError),
    #[error("Database connection error")]
    DatabaseConnection(#[from] diesel::ConnectionError),
    #[error("Database error")]
    Database(#[from] diesel::result::Error),
    #[error("Error rendering page")]
    Render(#[from] std::io::Error),
    #[error("Unexpected error")]
    Inner(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn as_response(&self, state: &State) -> http::Response<hyper::Body> {
        if self.status_code().is_server_error() {
            log::error!("{}: {:?}", self, self);
        }
        create_response(
            state,
            self.status_code(),
            mime::TEXT_PLAIN_UTF_8,
            format!("Error: {}", self),
        )
    }

    pub fn status_code(&self) -> StatusCode {
        use Error::*;
        match self {
            TreeNotFound(..) | ModuleNotFound(..) | UserNotFound(..) => StatusCode::NOT_FOUND,
            AccessDenied => StatusCode::FORBIDDEN,
            InvalidForm(..) => StatusCode::BAD_REQUEST,
            Config(..) | DatabaseConnection(..) | Database(..) | Render(..) | Inner(..) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_form_is_bad_request() {
        let err: Error = serde_urlencoded::from_str::<crate::news::DeleteNewsForm>("news_id=abc")
            .unwrap_err()
            .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid form data");
    }

    #[test]
    fn access_denied_is_forbidden() {
        assert_eq!(Error::AccessDenied.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            Error::TreeNotFound("demo".to_owned()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Database(diesel::result::Error::NotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
