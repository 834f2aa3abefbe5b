use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::parse;
use std::fmt::{self, Display, Formatter};

/// Payload text the portal routes answer with when there is no usable user.
pub const NOT_FOUND_USER: &str = "Not found user";

#[derive(Debug)]
pub enum Error {
    /// The portal could not be reached or did not answer in time.
    Request(reqwest::Error),
    /// The schedule table was there but did not have the expected shape.
    Parse(parse::Error),
    /// The portal sent its login page back after the credentials were posted.
    AuthenticationFailed,
    /// The schedule page has no schedule table.
    ScheduleNotFound,
    /// The request carried no login.
    MissingLogin,
    Config(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this is an answer from the portal about the user, rather than
    /// a failure on our side or the portal's.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed | Self::ScheduleNotFound | Self::MissingLogin
        )
    }
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) => write!(f, "Portal request error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::AuthenticationFailed => write!(f, "Portal rejected the credentials"),
            Self::ScheduleNotFound => write!(f, "Schedule table not found"),
            Self::MissingLogin => write!(f, "No login supplied"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Not-found outcomes are `200 OK` answers carrying `"code": 404`. Anything else
/// is a real HTTP error.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::AuthenticationFailed => (StatusCode::OK, json!({ "code": 404 })),
            Self::ScheduleNotFound | Self::MissingLogin => (
                StatusCode::OK,
                json!({ "code": 404, "text": NOT_FOUND_USER }),
            ),
            Self::Request(_) | Self::Parse(_) => (
                StatusCode::BAD_GATEWAY,
                json!({ "code": 502, "text": self.to_string() }),
            ),
            Self::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "code": 500, "text": self.to_string() }),
            ),
        };
        if self.is_not_found() {
            tracing::debug!("{self}");
        } else {
            tracing::error!("{self}");
        }
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
