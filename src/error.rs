use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::num;
use thiserror::Error as ThisError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("permission denied")]
    PermissionDenied,

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    ValidationError(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("jwt error: {0}")]
    JWTError(#[from] jsonwebtoken::errors::Error),

    #[error("dotenv error: {0}")]
    DotEnvError(#[from] dotenv::Error),

    #[error("parse int error: {0}")]
    ParseIntError(#[from] num::ParseIntError),

    #[error("server error: {0}")]
    ServerError(String),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        let code = match &err {
            sqlx::Error::RowNotFound => return Error::NotFound("record".into()),
            sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
            _ => None,
        };
        match code.as_deref() {
            Some(UNIQUE_VIOLATION) => Error::ValidationError("record already exists".into()),
            Some(FOREIGN_KEY_VIOLATION) => Error::NotFound("referenced record".into()),
            _ => Error::DatabaseError(err),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::PermissionDenied => StatusCode::FORBIDDEN,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::ValidationError(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = if status.is_server_error() {
            log::error!("{}", self);
            "internal server error".to_owned()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorBody { error })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::PermissionDenied.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(Error::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::ValidationError("bad".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::NotFound("survey".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::ServerError("boom".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
