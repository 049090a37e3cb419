use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::{
    error::Error as StdError,
    fmt::{self},
};

#[derive(Debug)]
pub enum Error {
    /// Registration with a mobile number already present in some backend.
    DuplicateUser,
    /// No record matches the identifier/password pair.
    InvalidCredentials,
    /// The account exists but is still awaiting admin approval.
    PendingApproval,
    /// The account was rejected by an admin.
    RejectedAccount,
    NotFound,
    Validation(String),
    Unauthorized,
    Forbidden,
    /// Uploaded bytes are not a decodable image.
    InvalidFileType,
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
    /// Local record store write would exceed the size ceiling.
    StorageQuotaExceeded { size_bytes: u64 },
    /// Object storage rejected or failed the upload.
    UploadFailed(String),
    /// Opaque backend failure; triggers the local fallback.
    Infrastructure(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Business-rule failures propagate to the caller verbatim and never
    /// trigger the fallback backend. Everything else is fallback-eligible,
    /// including a remote `NotFound`: the record may only exist locally.
    pub fn is_business_rule(&self) -> bool {
        !matches!(self, Error::Infrastructure(_) | Error::NotFound)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateUser => {
                write!(f, "user with this mobile number already exists")
            }
            Error::InvalidCredentials => write!(f, "invalid mobile number or password"),
            Error::PendingApproval => write!(
                f,
                "your account is pending approval, please wait for admin approval"
            ),
            Error::RejectedAccount => {
                write!(f, "your account has been rejected, please contact admin")
            }
            Error::NotFound => write!(f, "not found"),
            Error::Validation(msg) => write!(f, "validation error: {msg}"),
            Error::Unauthorized => write!(f, "unauthorized"),
            Error::Forbidden => write!(f, "forbidden"),
            Error::InvalidFileType => write!(f, "please select a valid image file"),
            Error::FileTooLarge {
                size_bytes,
                max_bytes,
            } => write!(
                f,
                "image size must be less than {}MB, current size: {:.2}MB",
                max_bytes / (1024 * 1024),
                *size_bytes as f64 / 1024.0 / 1024.0
            ),
            Error::StorageQuotaExceeded { size_bytes } => write!(
                f,
                "data too large to store ({:.2}MB), please reduce image size",
                *size_bytes as f64 / 1024.0 / 1024.0
            ),
            Error::UploadFailed(msg) => write!(f, "failed to upload image: {msg}"),
            Error::Infrastructure(msg) => write!(f, "backend error: {msg}"),
        }
    }
}

impl StdError for Error {}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::RowNotFound => Error::NotFound,
            other => Error::Infrastructure(format!("database error: {other}")),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Infrastructure(format!("serde json error: {err}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Infrastructure(format!("io error: {err}"))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::UploadFailed(format!("http error: {err}"))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::DuplicateUser => StatusCode::CONFLICT,
            Error::InvalidCredentials | Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::PendingApproval | Error::RejectedAccount | Error::Forbidden => {
                StatusCode::FORBIDDEN
            }
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Validation(_) | Error::InvalidFileType | Error::FileTooLarge { .. } => {
                StatusCode::BAD_REQUEST
            }
            Error::StorageQuotaExceeded { .. } => StatusCode::INSUFFICIENT_STORAGE,
            Error::UploadFailed(_) => StatusCode::BAD_GATEWAY,
            Error::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (code, message) = match self {
            Error::DuplicateUser => ("DUPLICATE_USER", self.to_string()),
            Error::InvalidCredentials => ("INVALID_CREDENTIALS", self.to_string()),
            Error::PendingApproval => ("PENDING_APPROVAL", self.to_string()),
            Error::RejectedAccount => ("REJECTED_ACCOUNT", self.to_string()),
            Error::NotFound => ("NOT_FOUND", self.to_string()),
            Error::Validation(_) => ("VALIDATION_ERROR", self.to_string()),
            Error::Unauthorized => ("UNAUTHORIZED", self.to_string()),
            Error::Forbidden => ("FORBIDDEN", self.to_string()),
            Error::InvalidFileType => ("INVALID_FILE_TYPE", self.to_string()),
            Error::FileTooLarge { .. } => ("FILE_TOO_LARGE", self.to_string()),
            Error::StorageQuotaExceeded { .. } => ("STORAGE_QUOTA_EXCEEDED", self.to_string()),
            Error::UploadFailed(_) => ("UPLOAD_FAILED", self.to_string()),
            Error::Infrastructure(_) => ("BACKEND_ERROR", self.to_string()),
        };

        let body = ErrorBody { code, message };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rule_errors_never_fall_back() {
        assert!(Error::DuplicateUser.is_business_rule());
        assert!(Error::InvalidCredentials.is_business_rule());
        assert!(Error::PendingApproval.is_business_rule());
        assert!(Error::RejectedAccount.is_business_rule());
        assert!(Error::Validation("bad".into()).is_business_rule());
    }

    #[test]
    fn infrastructure_and_remote_miss_are_fallback_eligible() {
        assert!(!Error::Infrastructure("timeout".into()).is_business_rule());
        assert!(!Error::NotFound.is_business_rule());
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::NotFound));
    }
}
