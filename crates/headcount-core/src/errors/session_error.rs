//! Session errors.

use super::error_code::{self, HeadcountErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Incorrect user or password")]
    InvalidCredentials,

    #[error("No user is logged in")]
    NotLoggedIn,
}

impl HeadcountErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => error_code::INVALID_CREDENTIALS,
            Self::NotLoggedIn => error_code::NOT_LOGGED_IN,
        }
    }
}
