use std::fmt::Display;

/// Errors seen by the command line client
#[derive(Debug)]
pub enum TodoError {
    HttpError(String),
    NotFound,
    UnexpectedStatus(u16),
    OperationError(String),
}

impl Display for TodoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpError(e) => {
                write!(f, "{}", e)
            }
            Self::NotFound => {
                write!(f, "Todo Not Found")
            }
            Self::UnexpectedStatus(status) => {
                write!(f, "Non 2xx response: {}", status)
            }
            Self::OperationError(e) => {
                write!(f, "{}", e)
            }
        }
    }
}

impl From<reqwest::Error> for TodoError {
    fn from(e: reqwest::Error) -> Self {
        TodoError::HttpError(e.to_string())
    }
}

impl From<inquire::error::InquireError> for TodoError {
    fn from(e: inquire::error::InquireError) -> Self {
        TodoError::OperationError(e.to_string())
    }
}

impl std::error::Error for TodoError {}
