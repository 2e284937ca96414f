use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    Ok,
    NotFound,
    InvalidArgument,
    IteratorExhausted,
    Corruption,
    Unavailable,
    PartialFailure,
}

#[derive(Debug, Clone)]
pub struct Status {
    code: Code,
    message: Option<String>,
}

impl Status {
    pub fn ok() -> Self {
        Status {
            code: Code::Ok,
            message: None,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Status {
            code: Code::NotFound,
            message: Some(msg.into()),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Status {
            code: Code::InvalidArgument,
            message: Some(msg.into()),
        }
    }

    pub fn iterator_exhausted(msg: impl Into<String>) -> Self {
        Status {
            code: Code::IteratorExhausted,
            message: Some(msg.into()),
        }
    }

    pub fn corruption(msg: impl Into<String>) -> Self {
        Status {
            code: Code::Corruption,
            message: Some(msg.into()),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Status {
            code: Code::Unavailable,
            message: Some(msg.into()),
        }
    }

    pub fn partial_failure(msg: impl Into<String>) -> Self {
        Status {
            code: Code::PartialFailure,
            message: Some(msg.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == Code::Ok
    }

    pub fn is_not_found(&self) -> bool {
        self.code == Code::NotFound
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.code == Code::InvalidArgument
    }

    pub fn is_iterator_exhausted(&self) -> bool {
        self.code == Code::IteratorExhausted
    }

    pub fn is_corruption(&self) -> bool {
        self.code == Code::Corruption
    }

    pub fn is_unavailable(&self) -> bool {
        self.code == Code::Unavailable
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{:?}: {}", self.code, msg),
            None => write!(f, "{:?}", self.code),
        }
    }
}

impl std::error::Error for Status {}

impl From<serde_json::Error> for Status {
    fn from(err: serde_json::Error) -> Self {
        Status::corruption(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Status>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ok() {
        let status = Status::ok();
        assert!(status.is_ok());
        assert_eq!(status.code(), &Code::Ok);
    }

    #[test]
    fn test_status_invalid_argument() {
        let status = Status::invalid_argument("count must be positive");
        assert!(status.is_invalid_argument());
        assert_eq!(status.message(), Some("count must be positive"));
    }

    #[test]
    fn test_status_display() {
        let status = Status::iterator_exhausted("scan consumed");
        assert_eq!(status.to_string(), "IteratorExhausted: scan consumed");
    }

    #[test]
    fn test_json_error_maps_to_corruption() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let status = Status::from(err);
        assert!(status.is_corruption());
    }
}
