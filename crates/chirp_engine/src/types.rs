use std::fmt;

/// Platform-assigned identifier for an uploaded media blob.
pub type MediaId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Authenticate,
    Upload,
    CreatePost,
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishStage::Authenticate => write!(f, "authentication"),
            PublishStage::Upload => write!(f, "media upload"),
            PublishStage::CreatePost => write!(f, "post creation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    MissingCredentials,
    InvalidUrl,
    Unauthorized,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidResponse,
    MediaUnreadable,
    TooLarge { max_bytes: u64, actual: u64 },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingCredentials => write!(f, "missing credentials"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Unauthorized => write!(f, "unauthorized"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::MediaUnreadable => write!(f, "media unreadable"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "media too large (max {max_bytes}, actual {actual})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishError {
    pub stage: PublishStage,
    pub kind: FailureKind,
    pub message: String,
}

impl PublishError {
    pub fn new(stage: PublishStage, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed ({}): {}", self.stage, self.kind, self.message)
    }
}

impl std::error::Error for PublishError {}
