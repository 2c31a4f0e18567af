use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed packet: {0}")]
    MalformedPacket(String),

    #[error("Unsupported question count {0}, expected exactly 1")]
    UnsupportedQuestionCount(u16),

    #[error("No session recorded for multiplexed id {0}")]
    UnknownSession(u16),

    #[error("Response from unexpected source {0}")]
    UnexpectedSource(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::IoError(e.to_string())
    }
}
