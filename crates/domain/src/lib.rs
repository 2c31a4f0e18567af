//! dnsrelay domain layer
pub mod config;
pub mod errors;
pub mod question;
pub mod record_type;
pub mod response_code;
pub mod session;

pub use config::{CliOverrides, Config};
pub use errors::DomainError;
pub use question::Question;
pub use record_type::RecordType;
pub use response_code::ResponseCode;
pub use session::Session;
