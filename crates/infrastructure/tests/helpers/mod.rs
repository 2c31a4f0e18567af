#![allow(dead_code)]
pub mod mock_transport;
pub mod packets;

pub use mock_transport::MockTransport;
pub use packets::{QueryBuilder, ResponseBuilder};
