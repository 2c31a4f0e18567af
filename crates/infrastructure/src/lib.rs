//! dnsrelay infrastructure: wire handling, answer table, relay loop and
//! UDP transport.
pub mod dns;
