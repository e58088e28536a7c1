#![allow(dead_code)]
pub mod dns_server_mock;
pub mod http_server_mock;

pub use dns_server_mock::{MockDnsServer, MockReply};
pub use http_server_mock::{closed_port, spawn_http_server};
