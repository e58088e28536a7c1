//! dnsprobe infrastructure: wire-format DNS, system resolution and the
//! reqwest-backed HTTP client.
pub mod client;
pub mod dns;
pub mod system;

pub use client::{ClientAssembler, ProbeClient};
pub use dns::UdpUpstreamLookup;
pub use system::TokioSystemResolver;
