pub mod forwarding;
pub mod transport;
pub mod upstream;

pub use forwarding::{MessageBuilder, ResponseParser, UpstreamAnswer};
pub use upstream::UdpUpstreamLookup;
