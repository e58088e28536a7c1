mod http_transport;
mod system_resolver;
mod upstream_lookup;

pub use http_transport::{HttpRequest, HttpResponse, HttpTransport};
pub use system_resolver::SystemResolver;
pub use upstream_lookup::UpstreamLookup;
